pub mod error;
pub mod logging;
pub mod modal;
pub mod output;
pub mod portfolio;
mod util;

pub use error::{Error, Result};
