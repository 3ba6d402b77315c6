//! The project detail modal: which project is shown, in which view, at which slide,
//! and how pointer and key events move it between states.

mod key;
mod session;
mod state;

pub use key::*;
pub use session::*;
pub use state::*;
