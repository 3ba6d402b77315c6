use std::cmp::Reverse;

use crate::portfolio::Project;

/// Higher `order` first, then by source file name.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct Order {
    order: Reverse<i64>,
    src_key: String,
}

impl Order {
    pub fn new(project: &Project, src_key: &str) -> Self {
        Self {
            order: Reverse(project.order),
            src_key: src_key.to_owned(),
        }
    }
}
