mod check;
mod common;
mod generate;
mod tree;

pub use check::*;
pub use common::*;
pub use generate::*;
pub use tree::*;
