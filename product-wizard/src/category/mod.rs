//! Category hierarchy and selection

mod selection;
mod tree;

pub use selection::CategorySelection;
pub use tree::CategoryTree;
