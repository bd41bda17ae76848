pub mod file_filter;
pub mod tree_walker;

pub use file_filter::{first_dot_suffix, validate_extension, ExtensionFilter};
pub use tree_walker::TreeWalker;
