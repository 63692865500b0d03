//! The file-system blueprint and its materialization

pub mod builder;
pub mod tree;

pub use builder::build;
pub use tree::{insert_at_path, NodeKind, StructureNode};
