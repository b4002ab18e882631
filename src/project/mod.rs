pub mod fixture;
pub mod tree;

pub use tree::{Entry, Forest, Node, NodeKind};
