// Renderable content model: the tree the engine consumes, plus the builder
// that produces it from a structured résumé record.

pub mod builder;
pub mod tree;

pub use builder::build_tree;
pub use tree::{BlockKind, ContentBlock, ContentTree, OverlayKind};
