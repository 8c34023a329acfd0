//! Content tree — the renderer-facing document model.
//!
//! An ordered, possibly nested sequence of renderable blocks. Each block
//! carries an atomicity flag; the rasterizer must place an atomic block
//! entirely on one page. Overlay placeholders exist only for the on-screen
//! preview and are stripped before rasterization (`render::sanitize`).

use serde::{Deserialize, Serialize};

/// Which decorative overlay a preview placeholder stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    Header,
    Watermark,
}

/// One renderable block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Heading {
        text: String,
        /// 1 = document title, 2 = section entry.
        level: u8,
    },
    Paragraph {
        text: String,
    },
    Bullet {
        text: String,
    },
    KeyValue {
        label: String,
        value: String,
    },
    Section {
        title: String,
        children: Vec<ContentBlock>,
    },
    /// Preview-only stand-in for a decorative overlay. Must never reach the
    /// rasterizer; the compositor stamps the real asset after rasterization.
    OverlayPlaceholder {
        kind: OverlayKind,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(flatten)]
    pub kind: BlockKind,
    /// True when the block must not be split across a page boundary.
    pub atomic: bool,
}

impl ContentBlock {
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self {
            kind: BlockKind::Heading {
                text: text.into(),
                level,
            },
            atomic: true,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Paragraph { text: text.into() },
            atomic: false,
        }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Bullet { text: text.into() },
            atomic: true,
        }
    }

    pub fn key_value(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::KeyValue {
                label: label.into(),
                value: value.into(),
            },
            atomic: true,
        }
    }

    pub fn section(title: impl Into<String>, children: Vec<ContentBlock>) -> Self {
        Self {
            kind: BlockKind::Section {
                title: title.into(),
                children,
            },
            atomic: false,
        }
    }

    pub fn overlay_placeholder(kind: OverlayKind) -> Self {
        Self {
            kind: BlockKind::OverlayPlaceholder { kind },
            atomic: true,
        }
    }
}

/// The full renderable document. The engine reads it read-only; sanitation
/// produces a fresh copy, so callers keep ownership of theirs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTree {
    pub blocks: Vec<ContentBlock>,
}

impl ContentTree {
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    /// Number of renderable leaf blocks (sections are containers, not leaves;
    /// overlay placeholders do not count).
    pub fn leaf_count(&self) -> usize {
        fn count(blocks: &[ContentBlock]) -> usize {
            blocks
                .iter()
                .map(|b| match &b.kind {
                    BlockKind::Section { children, .. } => count(children),
                    BlockKind::OverlayPlaceholder { .. } => 0,
                    _ => 1,
                })
                .sum()
        }
        count(&self.blocks)
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_count() == 0
    }
}
