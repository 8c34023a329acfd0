//! Pre-rasterization content sanitation.
//!
//! The preview tree embeds placeholder nodes for the header band and the
//! watermark so the user sees the overlays in place. The compositor stamps
//! the real assets after rasterization, so the rasterizer must not draw the
//! placeholders: the tree is copied and those nodes dropped, recursively,
//! before handoff. The input is never mutated, and sanitizing an
//! already-sanitized tree is a no-op.

use crate::content::tree::{BlockKind, ContentBlock, ContentTree};

pub fn sanitize(tree: &ContentTree) -> ContentTree {
    ContentTree {
        blocks: sanitize_blocks(&tree.blocks),
    }
}

fn sanitize_blocks(blocks: &[ContentBlock]) -> Vec<ContentBlock> {
    blocks
        .iter()
        .filter_map(|block| match &block.kind {
            BlockKind::OverlayPlaceholder { .. } => None,
            BlockKind::Section { title, children } => Some(ContentBlock {
                kind: BlockKind::Section {
                    title: title.clone(),
                    children: sanitize_blocks(children),
                },
                atomic: block.atomic,
            }),
            _ => Some(block.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tree::OverlayKind;

    fn preview_tree() -> ContentTree {
        ContentTree::new(vec![
            ContentBlock::overlay_placeholder(OverlayKind::Watermark),
            ContentBlock::overlay_placeholder(OverlayKind::Header),
            ContentBlock::heading("Jane Doe", 1),
            ContentBlock::section(
                "Skills",
                vec![
                    ContentBlock::bullet("Rust"),
                    ContentBlock::overlay_placeholder(OverlayKind::Watermark),
                    ContentBlock::bullet("PostgreSQL"),
                ],
            ),
        ])
    }

    #[test]
    fn test_placeholders_removed_at_every_depth() {
        let sanitized = sanitize(&preview_tree());
        fn has_placeholder(blocks: &[ContentBlock]) -> bool {
            blocks.iter().any(|b| match &b.kind {
                BlockKind::OverlayPlaceholder { .. } => true,
                BlockKind::Section { children, .. } => has_placeholder(children),
                _ => false,
            })
        }
        assert!(!has_placeholder(&sanitized.blocks));
        // Everything else survives in order.
        assert_eq!(sanitized.leaf_count(), 3);
        assert!(matches!(sanitized.blocks[0].kind, BlockKind::Heading { .. }));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let tree = preview_tree();
        let before = tree.clone();
        let _ = sanitize(&tree);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize(&preview_tree());
        let twice = sanitize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_tree_stays_empty() {
        let sanitized = sanitize(&ContentTree::default());
        assert!(sanitized.blocks.is_empty());
    }
}
