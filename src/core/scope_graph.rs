//! Scope graph construction: reduces a syntax tree to per-line block and
//! parent annotations on a [`LineStore`].
//!
//! Walk order is pre-order and must stay that way:
//! - "largest wins" keeps the first of equally sized blocks on a line, and
//!   outer nodes are seen before the nodes they wrap;
//! - "first writer wins" gives each line the nearest parent because a node
//!   claims its children before any descendant gets the chance.
//!
//! The walk uses an explicit stack so deeply nested trees cannot overflow
//! the call stack. Each frame remembers which child comes next, which keeps
//! the exact interleaving of a recursive walk (claim child i, walk child i,
//! claim child i + 1, ...).

use tracing::{debug, instrument};

use crate::core::line_set::LineSet;
use crate::core::lines::LineStore;

/// Read-only view of a syntax tree node.
pub trait SyntaxNode: Copy {
    /// Named nodes are grammar constructs; unnamed ones are tokens.
    fn is_named(&self) -> bool;

    /// 0-based first line.
    fn start_line(&self) -> usize;

    /// 0-based last line, inclusive.
    fn end_line(&self) -> usize;

    fn child_count(&self) -> usize;

    fn child(&self, index: usize) -> Option<Self>;
}

impl SyntaxNode for tree_sitter::Node<'_> {
    fn is_named(&self) -> bool {
        tree_sitter::Node::is_named(self)
    }

    fn start_line(&self) -> usize {
        self.start_position().row
    }

    fn end_line(&self) -> usize {
        let start = self.start_position();
        let end = self.end_position();

        // An end point at column 0 stops before any byte of that row.
        if end.column == 0 && end.row > start.row {
            end.row - 1
        } else {
            end.row
        }
    }

    fn child_count(&self) -> usize {
        tree_sitter::Node::child_count(self)
    }

    fn child(&self, index: usize) -> Option<Self> {
        tree_sitter::Node::child(self, index.try_into().ok()?)
    }
}

struct Frame<N> {
    node: N,
    start: usize,
    named: bool,
    next_child: usize,
}

/// Visit a node on the way down: record its block when it is named.
fn enter<N: SyntaxNode>(store: &mut LineStore, node: N) -> Frame<N> {
    let start = node.start_line();
    let named = node.is_named();

    if named {
        store.record_block(start, node.end_line());
    }

    Frame {
        node,
        start,
        named,
        next_child: 0,
    }
}

/// Annotate every line of `store` with its block and parent.
///
/// Never fails: spans outside the store are skipped and zero-size nodes
/// only take part in parent assignment.
#[instrument(level = "debug", skip_all, fields(lines = store.len()))]
pub fn build_scopes<N: SyntaxNode>(store: &mut LineStore, root: N) {
    let mut stack = vec![enter(store, root)];
    let mut visited = 1usize;

    while let Some(frame) = stack.last_mut() {
        if frame.next_child >= frame.node.child_count() {
            stack.pop();
            continue;
        }

        let index = frame.next_child;
        frame.next_child += 1;

        let Some(child) = frame.node.child(index) else {
            continue;
        };

        // Only named nodes claim, and only named children get claimed;
        // tokens such as a lone `}` or `else` stay parentless.
        if frame.named && child.is_named() {
            let child_line = child.start_line();
            if child_line != frame.start {
                store.claim_parent(child_line, frame.start);
            }
        }

        let child_frame = enter(store, child);
        stack.push(child_frame);
        visited += 1;
    }

    debug!(nodes = visited, "scope graph built");
}

/// Start lines of the root's named children that span several lines.
pub fn top_level_lines<N: SyntaxNode>(store: &LineStore, root: N) -> LineSet {
    (0..root.child_count())
        .filter_map(|index| root.child(index))
        .filter(|child| child.is_named() && child.end_line() > child.start_line())
        .map(|child| child.start_line())
        .filter(|&line| line < store.len())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lines::Block;
    use crate::core::test_tree::{FakeNode, GO_SHAPED_SOURCE, go_shaped_tree, store_for};
    use crate::parsers::SourceLanguage;
    use std::path::Path;

    fn block(start: usize, end: usize) -> Option<Block> {
        Some(Block { start, end })
    }

    #[test]
    fn test_blocks_and_parents_of_go_shaped_tree() {
        let store = store_for(GO_SHAPED_SOURCE, &go_shaped_tree());

        assert_eq!(store.scope_at(0).block, block(0, 10));
        assert_eq!(store.scope_at(2).block, block(2, 4));
        assert_eq!(store.scope_at(6).block, block(6, 10));
        assert_eq!(store.scope_at(7).block, block(7, 9));
        assert_eq!(store.scope_at(8).block, None);

        assert_eq!(store.scope_at(0).parent, None);
        assert_eq!(store.scope_at(2).parent, Some(0));
        assert_eq!(store.scope_at(3).parent, Some(2));
        assert_eq!(store.scope_at(6).parent, Some(0));
        assert_eq!(store.scope_at(7).parent, Some(6));
        assert_eq!(store.scope_at(8).parent, Some(7));

        // closing braces are bare tokens
        assert_eq!(store.scope_at(4).parent, None);
        assert_eq!(store.scope_at(9).parent, None);
        assert_eq!(store.scope_at(10).parent, None);

        // blank lines start nothing and belong to nothing
        assert_eq!(store.scope_at(5).parent, None);
        assert_eq!(store.scope_at(5).block, None);
    }

    #[test]
    fn test_outermost_block_wins_on_shared_start_line() {
        // A declaration wrapping a body that starts on the same line but
        // ends earlier; the wrapper is visited first and is larger.
        let tree = FakeNode::named(
            0,
            5,
            vec![FakeNode::named(
                0,
                5,
                vec![FakeNode::named(0, 3, vec![FakeNode::token(0), FakeNode::token(3)])],
            )],
        );
        let store = store_for("0\n1\n2\n3\n4\n5", &tree);
        assert_eq!(store.scope_at(0).block, block(0, 5));
    }

    #[test]
    fn test_larger_inner_node_replaces_smaller_outer_one() {
        let tree = FakeNode::wrapper(
            0,
            6,
            vec![FakeNode::named(
                1,
                2,
                vec![FakeNode::named(1, 6, vec![FakeNode::token(6)])],
            )],
        );
        let store = store_for("0\n1\n2\n3\n4\n5\n6", &tree);
        assert_eq!(store.scope_at(1).block, block(1, 6));
    }

    #[test]
    fn test_unnamed_wrappers_do_not_claim_children() {
        let tree = FakeNode::named(
            0,
            4,
            vec![FakeNode::wrapper(
                1,
                4,
                vec![FakeNode::named(1, 3, vec![FakeNode::leaf(2)]), FakeNode::leaf(4)],
            )],
        );
        let store = store_for("0\n1\n2\n3\n4", &tree);

        // The wrapper itself is not claimed and claims nothing.
        assert_eq!(store.scope_at(1).parent, None);
        assert_eq!(store.scope_at(4).parent, None);
        assert_eq!(store.scope_at(2).parent, Some(1));
    }

    #[test]
    fn test_nearest_parent_claims_first() {
        // Line 3 is a child of both the block starting on 2 and the root.
        // The inner claim happens first in walk order.
        let tree = FakeNode::named(
            0,
            4,
            vec![
                FakeNode::named(2, 4, vec![FakeNode::leaf(3), FakeNode::token(4)]),
                FakeNode::leaf(3),
            ],
        );
        let store = store_for("0\n1\n2\n3\n4", &tree);
        assert_eq!(store.scope_at(3).parent, Some(2));
        assert_eq!(store.scope_at(4).parent, None);
    }

    #[test]
    fn test_token_only_line_gets_no_parent() {
        let tree = FakeNode::named(
            0,
            4,
            vec![FakeNode::named(
                1,
                4,
                vec![FakeNode::token(1), FakeNode::leaf(2), FakeNode::token(4)],
            )],
        );
        let store = store_for("0\n1\n2\n3\n4", &tree);

        assert_eq!(store.scope_at(2).parent, Some(1));
        assert_eq!(store.scope_at(1).parent, Some(0));
        assert_eq!(store.scope_at(4).parent, None);
    }

    #[test]
    fn test_spans_outside_store_are_ignored() {
        let tree = FakeNode::named(0, 50, vec![FakeNode::named(20, 30, vec![])]);
        let store = store_for("0\n1\n2", &tree);
        assert_eq!(store.scope_at(0).block, block(0, 2));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_deep_tree_walks_every_level() {
        let depth = 2_000;
        let mut node = FakeNode::leaf(depth);
        for line in (0..depth).rev() {
            node = FakeNode::named(line, depth, vec![node]);
        }

        let text = vec!["x"; depth + 1].join("\n");
        let store = store_for(&text, &node);
        assert_eq!(store.scope_at(depth).parent, Some(depth - 1));
        assert_eq!(store.scope_at(1).block, block(1, depth));
    }

    #[test]
    fn test_top_level_lines_are_multi_line_root_children() {
        let tree = go_shaped_tree();
        let store = store_for(GO_SHAPED_SOURCE, &tree);
        assert_eq!(top_level_lines(&store, &tree).to_vec(), vec![2, 6]);
    }

    #[test]
    fn test_real_go_tree_nests_if_inside_function() -> anyhow::Result<()> {
        let source = "package main

import \"fmt\"

func main() {
\tif true {
\t\tfmt.Println(\"inside\")
\t}
}
";
        let tree = SourceLanguage::Go.parse(source, Path::new("test.go"))?;
        let mut store = LineStore::new(source);
        build_scopes(&mut store, tree.root_node());

        assert_eq!(store.len(), 10);
        assert_eq!(store.scope_at(4).block.map(|b| b.end), Some(8));
        assert_eq!(store.scope_at(5).block.map(|b| b.end), Some(7));
        assert_eq!(store.scope_at(5).parent, Some(4));
        assert_eq!(store.scope_at(6).parent, Some(5));

        let top = top_level_lines(&store, tree.root_node());
        assert!(top.contains(4));
        Ok(())
    }
}
