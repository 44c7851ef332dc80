//! In-memory syntax trees for unit tests.
//!
//! Builds trees by hand so that scope-graph and expansion tests do not
//! depend on how a particular grammar version shapes its nodes.

use crate::core::lines::LineStore;
use crate::core::scope_graph::{SyntaxNode, build_scopes};

#[derive(Debug, Clone)]
pub struct FakeNode {
    named: bool,
    start: usize,
    end: usize,
    children: Vec<FakeNode>,
}

impl FakeNode {
    pub fn named(start: usize, end: usize, children: Vec<FakeNode>) -> Self {
        Self {
            named: true,
            start,
            end,
            children,
        }
    }

    /// Punctuation or keyword token.
    pub fn token(line: usize) -> Self {
        Self {
            named: false,
            start: line,
            end: line,
            children: Vec::new(),
        }
    }

    /// Unnamed node with children (transparent wrapper).
    pub fn wrapper(start: usize, end: usize, children: Vec<FakeNode>) -> Self {
        Self {
            named: false,
            start,
            end,
            children,
        }
    }

    /// Named single-line leaf.
    pub fn leaf(line: usize) -> Self {
        Self::named(line, line, Vec::new())
    }
}

impl<'a> SyntaxNode for &'a FakeNode {
    fn is_named(&self) -> bool {
        self.named
    }

    fn start_line(&self) -> usize {
        self.start
    }

    fn end_line(&self) -> usize {
        self.end
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        let node: &'a FakeNode = *self;
        node.children.get(index)
    }
}

/// Build a store for `text` annotated from `root`.
pub fn store_for(text: &str, root: &FakeNode) -> LineStore {
    let mut store = LineStore::new(text);
    build_scopes(&mut store, root);
    store
}

/// Eleven lines shaped like a small Go file:
/// `first` spans 2–4, `main` spans 6–10 with an `if` on 7–9 and a call on 8.
pub const GO_SHAPED_SOURCE: &str = "package main // 0

func first() { // 2
	// comment   // 3
} // 4

func main() { // 6
	if true { // 7
		fmt.Println(\"target\") // 8
	} // 9
} // 10";

pub fn go_shaped_tree() -> FakeNode {
    FakeNode::named(
        0,
        10,
        vec![
            FakeNode::named(0, 0, vec![FakeNode::token(0), FakeNode::leaf(0)]),
            FakeNode::leaf(0),
            FakeNode::named(
                2,
                4,
                vec![
                    FakeNode::token(2),
                    FakeNode::leaf(2),
                    FakeNode::leaf(2),
                    FakeNode::named(
                        2,
                        4,
                        vec![FakeNode::token(2), FakeNode::leaf(3), FakeNode::token(4)],
                    ),
                ],
            ),
            FakeNode::named(
                6,
                10,
                vec![
                    FakeNode::token(6),
                    FakeNode::leaf(6),
                    FakeNode::leaf(6),
                    FakeNode::named(
                        6,
                        10,
                        vec![
                            FakeNode::token(6),
                            FakeNode::named(
                                7,
                                9,
                                vec![
                                    FakeNode::token(7),
                                    FakeNode::leaf(7),
                                    FakeNode::named(
                                        7,
                                        9,
                                        vec![
                                            FakeNode::token(7),
                                            FakeNode::named(8, 8, vec![FakeNode::leaf(8)]),
                                            FakeNode::token(9),
                                        ],
                                    ),
                                ],
                            ),
                            FakeNode::token(10),
                        ],
                    ),
                ],
            ),
        ],
    )
}

/// Thirteen lines: `main` spans 2–11 with statements on 5 and 9 and comments
/// on every other body line; line 12 is the empty line after the final '\n'.
pub const LONG_BODY_SOURCE: &str = "package main // 0
// 1
func main() { // 2
	// 3
	// 4
	fmt.Println(\"one\") // 5
	// 6
	// 7
	// 8
	fmt.Println(\"two\") // 9
	// 10
} // 11
";

pub fn long_body_tree() -> FakeNode {
    let mut body = vec![FakeNode::token(2)];
    body.extend((3..=10).map(FakeNode::leaf));
    body.push(FakeNode::token(11));

    FakeNode::named(
        0,
        11,
        vec![
            FakeNode::named(0, 0, vec![FakeNode::token(0), FakeNode::leaf(0)]),
            FakeNode::leaf(1),
            FakeNode::named(
                2,
                11,
                vec![
                    FakeNode::token(2),
                    FakeNode::leaf(2),
                    FakeNode::leaf(2),
                    FakeNode::named(2, 11, body),
                ],
            ),
        ],
    )
}

/// Two sibling functions: `first` on 1–3, `second` on 5–7.
pub const TWO_FUNCTIONS_SOURCE: &str = "package main // 0
func first() { // 1
	// target 1 // 2
} // 3

func second() { // 5
	// target 2 // 6
} // 7
";

pub fn two_functions_tree() -> FakeNode {
    FakeNode::named(
        0,
        7,
        vec![
            FakeNode::named(0, 0, vec![FakeNode::token(0), FakeNode::leaf(0)]),
            FakeNode::named(
                1,
                3,
                vec![
                    FakeNode::token(1),
                    FakeNode::named(
                        1,
                        3,
                        vec![FakeNode::token(1), FakeNode::leaf(2), FakeNode::token(3)],
                    ),
                ],
            ),
            FakeNode::named(
                5,
                7,
                vec![
                    FakeNode::token(5),
                    FakeNode::named(
                        5,
                        7,
                        vec![FakeNode::token(5), FakeNode::leaf(6), FakeNode::token(7)],
                    ),
                ],
            ),
        ],
    )
}
