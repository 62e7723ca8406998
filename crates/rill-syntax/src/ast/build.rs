//! Parse-tree → AST synthesis.
//!
//! One pass over the parse tree, driven entirely by the markers and
//! promotion tables in the grammar:
//!
//! - `Drop` children vanish.
//! - `Splice` children hand their own children straight to the parent,
//!   which is how `a; b; c;` becomes three children of `Program` with no
//!   list wrapper in between.
//! - The child at the resolved promotion index is built *into* the parent
//!   node: it supplies the parent's kind (and leaf token), and its children
//!   land on the parent directly. `(1 + 2)` therefore synthesizes as a
//!   plain `Add` with no parenthesis wrapper.
//! - Every other `Promote` child becomes a fresh node of its own resolved
//!   kind, unless that resolution comes out empty, in which case it
//!   contributes nothing at all.
//!
//! Promotion resolution follows the declared index through `Promote`
//! chains, retrying at the fallback index when a candidate resolves to
//! nothing. Results are memoized on each parse node. Fallback positions
//! that point at each other would chase forever; a revisited position
//! resolves to empty instead.

use super::{AstFault, AstKind, AstNode};
use crate::grammar::{Grammar, Marker, Production, Promotion, Symbol, ValidGrammar};
use crate::lexer::TokenKind;
use crate::parser::{ParseFault, ParseNode, Resolved};

/// Builds the AST for a completed parse tree. Always returns a tree;
/// parse failures surface as fault tags on the affected nodes.
pub fn synthesize(grammar: &ValidGrammar, root: &ParseNode) -> AstNode {
    let builder = Builder { grammar };
    let mut program = AstNode::new(AstKind::Program);
    builder.fill(root, &mut program, None);
    program
}

struct Builder<'g> {
    grammar: &'g Grammar,
}

impl Builder<'_> {
    fn production(&self, node: &ParseNode) -> Option<&Production> {
        let Symbol::NonTerminal(nt) = node.symbol else {
            return None;
        };
        Some(self.grammar.production(nt, node.production?))
    }

    /// Resolves which child (if any) supplies `node`'s kind. Memoized on
    /// the node, so repeated queries are O(1).
    fn resolve(&self, node: &ParseNode) -> Resolved {
        if let Some(cached) = node.resolved.get() {
            return cached;
        }
        let resolved = self.resolve_uncached(node);
        node.resolved.set(Some(resolved));
        resolved
    }

    fn resolve_uncached(&self, node: &ParseNode) -> Resolved {
        let Some(production) = self.production(node) else {
            return Resolved::Failed;
        };
        let Some(promotion) = production.promotion() else {
            return Resolved::Failed;
        };
        let Promotion::Child(start) = promotion else {
            return Resolved::Empty;
        };

        let mut index = start;
        let mut tried = Vec::new();
        loop {
            if tried.contains(&index) {
                // Fallbacks that point at each other: resolve to nothing.
                return Resolved::Empty;
            }
            tried.push(index);

            match production.marker(index) {
                Marker::Node(kind) => return Resolved::Kind { index, kind },
                Marker::Promote => match self.resolve(&node.children[index]) {
                    Resolved::Kind { kind, .. } => return Resolved::Kind { index, kind },
                    Resolved::Empty => match production.fallback_for(index) {
                        Some(alt) => index = alt,
                        None => return Resolved::Failed,
                    },
                    Resolved::Failed => return Resolved::Failed,
                },
                Marker::Drop | Marker::Splice => return Resolved::Failed,
            }
        }
    }

    /// Builds an ordinary `Promote` child as its own node. `None` means
    /// the child resolved to nothing and the parent must not append a
    /// placeholder for it.
    fn build_node(&self, node: &ParseNode) -> Option<AstNode> {
        match self.resolve(node) {
            Resolved::Empty => None,
            Resolved::Failed => Some(self.error_node(node)),
            Resolved::Kind { index, kind } => {
                let mut out = AstNode::new(kind);
                self.fill(node, &mut out, Some(index));
                Some(out)
            }
        }
    }

    fn error_node(&self, node: &ParseNode) -> AstNode {
        let mut out = AstNode::new(AstKind::Error);
        out.token = node.token;
        out.fault = Some(match node.fault {
            Some(ParseFault::NoAlternative) => AstFault::NoProduction,
            Some(_) => AstFault::ChildError,
            None => AstFault::PromotionUnresolved,
        });
        out
    }

    /// Populates `target` from `node`'s children. `promoted` is the child
    /// index that supplies the parent's kind; that child is built into
    /// `target` in place rather than appended.
    fn fill(&self, node: &ParseNode, target: &mut AstNode, promoted: Option<usize>) {
        match node.fault {
            Some(ParseFault::NoAlternative) => {
                merge_fault(target, AstFault::NoProduction);
                if target.token.is_none() {
                    target.token = node.token;
                }
                return;
            }
            Some(ParseFault::ChildFailed) => merge_fault(target, AstFault::ChildError),
            Some(ParseFault::UnexpectedToken) | Some(ParseFault::SiblingSkipped) => return,
            None => {}
        }

        let Some(production) = self.production(node) else {
            merge_fault(target, AstFault::NoProduction);
            return;
        };

        for (index, child) in node.children.iter().enumerate() {
            if child.fault == Some(ParseFault::SiblingSkipped) {
                continue;
            }
            if promoted == Some(index) {
                self.fill_promoted(child, production.marker(index), target);
                continue;
            }
            match production.marker(index) {
                Marker::Drop => {}
                Marker::Splice => self.splice(child, target),
                Marker::Promote => {
                    if let Some(built) = self.build_node(child) {
                        target.children.push(built);
                    }
                }
                Marker::Node(kind) => match child.symbol {
                    Symbol::Terminal(_) => target.children.push(leaf(kind, child)),
                    Symbol::NonTerminal(_) => {
                        let mut out = AstNode::new(kind);
                        self.fill(child, &mut out, None);
                        target.children.push(out);
                    }
                },
            }
        }
    }

    /// The promotion-index child: supplies the parent's kind, leaf token,
    /// and children, all in place.
    fn fill_promoted(&self, child: &ParseNode, marker: Marker, target: &mut AstNode) {
        match (marker, child.symbol) {
            (Marker::Node(_), Symbol::Terminal(_)) => {
                if target.token.is_none() {
                    target.token = child.token;
                }
                if let Some(fault) = leaf_fault(child) {
                    merge_fault(target, fault);
                }
            }
            (Marker::Node(_), Symbol::NonTerminal(_)) => self.fill(child, target, None),
            (Marker::Promote, _) => match self.resolve(child) {
                Resolved::Kind { index, .. } => self.fill(child, target, Some(index)),
                Resolved::Empty => {}
                Resolved::Failed => {
                    merge_fault(
                        target,
                        match child.fault {
                            Some(ParseFault::NoAlternative) => AstFault::NoProduction,
                            Some(_) => AstFault::ChildError,
                            None => AstFault::PromotionUnresolved,
                        },
                    );
                    if target.token.is_none() {
                        target.token = child.token;
                    }
                }
            },
            (Marker::Drop | Marker::Splice, _) => {
                merge_fault(target, AstFault::PromotionUnresolved);
            }
        }
    }

    /// A `Splice` child: its children are appended directly to `target`,
    /// so an empty list contributes exactly nothing.
    fn splice(&self, node: &ParseNode, target: &mut AstNode) {
        if node.fault == Some(ParseFault::NoAlternative) {
            merge_fault(target, AstFault::ChildError);
            return;
        }
        self.fill(node, target, None);
    }
}

/// Leaf AST node for a terminal parse node.
fn leaf(kind: AstKind, node: &ParseNode) -> AstNode {
    let mut out = AstNode::new(kind);
    out.token = node.token;
    out.fault = leaf_fault(node);
    out
}

fn leaf_fault(node: &ParseNode) -> Option<AstFault> {
    match node.fault {
        None => None,
        Some(ParseFault::UnexpectedToken) => {
            if node.token.is_some_and(|t| t.kind == TokenKind::Garbage) {
                Some(AstFault::TokenError)
            } else {
                Some(AstFault::MissingToken)
            }
        }
        Some(_) => Some(AstFault::ChildError),
    }
}

fn merge_fault(target: &mut AstNode, fault: AstFault) {
    if target.fault.is_none() {
        target.fault = Some(fault);
    }
}
