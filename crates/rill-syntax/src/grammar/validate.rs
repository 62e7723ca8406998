//! Structural validation of grammar tables.
//!
//! A grammar must pass [`check`] before it can be parsed with: the engine's
//! single-token lookahead and left-recursion unrolling are only sound for
//! grammars that are prefix-free, have at most one direct left recursion
//! per rule, and no indirect left recursion. [`ValidGrammar`] is the proof
//! token: the parse engine only accepts validated grammars.

use std::collections::VecDeque;
use std::ops::Deref;

use indexmap::IndexMap;

use super::{Grammar, NonTerminal, Production, Promotion, Symbol};
use crate::lexer::{TokenKind, TokenSet};

/// A grammar that passed [`check`].
#[derive(Debug, Clone)]
pub struct ValidGrammar {
    grammar: Grammar,
}

impl Deref for ValidGrammar {
    type Target = Grammar;

    fn deref(&self) -> &Grammar {
        &self.grammar
    }
}

/// One violated structural property.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("{0:?} is referenced but has no rule")]
    MissingRule(NonTerminal),

    #[error(
        "{nt:?}: alternatives {first} and {second} can both start with {terminal:?}; \
         selection by one-token lookahead is ambiguous"
    )]
    PrefixConflict {
        nt: NonTerminal,
        first: usize,
        second: usize,
        terminal: TokenKind,
    },

    #[error("{nt:?}: alternatives {first} and {second} are both directly left-recursive")]
    MultipleLeftRecursion {
        nt: NonTerminal,
        first: usize,
        second: usize,
    },

    #[error("{nt:?}: the left-recursive alternative must not be the only one")]
    LeftRecursionOnly { nt: NonTerminal },

    #[error("{nt:?}: the left-recursive alternative must be listed first, not at {index}")]
    LeftRecursionNotFirst { nt: NonTerminal, index: usize },

    #[error("{nt:?}: alternative {index} recurses without consuming anything")]
    DegenerateLeftRecursion { nt: NonTerminal, index: usize },

    #[error("{nt:?}: more than one empty alternative")]
    DuplicateEmpty { nt: NonTerminal },

    #[error("{nt:?}: the empty alternative must be listed last, not at {index}")]
    EmptyNotLast { nt: NonTerminal, index: usize },

    #[error("{nt:?}: alternative {index} has a promotion or fallback index out of range")]
    PromotionOutOfRange { nt: NonTerminal, index: usize },

    #[error("indirect left recursion: {path:?}")]
    IndirectLeftRecursion {
        nt: NonTerminal,
        path: Vec<NonTerminal>,
    },
}

/// Everything [`check`] found wrong with a grammar.
#[derive(Debug, Clone, thiserror::Error)]
#[error("grammar validation failed with {} violation(s)", .violations.len())]
pub struct GrammarErrors {
    pub violations: Vec<Violation>,
}

/// Index of the first directly left-recursive alternative, if any.
pub fn find_direct_left_recursion(nt: NonTerminal, productions: &[Production]) -> Option<usize> {
    productions
        .iter()
        .position(|p| p.leading() == Some(Symbol::NonTerminal(nt)))
}

/// Searches for a leftmost-derivation cycle back to `origin` that passes
/// through at least one other non-terminal.
///
/// Breadth-first over the "leftmost non-terminal of some production"
/// relation, seeded with `origin`'s non-self leading non-terminals (the
/// direct self-loop is legal and skipped). Each non-terminal is enqueued
/// at most once, so the cost is linear in grammar size. Returns the
/// offending path `origin -> .. -> origin` for reporting.
pub fn find_indirect_left_recursion(
    grammar: &Grammar,
    origin: NonTerminal,
) -> Option<Vec<NonTerminal>> {
    let mut queue = VecDeque::new();
    let mut pred: IndexMap<NonTerminal, Option<NonTerminal>> = IndexMap::new();

    for p in grammar.productions(origin) {
        if let Some(Symbol::NonTerminal(m)) = p.leading()
            && m != origin
            && !pred.contains_key(&m)
        {
            pred.insert(m, None);
            queue.push_back(m);
        }
    }

    while let Some(current) = queue.pop_front() {
        for p in grammar.productions(current) {
            let Some(Symbol::NonTerminal(m)) = p.leading() else {
                continue;
            };
            if m == current {
                continue;
            }
            if m == origin {
                let mut path = vec![current];
                let mut at = current;
                while let Some(Some(parent)) = pred.get(&at) {
                    path.push(*parent);
                    at = *parent;
                }
                path.push(origin);
                path.reverse();
                path.push(origin);
                return Some(path);
            }
            if !pred.contains_key(&m) {
                pred.insert(m, Some(current));
                queue.push_back(m);
            }
        }
    }

    None
}

/// Checks every structural property; only a clean grammar may be parsed with.
pub fn check(grammar: Grammar) -> Result<ValidGrammar, GrammarErrors> {
    let mut violations = Vec::new();

    check_references(&grammar, &mut violations);
    for (nt, productions) in grammar.rules() {
        check_left_recursion_shape(nt, productions, &mut violations);
        check_empty_alternatives(nt, productions, &mut violations);
        check_promotion_indices(nt, productions, &mut violations);
        if let Some(path) = find_indirect_left_recursion(&grammar, nt) {
            violations.push(Violation::IndirectLeftRecursion { nt, path });
        }
    }

    // FIRST-set computation recurses through leading symbols, so it is only
    // well-founded once the checks above have all passed.
    if violations.is_empty() {
        for (nt, productions) in grammar.rules() {
            check_prefix_freeness(&grammar, nt, productions, &mut violations);
        }
    }

    if violations.is_empty() {
        Ok(ValidGrammar { grammar })
    } else {
        Err(GrammarErrors { violations })
    }
}

fn check_references(grammar: &Grammar, violations: &mut Vec<Violation>) {
    let mut referenced = vec![grammar.start()];
    for (_, productions) in grammar.rules() {
        for p in productions {
            for (symbol, _) in p.items() {
                if let Symbol::NonTerminal(m) = symbol {
                    referenced.push(*m);
                }
            }
        }
    }
    for nt in referenced {
        if grammar.productions(nt).is_empty()
            && !violations.contains(&Violation::MissingRule(nt))
        {
            violations.push(Violation::MissingRule(nt));
        }
    }
}

fn check_left_recursion_shape(
    nt: NonTerminal,
    productions: &[Production],
    violations: &mut Vec<Violation>,
) {
    let Some(first) = find_direct_left_recursion(nt, productions) else {
        return;
    };

    if let Some(offset) = productions[first + 1..]
        .iter()
        .position(|p| p.leading() == Some(Symbol::NonTerminal(nt)))
    {
        violations.push(Violation::MultipleLeftRecursion {
            nt,
            first,
            second: first + 1 + offset,
        });
    }
    if productions.len() == 1 {
        violations.push(Violation::LeftRecursionOnly { nt });
    }
    if first != 0 {
        violations.push(Violation::LeftRecursionNotFirst { nt, index: first });
    }
    if productions[first].len() < 2 {
        violations.push(Violation::DegenerateLeftRecursion { nt, index: first });
    }
}

fn check_empty_alternatives(
    nt: NonTerminal,
    productions: &[Production],
    violations: &mut Vec<Violation>,
) {
    let empties: Vec<usize> = productions
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_epsilon())
        .map(|(i, _)| i)
        .collect();

    if empties.len() > 1 {
        violations.push(Violation::DuplicateEmpty { nt });
    }
    if let Some(&index) = empties.first()
        && index != productions.len() - 1
    {
        violations.push(Violation::EmptyNotLast { nt, index });
    }
}

fn check_promotion_indices(
    nt: NonTerminal,
    productions: &[Production],
    violations: &mut Vec<Violation>,
) {
    for (index, p) in productions.iter().enumerate() {
        let mut candidates = Vec::new();
        if let Some(Promotion::Child(i)) = p.promotion() {
            candidates.push(i);
        }
        for position in 0..p.len() {
            if let Some(alt) = p.fallback_for(position) {
                candidates.push(alt);
            }
        }
        if candidates.into_iter().any(|i| i >= p.len()) {
            violations.push(Violation::PromotionOutOfRange { nt, index });
        }
    }
}

/// The set of lookahead kinds that select a production, as the engine
/// sees it: the empty alternative is the catch-all (treated as selecting
/// nothing here, since it only wins when nothing else matches and it is
/// required to be last), and a nullable leading symbol widens to every
/// kind, exactly mirroring `Grammar::can_start_with`.
fn selection_set(grammar: &Grammar, production: &Production) -> TokenSet {
    let Some(leading) = production.leading() else {
        return TokenSet::EMPTY;
    };
    let mut set = TokenSet::EMPTY;
    for kind in TokenKind::ALL {
        if grammar.can_start_with(leading, kind) {
            set.insert(kind);
        }
    }
    set
}

fn check_prefix_freeness(
    grammar: &Grammar,
    nt: NonTerminal,
    productions: &[Production],
    violations: &mut Vec<Violation>,
) {
    // The left-recursive alternative is never selected by lookahead, so it
    // does not participate in prefix disjointness.
    let sets: Vec<(usize, TokenSet)> = productions
        .iter()
        .enumerate()
        .filter(|(_, p)| p.leading() != Some(Symbol::NonTerminal(nt)))
        .map(|(i, p)| (i, selection_set(grammar, p)))
        .collect();

    for (a, (first, first_set)) in sets.iter().enumerate() {
        for (second, second_set) in &sets[a + 1..] {
            let shared = first_set.intersection(*second_set);
            if let Some(terminal) = shared.iter().next() {
                violations.push(Violation::PrefixConflict {
                    nt,
                    first: *first,
                    second: *second,
                    terminal,
                });
            }
        }
    }
}
