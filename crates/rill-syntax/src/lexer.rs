//! Lexer for rill source text.
//!
//! Produces span-based tokens without storing text - text is sliced from
//! source only when needed. The stream always ends with a synthetic `Eof`
//! token so the parser can treat end-of-input as an ordinary terminal.
//!
//! ## Error handling
//!
//! Consecutive unrecognized characters coalesce into single `Garbage`
//! tokens rather than one error per character, which keeps the stream
//! manageable for malformed input.

use logos::Logos;
use serde::Serialize;

use crate::span::Span;

/// Token kinds. These double as the terminal alphabet of the grammar.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip(r"#[^\n]*", allow_greedy = true))]
pub enum TokenKind {
    /// Defined before `Ident` so the keyword takes precedence.
    #[token("let")]
    KwLet,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("=")]
    Eq,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token(";")]
    Semi,

    /// Coalesced unrecognized characters.
    Garbage,

    /// Synthetic end-of-input marker, always the last token.
    Eof,
}

impl TokenKind {
    /// Every kind, in declaration order. Used for FIRST-set sweeps.
    pub const ALL: [TokenKind; 14] = [
        TokenKind::KwLet,
        TokenKind::Number,
        TokenKind::Ident,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Eq,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::Comma,
        TokenKind::Semi,
        TokenKind::Garbage,
        TokenKind::Eof,
    ];

    /// A token of this kind carries a lexical error.
    #[inline]
    pub fn is_error(self) -> bool {
        self == TokenKind::Garbage
    }

    /// Human-readable phrase for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::KwLet => "`let`",
            TokenKind::Number => "a number",
            TokenKind::Ident => "an identifier",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Eq => "`=`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Comma => "`,`",
            TokenKind::Semi => "`;`",
            TokenKind::Garbage => "unrecognized text",
            TokenKind::Eof => "end of input",
        }
    }
}

/// Zero-copy token: kind + span, text retrieved via [`Token::text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The text slice for this token. O(1) slice into source.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.range()]
    }
}

/// Tokenizes source into a vector of span-based tokens ending with `Eof`.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut garbage_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = garbage_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        Span::new(start as u32, end as u32),
                    ));
                }
                let span = lexer.span();
                tokens.push(Token::new(
                    kind,
                    Span::new(span.start as u32, span.end as u32),
                ));
            }
            Some(Err(())) => {
                if garbage_start.is_none() {
                    garbage_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = garbage_start.take() {
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        Span::new(start as u32, source.len() as u32),
                    ));
                }
                break;
            }
        }
    }

    tokens.push(Token::new(TokenKind::Eof, Span::empty(source.len() as u32)));
    tokens
}

/// Bitset of `TokenKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenSet(u32);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Every token kind.
    pub const ANY: TokenSet = TokenSet::new(&TokenKind::ALL);

    /// Panics at compile time if any kind's discriminant >= 32.
    pub const fn new(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u32;
            assert!(kind < 32, "TokenKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub fn insert(&mut self, kind: TokenKind) {
        self.0 |= 1 << kind as u32;
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        self.0 & (1 << kind as u32) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }

    #[inline]
    pub const fn intersection(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 & other.0)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Kinds in this set, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        TokenKind::ALL.iter().copied().filter(|k| self.contains(*k))
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
