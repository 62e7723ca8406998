use crate::span::Span;

/// Diagnostic kinds, ordered roughly by how actionable they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    /// Characters the lexer could not form a token from.
    LexicalGarbage,
    /// A required token was not the one found at the cursor.
    UnexpectedToken,
    /// No grammar alternative covers the lookahead.
    NoAlternative,
    /// AST synthesis expected a token that was never matched.
    MissingToken,
    /// AST leaf built over a token carrying a lexical error.
    TokenError,
    /// A parse node reached synthesis without a selected production.
    NoProduction,
    /// Promotion could not determine a node kind.
    PromotionUnresolved,
}

impl DiagnosticKind {
    /// Base message used when the call site provides no detail.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::LexicalGarbage => "unrecognized characters",
            Self::UnexpectedToken => "unexpected token",
            Self::NoAlternative => "no grammar alternative matches here",
            Self::MissingToken => "expected token is missing",
            Self::TokenError => "token carries a lexical error",
            Self::NoProduction => "could not parse this as anything",
            Self::PromotionUnresolved => "could not determine a node kind here",
        }
    }

    pub fn default_severity(&self) -> Severity {
        Severity::Error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One source-located diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            span,
            message: kind.fallback_message().to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} at {}", self.severity, self.message, self.span)
    }
}
