use {
    http::header::InvalidHeaderValue,
    serde_json::Value,
    std::fmt,
    thiserror::Error,
};

//
// CacheControlError
//

/// `Cache-Control` directive error.
///
/// Any of these aborts resolution entirely; no partial header is ever produced.
#[derive(Debug, Error)]
pub enum CacheControlError {
    /// A delta directive or a field directive element that cannot be interpreted.
    #[error("Invalid value `{value}` for the {directive} {kind} directive")]
    InvalidDirectiveValue {
        /// Literal offending value.
        value: String,

        /// Wire name of the directive.
        directive: &'static str,

        /// Directive kind.
        kind: DirectiveKind,
    },

    /// A field directive string that fails the token grammar.
    #[error("Invalid token \"{token}\" for the {directive} field directive")]
    InvalidFieldToken {
        /// Literal offending token.
        token: String,

        /// Wire name of the directive.
        directive: &'static str,
    },

    /// More than one member of the exclusivity group.
    #[error(
        "The public, private:true, no-cache:true, and no-store:true directives are exclusive, you cannot define more than one of them"
    )]
    ExclusiveDirectives,

    /// Two synonymous keys in the same map.
    #[error("`{first}` and `{second}` are synonyms, you cannot define both in the same map")]
    DuplicateDirective {
        /// First key.
        first: &'static str,

        /// Second key.
        second: &'static str,
    },

    /// Header value.
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
}

impl CacheControlError {
    /// Constructor.
    pub fn invalid_delta(value: impl ToString, directive: &'static str) -> Self {
        Self::InvalidDirectiveValue {
            value: value.to_string(),
            directive,
            kind: DirectiveKind::Delta,
        }
    }

    /// Constructor.
    pub fn invalid_field(value: impl ToString, directive: &'static str) -> Self {
        Self::InvalidDirectiveValue {
            value: value.to_string(),
            directive,
            kind: DirectiveKind::Field,
        }
    }
}

//
// DirectiveKind
//

/// Directive kind, as used in error messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DirectiveKind {
    /// Delta-seconds directive, e.g. `max-age`.
    Delta,

    /// Field directive, e.g. `private`, or a plain flag.
    Field,
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delta => formatter.write_str("delta"),
            Self::Field => formatter.write_str("field"),
        }
    }
}

// Value as it would be written by the caller, without JSON quoting for strings.
pub(crate) fn literal(value: &Value) -> String {
    match value {
        Value::String(string) => string.clone(),
        value => value.to_string(),
    }
}
