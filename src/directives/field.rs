use super::error::*;

use {serde_json::Value, std::result::Result};

//
// FieldDirective
//

/// Resolved value of a field directive (`private` or `no-cache`).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum FieldDirective {
    /// Disabled.
    #[default]
    Disabled,

    /// Enabled for the whole response.
    Enabled,

    /// Enabled for the listed header fields only.
    Fields(Vec<String>),
}

impl FieldDirective {
    /// Resolve from a directive map value.
    ///
    /// Booleans stay booleans. A string must be a valid [token](is_token). An array must contain
    /// only valid tokens. An empty array is the same as `true`.
    pub fn resolve(value: &Value, directive: &'static str) -> Result<Self, CacheControlError> {
        match value {
            Value::Bool(true) => Ok(Self::Enabled),
            Value::Bool(false) => Ok(Self::Disabled),

            Value::String(token) => {
                if is_token(token) {
                    Ok(Self::Fields(vec![token.clone()]))
                } else {
                    Err(CacheControlError::InvalidFieldToken {
                        token: token.clone(),
                        directive,
                    })
                }
            }

            Value::Array(elements) => {
                if elements.is_empty() {
                    return Ok(Self::Enabled);
                }

                let mut fields = Vec::with_capacity(elements.len());
                for element in elements {
                    match element {
                        Value::String(token) if is_token(token) => fields.push(token.clone()),
                        Value::String(token) => {
                            return Err(CacheControlError::invalid_field(token, directive));
                        }
                        _ => return Err(CacheControlError::invalid_field(element, directive)),
                    }
                }
                Ok(Self::Fields(fields))
            }

            _ => Err(CacheControlError::invalid_field(value, directive)),
        }
    }

    /// Whether the directive is emitted at all.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Whether the directive applies to the whole response.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// As wire token: `name` or `name="a, b"`.
    pub fn to_token(&self, directive: &str) -> Option<String> {
        match self {
            Self::Disabled => None,
            Self::Enabled => Some(directive.into()),
            Self::Fields(fields) => Some(format!("{}=\"{}\"", directive, fields.join(", "))),
        }
    }
}

/// Whether a string matches `token = 1*(ALPHA / DIGIT / "-" / "_")`.
pub fn is_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || (byte == b'-') || (byte == b'_'))
}
