use super::map::*;

use {
    serde::Deserialize,
    serde_json::Value,
    std::{fmt, str::FromStr, time::Duration},
};

//
// Keyword
//

/// Shorthand keyword descriptor.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Keyword {
    /// `public`.
    Public,

    /// `private`.
    Private,

    /// `no-cache`.
    NoCache,

    /// `no-store`.
    NoStore,
}

impl Keyword {
    /// As wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::NoCache => "no-cache",
            Self::NoStore => "no-store",
        }
    }
}

impl FromStr for Keyword {
    type Err = ();

    fn from_str(representation: &str) -> Result<Self, Self::Err> {
        match representation {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "no-cache" => Ok(Self::NoCache),
            "no-store" => Ok(Self::NoStore),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

//
// Descriptor
//

/// Caller-supplied description of desired `Cache-Control` directives.
///
/// Usually created via [From]: integers and [Duration] become [Seconds](Self::Seconds), strings
/// become a [Keyword](Self::Keyword) if they match one exactly and otherwise a
/// [Delta](Self::Delta), and JSON objects become a [Map](Self::Map).
///
/// Use the [descriptors!](crate::descriptors) macro to mix them in one list.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(from = "Value")]
pub enum Descriptor {
    /// `max-age` in seconds (public by default).
    Seconds(u64),

    /// `max-age` as a duration string, e.g. "1m" (public by default).
    ///
    /// An empty string is a no-op.
    Delta(String),

    /// Shorthand keyword.
    Keyword(Keyword),

    /// Structured directives.
    Map(DirectiveMap),
}

impl From<u64> for Descriptor {
    fn from(seconds: u64) -> Self {
        Self::Seconds(seconds)
    }
}

impl From<u32> for Descriptor {
    fn from(seconds: u32) -> Self {
        Self::Seconds(seconds.into())
    }
}

impl From<i32> for Descriptor {
    fn from(seconds: i32) -> Self {
        match u64::try_from(seconds) {
            Ok(seconds) => Self::Seconds(seconds),
            // Will fail as an invalid max-age
            Err(_) => Self::Delta(seconds.to_string()),
        }
    }
}

impl From<usize> for Descriptor {
    fn from(seconds: usize) -> Self {
        match u64::try_from(seconds) {
            Ok(seconds) => Self::Seconds(seconds),
            // Will fail as an invalid max-age
            Err(_) => Self::Delta(seconds.to_string()),
        }
    }
}

impl From<Duration> for Descriptor {
    fn from(duration: Duration) -> Self {
        Self::Seconds(duration.as_secs())
    }
}

impl From<&str> for Descriptor {
    fn from(representation: &str) -> Self {
        match representation.parse() {
            Ok(keyword) => Self::Keyword(keyword),
            Err(_) => Self::Delta(representation.into()),
        }
    }
}

impl From<String> for Descriptor {
    fn from(representation: String) -> Self {
        match representation.parse() {
            Ok(keyword) => Self::Keyword(keyword),
            Err(_) => Self::Delta(representation),
        }
    }
}

impl From<Keyword> for Descriptor {
    fn from(keyword: Keyword) -> Self {
        Self::Keyword(keyword)
    }
}

impl From<DirectiveMap> for Descriptor {
    fn from(map: DirectiveMap) -> Self {
        Self::Map(map)
    }
}

impl From<Value> for Descriptor {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Map(map.into()),
            Value::String(representation) => representation.into(),
            Value::Null => Self::Map(Default::default()),
            Value::Number(number) => match number.as_u64() {
                Some(seconds) => Self::Seconds(seconds),
                // Will fail as an invalid max-age
                None => Self::Delta(number.to_string()),
            },
            value => Self::Delta(value.to_string()),
        }
    }
}

/// Build a [Vec] of [Descriptor] from heterogeneous values.
///
/// ```
/// use tower_http_cache_control::{descriptors, directives::*};
///
/// let descriptors = descriptors!["public", DirectiveMap::default().max_age("1d")];
/// assert_eq!(resolve(descriptors).unwrap().as_deref(), Some("public, max-age=86400"));
/// ```
#[macro_export]
macro_rules! descriptors {
    ( $( $descriptor:expr ),* $(,)? ) => {
        ::std::vec![ $( $crate::directives::Descriptor::from($descriptor) ),* ]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn strings() {
        assert_eq!(Descriptor::from("public"), Descriptor::Keyword(Keyword::Public));
        assert_eq!(Descriptor::from("no-store"), Descriptor::Keyword(Keyword::NoStore));
        assert_eq!(Descriptor::from("1m"), Descriptor::Delta("1m".into()));
        assert_eq!(Descriptor::from("Public"), Descriptor::Delta("Public".into()));
    }

    #[test]
    fn integers() {
        assert_eq!(Descriptor::from(60usize), Descriptor::Seconds(60));
        assert_eq!(Descriptor::from(60u32), Descriptor::Seconds(60));
        assert_eq!(Descriptor::from(-60), Descriptor::Delta("-60".into()));
    }

    #[test]
    fn json_values() {
        assert_eq!(Descriptor::from(json!(100)), Descriptor::Seconds(100));
        assert_eq!(Descriptor::from(json!("private")), Descriptor::Keyword(Keyword::Private));
        assert_eq!(Descriptor::from(json!(-1)), Descriptor::Delta("-1".into()));
        assert_eq!(
            Descriptor::from(json!({ "public": true })),
            Descriptor::Map(DirectiveMap::default().public(true))
        );
        assert_eq!(Descriptor::from(Value::Null), Descriptor::Map(Default::default()));
    }

    #[test]
    fn deserialize() {
        let descriptors: Vec<Descriptor> =
            serde_json::from_str(r#"["no-cache", 60, "1h", { "maxAge": "1d" }]"#).unwrap();
        assert_eq!(
            descriptors,
            vec![
                Descriptor::Keyword(Keyword::NoCache),
                Descriptor::Seconds(60),
                Descriptor::Delta("1h".into()),
                Descriptor::Map(DirectiveMap::default().max_age("1d")),
            ]
        );
    }

    #[test]
    fn macro_mixes_types() {
        let descriptors = crate::descriptors![300u64, "no-store", json!({ "noCache": false })];
        assert_eq!(descriptors.len(), 3);
        assert_eq!(descriptors[0], Descriptor::Seconds(300));
    }
}
