use {
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
};

//
// DirectiveMap
//

/// Structured descriptor: a map of directive keys to values.
///
/// Recognized keys (any other key is silently ignored):
///
/// | key                       | value                                | wire token         |
/// |---------------------------|--------------------------------------|--------------------|
/// | `public`                  | boolean                              | `public`           |
/// | `private`                 | boolean, token, or array of tokens   | `private[="…"]`    |
/// | `noCache`                 | boolean, token, or array of tokens   | `no-cache[="…"]`   |
/// | `noStore`                 | boolean                              | `no-store`         |
/// | `noTransform`             | boolean                              | `no-transform`     |
/// | `mustRevalidate`          | boolean                              | `must-revalidate`  |
/// | `proxyRevalidate`         | boolean                              | `proxy-revalidate` |
/// | `maxAge`                  | seconds or duration string           | `max-age=N`        |
/// | `sMaxage` (or `sMaxAge`)  | seconds or duration string           | `s-maxage=N`       |
///
/// Can be built with the setters, converted from a JSON object, or deserialized from
/// configuration.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DirectiveMap(pub Map<String, Value>);

impl DirectiveMap {
    /// Set a raw key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set `public`.
    pub fn public(self, public: bool) -> Self {
        self.with("public", public)
    }

    /// Set `private` to a boolean, a token, or a list of tokens.
    pub fn private(self, private: impl Into<Value>) -> Self {
        self.with("private", private)
    }

    /// Set `noCache` to a boolean, a token, or a list of tokens.
    pub fn no_cache(self, no_cache: impl Into<Value>) -> Self {
        self.with("noCache", no_cache)
    }

    /// Set `noStore`.
    pub fn no_store(self, no_store: bool) -> Self {
        self.with("noStore", no_store)
    }

    /// Set `noTransform`.
    pub fn no_transform(self, no_transform: bool) -> Self {
        self.with("noTransform", no_transform)
    }

    /// Set `mustRevalidate`.
    pub fn must_revalidate(self, must_revalidate: bool) -> Self {
        self.with("mustRevalidate", must_revalidate)
    }

    /// Set `proxyRevalidate`.
    pub fn proxy_revalidate(self, proxy_revalidate: bool) -> Self {
        self.with("proxyRevalidate", proxy_revalidate)
    }

    /// Set `maxAge` to seconds or a duration string.
    pub fn max_age(self, max_age: impl Into<Value>) -> Self {
        self.with("maxAge", max_age)
    }

    /// Set `sMaxage` to seconds or a duration string.
    pub fn s_maxage(self, s_maxage: impl Into<Value>) -> Self {
        self.with("sMaxage", s_maxage)
    }

    /// Recognized entries, in map order.
    pub(crate) fn recognized(&self) -> impl Iterator<Item = (DirectiveKey, &Value)> {
        self.0
            .iter()
            .filter_map(|(key, value)| DirectiveKey::for_key(key).map(|directive| (directive, value)))
    }
}

impl From<Map<String, Value>> for DirectiveMap {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

//
// DirectiveKey
//

/// Recognized directive map key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DirectiveKey {
    Public,
    Private,
    NoCache,
    NoStore,
    NoTransform,
    MustRevalidate,
    ProxyRevalidate,
    MaxAge,
    SMaxage,
}

impl DirectiveKey {
    pub(crate) fn for_key(key: &str) -> Option<Self> {
        match key {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "noCache" => Some(Self::NoCache),
            "noStore" => Some(Self::NoStore),
            "noTransform" => Some(Self::NoTransform),
            "mustRevalidate" => Some(Self::MustRevalidate),
            "proxyRevalidate" => Some(Self::ProxyRevalidate),
            "maxAge" => Some(Self::MaxAge),
            "sMaxage" | "sMaxAge" => Some(Self::SMaxage),
            _ => None,
        }
    }

    /// Wire token.
    pub(crate) fn directive(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::NoCache => "no-cache",
            Self::NoStore => "no-store",
            Self::NoTransform => "no-transform",
            Self::MustRevalidate => "must-revalidate",
            Self::ProxyRevalidate => "proxy-revalidate",
            Self::MaxAge => "max-age",
            Self::SMaxage => "s-maxage",
        }
    }
}
