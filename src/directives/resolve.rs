use super::{delta::*, descriptor::*, error::*, field::*, map::*};

use {
    serde_json::Value,
    std::{fmt, result::Result},
};

/// Resolve descriptors into a `Cache-Control` header value.
///
/// Descriptors are merged left to right, later values overriding earlier ones for the same key.
///
/// Returns [None] if no effective directive is present, which is not an error.
pub fn resolve<DescriptorsT>(
    descriptors: DescriptorsT,
) -> Result<Option<String>, CacheControlError>
where
    DescriptorsT: IntoIterator,
    DescriptorsT::Item: Into<Descriptor>,
{
    Ok(resolve_directives(descriptors)?.map(|directives| directives.to_string()))
}

/// Resolve descriptors into [CacheControlDirectives].
///
/// See [resolve].
pub fn resolve_directives<DescriptorsT>(
    descriptors: DescriptorsT,
) -> Result<Option<CacheControlDirectives>, CacheControlError>
where
    DescriptorsT: IntoIterator,
    DescriptorsT::Item: Into<Descriptor>,
{
    let mut merged: Option<DirectiveSet> = None;

    for descriptor in descriptors {
        if let Some(directive_set) = DirectiveSet::normalize(&descriptor.into())? {
            merged.get_or_insert_default().merge(directive_set);
        }
    }

    match merged {
        Some(merged) => merged.resolve(),
        None => Ok(None),
    }
}

//
// CacheControlDirectives
//

/// Validated `Cache-Control` directives.
///
/// [Display] serializes them in canonical order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CacheControlDirectives {
    /// `public`.
    pub public: bool,

    /// `private`.
    pub private: FieldDirective,

    /// `no-cache`.
    pub no_cache: FieldDirective,

    /// `no-store`.
    pub no_store: bool,

    /// `no-transform`.
    pub no_transform: bool,

    /// `must-revalidate`.
    pub must_revalidate: bool,

    /// `proxy-revalidate`.
    pub proxy_revalidate: bool,

    /// `max-age`.
    pub max_age: Option<u64>,

    /// `s-maxage`.
    pub s_maxage: Option<u64>,
}

impl CacheControlDirectives {
    /// Wire tokens in canonical order.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();

        if self.public {
            tokens.push("public".into());
        }
        if let Some(token) = self.private.to_token("private") {
            tokens.push(token);
        }
        if let Some(token) = self.no_cache.to_token("no-cache") {
            tokens.push(token);
        }
        if self.no_store {
            tokens.push("no-store".into());
        }
        if self.no_transform {
            tokens.push("no-transform".into());
        }
        if self.must_revalidate {
            tokens.push("must-revalidate".into());
        }
        if self.proxy_revalidate {
            tokens.push("proxy-revalidate".into());
        }
        if let Some(max_age) = self.max_age {
            tokens.push(format!("max-age={}", max_age));
        }
        if let Some(s_maxage) = self.s_maxage {
            tokens.push(format!("s-maxage={}", s_maxage));
        }

        tokens
    }

    /// True if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl fmt::Display for CacheControlDirectives {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.tokens().join(", "))
    }
}

//
// DirectiveSet
//

// Merged directives, values still unvalidated where validation happens after merging.
#[derive(Debug, Default)]
struct DirectiveSet {
    public: Option<bool>,
    private: Option<Value>,
    no_cache: Option<Value>,
    no_store: Option<bool>,
    no_transform: Option<bool>,
    must_revalidate: Option<bool>,
    proxy_revalidate: Option<bool>,
    max_age: Option<Value>,
    s_maxage: Option<Value>,
}

impl DirectiveSet {
    // Returns None for no-op descriptors.
    fn normalize(descriptor: &Descriptor) -> Result<Option<Self>, CacheControlError> {
        let mut directive_set = Self::default();

        match descriptor {
            Descriptor::Seconds(seconds) => directive_set.max_age = Some((*seconds).into()),

            Descriptor::Delta(delta) => {
                if delta.is_empty() {
                    return Ok(None);
                }

                let seconds = parse_delta_seconds(delta)
                    .ok_or_else(|| CacheControlError::invalid_delta(delta, "max-age"))?;
                directive_set.max_age = Some(seconds.into());
            }

            Descriptor::Keyword(keyword) => match keyword {
                Keyword::Public => directive_set.public = Some(true),
                Keyword::Private => directive_set.private = Some(true.into()),
                Keyword::NoCache => directive_set.no_cache = Some(true.into()),
                Keyword::NoStore => directive_set.no_store = Some(true),
            },

            Descriptor::Map(map) => directive_set.copy_from(map)?,
        }

        Ok(Some(directive_set))
    }

    fn copy_from(&mut self, map: &DirectiveMap) -> Result<(), CacheControlError> {
        for (directive, value) in map.recognized() {
            if value.is_null() {
                continue;
            }

            match directive {
                DirectiveKey::Public => self.public = Some(flag(directive, value)?),
                DirectiveKey::Private => self.private = Some(value.clone()),
                DirectiveKey::NoCache => self.no_cache = Some(value.clone()),
                DirectiveKey::NoStore => self.no_store = Some(flag(directive, value)?),
                DirectiveKey::NoTransform => self.no_transform = Some(flag(directive, value)?),
                DirectiveKey::MustRevalidate => {
                    self.must_revalidate = Some(flag(directive, value)?)
                }
                DirectiveKey::ProxyRevalidate => {
                    self.proxy_revalidate = Some(flag(directive, value)?)
                }
                DirectiveKey::MaxAge => self.max_age = Some(value.clone()),
                DirectiveKey::SMaxage => {
                    if self.s_maxage.is_some() {
                        return Err(CacheControlError::DuplicateDirective {
                            first: "sMaxage",
                            second: "sMaxAge",
                        });
                    }
                    self.s_maxage = Some(value.clone());
                }
            }
        }

        Ok(())
    }

    // Shallow overwrite.
    fn merge(&mut self, other: Self) {
        overwrite(&mut self.public, other.public);
        overwrite(&mut self.private, other.private);
        overwrite(&mut self.no_cache, other.no_cache);
        overwrite(&mut self.no_store, other.no_store);
        overwrite(&mut self.no_transform, other.no_transform);
        overwrite(&mut self.must_revalidate, other.must_revalidate);
        overwrite(&mut self.proxy_revalidate, other.proxy_revalidate);
        overwrite(&mut self.max_age, other.max_age);
        overwrite(&mut self.s_maxage, other.s_maxage);
    }

    fn resolve(self) -> Result<Option<CacheControlDirectives>, CacheControlError> {
        let private = self
            .private
            .map(|private| FieldDirective::resolve(&private, "private"))
            .transpose()?;
        let mut no_cache = self
            .no_cache
            .map(|no_cache| FieldDirective::resolve(&no_cache, "no-cache"))
            .transpose()?;

        let public = self.public.unwrap_or_default();
        let private = private.unwrap_or_default();
        let no_store = self.no_store.unwrap_or_default();

        // Counted as set by the caller, before no-store implies no-cache
        let exclusive = [
            public,
            private.is_enabled(),
            no_cache.as_ref().is_some_and(FieldDirective::is_enabled),
            no_store,
        ];
        if exclusive.into_iter().filter(|active| *active).count() > 1 {
            return Err(CacheControlError::ExclusiveDirectives);
        }

        // no-store implies no-cache unless explicitly disabled
        if no_store && (no_cache != Some(FieldDirective::Disabled)) {
            no_cache = Some(FieldDirective::Enabled);
        }
        let no_cache = no_cache.unwrap_or_default();

        let max_age = self
            .max_age
            .map(|max_age| delta_seconds(&max_age, "max-age"))
            .transpose()?;
        let s_maxage = self
            .s_maxage
            .map(|s_maxage| delta_seconds(&s_maxage, "s-maxage"))
            .transpose()?;

        let restricted = private.is_active() || no_cache.is_active() || no_store;

        let directives = CacheControlDirectives {
            public: public || (!restricted && max_age.is_some()),
            private,
            no_cache,
            no_store,
            no_transform: self.no_transform.unwrap_or_default(),
            must_revalidate: self.must_revalidate.unwrap_or_default(),
            proxy_revalidate: self.proxy_revalidate.unwrap_or_default(),
            max_age,
            s_maxage: if restricted { None } else { s_maxage },
        };

        Ok(if directives.is_empty() {
            None
        } else {
            Some(directives)
        })
    }
}

fn overwrite<ValueT>(target: &mut Option<ValueT>, source: Option<ValueT>) {
    if source.is_some() {
        *target = source;
    }
}

fn flag(directive: DirectiveKey, value: &Value) -> Result<bool, CacheControlError> {
    value.as_bool().ok_or_else(|| {
        CacheControlError::invalid_field(literal(value), directive.directive())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn header<DescriptorsT>(descriptors: DescriptorsT) -> String
    where
        DescriptorsT: IntoIterator,
        DescriptorsT::Item: Into<Descriptor>,
    {
        resolve(descriptors).unwrap().expect("header")
    }

    fn failure<DescriptorsT>(descriptors: DescriptorsT) -> CacheControlError
    where
        DescriptorsT: IntoIterator,
        DescriptorsT::Item: Into<Descriptor>,
    {
        resolve(descriptors).unwrap_err()
    }

    #[test]
    fn nothing() {
        assert_eq!(resolve(Vec::<Descriptor>::new()).unwrap(), None);
        assert_eq!(resolve([""]).unwrap(), None);
        assert_eq!(resolve([json!({})]).unwrap(), None);
        assert_eq!(
            resolve([json!({ "private": false, "public": false, "noTransform": false })]).unwrap(),
            None
        );
    }

    #[test]
    fn shorthand() {
        assert_eq!(header([100]), "public, max-age=100");
        assert_eq!(header([300u64]), "public, max-age=300");
        assert_eq!(header(["1m"]), "public, max-age=60");
        assert_eq!(header(["public"]), "public");
        assert_eq!(header(["private"]), "private");
        assert_eq!(header(["no-cache"]), "no-cache");
        assert_eq!(header(["no-store"]), "no-cache, no-store");
    }

    #[test]
    fn flags() {
        assert_eq!(header([json!({ "public": true })]), "public");
        assert_eq!(header([json!({ "private": true })]), "private");
        assert_eq!(header([json!({ "noTransform": true })]), "no-transform");
        assert_eq!(header([json!({ "mustRevalidate": true })]), "must-revalidate");
        assert_eq!(header([json!({ "proxyRevalidate": true })]), "proxy-revalidate");
    }

    #[test]
    fn canonical_order() {
        let map = json!({
            "sMaxAge": 10,
            "maxAge": 20,
            "proxyRevalidate": true,
            "mustRevalidate": true,
            "noTransform": true,
        });
        assert_eq!(
            header([map]),
            "public, no-transform, must-revalidate, proxy-revalidate, max-age=20, s-maxage=10"
        );
    }

    #[test]
    fn no_store_implies_no_cache() {
        assert!(header([json!({ "noStore": true })]).contains("no-cache"));
        assert_eq!(header([json!({ "noStore": true, "noCache": false })]), "no-store");
    }

    #[test]
    fn later_descriptors_override() {
        let descriptors = crate::descriptors!["no-store", json!({ "noCache": false })];
        assert_eq!(header(descriptors), "no-store");

        let descriptors = crate::descriptors!["public", json!({ "public": false, "private": true })];
        assert_eq!(header(descriptors), "private");

        let descriptors = crate::descriptors![60, json!({ "maxAge": "1h" })];
        assert_eq!(header(descriptors), "public, max-age=3600");
    }

    #[test]
    fn unknown_keys() {
        assert_eq!(
            header([json!({ "public": true, "unknown": true, "whatisthis": "300" })]),
            "public"
        );
    }

    #[test]
    fn field_directives() {
        assert_eq!(header([json!({ "private": "X-Private" })]), "private=\"X-Private\"");
        assert_eq!(
            header([json!({ "private": ["X-Private", "X-Private-2"] })]),
            "private=\"X-Private, X-Private-2\""
        );
        assert_eq!(header([json!({ "noCache": "X-Uncached" })]), "no-cache=\"X-Uncached\"");
        assert_eq!(
            header([json!({ "noCache": ["X-Uncached", "X-Uncached-2"] })]),
            "no-cache=\"X-Uncached, X-Uncached-2\""
        );

        // Field lists are not exclusive
        assert_eq!(
            header([json!({ "public": true, "private": "Set-Cookie" })]),
            "public, private=\"Set-Cookie\""
        );
    }

    #[test]
    fn invalid_field_values() {
        let error = failure([json!({ "private": 100 })]);
        assert!(error.to_string().contains("`100`"));
        assert!(error.to_string().contains("private"));

        let error = failure([json!({ "private": ["X-Valid", 100] })]);
        assert_eq!(
            error.to_string(),
            "Invalid value `100` for the private field directive"
        );

        let error = failure([json!({ "private": "So invalid" })]);
        assert!(matches!(error, CacheControlError::InvalidFieldToken { .. }));
        assert!(error.to_string().contains("\"So invalid\""));
    }

    #[test]
    fn exclusive() {
        for map in [
            json!({ "public": true, "private": true }),
            json!({ "public": true, "noCache": true }),
            json!({ "private": true, "noCache": true }),
            json!({ "public": true, "noStore": true }),
            json!({ "private": true, "noStore": true }),
            json!({ "public": true, "noStore": true, "noCache": false }),
            json!({ "noCache": true, "noStore": true }),
        ] {
            let error = failure([map]);
            assert!(matches!(error, CacheControlError::ExclusiveDirectives));
            let message = error.to_string();
            for directive in ["public", "private:true", "no-cache:true", "no-store:true"] {
                assert!(message.contains(directive));
            }
        }

        assert!(matches!(
            failure(["public", "private"]),
            CacheControlError::ExclusiveDirectives
        ));
        assert!(matches!(
            failure(["no-cache", "no-store"]),
            CacheControlError::ExclusiveDirectives
        ));
    }

    #[test]
    fn implied_no_cache_is_not_exclusive() {
        assert_eq!(header(["no-store"]), "no-cache, no-store");
        assert_eq!(
            header([json!({ "maxAge": 100, "noStore": true })]),
            "no-cache, no-store, max-age=100"
        );
    }

    #[test]
    fn null_is_absent() {
        assert_eq!(
            header([json!({ "public": null, "noStore": null, "maxAge": 10 })]),
            "public, max-age=10"
        );
        assert_eq!(resolve([json!({ "private": null })]).unwrap(), None);

        let descriptors = crate::descriptors!["private", json!({ "private": null })];
        assert_eq!(header(descriptors), "private");

        let descriptors = crate::descriptors![60, json!({ "maxAge": null, "mustRevalidate": true })];
        assert_eq!(header(descriptors), "public, must-revalidate, max-age=60");
    }

    #[test]
    fn max_age() {
        assert!(header([json!({ "maxAge": 100 })]).contains("max-age=100"));
        assert_eq!(header([json!({ "maxAge": "1m" })]), "public, max-age=60");
        assert_eq!(header([json!({ "maxAge": 100, "public": true })]), "public, max-age=100");
        assert_eq!(header([json!({ "maxAge": 100, "private": true })]), "private, max-age=100");
        assert_eq!(header([json!({ "maxAge": 100, "noCache": true })]), "no-cache, max-age=100");
        assert_eq!(
            header([json!({ "maxAge": 100, "noStore": true })]),
            "no-cache, no-store, max-age=100"
        );

        let descriptors = crate::descriptors!["public", json!({ "maxAge": "1d" })];
        assert_eq!(header(descriptors), "public, max-age=86400");
    }

    #[test]
    fn invalid_max_age() {
        for error in [failure(["unknown"]), failure([json!({ "maxAge": "unknown" })])] {
            assert!(matches!(error, CacheControlError::InvalidDirectiveValue { .. }));
            assert_eq!(
                error.to_string(),
                "Invalid value `unknown` for the max-age delta directive"
            );
        }
    }

    #[test]
    fn s_maxage() {
        assert!(header([json!({ "sMaxage": 100 })]).contains("s-maxage=100"));
        assert!(header([json!({ "sMaxAge": "1m" })]).contains("s-maxage=60"));
        assert!(!header([json!({ "sMaxAge": 100, "private": true })]).contains("s-maxage"));
        assert!(!header([json!({ "sMaxAge": 100, "noCache": true })]).contains("s-maxage"));
        assert!(!header([json!({ "sMaxAge": 100, "noStore": true })]).contains("s-maxage"));

        let error = failure([json!({ "sMaxAge": "unknown" })]);
        assert_eq!(
            error.to_string(),
            "Invalid value `unknown` for the s-maxage delta directive"
        );

        let error = failure([json!({ "sMaxage": 10, "sMaxAge": 20 })]);
        assert!(matches!(error, CacheControlError::DuplicateDirective { .. }));
    }

    #[test]
    fn invalid_flags() {
        let error = failure([json!({ "noStore": "yes" })]);
        assert_eq!(
            error.to_string(),
            "Invalid value `yes` for the no-store field directive"
        );
    }

    #[test]
    fn deterministic() {
        let descriptors = crate::descriptors![
            "private",
            DirectiveMap::default().max_age("1h").must_revalidate(true),
        ];
        let first = resolve(descriptors.clone()).unwrap();
        let second = resolve(descriptors).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("private, must-revalidate, max-age=3600"));
    }

    #[test]
    fn typed_directives() {
        let directives = resolve_directives([json!({ "noCache": ["Set-Cookie"], "maxAge": 0 })])
            .unwrap()
            .expect("directives");
        assert_eq!(directives.no_cache, FieldDirective::Fields(vec!["Set-Cookie".into()]));
        assert!(!directives.public);
        assert_eq!(directives.max_age, Some(0));
    }
}
