use super::{super::directives::*, headers::*};

use {
    http::*,
    std::{result::Result, sync::*},
};

/// Hook that sets the `Cache-Control` header for descriptors.
pub type CacheControlHook =
    Arc<Box<dyn Fn(CacheControlHookContext) -> Result<(), CacheControlError> + Send + Sync>>;

/// Bind the `Cache-Control` hook.
///
/// If a hook is provided it is returned unchanged (the same [Arc]). Otherwise returns the
/// built-in hook, which resolves the descriptors and sets the header only when they produce a
/// value.
pub fn bind_cache_control(cache_control: Option<CacheControlHook>) -> CacheControlHook {
    match cache_control {
        Some(cache_control) => cache_control,
        None => Arc::new(Box::new(resolve_cache_control)),
    }
}

fn resolve_cache_control(context: CacheControlHookContext) -> Result<(), CacheControlError> {
    apply_cache_control(context.headers, context.descriptors.iter().cloned())?;
    Ok(())
}

//
// CacheControlHookContext
//

/// Context for [CacheControlHook].
#[derive(Debug)]
pub struct CacheControlHookContext<'this> {
    /// Headers.
    pub headers: &'this mut HeaderMap,

    /// Descriptors.
    pub descriptors: &'this [Descriptor],
}

impl<'this> CacheControlHookContext<'this> {
    /// Constructor.
    pub fn new(headers: &'this mut HeaderMap, descriptors: &'this [Descriptor]) -> Self {
        Self { headers, descriptors }
    }
}
