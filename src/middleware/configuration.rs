use super::{super::directives::*, hooks::*};

use std::sync::*;

//
// MiddlewareConfiguration
//

/// Middleware configuration.
#[derive(Clone)]
pub struct MiddlewareConfiguration {
    /// Descriptors, captured when the middleware is created.
    pub descriptors: Arc<Vec<Descriptor>>,

    /// Cache control (hook).
    pub cache_control: Option<CacheControlHook>,

    /// Whether to replace a `Cache-Control` header set by the inner service.
    pub override_existing: bool,
}

impl MiddlewareConfiguration {
    /// Constructor.
    pub fn new(descriptors: Vec<Descriptor>) -> Self {
        Self {
            descriptors: Arc::new(descriptors),
            cache_control: None,
            override_existing: false,
        }
    }
}
