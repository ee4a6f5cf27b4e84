use super::{directives::*, middleware::*, service::*};

use {
    std::{result::Result, sync::*},
    tower::*,
};

//
// CacheControlLayer
//

/// HTTP `Cache-Control` layer.
///
/// This layer configures and installs a [CacheControlService].
///
/// The descriptors are captured when the layer is created and resolved for every request. See
/// [resolve] for how they are combined.
///
/// Usage notes
/// ===========
///
/// 1. Invalid descriptors are *not* rejected here. They will fail every request with a
///    [CacheControlError] (boxed as a [BoxError]) before the inner service is called, so you
///    will usually want to wrap this layer with an error handler. You can check your descriptors
///    up front by calling [resolve] yourself.
///
/// 2. If the inner service sets its own `Cache-Control` header it will be kept, as it is the more
///    specific choice. Use [override_existing](Self::override_existing) to change this.
///
/// 3. You can replace how the header is produced via the [cache_control](Self::cache_control)
///    hook, e.g. to wrap the built-in policy or to record calls in tests.
///
/// Request handling
/// ================
///
/// 1. The request arrives. It is not inspected.
///
/// 2. The hook is called with the captured descriptors and a fresh header map. If it fails the
///    error is returned. END.
///
/// 3. The inner service is called exactly once.
///
/// 4. If the hook produced a `Cache-Control` header it is added to the inner service's response,
///    unless the response already has one (see note 2 above). END.
#[derive(Clone)]
pub struct CacheControlLayer {
    configuration: MiddlewareConfiguration,
}

impl CacheControlLayer {
    /// Constructor.
    pub fn new<DescriptorsT>(descriptors: DescriptorsT) -> Self
    where
        DescriptorsT: IntoIterator,
        DescriptorsT::Item: Into<Descriptor>,
    {
        Self {
            configuration: MiddlewareConfiguration::new(
                descriptors.into_iter().map(Into::into).collect(),
            ),
        }
    }

    /// Provide a hook to set the `Cache-Control` header.
    ///
    /// It is called for every request with the captured descriptors. It should set the header in
    /// the provided header map if it wants one.
    ///
    /// [None] by default, in which case the built-in resolution is used.
    pub fn cache_control(
        mut self,
        cache_control: impl Fn(CacheControlHookContext) -> Result<(), CacheControlError>
        + 'static
        + Send
        + Sync,
    ) -> Self {
        self.configuration.cache_control = Some(Arc::new(Box::new(cache_control)));
        self
    }

    /// Whether to replace a `Cache-Control` header set by the inner service.
    ///
    /// The default is false.
    pub fn override_existing(mut self, override_existing: bool) -> Self {
        self.configuration.override_existing = override_existing;
        self
    }

    /// Descriptors.
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.configuration.descriptors
    }
}

impl<InnerServiceT> Layer<InnerServiceT> for CacheControlLayer {
    type Service = CacheControlService<InnerServiceT>;

    fn layer(&self, inner_service: InnerServiceT) -> Self::Service {
        CacheControlService::new(inner_service, self.configuration.clone())
    }
}
