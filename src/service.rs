use super::{directives::*, middleware::*};

use {
    http::{header::*, request::*, response::*},
    kutil::std::future::*,
    std::{mem, result::Result, sync::*, task::*},
    tower::*,
};

//
// CacheControlService
//

/// HTTP `Cache-Control` service.
///
/// You will often be using [CacheControlLayer](super::CacheControlLayer) rather than this service
/// directly, thus this service's functionality is documented there.
pub struct CacheControlService<InnerServiceT> {
    inner_service: InnerServiceT,
    descriptors: Arc<Vec<Descriptor>>,
    cache_control: CacheControlHook,
    override_existing: bool,
}

impl<InnerServiceT> CacheControlService<InnerServiceT> {
    /// Constructor.
    ///
    /// Binds the configured hook, or the built-in one if none was configured.
    pub fn new(inner_service: InnerServiceT, configuration: MiddlewareConfiguration) -> Self {
        Self {
            inner_service,
            descriptors: configuration.descriptors,
            cache_control: bind_cache_control(configuration.cache_control),
            override_existing: configuration.override_existing,
        }
    }

    // Clone while keeping `inner_service`.
    //
    // See: https://docs.rs/tower/latest/tower/trait.Service.html#be-careful-when-cloning-inner-services
    fn clone_and_keep_inner_service(&mut self) -> Self
    where
        InnerServiceT: Clone,
    {
        let mut clone = self.clone();
        clone.inner_service = mem::replace(&mut self.inner_service, clone.inner_service);
        clone
    }

    // Handle request.
    async fn handle<RequestBodyT, ResponseBodyT>(
        mut self,
        request: Request<RequestBodyT>,
    ) -> Result<Response<ResponseBodyT>, BoxError>
    where
        InnerServiceT: Service<Request<RequestBodyT>, Response = Response<ResponseBodyT>>,
        InnerServiceT::Error: Into<BoxError>,
    {
        let mut headers = HeaderMap::new();
        if let Err(error) =
            (self.cache_control)(CacheControlHookContext::new(&mut headers, &self.descriptors))
        {
            tracing::warn!("{}", error);
            return Err(error.into());
        }

        let mut response = match self.inner_service.call(request).await {
            Ok(response) => response,
            Err(error) => return Err(error.into()),
        };

        if let Some(cache_control) = headers.remove(CACHE_CONTROL) {
            let headers = response.headers_mut();
            if !headers.contains_key(CACHE_CONTROL) {
                headers.insert(CACHE_CONTROL, cache_control);
            } else if self.override_existing {
                tracing::debug!("overriding {}", CACHE_CONTROL);
                headers.insert(CACHE_CONTROL, cache_control);
            } else {
                tracing::debug!("keeping {} from inner service", CACHE_CONTROL);
            }
        }

        Ok(response)
    }
}

impl<InnerServiceT> Clone for CacheControlService<InnerServiceT>
where
    InnerServiceT: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner_service: self.inner_service.clone(),
            descriptors: self.descriptors.clone(),
            cache_control: self.cache_control.clone(),
            override_existing: self.override_existing,
        }
    }
}

impl<InnerServiceT, RequestBodyT, ResponseBodyT> Service<Request<RequestBodyT>>
    for CacheControlService<InnerServiceT>
where
    InnerServiceT: 'static
        + Service<Request<RequestBodyT>, Response = Response<ResponseBodyT>>
        + Clone
        + Send,
    InnerServiceT::Error: Into<BoxError>,
    InnerServiceT::Future: Send,
    RequestBodyT: 'static + Send,
    ResponseBodyT: 'static + Send,
{
    type Response = Response<ResponseBodyT>;
    type Error = BoxError;
    type Future = CapturedFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context) -> Poll<Result<(), Self::Error>> {
        self.inner_service.poll_ready(context).map_err(Into::into)
    }

    fn call(&mut self, request: Request<RequestBodyT>) -> Self::Future {
        // The future can't borrow `&mut self`
        let cloned_self = self.clone_and_keep_inner_service();
        capture_async! { cloned_self.handle(request).await }
    }
}
