use super::super::directives::*;

use {
    http::{HeaderMap, Response, header::CACHE_CONTROL, response::Parts},
    kutil::http::*,
    std::result::Result,
};

/// Resolve descriptors and set the `Cache-Control` header.
///
/// The header is set (replacing any previous value) only if the descriptors produced a value.
/// Returns whether it was set.
pub fn apply_cache_control<DescriptorsT>(
    headers: &mut HeaderMap,
    descriptors: DescriptorsT,
) -> Result<bool, CacheControlError>
where
    DescriptorsT: IntoIterator,
    DescriptorsT::Item: Into<Descriptor>,
{
    match resolve(descriptors)? {
        Some(cache_control) => {
            tracing::debug!("{}: {}", CACHE_CONTROL, cache_control);
            headers.set_string_value(CACHE_CONTROL, cache_control.as_str())?;
            Ok(true)
        }

        None => {
            tracing::debug!("no {} directives", CACHE_CONTROL);
            Ok(false)
        }
    }
}

//
// CacheControlHeaders
//

/// Set the `Cache-Control` header from descriptors.
///
/// Returns the receiver for chaining:
///
/// ```
/// use {
///     http::{Response, StatusCode, header},
///     tower_http_cache_control::middleware::*,
/// };
///
/// let mut response = Response::new(());
/// *response.set_cache_control(["public", "1h"])?.status_mut() = StatusCode::OK;
/// assert_eq!(
///     response.headers()[header::CACHE_CONTROL],
///     "public, max-age=3600"
/// );
/// # Ok::<(), tower_http_cache_control::directives::CacheControlError>(())
/// ```
pub trait CacheControlHeaders {
    /// Resolve descriptors and set the `Cache-Control` header if they produced a value.
    fn set_cache_control<DescriptorsT>(
        &mut self,
        descriptors: DescriptorsT,
    ) -> Result<&mut Self, CacheControlError>
    where
        DescriptorsT: IntoIterator,
        DescriptorsT::Item: Into<Descriptor>;
}

impl CacheControlHeaders for HeaderMap {
    fn set_cache_control<DescriptorsT>(
        &mut self,
        descriptors: DescriptorsT,
    ) -> Result<&mut Self, CacheControlError>
    where
        DescriptorsT: IntoIterator,
        DescriptorsT::Item: Into<Descriptor>,
    {
        apply_cache_control(self, descriptors)?;
        Ok(self)
    }
}

impl<BodyT> CacheControlHeaders for Response<BodyT> {
    fn set_cache_control<DescriptorsT>(
        &mut self,
        descriptors: DescriptorsT,
    ) -> Result<&mut Self, CacheControlError>
    where
        DescriptorsT: IntoIterator,
        DescriptorsT::Item: Into<Descriptor>,
    {
        apply_cache_control(self.headers_mut(), descriptors)?;
        Ok(self)
    }
}

impl CacheControlHeaders for Parts {
    fn set_cache_control<DescriptorsT>(
        &mut self,
        descriptors: DescriptorsT,
    ) -> Result<&mut Self, CacheControlError>
    where
        DescriptorsT: IntoIterator,
        DescriptorsT::Item: Into<Descriptor>,
    {
        apply_cache_control(&mut self.headers, descriptors)?;
        Ok(self)
    }
}
