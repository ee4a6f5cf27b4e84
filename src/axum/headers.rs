use super::super::{directives::*, middleware::*};

use {
    ::axum::response::{IntoResponse, Response},
    std::result::Result,
};

//
// CacheControlResponse
//

/// Set `Cache-Control` on anything that can be turned into a response.
pub trait CacheControlResponse<IntoResponseT>
where
    Self: Sized,
    IntoResponseT: IntoResponse,
{
    /// Set the `Cache-Control` header from descriptors.
    ///
    /// The header is not set if the descriptors produce no directives.
    fn with_cache_control<DescriptorsT>(
        self,
        descriptors: DescriptorsT,
    ) -> Result<Response, CacheControlError>
    where
        DescriptorsT: IntoIterator,
        DescriptorsT::Item: Into<Descriptor>;
}

impl<IntoResponseT> CacheControlResponse<IntoResponseT> for IntoResponseT
where
    IntoResponseT: IntoResponse,
{
    fn with_cache_control<DescriptorsT>(
        self,
        descriptors: DescriptorsT,
    ) -> Result<Response, CacheControlError>
    where
        DescriptorsT: IntoIterator,
        DescriptorsT::Item: Into<Descriptor>,
    {
        let mut response = self.into_response();
        response.set_cache_control(descriptors)?;
        Ok(response)
    }
}
