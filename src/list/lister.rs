//! Offset-based lister implementation

use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Default offset stride, matching the server's default page size
const DEFAULT_STRIDE: u32 = 100;

/// Sequential offset-based lister.
///
/// The collection endpoint is queried with `offset=0`, `offset=stride`,
/// `offset=2*stride`, ... until a page deserializes to an empty array. No
/// explicit page-size parameter is sent; the stride mirrors the server's
/// default page size. A non-success response aborts listing entirely — no
/// partial result is returned.
#[derive(Debug, Clone)]
pub struct Lister {
    offset_param: String,
    stride: u32,
}

impl Default for Lister {
    fn default() -> Self {
        Self {
            offset_param: "offset".to_string(),
            stride: DEFAULT_STRIDE,
        }
    }
}

impl Lister {
    /// Create a lister with the default offset parameter and stride
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the offset query parameter name
    #[must_use]
    pub fn with_offset_param(mut self, param: impl Into<String>) -> Self {
        self.offset_param = param.into();
        self
    }

    /// Override the offset stride
    #[must_use]
    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    /// Fetch every page of a collection and return the concatenation, in
    /// request order.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        client: &HttpClient,
        path: &str,
        base: RequestConfig,
    ) -> Result<Vec<T>> {
        let mut all = Vec::new();
        let mut offset: u32 = 0;

        loop {
            let config = base
                .clone()
                .query(self.offset_param.as_str(), offset.to_string());
            let page: Vec<T> = client.get_json_with_config(path, config).await?;

            if page.is_empty() {
                break;
            }

            debug!(offset, count = page.len(), "fetched page from {path}");
            all.extend(page);
            offset += self.stride;
        }

        Ok(all)
    }

    /// Fetch pages of a collection whose total size is already known,
    /// passing an explicit `limit` parameter.
    ///
    /// Pages are requested at offsets `0, limit, 2*limit, ...` while the
    /// offset has not passed `total`. Each raw page body is kept as one
    /// element of the returned vector.
    pub async fn fetch_range(
        &self,
        client: &HttpClient,
        path: &str,
        base: RequestConfig,
        limit: u32,
        total: u64,
    ) -> Result<Vec<Value>> {
        let mut pages = Vec::new();
        let mut offset: u64 = 0;

        while offset <= total {
            let config = base
                .clone()
                .query(self.offset_param.as_str(), offset.to_string())
                .query("limit", limit.to_string());
            let page: Value = client.get_json_with_config(path, config).await?;

            debug!(offset, total, "fetched range page from {path}");
            pages.push(page);
            offset += u64::from(limit);
        }

        Ok(pages)
    }
}
