// simplelogin-api/src/pagination.rs
use crate::client::{take_field, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpClient, Method};
use crate::types::{Alias, AliasFilter};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Number of aliases the server returns per page
pub const ALIAS_PAGE_SIZE: usize = 20;

/// Items gathered across pages
///
/// When a page request fails the loop stops and `error` holds the cause;
/// `items` still contains everything fetched before it.
#[derive(Debug)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub pages: u32,
    pub error: Option<ApiError>,
}

impl<T> Paged<T> {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Turn a partial result into an error
    pub fn into_result(self) -> Result<Vec<T>, ApiError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }
}

/// A paginated collection endpoint
#[derive(Debug, Clone)]
pub struct PagedResource<'a> {
    pub path: &'a str,
    /// Key of the item array in each page
    pub items_key: &'a str,
    pub base_params: Vec<(String, String)>,
    /// Stop on a page shorter than this instead of asking for the next one
    pub page_size_hint: Option<usize>,
}

impl<'a> PagedResource<'a> {
    pub fn new(path: &'a str, items_key: &'a str) -> Self {
        Self {
            path,
            items_key,
            base_params: Vec::new(),
            page_size_hint: None,
        }
    }

    pub fn aliases() -> Self {
        Self::new("/api/v2/aliases", "aliases")
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// Fetch one page of `resource`
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        resource: &PagedResource<'_>,
        page: u32,
        filter: AliasFilter,
    ) -> Result<Vec<T>, ApiError> {
        let mut req = self.request(Method::Get, resource.path)?;
        for (key, value) in &resource.base_params {
            req = req.query(key, value.as_str());
        }
        req = req.query("page_id", page.to_string());
        if let Some((key, value)) = filter.query_pair() {
            req = req.query(key, value);
        }

        let resp = self.call(req).await?;
        take_field(resp, resource.items_key)
    }

    /// Walk pages from 0 until one comes back empty
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        resource: &PagedResource<'_>,
        filter: AliasFilter,
    ) -> Paged<T> {
        let mut items = Vec::new();
        let mut page: u32 = 0;

        loop {
            let batch: Vec<T> = match self.fetch_page(resource, page, filter).await {
                Ok(batch) => batch,
                Err(err) => {
                    warn!(path = resource.path, page, error = %err, "pagination stopped early");
                    return Paged {
                        items,
                        pages: page,
                        error: Some(err),
                    };
                }
            };

            let count = batch.len();
            debug!(path = resource.path, page, count, "fetched page");
            page += 1;

            if count == 0 {
                break;
            }
            items.extend(batch);

            if resource.page_size_hint.is_some_and(|size| count < size) {
                break;
            }
        }

        Paged {
            items,
            pages: page,
            error: None,
        }
    }

    pub async fn list_aliases(&self, filter: AliasFilter) -> Paged<Alias> {
        self.fetch_all(&PagedResource::aliases(), filter).await
    }

    pub async fn alias_page(&self, page: u32, filter: AliasFilter) -> Result<Vec<Alias>, ApiError> {
        self.fetch_page(&PagedResource::aliases(), page, filter).await
    }
}
