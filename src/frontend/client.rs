use crate::api::params::ListQuery;
use crate::api::resources::{RecipeCollection, RecipeResource, RecipeView};
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Read access to the catalog API, as needed by the browsing pages
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of the recipe list
    async fn list(&self, query: &ListQuery) -> Result<RecipeCollection>;

    /// Fetch one recipe, `None` when the API does not know the slug
    async fn get(&self, slug: &str) -> Result<Option<RecipeView>>;
}

/// [`CatalogApi`] over HTTP
pub struct HttpCatalogApi {
    client: Client,
    recipes_url: Url,
}

impl HttpCatalogApi {
    /// `base_url` is the API root without the `/api` suffix
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            recipes_url: base.join("api/recipes")?,
        })
    }

    fn recipe_url(&self, slug: &str) -> Result<Url> {
        let mut url = self.recipes_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(slug);
        Ok(url)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list(&self, query: &ListQuery) -> Result<RecipeCollection> {
        debug!("GET {} {:?}", self.recipes_url, query);
        let response = self
            .client
            .get(self.recipes_url.clone())
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::UpstreamStatus(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn get(&self, slug: &str) -> Result<Option<RecipeView>> {
        let url = self.recipe_url(slug)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let resource: RecipeResource = response.json().await?;
                Ok(Some(resource.data))
            }
            status => Err(CatalogError::UpstreamStatus(status.as_u16())),
        }
    }
}
