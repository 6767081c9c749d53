use crate::domain::model::Creature;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{PokedexError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;

/// Fetches the catalog as a JSON array from a remote provider.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    url: String,
    client: Client,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        validate_url("catalog.source", &url)?;
        Ok(Self {
            url,
            client: Client::new(),
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn load(&self) -> Result<Vec<Creature>> {
        tracing::debug!("Making API request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(PokedexError::SourceError {
                message: format!("{} responded with {}", self.url, response.status()),
            });
        }

        let creatures: Vec<Creature> = response.json().await?;
        Ok(creatures)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
