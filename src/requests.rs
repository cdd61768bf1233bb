use log::debug;
use reqwest::{Client, ClientBuilder};
use scraper::Html;

use crate::{config::ScrapingConfig, scraping_error::ScrapingError};

/// Source of pages to scrape.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, ScrapingError>;

    async fn fetch_dom(&self, url: &str) -> Result<Html, ScrapingError> {
        let body = self.fetch_page(url).await?;
        Ok(Html::parse_document(&body))
    }
}

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new(config: &ScrapingConfig) -> anyhow::Result<Self> {
        let mut builder = ClientBuilder::new().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for RequestClient {
    async fn fetch_page(&self, url: &str) -> Result<String, ScrapingError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        // Undecodable bytes come back as U+FFFD.
        let body = response.text().await?;
        debug!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}
