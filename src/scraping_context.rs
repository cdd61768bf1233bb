use crate::{
    config::{ScrapingConfig, StationLinkIdExtractor},
    requests::{PageFetcher, RequestClient},
    scraping_error::ScrapingError,
    station_info_scraper::{self, StationInfo},
    station_scraper::{self, StationReading},
    zone_scraper::{self, ZoneSnapshot},
};

pub struct ScrapingContext<F = RequestClient> {
    pub scraping_config: ScrapingConfig,
    pub station_link_id_extractor: StationLinkIdExtractor,
    pub fetcher: F,
}

impl ScrapingContext<RequestClient> {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_config = ScrapingConfig::new()?;
        let request_client = RequestClient::new(&scraping_config)?;
        Self::with_fetcher(scraping_config, request_client)
    }
}

impl<F: PageFetcher> ScrapingContext<F> {
    pub fn with_fetcher(scraping_config: ScrapingConfig, fetcher: F) -> anyhow::Result<Self> {
        let station_link_id_extractor = StationLinkIdExtractor::new()?;
        Ok(ScrapingContext {
            scraping_config,
            station_link_id_extractor,
            fetcher,
        })
    }

    pub async fn extract_station_reading(
        &self,
        station_id: u32,
    ) -> Result<StationReading, ScrapingError> {
        station_scraper::extract_station_reading(self, station_id).await
    }

    pub async fn extract_zone_snapshot(&self, zone_id: u32) -> Result<ZoneSnapshot, ScrapingError> {
        zone_scraper::extract_zone_snapshot(self, zone_id).await
    }

    pub async fn extract_station_info(&self, station_id: u32) -> Result<StationInfo, ScrapingError> {
        station_info_scraper::extract_station_info(self, station_id).await
    }
}
