use std::time::Duration;

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, de::DeserializeOwned};

const ENV_PREFIX: &str = "AQM_";

fn default_base_url() -> String {
    "http://www.svivaaqm.net".to_string()
}

fn default_user_agent() -> String {
    // The site refuses requests with a default or empty agent.
    "Mozilla/5.0".to_string()
}

/// The env vars (prefixed with `AQM_`) read when scraping.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_user_agent")]
    user_agent: String,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ScrapingConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout: None,
        }
    }
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        Self::from_env(scraping_env)
    }

    fn from_env(scraping_env: ScrapingEnv) -> anyhow::Result<Self> {
        if scraping_env.user_agent.trim().is_empty() {
            anyhow::bail!("{ENV_PREFIX}USER_AGENT must not be empty");
        }
        Ok(Self {
            base_url: scraping_env.base_url.trim_end_matches('/').to_string(),
            user_agent: scraping_env.user_agent,
            timeout: scraping_env.timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn station_url(&self, station_id: u32) -> String {
        format!("{}/Online.aspx?ST_ID={};0", self.base_url, station_id)
    }

    pub fn zone_url(&self, zone_id: u32) -> String {
        format!("{}/DynamicTable.aspx?G_ID={}", self.base_url, zone_id)
    }

    pub fn station_info_url(&self, station_id: u32) -> String {
        format!("{}/StationInfo5.aspx?ST_ID={}", self.base_url, station_id)
    }
}

pub struct StationLinkIdExtractor {
    // Matches the id right after the first `=` of a link such as `Online.aspx?ST_ID=5`.
    station_id_regex: Regex,
}

impl StationLinkIdExtractor {
    pub fn new() -> anyhow::Result<Self> {
        let station_id_regex = Regex::new(r"^[^=]*=\s*(\d+)")?;
        Ok(Self { station_id_regex })
    }

    pub fn extract_station_id(&self, href: &str) -> Option<u32> {
        let caps = self.station_id_regex.captures(href)?;
        caps.get(1)?.as_str().parse().ok()
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
