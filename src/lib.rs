mod scraping_error;
mod text_manipulators;

pub mod cell_value;
pub mod config;
pub mod output;
pub mod requests;
pub mod scraping_context;
pub mod station_info_scraper;
pub mod station_scraper;
pub mod zone_scraper;

pub use cell_value::{CellValue, coerce};
pub use requests::{PageFetcher, RequestClient};
pub use scraping_context::ScrapingContext;
pub use scraping_error::ScrapingError;
pub use station_info_scraper::{STATION_INFO_FIELDS, StationInfo};
pub use station_scraper::StationReading;
pub use zone_scraper::{ZoneSnapshot, ZoneStationRecord};
