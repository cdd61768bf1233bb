use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapingError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An element the page layout is expected to contain was not found.
    #[error("could not find the {0} on the page")]
    MissingElement(&'static str),

    #[error("could not read a station id from link {0:?}")]
    InvalidStationLink(String),

    #[error("row of station {station_id} has a value in column {index} but the header has no name for it")]
    UnnamedColumn { station_id: u32, index: usize },

    /// Some stations have no metadata section at all (station 181 for example).
    #[error("Can't scrape station {station_id}: the page has no station info section")]
    NoStationInfo { station_id: u32 },
}
