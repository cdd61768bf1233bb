use std::sync::LazyLock;

use log::{info, warn};
use scraper::{Html, Selector};
use serde::Serialize;

use crate::{
    cell_value::parse_float_or_null,
    requests::PageFetcher,
    scraping_context::ScrapingContext,
    scraping_error::ScrapingError,
    text_manipulators::{cells_of_row, extract_text},
};

/// Field names in the row order of the station info table.
pub const STATION_INFO_FIELDS: [&str; 9] = [
    "name",
    "location",
    "zone",
    "owners",
    "purpose",
    "lon",
    "lat",
    "height",
    "date_of_founding",
];

static INFO_TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div#stationInfoDiv table").expect("invalid selector: station info table")
});
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("invalid selector: tr"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationInfo {
    pub name: String,
    pub location: String,
    pub zone: String,
    pub owners: String,
    pub purpose: String,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub height: Option<f64>,
    pub date_of_founding: String,
}

impl StationInfo {
    /// Display values paired with [`STATION_INFO_FIELDS`], in page order.
    pub fn fields(&self) -> [(&'static str, String); 9] {
        let coordinate = |value: Option<f64>| value.map_or_else(|| "null".to_string(), |v| v.to_string());
        let values = [
            self.name.clone(),
            self.location.clone(),
            self.zone.clone(),
            self.owners.clone(),
            self.purpose.clone(),
            coordinate(self.lon),
            coordinate(self.lat),
            coordinate(self.height),
            self.date_of_founding.clone(),
        ];
        let mut fields = STATION_INFO_FIELDS.map(|name| (name, String::new()));
        for (field, value) in fields.iter_mut().zip(values) {
            field.1 = value;
        }
        fields
    }
}

pub async fn extract_station_info<F: PageFetcher>(
    ctx: &ScrapingContext<F>,
    station_id: u32,
) -> Result<StationInfo, ScrapingError> {
    let url = ctx.scraping_config.station_info_url(station_id);
    let document = ctx.fetcher.fetch_dom(&url).await?;
    let station_info = parse_station_info(&document, station_id)?;
    info!("station {station_id}: info for {:?}", station_info.name);
    Ok(station_info)
}

pub fn parse_station_info(document: &Html, station_id: u32) -> Result<StationInfo, ScrapingError> {
    let table = document
        .select(&INFO_TABLE_SELECTOR)
        .next()
        .ok_or(ScrapingError::NoStationInfo { station_id })?;

    // The first row is a heading and the last one is not data.
    let rows: Vec<_> = table.select(&ROW_SELECTOR).collect();
    let data_rows = rows
        .get(1..rows.len().saturating_sub(1))
        .unwrap_or_default();
    if data_rows.len() > STATION_INFO_FIELDS.len() {
        warn!(
            "station {station_id}: ignoring {} extra info rows",
            data_rows.len() - STATION_INFO_FIELDS.len()
        );
    }

    let mut values = Vec::with_capacity(STATION_INFO_FIELDS.len());
    for row in data_rows.iter().take(STATION_INFO_FIELDS.len()) {
        let cell = cells_of_row(*row)
            .get(1)
            .copied()
            .ok_or(ScrapingError::MissingElement("station info value cell"))?;
        values.push(extract_text(cell).trim().to_string());
    }
    let [name, location, zone, owners, purpose, lon, lat, height, date_of_founding]: [String; 9] =
        values
            .try_into()
            .map_err(|_| ScrapingError::MissingElement("station info row"))?;

    Ok(StationInfo {
        name,
        location,
        zone,
        owners,
        purpose,
        lon: parse_coordinate(station_id, "lon", &lon),
        lat: parse_coordinate(station_id, "lat", &lat),
        height: parse_coordinate(station_id, "height", &height),
        date_of_founding,
    })
}

/// Empty means not recorded; anything unparsable is logged and dropped.
fn parse_coordinate(station_id: u32, field: &str, value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    let parsed = parse_float_or_null(value);
    if parsed.is_none() {
        warn!("station {station_id}: {field} is not a number: {value:?}");
    }
    parsed
}
