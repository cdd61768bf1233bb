use std::{collections::BTreeMap, sync::LazyLock};

use log::info;
use scraper::{Html, Selector};

use crate::{
    cell_value::{CellValue, coerce},
    config::StationLinkIdExtractor,
    requests::PageFetcher,
    scraping_context::ScrapingContext,
    scraping_error::ScrapingError,
    text_manipulators::{cells_of_row, extract_cell_text},
};

/// Column name to coerced value for one station, `timestamp` included.
pub type ZoneStationRecord = BTreeMap<String, CellValue>;

/// Station id to that station's row of the zone grid.
pub type ZoneSnapshot = BTreeMap<u32, ZoneStationRecord>;

pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Header cells before the parameter names (layout only).
pub const ZONE_HEADER_LEADING_ARTIFACTS: usize = 3;
/// Header cells after the parameter names (layout only).
pub const ZONE_HEADER_TRAILING_ARTIFACTS: usize = 1;
/// Rows before the first station row.
pub const ZONE_HEADER_ROWS: usize = 2;

static GRID_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table#C1WebGrid1").expect("invalid selector: zone grid"));
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("invalid selector: tr"));
static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("invalid selector: td"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("invalid selector: a"));

pub async fn extract_zone_snapshot<F: PageFetcher>(
    ctx: &ScrapingContext<F>,
    zone_id: u32,
) -> Result<ZoneSnapshot, ScrapingError> {
    let url = ctx.scraping_config.zone_url(zone_id);
    let document = ctx.fetcher.fetch_dom(&url).await?;
    let snapshot = parse_zone_snapshot(&document, &ctx.station_link_id_extractor)?;
    info!("zone {zone_id}: {} stations", snapshot.len());
    Ok(snapshot)
}

pub fn parse_zone_snapshot(
    document: &Html,
    id_extractor: &StationLinkIdExtractor,
) -> Result<ZoneSnapshot, ScrapingError> {
    let grid = document
        .select(&GRID_SELECTOR)
        .next()
        .ok_or(ScrapingError::MissingElement("zone grid"))?;
    let mut rows = grid.select(&ROW_SELECTOR);
    let header = rows
        .next()
        .ok_or(ScrapingError::MissingElement("zone grid header"))?;
    let columns = column_names(header);

    let mut snapshot = ZoneSnapshot::new();
    for row in rows.skip(ZONE_HEADER_ROWS - 1) {
        let href = row
            .select(&LINK_SELECTOR)
            .next()
            .and_then(|link| link.value().attr("href"))
            .ok_or(ScrapingError::MissingElement("station link"))?;
        let station_id = id_extractor
            .extract_station_id(href)
            .ok_or_else(|| ScrapingError::InvalidStationLink(href.to_string()))?;

        let mut record = ZoneStationRecord::new();
        // The first cell only holds the station link.
        for (index, cell) in row.select(&CELL_SELECTOR).skip(1).enumerate() {
            let column = columns
                .get(index)
                .ok_or(ScrapingError::UnnamedColumn { station_id, index })?;
            record.insert(column.clone(), coerce(&extract_cell_text(cell)));
        }
        snapshot.insert(station_id, record);
    }

    Ok(snapshot)
}

/// `timestamp` followed by the parameter names of the header row.
fn column_names(header: scraper::ElementRef) -> Vec<String> {
    let cells = cells_of_row(header);
    let end = cells.len().saturating_sub(ZONE_HEADER_TRAILING_ARTIFACTS);
    let mut columns = vec![TIMESTAMP_COLUMN.to_string()];
    columns.extend(
        cells
            .into_iter()
            .take(end)
            .skip(ZONE_HEADER_LEADING_ARTIFACTS)
            .map(extract_cell_text),
    );
    columns
}
