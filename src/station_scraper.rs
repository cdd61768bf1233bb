use std::{collections::BTreeMap, sync::LazyLock};

use log::info;
use scraper::{Html, Selector};

use crate::{
    cell_value::parse_float_or_null,
    requests::PageFetcher,
    scraping_context::ScrapingContext,
    scraping_error::ScrapingError,
    text_manipulators::{abbreviation_from_link_text, extract_text},
};

/// Abbreviation to live value. Unparsable values are kept as `None`.
pub type StationReading = BTreeMap<String, Option<f64>>;

/// The first two rows of the readings table are headings.
const READING_HEADER_ROWS: usize = 2;

// The readings table has no id; its attributes are the only stable handle.
static READINGS_TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"table[border="1"][bordercolor="navy"][cellpadding="0"][cellspacing="0"]"#)
        .expect("invalid selector: readings table")
});
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("invalid selector: tr"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("invalid selector: a"));
static BOLD_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("b").expect("invalid selector: b"));

pub async fn extract_station_reading<F: PageFetcher>(
    ctx: &ScrapingContext<F>,
    station_id: u32,
) -> Result<StationReading, ScrapingError> {
    let url = ctx.scraping_config.station_url(station_id);
    let document = ctx.fetcher.fetch_dom(&url).await?;
    let reading = parse_station_reading(&document)?;
    info!("station {station_id}: {} parameters", reading.len());
    Ok(reading)
}

pub fn parse_station_reading(document: &Html) -> Result<StationReading, ScrapingError> {
    let table = document
        .select(&READINGS_TABLE_SELECTOR)
        .next()
        .ok_or(ScrapingError::MissingElement("readings table"))?;

    let mut reading = StationReading::new();
    for row in table.select(&ROW_SELECTOR).skip(READING_HEADER_ROWS) {
        let link = row
            .select(&LINK_SELECTOR)
            .next()
            .ok_or(ScrapingError::MissingElement("parameter link"))?;
        let value_cell = row
            .select(&BOLD_SELECTOR)
            .next()
            .ok_or(ScrapingError::MissingElement("parameter value"))?;

        let abbreviation = abbreviation_from_link_text(&extract_text(link));
        reading.insert(abbreviation, parse_float_or_null(&extract_text(value_cell)));
    }

    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body>
            <table border="1"><tr><td>decoy</td></tr></table>
            <table border="1" bordercolor="navy" cellpadding="0" cellspacing="0">
              <tr><td colspan="3">Station</td></tr>
              <tr><td>Monitor</td><td>Value</td><td>Time</td></tr>
              {rows}
            </table></body></html>"#
        ))
    }

    #[test]
    fn reads_abbreviation_and_value() {
        let document = page(
            r#"<tr><td><a href="x">PM10[µg/m³]</a></td><td><b>41.5</b></td><td>10:00</td></tr>
               <tr><td><a href="x">NO2 [ppb]</a></td><td><b> 12 </b></td><td>10:00</td></tr>"#,
        );
        let reading = parse_station_reading(&document).unwrap();
        assert_eq!(reading.len(), 2);
        assert_eq!(reading["PM10"], Some(41.5));
        assert_eq!(reading["NO2"], Some(12.0));
    }

    #[test]
    fn unparsable_value_is_kept_as_none() {
        let document = page(
            r#"<tr><td><a href="x">SO2[ppb]</a></td><td><b>NoData</b></td></tr>
               <tr><td><a href="x">O3[ppb]</a></td><td><b>7-</b></td></tr>"#,
        );
        let reading = parse_station_reading(&document).unwrap();
        assert_eq!(reading.get("SO2"), Some(&None));
        assert_eq!(reading.get("O3"), Some(&None));
    }

    #[test]
    fn header_only_table_gives_empty_reading() {
        let reading = parse_station_reading(&page("")).unwrap();
        assert!(reading.is_empty());
    }

    #[test]
    fn missing_table_is_an_error() {
        let document = Html::parse_document("<html><body><table><tr><td>x</td></tr></table></body></html>");
        let err = parse_station_reading(&document).unwrap_err();
        assert!(matches!(err, ScrapingError::MissingElement("readings table")));
    }

    #[test]
    fn row_without_value_cell_is_an_error() {
        let document = page(r#"<tr><td><a href="x">CO[ppm]</a></td><td>0.4</td></tr>"#);
        let err = parse_station_reading(&document).unwrap_err();
        assert!(matches!(err, ScrapingError::MissingElement("parameter value")));
    }
}
