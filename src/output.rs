use std::fmt::Display;

use crate::{
    station_info_scraper::StationInfo, station_scraper::StationReading, zone_scraper::ZoneSnapshot,
};

fn key_value_line(key: &str, value: impl Display) -> String {
    format!("{key:18}\t{value}\n")
}

pub fn format_station_reading(reading: &StationReading) -> String {
    reading
        .iter()
        .map(|(abbreviation, value)| match value {
            Some(v) => key_value_line(abbreviation, v),
            None => key_value_line(abbreviation, "null"),
        })
        .collect()
}

pub fn format_zone_snapshot(snapshot: &ZoneSnapshot) -> String {
    let mut out = String::new();
    for (station_id, record) in snapshot {
        let title = format!("Scraping station {station_id}");
        out.push_str(&title);
        out.push('\n');
        out.push_str(&"-".repeat(title.len()));
        out.push('\n');
        for (column, value) in record {
            out.push_str(&key_value_line(column, value));
        }
        out.push('\n');
    }
    out
}

pub fn format_station_info(station_info: &StationInfo) -> String {
    station_info
        .fields()
        .iter()
        .map(|(name, value)| key_value_line(name, value))
        .collect()
}
