use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static DIV_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div").expect("invalid selector: div"));

/// Characters the zone grid pads its cells with.
const CELL_PADDING: [char; 3] = ['\r', '\n', '\t'];

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// Text of a grid cell, read from its inner `<div>` when it has one.
pub fn extract_cell_text(cell: ElementRef) -> String {
    let node = cell.select(&DIV_SELECTOR).next().unwrap_or(cell);
    extract_text(node)
        .trim_matches(CELL_PADDING.as_slice())
        .to_string()
}

/// Parameter abbreviation from link text such as `PM10[µg/m3]`.
pub fn abbreviation_from_link_text(text: &str) -> String {
    text.split('[').next().unwrap_or_default().trim().to_string()
}

pub fn cells_of_row(row: ElementRef) -> Vec<ElementRef> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn cell_text_prefers_inner_div_and_strips_padding() {
        let html = Html::parse_fragment("<table><tr><td>ignored<div>\r\n\tPM10\t\r\n</div></td></tr></table>");
        let td = Selector::parse("td").unwrap();
        let cell = html.select(&td).next().unwrap();
        assert_eq!(extract_cell_text(cell), "PM10");
    }

    #[test]
    fn cell_text_falls_back_to_cell() {
        let html = Html::parse_fragment("<table><tr><td>\t08:00\r\n</td></tr></table>");
        let td = Selector::parse("td").unwrap();
        let cell = html.select(&td).next().unwrap();
        assert_eq!(extract_cell_text(cell), "08:00");
    }

    #[test]
    fn abbreviation_stops_at_bracket() {
        assert_eq!(abbreviation_from_link_text("NO2[ppb]"), "NO2");
        assert_eq!(abbreviation_from_link_text(" O3 "), "O3");
        assert_eq!(abbreviation_from_link_text("[ppb]"), "");
    }

    #[test]
    fn cells_of_row_skips_non_cell_children() {
        let html = Html::parse_fragment("<table><tr><th>a</th> <td>b</td><td>c</td></tr></table>");
        let tr = Selector::parse("tr").unwrap();
        let row = html.select(&tr).next().unwrap();
        let texts: Vec<_> = cells_of_row(row).into_iter().map(extract_text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }
}
