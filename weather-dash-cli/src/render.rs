//! Plain-text card grid.

use unicode_width::UnicodeWidthStr;
use weather_dash_core::{Dashboard, Notice, WeatherRecord, icon_glyph};

/// Outer width of one card, borders included.
pub const CARD_WIDTH: usize = 24;
const INNER_WIDTH: usize = CARD_WIDTH - 4;
const GAP: usize = 2;
const DEFAULT_WIDTH: usize = 80;

/// Grid width: explicit flag, else `$COLUMNS`, else 80.
pub fn terminal_width(explicit: Option<usize>) -> usize {
    explicit
        .or_else(|| std::env::var("COLUMNS").ok()?.trim().parse().ok())
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

/// How many cards fit side by side. Always at least one.
pub fn columns_for(width: usize) -> usize {
    ((width + GAP) / (CARD_WIDTH + GAP)).max(1)
}

pub fn render_dashboard(dashboard: &Dashboard, width: usize) -> String {
    render_view(dashboard.notice(), dashboard.cities().as_slice(), width)
}

pub fn render_view(notice: Option<Notice>, records: &[WeatherRecord], width: usize) -> String {
    let mut out = String::new();

    if let Some(notice) = notice {
        out.push_str(&format!("! {notice}\n"));
    }

    if records.is_empty() {
        out.push_str("No cities yet. Type a city name to add a card.\n");
    } else {
        out.push_str(&render_grid(records, width));
    }

    out
}

pub fn render_grid(records: &[WeatherRecord], width: usize) -> String {
    let cols = columns_for(width);
    let gap = " ".repeat(GAP);
    let mut out = String::new();

    for row in records.chunks(cols) {
        let cards: Vec<Vec<String>> = row.iter().map(card_lines).collect();
        let height = cards.iter().map(Vec::len).max().unwrap_or(0);

        for line in 0..height {
            let joined: Vec<&str> = cards
                .iter()
                .map(|c| c.get(line).map(String::as_str).unwrap_or(""))
                .collect();
            out.push_str(joined.join(&gap).trim_end());
            out.push('\n');
        }
    }

    out
}

pub fn card_lines(record: &WeatherRecord) -> Vec<String> {
    let body = [
        record.city.clone(),
        format!("{} {}°C", icon_glyph(&record.icon), record.temperature),
        record.description.clone(),
        format!("Feels like {}°C", record.feels_like),
        format!("Wind {} km/h", record.wind_speed),
        format!("Humidity {}%", record.humidity),
        format!("Updated {}", record.observed_at.format("%H:%M UTC")),
    ];

    let border = "─".repeat(CARD_WIDTH - 2);
    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format!("╭{border}╮"));
    lines.extend(body.iter().map(|text| format!("│ {} │", fit(text, INNER_WIDTH))));
    lines.push(format!("╰{border}╯"));
    lines
}

/// Truncate with an ellipsis or pad with spaces to exactly `width` columns.
fn fit(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        let pad = width - display_width(text);
        return format!("{text}{}", " ".repeat(pad));
    }

    let mut out = String::new();
    for c in text.chars() {
        out.push(c);
        if display_width(&out) > width - 1 {
            out.pop();
            break;
        }
    }
    out.push('…');

    let pad = width.saturating_sub(display_width(&out));
    out.push_str(&" ".repeat(pad));
    out
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(city: &str) -> WeatherRecord {
        WeatherRecord {
            city: city.into(),
            temperature: 20,
            feels_like: 20,
            description: "clear sky".into(),
            icon: "01d".into(),
            wind_speed: 11,
            humidity: 55,
            observed_at: Utc.with_ymd_and_hms(2024, 5, 1, 14, 5, 0).unwrap(),
        }
    }

    #[test]
    fn columns_follow_width() {
        assert_eq!(columns_for(0), 1);
        assert_eq!(columns_for(CARD_WIDTH), 1);
        assert_eq!(columns_for(CARD_WIDTH * 2 + GAP), 2);
        assert_eq!(columns_for(80), 3);
        assert_eq!(columns_for(200), 7);
    }

    #[test]
    fn explicit_width_wins() {
        assert_eq!(terminal_width(Some(132)), 132);
    }

    #[test]
    fn card_shows_all_fields() {
        let text = card_lines(&record("Berlin")).join("\n");

        assert!(text.contains("Berlin"));
        assert!(text.contains("☀️ 20°C"));
        assert!(text.contains("clear sky"));
        assert!(text.contains("Feels like 20°C"));
        assert!(text.contains("Wind 11 km/h"));
        assert!(text.contains("Humidity 55%"));
        assert!(text.contains("Updated 14:05 UTC"));
    }

    #[test]
    fn card_lines_share_one_width() {
        for line in card_lines(&record("Berlin")) {
            assert_eq!(display_width(&line), CARD_WIDTH, "line {line:?}");
        }
    }

    #[test]
    fn long_city_names_are_truncated() {
        let lines = card_lines(&record("Llanfairpwllgwyngyllgogerychwyrndrobwll"));

        assert!(lines[1].contains('…'));
        assert_eq!(display_width(&lines[1]), CARD_WIDTH);
    }

    #[test]
    fn wide_city_names_keep_card_width() {
        for city in ["東京", "서울특별시", "北京市朝阳区望京街道办事处附近"] {
            for line in card_lines(&record(city)) {
                assert_eq!(display_width(&line), CARD_WIDTH, "line {line:?}");
            }
        }
    }

    #[test]
    fn every_glyph_fits_the_card() {
        for icon in ["01d", "02n", "03d", "09n", "11d", "13d", "50n"] {
            let mut r = record("Oslo");
            r.icon = icon.into();
            for line in card_lines(&r) {
                assert_eq!(display_width(&line), CARD_WIDTH, "icon {icon}, line {line:?}");
            }
        }
    }

    #[test]
    fn grid_wraps_rows_in_insertion_order() {
        let records: Vec<_> = ["Oslo", "Lima", "Cairo"].into_iter().map(record).collect();
        let card_height = card_lines(&records[0]).len();

        let grid = render_grid(&records, CARD_WIDTH * 2 + GAP);
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines.len(), card_height * 2);
        assert!(lines[1].find("Oslo") < lines[1].find("Lima"));
        assert!(lines[card_height + 1].contains("Cairo"));
    }

    #[test]
    fn view_shows_notice_above_cards() {
        let out = render_view(Some(Notice::AlreadyAdded), &[record("Paris")], 80);

        assert!(out.starts_with("! City already added\n"));
        assert!(out.contains("Paris"));
    }

    #[test]
    fn empty_view_has_hint() {
        let out = render_view(None, &[], 80);
        assert!(out.contains("No cities yet"));
    }
}
