use ratatui::{prelude::*, widgets::*};

use crate::models::{Coordinate, MarkerKind};

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Renders a sheet button, highlighted when active
pub fn render_button<'a>(label: &'a str, key: &'a str, active: bool) -> Paragraph<'a> {
    let style = if active {
        Style::default().fg(Color::Black).bg(Color::White).bold()
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    };

    Paragraph::new(vec![
        Line::from(label),
        Line::from(Span::styled(format!("[{}]", key), Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .style(style)
}

/// Canvas glyph for a marker
pub fn marker_symbol(kind: MarkerKind) -> &'static str {
    match kind {
        MarkerKind::CurrentPosition => "◉",
        MarkerKind::Stop => "◆",
        MarkerKind::Bus => "■",
    }
}

/// Marker color
pub fn marker_color(kind: MarkerKind) -> Color {
    match kind {
        MarkerKind::CurrentPosition => Color::Cyan,
        MarkerKind::Stop => Color::Red,
        MarkerKind::Bus => Color::Blue,
    }
}

/// Trend badge color for a percent change
pub fn trend_color(change_percent: i32) -> Color {
    if change_percent >= 0 {
        Color::Green
    } else {
        Color::Red
    }
}

/// Alternating chart bar colors
pub fn bar_color(index: usize) -> Color {
    if index % 2 == 0 {
        Color::Rgb(108, 99, 255)
    } else {
        Color::Rgb(136, 132, 216)
    }
}

/// Screen column of a byte offset into `text`
pub fn cursor_column(text: &str, byte_offset: usize) -> u16 {
    let columns = text.get(..byte_offset).map_or(0, |prefix| prefix.chars().count());
    u16::try_from(columns).unwrap_or(u16::MAX)
}

/// Canvas bounds `(x, y)` around `center` at a slippy-map zoom level.
///
/// Longitude span halves with every zoom step; latitude span is half the
/// longitude span because terminal cells are about twice as tall as wide.
pub fn map_bounds(center: Coordinate, zoom: u8) -> ([f64; 2], [f64; 2]) {
    let lon_span = 360.0 / 2f64.powi(i32::from(zoom) - 4);
    let lat_span = lon_span / 2.0;
    (
        [center.longitude - lon_span / 2.0, center.longitude + lon_span / 2.0],
        [center.latitude - lat_span / 2.0, center.latitude + lat_span / 2.0],
    )
}
