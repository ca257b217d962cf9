//! Transit TUI - Actor-based transit tracker
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - view-state coordinator processing events
//! - Device Layer (Tokio) - async geolocation and camera requests

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::canvas::Canvas,
    widgets::*,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use transit_tui::app::{AppActor, AppState, QrScanState};
use transit_tui::config::Config;
use transit_tui::constants::{APP_NAME, LOG_FILE_NAME};
use transit_tui::device::{DeviceActor, SimulatedCamera, SimulatedGeolocation};
use transit_tui::messages::ui_events::{key_to_ui_event, InputMode};
use transit_tui::messages::{DeviceCommand, DeviceResponse, RenderState, UiEvent};
use transit_tui::models::{AnalyticsTab, MarkerKind};
use transit_tui::provider::StaticProvider;
use transit_tui::ui::{
    bar_color, cursor_column, map_bounds, marker_color, marker_symbol, render_button, render_tabs,
    trend_color,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load()?;
    tracing::info!(?config, "Starting {}", APP_NAME);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (device_cmd_tx, device_cmd_rx) = mpsc::unbounded_channel::<DeviceCommand>();
    let (device_resp_tx, device_resp_rx) = mpsc::unbounded_channel::<DeviceResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn device actor
    let device_actor = DeviceActor::new(
        Arc::new(SimulatedGeolocation::from_config(&config.geolocation)),
        Arc::new(SimulatedCamera::from_config(&config.camera)),
        device_resp_tx,
    );
    tokio::spawn(device_actor.run(device_cmd_rx));

    // Spawn app actor
    let provider = Arc::new(StaticProvider::new());
    let state = AppState::new(&config, provider.clone(), provider);
    let app_actor = AppActor::new(state, device_cmd_tx, render_tx);
    let app_handle = tokio::spawn(app_actor.run(ui_rx, device_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    let _ = app_handle.await;
    Ok(())
}

/// Map screen height, excluding the status bar
fn screen_height(total: u16) -> u16 {
    total.saturating_sub(1)
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let _ = ui_tx.send(UiEvent::Resize(screen_height(terminal.size()?.height)));

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(event) = key_to_ui_event(
                        key,
                        current_state.view.navbar_expanded,
                        current_state.view.analytics_open,
                        current_state.qr.state,
                        current_state.input_mode,
                        current_state.show_help,
                    ) {
                        let quit = matches!(event, UiEvent::Quit);
                        let _ = ui_tx.send(event);
                        if quit {
                            break;
                        }
                    }
                }
                Event::Resize(_, height) => {
                    let _ = ui_tx.send(UiEvent::Resize(screen_height(height)));
                }
                _ => {}
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Map + navbar
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    let screen = main_chunks[0];

    // The map gives up the bottom half while the navbar is expanded
    let map_height = if state.viewport.height == 0 {
        screen.height
    } else {
        state.viewport.height.min(screen.height)
    };
    let map_area = Rect { height: map_height, ..screen };

    draw_map(f, state, map_area);
    draw_indicators(f, state, map_area);
    draw_navbar(f, state, screen, map_height);
    draw_status_bar(f, state, main_chunks[1]);

    if state.view.analytics_open {
        draw_analytics(f, state, screen);
    }

    if state.qr.state != QrScanState::Idle {
        draw_qr_modal(f, state, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_map(f: &mut Frame, state: &RenderState, area: Rect) {
    let (x_bounds, y_bounds) = map_bounds(state.map.center, state.map.zoom);
    let markers = &state.map.markers;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} · zoom {} ", APP_NAME, state.map.zoom)),
        )
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            for marker in markers {
                let style = Style::default().fg(marker_color(marker.kind)).bold();
                let short = match marker.kind {
                    MarkerKind::CurrentPosition => String::from("you"),
                    _ => marker.label.split(" - ").next().unwrap_or_default().to_string(),
                };
                ctx.print(
                    marker.position.longitude,
                    marker.position.latitude,
                    Span::styled(format!("{} {}", marker_symbol(marker.kind), short), style),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn draw_indicators(f: &mut Frame, state: &RenderState, area: Rect) {
    let card_width = 28.min(area.width / 2);
    if area.height < 6 || card_width < 10 {
        return;
    }

    if let Some(stop) = &state.nearest_stop {
        let card = Rect::new(area.x + 1, area.y + 1, card_width, 4);
        let text = vec![
            Line::from(Span::styled("◆ Nearest Stop", Style::default().fg(Color::Red).bold())),
            Line::from(format!("{} ({})", stop.name, stop.distance)),
        ];
        f.render_widget(Clear, card);
        f.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
            card,
        );
    }

    if let Some(bus) = &state.nearest_bus {
        let card = Rect::new(area.x + area.width - card_width - 1, area.y + 1, card_width, 4);
        let text = vec![
            Line::from(Span::styled(
                format!("■ Bus {}", bus.number),
                Style::default().fg(Color::Blue).bold(),
            )),
            Line::from(format!("Arriving in {}", bus.eta)),
        ];
        f.render_widget(Clear, card);
        f.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
            card,
        );
    }
}

fn draw_navbar(f: &mut Frame, state: &RenderState, screen: Rect, map_height: u16) {
    if !state.view.navbar_expanded {
        let height = 4.min(screen.height);
        let bar = Rect::new(screen.x, screen.y + screen.height - height, screen.width, height);
        let buttons = Line::from(vec![
            Span::raw("  ◆ Stops [p]  "),
            Span::raw("  ☰ Menu [n]  "),
            Span::raw("  ▤ Analytics [a]  "),
            Span::raw("  ▣ Scan QR [r]  "),
        ]);
        let block = Block::default()
            .borders(Borders::TOP)
            .title(Line::from(" ▲ ").centered())
            .style(Style::default().bg(Color::Black).fg(Color::White));
        f.render_widget(Clear, bar);
        f.render_widget(
            Paragraph::new(vec![Line::raw(""), buttons.centered()]).block(block),
            bar,
        );
        return;
    }

    let sheet = Rect::new(
        screen.x,
        screen.y + map_height,
        screen.width,
        screen.height - map_height,
    );
    let block = Block::default()
        .borders(Borders::TOP)
        .title(Line::from(" ▼ ").centered())
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(sheet);
    f.render_widget(Clear, sheet);
    f.render_widget(block, sheet);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Length(3), // Buttons
            Constraint::Min(0),    // Nearby stops
        ])
        .split(inner);

    draw_search(f, state, chunks[0]);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .spacing(1)
        .split(chunks[1]);
    f.render_widget(render_button("◆ Bus Stops", "s", state.view.show_stops), buttons[0]);
    f.render_widget(render_button("■ Buses", "b", state.view.show_buses), buttons[1]);
    f.render_widget(
        render_button("➤ Navigate", "-", false).style(Style::default().fg(Color::DarkGray)),
        buttons[2],
    );
    f.render_widget(render_button("▣ Scan QR", "r", false), buttons[3]);

    let items: Vec<ListItem> = state
        .nearby_stops
        .iter()
        .map(|stop| {
            ListItem::new(vec![
                Line::from(Span::styled(format!("◆ {}", stop.name), Style::default().bold())),
                Line::from(Span::styled(
                    format!("  {} away", stop.distance),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();
    let title = if state.search_query.is_empty() {
        String::from(" Nearby Bus Stops ")
    } else {
        format!(" Nearby Bus Stops matching \"{}\" ", state.search_query)
    };
    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Span::styled(
            "No matching stops",
            Style::default().fg(Color::DarkGray),
        ))])
    } else {
        List::new(items)
    };
    f.render_widget(list.block(Block::default().borders(Borders::ALL).title(title)), chunks[2]);
}

fn draw_search(f: &mut Frame, state: &RenderState, area: Rect) {
    let editing = state.input_mode == InputMode::Editing;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .title(" Search (/) ");

    let content = if state.search_query.is_empty() && !editing {
        Span::styled("Search locations...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.search_query.as_str())
    };
    f.render_widget(Paragraph::new(content).block(block), area);

    if editing {
        let max_x = area.x + area.width.saturating_sub(2);
        let column = cursor_column(&state.search_query, state.search_cursor);
        let cursor_x = area.x.saturating_add(column).saturating_add(1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_analytics(f: &mut Frame, state: &RenderState, area: Rect) {
    let analytics = &state.analytics;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ▤ Travel Analytics ")
        .title_bottom(Line::from(" Esc:close | 1/2:tab ").right_aligned())
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Stats cards
            Constraint::Min(8),    // Activity chart
            Constraint::Length(5), // Destinations
            Constraint::Length(4), // Peak times
        ])
        .split(inner);

    // Stats cards
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);
    for (summary, card) in analytics.summaries.iter().zip(cards.iter()) {
        let label = match summary.period {
            AnalyticsTab::Today => "Today",
            AnalyticsTab::Week => "Week",
        };
        let text = vec![
            Line::from(vec![
                Span::raw(format!("{}  ", label)),
                Span::styled(
                    format!("{:+}%", summary.change_percent),
                    Style::default().fg(trend_color(summary.change_percent)),
                ),
            ]),
            Line::from(vec![
                Span::styled(summary.trips.to_string(), Style::default().bold()),
                Span::styled(" trips", Style::default().fg(Color::Gray)),
            ]),
        ];
        f.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
            *card,
        );
    }

    // Activity chart
    let chart_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(chunks[1]);
    let tabs = render_tabs(
        &[AnalyticsTab::Today.as_str(), AnalyticsTab::Week.as_str()],
        state.view.analytics_tab.index(),
    );
    f.render_widget(tabs, chart_chunks[0]);

    let bars: Vec<Bar> = analytics
        .activity
        .iter()
        .enumerate()
        .map(|(i, point)| {
            Bar::default()
                .value(point.trips)
                .label(Line::from(point.label.as_str()))
                .style(Style::default().fg(bar_color(i)))
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(" Travel Activity "))
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1);
    f.render_widget(chart, chart_chunks[1]);

    // Popular destinations
    let destinations: Vec<ListItem> = analytics
        .destinations
        .iter()
        .enumerate()
        .map(|(i, dest)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::Indexed(99)).bold()),
                Span::raw(format!("{:<24}", dest.name)),
                Span::styled(format!("{} trips", dest.trips), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(destinations)
            .block(Block::default().borders(Borders::ALL).title(" Popular Destinations ")),
        chunks[2],
    );

    // Most active times
    let peaks: Vec<Line> = analytics
        .peaks
        .iter()
        .map(|peak| {
            Line::from(vec![
                Span::styled("◷ ", Style::default().fg(Color::Blue)),
                Span::styled(format!("{:<14}", peak.name), Style::default().bold()),
                Span::styled(peak.window.as_str(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(peaks)
            .block(Block::default().borders(Borders::ALL).title(" Most Active Times ")),
        chunks[3],
    );
}

fn draw_qr_modal(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(50, 50, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ▣ Scan QR (Esc to close) ")
        .style(Style::default().bg(Color::White).fg(Color::Black));

    let lines = match state.qr.state {
        QrScanState::PermissionPrompt => {
            let mut lines = vec![
                Line::raw(""),
                Line::from("📷").centered(),
                Line::raw(""),
                Line::from("Allow camera access to scan QR codes").centered(),
                Line::raw(""),
            ];
            if state.qr.pending_request.is_some() {
                lines.push(Line::from("Waiting for permission...").centered());
            } else {
                lines.push(
                    Line::from(Span::styled(
                        " [Enter] Allow Camera Access ",
                        Style::default().fg(Color::White).bg(Color::Black),
                    ))
                    .centered(),
                );
            }
            if state.qr.denied {
                lines.push(Line::raw(""));
                lines.push(
                    Line::from(Span::styled(
                        "Camera access was denied",
                        Style::default().fg(Color::Red),
                    ))
                    .centered(),
                );
            }
            lines
        }
        QrScanState::Scanning => vec![
            Line::raw(""),
            Line::from("┌──────────────┐").centered(),
            Line::from("│              │").centered(),
            Line::from(Span::styled("│──────────────│", Style::default().fg(Color::Red))).centered(),
            Line::from("│              │").centered(),
            Line::from("└──────────────┘").centered(),
            Line::raw(""),
            Line::from("Scanning for QR code...").centered(),
        ],
        QrScanState::Idle => Vec::new(),
    };

    f.render_widget(Clear, popup_area);
    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move "
    } else {
        " n:navbar | s:stops | b:buses | a:analytics | r:QR | l:locate | ?:help | q:quit "
    };
    let status = format!(
        " {} [{}] |{}",
        state.position.coordinate,
        state.position.describe(),
        hints
    );

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 TRANSIT TUI - Keyboard Shortcuts

 MAP
   n / Space          Expand / collapse navbar
   p                  Show bus stops
   s                  Toggle bus stops
   b                  Toggle buses
   l                  Locate me again

 NAVBAR (expanded)
   /                  Search stops
   Esc / Enter        Stop editing

 ANALYTICS
   a                  Open analytics
   1 / 2              Today / This Week
   Tab / ← / →        Switch tab
   Esc / x            Close

 QR SCAN
   r                  Open / close scanner
   Enter / y          Allow camera access

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
