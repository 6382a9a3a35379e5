use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
};
use teammove_core::{
    locality::{Locality, LocalityToken},
    model::{EventMeta, ProximityTier, RideStats},
};

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new(format!(
        "teammove – carpool matching · {}",
        app.service.source_name()
    ))
    .block(Block::default().borders(Borders::ALL).title("Teammove"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::EventSelect => draw_event_select(frame, app, *content_area),
        Screen::PassengerAddress => draw_passenger_address(frame, app, *content_area),
        Screen::MatchList => draw_match_list(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::EventSelect => "↑/↓ move · Enter/Space select event · r reload · q/Ctrl-C quit",
        Screen::PassengerAddress => "Type the departure address · Enter match · Esc back · Ctrl-C quit",
        Screen::MatchList => "↑/↓ move · Esc/←/b edit address · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_event_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = if app.events.is_empty() {
        vec![ListItem::new("No events available.")]
    } else {
        app.events
            .iter()
            .enumerate()
            .map(|(idx, event)| {
                let prefix = if idx == app.event_list_index {
                    "> "
                } else {
                    "  "
                };
                ListItem::new(format!("{prefix}{}", event_label(event)))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select event (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.events.is_empty() {
        state.select(Some(app.event_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_passenger_address(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Min(0),    // locality preview
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, preview_area] = chunks else {
        return;
    };

    let event_name = app
        .selected_event
        .as_ref()
        .map_or("<no event>", |event| event.name.as_str());

    let input = Paragraph::new(app.address_input.as_str())
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Passenger departure for {event_name} (e.g. 10 Rue de Paris, 75001 Paris)"
        )))
        .wrap(Wrap { trim: true });
    frame.render_widget(input, *input_area);

    let preview = Paragraph::new(locality_lines(&app.passenger_locality))
        .block(Block::default().borders(Borders::ALL).title("Detected locality"))
        .wrap(Wrap { trim: true });
    frame.render_widget(preview, *preview_area);
}

fn draw_match_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // summary
            Constraint::Min(0),    // drivers
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [summary_area, table_area] = chunks else {
        return;
    };

    let summary = Paragraph::new(vec![
        Line::from(format!(
            "Passenger: {} ({})",
            app.address_input.trim(),
            token_label(app.passenger_locality.token())
        )),
        Line::from(stats_label(app.stats.as_ref())),
    ])
    .block(Block::default().borders(Borders::ALL).title("Summary"));
    frame.render_widget(summary, *summary_area);

    let title = format!("Drivers ({} with free seats)", app.matches.len());

    if app.matches.is_empty() {
        let paragraph = Paragraph::new("No ride with free seats for this event.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, *table_area);
        return;
    }

    let rows = app.matches.iter().map(|record| {
        Row::new(vec![
            Cell::from(tier_label(record.tier)),
            Cell::from(record.driver_name.clone()),
            Cell::from(record.available_seats.to_string()),
            Cell::from(record.ride_id.to_string()),
        ])
        .style(Style::default().fg(tier_color(record.tier)))
    });

    let column_widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Proximity", "Driver", "Seats", "Ride"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .column_spacing(1);

    let mut state = TableState::default();
    state.select(Some(app.match_list_index));
    frame.render_stateful_widget(table, *table_area, &mut state);
}

fn event_label(event: &EventMeta) -> String {
    let time = event.time.as_deref().unwrap_or("");
    format!(
        "{} {time} · {} · {}",
        event.date.format("%d/%m/%Y"),
        event.name,
        event.location
    )
}

fn locality_lines(locality: &Locality) -> Vec<Line<'static>> {
    vec![
        Line::from(format!("City: {}", locality.city.as_deref().unwrap_or("unknown"))),
        Line::from(format!("Zone: {}", locality.zone.as_deref().unwrap_or("unknown"))),
    ]
}

fn token_label(token: LocalityToken<'_>) -> String {
    match token {
        LocalityToken::City(city) => format!("city {city}"),
        LocalityToken::Zone(zone) => format!("zone {zone}"),
        LocalityToken::Unknown => "locality unknown".to_owned(),
    }
}

fn stats_label(stats: Option<&RideStats>) -> String {
    stats.map_or_else(
        || "Ride statistics unavailable".to_owned(),
        |stats| {
            format!(
                "{} active rides · {} of {} seats free",
                stats.total_rides, stats.available_seats, stats.total_seats
            )
        },
    )
}

fn tier_label(tier: ProximityTier) -> &'static str {
    match tier {
        ProximityTier::SameCity => "Same city",
        ProximityTier::SameZone => "Same zone",
        ProximityTier::Other => "Farther",
    }
}

fn tier_color(tier: ProximityTier) -> Color {
    match tier {
        ProximityTier::SameCity => Color::Green,
        ProximityTier::SameZone => Color::Yellow,
        ProximityTier::Other => Color::Gray,
    }
}
