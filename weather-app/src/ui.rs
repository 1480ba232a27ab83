//! Rendering - pure function of AppState

use std::rc::Rc;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::icon::IconWidget;
use crate::state::{AppState, DisplayState, WeatherView};

const BACKGROUND: Color = Color::Rgb(15, 76, 129);
const BUTTON: Color = Color::Rgb(152, 180, 212);
const MUTED: Color = Color::Rgb(170, 190, 215);

/// Height of the icon in cells. Width follows the image aspect ratio, two columns per row.
pub const ICON_ROWS: u16 = 8;

pub const PLACEHOLDER: &str = "Enter city name";
pub const START_HINT: &str = "Enter a city to start";

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(Block::new().bg(BACKGROUND).fg(Color::White), area);

    let chunks = window_chunks(area);

    let title = Line::from("Weather App")
        .add_modifier(Modifier::BOLD)
        .centered();
    frame.render_widget(Paragraph::new(title), chunks[0]);

    render_search_row(frame, chunks[2], state);
    render_display(frame, chunks[4], state);
    render_footer(frame, chunks[5], state);
}

/// Where the Search button lands in a window of the given size.
pub fn search_button_area(area: Rect) -> Rect {
    let [_, button_area] = search_row_areas(window_chunks(area)[2]);
    button_area
}

fn window_chunks(area: Rect) -> Rc<[Rect]> {
    let inner = area.inner(Margin::new(2, 1));
    Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Length(1), // Spacer
        Constraint::Length(3), // Search row
        Constraint::Length(1), // Spacer
        Constraint::Min(1),    // Display region
        Constraint::Length(1), // Footer
    ])
    .split(inner)
}

fn search_row_areas(area: Rect) -> [Rect; 2] {
    Layout::horizontal([Constraint::Min(10), Constraint::Length(12)])
        .spacing(1)
        .areas(area)
}

fn render_search_row(frame: &mut Frame, area: Rect, state: &AppState) {
    let [input_area, button_area] = search_row_areas(area);

    let input_block = Block::bordered()
        .border_type(BorderType::Rounded)
        .style(Style::new().bg(Color::White).fg(Color::DarkGray));
    let input_line = if state.input.is_empty() {
        Line::from(Span::styled(PLACEHOLDER, Style::new().fg(Color::Gray)))
    } else {
        Line::from(Span::styled(
            state.input.as_str(),
            Style::new().fg(Color::Black),
        ))
    };
    frame.render_widget(Paragraph::new(input_line).block(input_block), input_area);

    // Cursor sits after the typed text, clamped to the box.
    let text_width = u16::try_from(state.input.chars().count()).unwrap_or(u16::MAX);
    let cursor_x = input_area
        .x
        .saturating_add(1)
        .saturating_add(text_width)
        .min(input_area.right().saturating_sub(2));
    frame.set_cursor_position((cursor_x, input_area.y + 1));

    let button_style = if state.is_loading() {
        Style::new().bg(MUTED).fg(Color::White)
    } else {
        Style::new().bg(BUTTON).fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let button = Paragraph::new(Line::from("Search").centered()).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .style(button_style),
    );
    frame.render_widget(button, button_area);
}

fn render_display(frame: &mut Frame, area: Rect, state: &AppState) {
    match &state.display {
        DisplayState::Idle => {
            render_centered_lines(frame, area, vec![Line::from(""), Line::from(START_HINT)]);
        }
        DisplayState::Loading { city } => {
            let text = if city.is_empty() {
                "Searching...".to_string()
            } else {
                format!("Searching for {city}...")
            };
            render_centered_lines(frame, area, vec![Line::from(text).fg(MUTED)]);
        }
        DisplayState::Failed(message) => {
            render_centered_lines(
                frame,
                area,
                vec![Line::from(message.as_str()).add_modifier(Modifier::BOLD)],
            );
        }
        DisplayState::Loaded(view) => render_weather(frame, area, view),
    }
}

fn render_weather(frame: &mut Frame, area: Rect, view: &WeatherView) {
    let summary = &view.summary;
    let icon_rows = if view.icon.is_some() { ICON_ROWS } else { 0 };

    let chunks = Layout::vertical([
        Constraint::Length(1),         // Temperature
        Constraint::Length(1),         // Location
        Constraint::Length(icon_rows), // Icon
        Constraint::Length(1),         // Condition
        Constraint::Length(1),         // Min / max
        Constraint::Length(1),         // Feels like
        Constraint::Length(1),         // Pressure
        Constraint::Min(0),
    ])
    .split(area);

    let temperature = Line::from(summary.temperature_text())
        .add_modifier(Modifier::BOLD)
        .centered();
    frame.render_widget(Paragraph::new(temperature), chunks[0]);

    let lines = [
        (1, summary.location.clone()),
        (3, summary.condition.clone()),
        (4, summary.min_max_text()),
        (5, summary.feels_like_text()),
        (6, summary.pressure_text()),
    ];
    for (index, text) in lines {
        if let Some(text) = text {
            frame.render_widget(Paragraph::new(Line::from(text).centered()), chunks[index]);
        }
    }

    if let Some(icon) = &view.icon {
        let (width, height) = icon.dimensions();
        let cols = u32::from(ICON_ROWS) * 2 * width / height.max(1);
        let icon_area = centered_width(chunks[2], u16::try_from(cols).unwrap_or(u16::MAX));
        frame.render_widget(IconWidget::new(icon), icon_area);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = "Enter or click Search · Esc quit";
    let line = match &state.display {
        DisplayState::Loaded(view) => Line::from(vec![
            Span::raw(hints),
            Span::raw("  ·  "),
            Span::raw(format!("Updated {}", view.fetched_at.format("%H:%M:%S"))),
        ]),
        _ => Line::from(hints),
    };
    frame.render_widget(Paragraph::new(line.fg(MUTED).centered()), area);
}

fn render_centered_lines(frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    let lines: Vec<Line<'_>> = lines.into_iter().map(Line::centered).collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn centered_width(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::IconImage;
    use chrono::Local;
    use image::{Rgba, RgbaImage};
    use ratatui::{Terminal, backend::TestBackend, layout::Position};
    use weather_core::{TempRange, WeatherSummary};

    fn render_to_string(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[Position::new(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn london(icon: Option<IconImage>) -> WeatherView {
        WeatherView {
            summary: WeatherSummary {
                location: Some("London, GB".into()),
                temperature_c: 22,
                temperature_f: 72,
                min_max_c: Some(TempRange { min_c: 20, max_c: 24 }),
                feels_like_c: Some(21),
                pressure_hpa: Some(1012.0),
                condition: Some("Clear Sky".into()),
                icon_code: Some("01d".into()),
            },
            icon,
            fetched_at: Local::now(),
        }
    }

    #[test]
    fn idle_shows_placeholder_and_hint() {
        let output = render_to_string(&AppState::default(), 60, 24);

        assert!(output.contains("Weather App"));
        assert!(output.contains(PLACEHOLDER));
        assert!(output.contains(START_HINT));
        assert!(output.contains("Search"));
    }

    #[test]
    fn typed_input_replaces_placeholder() {
        let state = AppState {
            input: "Paris".into(),
            ..Default::default()
        };

        let output = render_to_string(&state, 60, 24);

        assert!(output.contains("Paris"));
        assert!(!output.contains(PLACEHOLDER));
    }

    #[test]
    fn loading_names_the_city() {
        let state = AppState {
            input: "Tokyo".into(),
            display: DisplayState::Loading {
                city: "Tokyo".into(),
            },
            ..Default::default()
        };

        let output = render_to_string(&state, 60, 24);

        assert!(output.contains("Searching for Tokyo..."));
    }

    #[test]
    fn loaded_weather_shows_every_line() {
        let state = AppState {
            display: DisplayState::Loaded(london(None)),
            ..Default::default()
        };

        let output = render_to_string(&state, 60, 30);

        assert!(output.contains("22°C"));
        assert!(output.contains("London, GB"));
        assert!(output.contains("Clear Sky"));
        assert!(output.contains("Max: 24°C  |  Min: 20°C"));
        assert!(output.contains("Feels Like: 21°C"));
        assert!(output.contains("Pressure: 1012 hPa"));
        assert!(output.contains("Updated"));
    }

    #[test]
    fn loaded_weather_draws_icon() {
        let icon = IconImage::from_rgba(RgbaImage::from_pixel(16, 16, Rgba([250, 200, 0, 255])));
        let state = AppState {
            display: DisplayState::Loaded(london(Some(icon))),
            ..Default::default()
        };

        let output = render_to_string(&state, 60, 30);

        assert!(output.contains("▀"));
        assert!(output.contains("Clear Sky"));
    }

    #[test]
    fn missing_condition_is_omitted() {
        let mut view = london(None);
        view.summary.condition = None;
        view.summary.icon_code = None;
        let state = AppState {
            display: DisplayState::Loaded(view),
            ..Default::default()
        };

        let output = render_to_string(&state, 60, 30);

        assert!(output.contains("22°C"));
        assert!(output.contains("London, GB"));
        assert!(!output.contains("Clear Sky"));
        assert!(!output.contains("▀"));
    }

    #[test]
    fn error_replaces_weather() {
        let state = AppState {
            display: DisplayState::Failed("City not found".into()),
            ..Default::default()
        };

        let output = render_to_string(&state, 60, 24);

        assert!(output.contains("City not found"));
        assert!(!output.contains("°C"));
    }

    #[test]
    fn button_area_matches_drawn_button() {
        let area = Rect::new(0, 0, 60, 24);
        let output = render_to_string(&AppState::default(), area.width, area.height);
        let rows: Vec<&str> = output.lines().collect();

        let button = search_button_area(area);
        let label_row: String = rows[usize::from(button.y + 1)]
            .chars()
            .skip(usize::from(button.x))
            .take(usize::from(button.width))
            .collect();

        assert_eq!(button.height, 3);
        assert!(label_row.contains("Search"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let state = AppState {
            display: DisplayState::Loaded(london(None)),
            input: "a very long city name that will not fit".into(),
            ..Default::default()
        };

        let _ = render_to_string(&state, 10, 4);
    }
}
