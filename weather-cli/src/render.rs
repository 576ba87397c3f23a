//! Terminal rendering of the widget.

use weather_widget_core::{DisplayState, Session};

/// Render the session as the widget card, or `None` while nothing has been
/// revealed yet.
pub fn render_session(session: &Session) -> Option<String> {
    if !session.revealed() {
        return None;
    }
    session.display().map(|state| render_card(&state))
}

/// Metrics are left out for the failure sentinel.
pub fn render_card(state: &DisplayState) -> String {
    let mut lines = vec![format!("{}  {}", state.image.glyph(), state.city)];

    if !state.is_not_found() {
        lines.push(format!("{}°C", state.temperature));
    }

    if !state.description.is_empty() {
        lines.push(capitalize(&state.description));
    }

    if !state.is_not_found() {
        lines.push(format!(
            "Humidity {}%   Wind Speed {}Km/h",
            state.humidity, state.wind
        ));
    }

    lines.join("\n")
}

pub fn render_json(state: &DisplayState) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
