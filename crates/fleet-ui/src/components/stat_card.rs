//! Summary cards shown across the top of the dashboard.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use fleet_core::formatting::{format_measure, format_number};
use fleet_core::models::FleetStats;

use crate::themes::Theme;

/// One labelled figure.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    /// Small print under the value.
    pub caption: String,
}

impl StatCard {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            caption: caption.into(),
        }
    }

    pub fn to_lines<'a>(&self, theme: &Theme) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(self.value.clone(), theme.value)),
            Line::from(Span::styled(self.caption.clone(), theme.dim)),
        ]
    }
}

/// The four fleet-wide cards: vehicles, distance, fuel, alerts.
pub fn fleet_cards(totals: &FleetStats) -> Vec<StatCard> {
    vec![
        StatCard::new(
            "Total Vehicles",
            totals.total_vehicles.to_string(),
            "Registered in fleet",
        ),
        StatCard::new(
            "Total Distance",
            format_measure(totals.total_distance, 1, "km"),
            "Across all logs",
        ),
        StatCard::new(
            "Avg Fuel Consumption",
            format_measure(totals.avg_fuel_consumption, 2, "L"),
            "Per daily log",
        ),
        StatCard::new(
            "Active Alerts",
            format_number(f64::from(totals.total_alerts), 0),
            "Logs with an alert",
        ),
    ]
}

/// Lay `cards` out side by side in equal columns.
pub fn render_cards(frame: &mut Frame, area: Rect, cards: &[StatCard], theme: &Theme) {
    if cards.is_empty() {
        return;
    }
    let columns = Layout::horizontal(vec![Constraint::Fill(1); cards.len()]).split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.table_border)
            .title(Span::styled(format!(" {} ", card.label), theme.label));
        frame.render_widget(Paragraph::new(card.to_lines(theme)).block(block), *column);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
