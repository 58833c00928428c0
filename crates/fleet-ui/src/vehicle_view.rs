//! Vehicle detail screen with overview, charts, logs and alerts tabs.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use fleet_core::formatting::{format_measure, format_number, format_optional};
use fleet_core::models::{DailyLog, VehicleSeriesPoint};
use fleet_runtime::dashboard::VehicleDetail;

use crate::components::chart::{ChartKind, MetricChart};
use crate::themes::Theme;

const KEY_HINTS: &str = "1-4 tabs · Tab chart · Esc back · q quit";

/// The four tabs of the vehicle screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleTab {
    #[default]
    Overview,
    Charts,
    Logs,
    Alerts,
}

impl VehicleTab {
    pub const ALL: [VehicleTab; 4] = [
        VehicleTab::Overview,
        VehicleTab::Charts,
        VehicleTab::Logs,
        VehicleTab::Alerts,
    ];

    pub fn title(self) -> &'static str {
        match self {
            VehicleTab::Overview => "Overview",
            VehicleTab::Charts => "Charts",
            VehicleTab::Logs => "Logs",
            VehicleTab::Alerts => "Alerts",
        }
    }

    /// Tab bound to a number key `1`–`4`.
    pub fn from_key(c: char) -> Option<Self> {
        let index = c.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// Render the vehicle screen for `detail`.
pub fn render_vehicle(
    frame: &mut Frame,
    area: Rect,
    detail: &VehicleDetail,
    tab: VehicleTab,
    chart: ChartKind,
    theme: &Theme,
) {
    let [title_area, tabs_area, body_area, hints_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(Text::from(title_lines(detail, theme))), title_area);

    let titles: Vec<Line> = VehicleTab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
        .collect();
    frame.render_widget(
        Tabs::new(titles)
            .select(tab.index())
            .style(theme.tab)
            .highlight_style(theme.tab_active),
        tabs_area,
    );

    match tab {
        VehicleTab::Overview => render_overview(frame, body_area, detail, theme),
        VehicleTab::Charts => render_charts(frame, body_area, detail, chart, theme),
        VehicleTab::Logs => render_logs(frame, body_area, &detail.logs, theme),
        VehicleTab::Alerts => render_alerts(frame, body_area, &detail.alerts, theme),
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(KEY_HINTS, theme.dim))),
        hints_area,
    );
}

/// Title, plate, fuel type and last update.
pub fn title_lines<'a>(detail: &VehicleDetail, theme: &Theme) -> Vec<Line<'a>> {
    let v = &detail.vehicle;
    vec![
        Line::from(Span::styled(v.title(), theme.header)),
        Line::from(vec![
            Span::styled(v.license_plate.clone(), theme.value),
            Span::styled(" · ", theme.separator),
            Span::styled(v.fuel_type.as_str(), theme.fuel_style(v.fuel_type)),
            Span::styled(" · ", theme.separator),
            Span::styled(
                format!("Last updated {}", v.last_updated.format("%Y-%m-%d")),
                theme.dim,
            ),
        ]),
        Line::from(""),
    ]
}

/// Stats, engine readings and suggestions.
pub fn overview_lines<'a>(detail: &VehicleDetail, theme: &Theme) -> Vec<Line<'a>> {
    let s = &detail.stats;
    let e = &detail.engine;
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<22}"), theme.label),
            Span::styled(value, theme.value),
        ])
    };

    let mut lines = vec![
        row("Avg fuel consumption", format_measure(s.avg_fuel_consumption, 2, "L")),
        row("Avg CO₂ emissions", format_measure(s.avg_co2_emissions, 1, "g/km")),
        row("Avg mileage", format_measure(s.avg_mileage, 2, "km/L")),
        row("Total distance", format_measure(s.total_distance, 1, "km")),
        row("Alerts", s.alerts_count.to_string()),
        Line::from(""),
        Line::from(Span::styled("Engine", theme.header)),
        row("Avg temperature (°C)", format_optional(e.avg_engine_temp, 1)),
        row("Avg RPM", format_optional(e.avg_engine_rpm, 0)),
        Line::from(""),
        Line::from(Span::styled("Suggestions", theme.header)),
    ];
    lines.extend(
        detail
            .suggestions
            .iter()
            .map(|tip| Line::from(Span::styled(format!("• {tip}"), theme.text))),
    );
    lines
}

fn render_overview(frame: &mut Frame, area: Rect, detail: &VehicleDetail, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Text::from(overview_lines(detail, theme)))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.table_border)
                    .title(" Overview "),
            ),
        area,
    );
}

fn render_charts(
    frame: &mut Frame,
    area: Rect,
    detail: &VehicleDetail,
    kind: ChartKind,
    theme: &Theme,
) {
    let [top, bottom] = Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);
    let [fuel_area, co2_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(top);
    let [mileage_area, distance_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(bottom);

    let series = &detail.series;
    metric("Fuel (L)", series, 2, theme.chart_primary, |p| p.fuel_consumption)
        .render(frame, fuel_area, kind, theme);
    metric("CO₂ (g/km)", series, 1, theme.chart_secondary, |p| p.co2_emissions)
        .render(frame, co2_area, kind, theme);
    metric("Mileage", series, 2, theme.chart_primary, |p| p.mileage)
        .render(frame, mileage_area, kind, theme);
    metric("Distance (km)", series, 1, theme.chart_secondary, |p| p.distance_covered)
        .render(frame, distance_area, kind, theme);
}

fn metric<'a>(
    title: &'a str,
    series: &[VehicleSeriesPoint],
    decimals: u32,
    style: Style,
    value: fn(&VehicleSeriesPoint) -> f64,
) -> MetricChart<'a> {
    MetricChart::new(
        title,
        series.iter().map(|p| (p.date, value(p))).collect(),
        decimals,
        style,
    )
}

fn render_logs(frame: &mut Frame, area: Rect, logs: &[DailyLog], theme: &Theme) {
    render_log_table(frame, area, " Daily Logs ", logs, theme, "No logs recorded yet");
}

fn render_alerts(frame: &mut Frame, area: Rect, alerts: &[DailyLog], theme: &Theme) {
    render_log_table(frame, area, " Alerts ", alerts, theme, "No alerts for this vehicle");
}

fn render_log_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    logs: &[DailyLog],
    theme: &Theme,
    empty: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(title.to_string());

    if logs.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(empty.to_string(), theme.dim))).block(block),
            area,
        );
        return;
    }

    let header = Row::new(
        [
            "Date", "Fuel", "CO₂", "Mileage", "Distance", "Temp", "RPM", "Alert",
        ]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header)),
    );

    let rows: Vec<Row> = logs
        .iter()
        .enumerate()
        .map(|(i, log)| {
            Row::new(vec![
                Cell::from(log.date.format("%Y-%m-%d").to_string()),
                Cell::from(format_number(log.fuel_consumption, 2)),
                Cell::from(format_number(log.co2_emissions, 1)),
                Cell::from(format_number(log.mileage, 2)),
                Cell::from(format_number(log.distance_covered, 1)),
                Cell::from(format_optional(log.engine_temp, 1)),
                Cell::from(format_optional(log.engine_rpm, 0)),
                Cell::from(log.alert_type.as_str()).style(theme.alert_style(log.alert_type)),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
    ];

    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(block)
            .style(theme.text),
        area,
    );
}

/// Full-screen fallback for an unknown vehicle id.
pub fn render_not_found(frame: &mut Frame, area: Rect, id: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Vehicle Not Found", theme.error)),
        Line::from(""),
        Line::from(Span::styled(
            format!("No vehicle with id \"{id}\" exists in this fleet."),
            theme.text,
        )),
        Line::from(Span::styled("Press Esc to return to the dashboard", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Fleet Dashboard "),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
