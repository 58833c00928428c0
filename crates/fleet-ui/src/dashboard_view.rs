//! Fleet dashboard screen.
//!
//! Header, four summary cards, fuel and CO₂ charts over the fleet's daily
//! series, and one table row per vehicle. The selected row is highlighted;
//! a status line at the bottom carries key hints or the last confirmation.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use fleet_core::formatting::{format_measure, format_number};
use fleet_runtime::dashboard::{DashboardSnapshot, VehicleRow};

use crate::components::chart::{ChartKind, MetricChart};
use crate::components::header::Header;
use crate::components::stat_card::{fleet_cards, render_cards};
use crate::themes::Theme;

/// Display width of the vehicle column.
pub const VEHICLE_COLUMN_WIDTH: usize = 24;

const KEY_HINTS: &str = "↑/↓ select · Enter open · d delete · Tab chart · q quit";

/// Presentation state the dashboard needs besides the snapshot.
pub struct DashboardViewState<'a> {
    pub timezone: &'a str,
    pub selected: usize,
    pub chart: ChartKind,
    /// Replaces the key hints when set.
    pub status: Option<&'a str>,
}

/// Render the whole dashboard into `area`.
pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    snapshot: &DashboardSnapshot,
    state: &DashboardViewState,
    theme: &Theme,
) {
    let table_height = snapshot.rows.len().max(1) as u16 + 3;
    let [header_area, cards_area, charts_area, table_area, status_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Min(8),
        Constraint::Length(table_height),
        Constraint::Length(1),
    ])
    .areas(area);

    let header = Header::new("Fleet Dashboard", &snapshot.user.name, state.timezone, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

    render_cards(frame, cards_area, &fleet_cards(&snapshot.totals), theme);
    render_fleet_charts(frame, charts_area, snapshot, state.chart, theme);

    if snapshot.is_empty() {
        render_no_vehicles(frame, table_area, theme);
    } else {
        render_vehicle_table(frame, table_area, &snapshot.rows, state.selected, theme);
    }

    let status = match state.status {
        Some(msg) => Span::styled(msg.to_string(), theme.warning),
        None => Span::styled(KEY_HINTS, theme.dim),
    };
    frame.render_widget(Paragraph::new(Line::from(status)), status_area);
}

/// Fuel and CO₂ side by side.
fn render_fleet_charts(
    frame: &mut Frame,
    area: Rect,
    snapshot: &DashboardSnapshot,
    kind: ChartKind,
    theme: &Theme,
) {
    let [fuel_area, co2_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let fuel = MetricChart::new(
        "Fuel Consumption (L)",
        snapshot
            .series
            .iter()
            .map(|p| (p.date, p.fuel_consumption))
            .collect(),
        2,
        theme.chart_primary,
    );
    let co2 = MetricChart::new(
        "CO₂ Emissions (g/km)",
        snapshot
            .series
            .iter()
            .map(|p| (p.date, p.co2_emissions))
            .collect(),
        1,
        theme.chart_secondary,
    );

    fuel.render(frame, fuel_area, kind, theme);
    co2.render(frame, co2_area, kind, theme);
}

/// One row per vehicle with its averages and alert count.
pub fn render_vehicle_table(
    frame: &mut Frame,
    area: Rect,
    rows: &[VehicleRow],
    selected: usize,
    theme: &Theme,
) {
    let header = Row::new(
        [
            "Vehicle",
            "Plate",
            "Fuel",
            "Avg Fuel",
            "Avg CO₂",
            "Distance",
            "Alerts",
        ]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i == selected {
                theme.table_selected
            } else {
                theme.row_style(i)
            };
            let alerts_style = if row.stats.alerts_count > 0 {
                theme.warning
            } else {
                theme.dim
            };
            Row::new(vec![
                Cell::from(truncate(&row.vehicle.title(), VEHICLE_COLUMN_WIDTH)),
                Cell::from(row.vehicle.license_plate.clone()),
                Cell::from(row.vehicle.fuel_type.as_str())
                    .style(theme.fuel_style(row.vehicle.fuel_type)),
                Cell::from(format_measure(row.stats.avg_fuel_consumption, 2, "L")),
                Cell::from(format_measure(row.stats.avg_co2_emissions, 1, "g/km")),
                Cell::from(format_measure(row.stats.total_distance, 1, "km")),
                Cell::from(format_number(f64::from(row.stats.alerts_count), 0))
                    .style(alerts_style),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(VEHICLE_COLUMN_WIDTH as u16),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(11),
        Constraint::Length(6),
    ];

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Vehicles "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Placeholder when the fleet has no vehicles.
pub fn render_no_vehicles(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(Span::styled("No vehicles in this fleet", theme.warning)),
        Line::from(Span::styled(
            "Add one with --view add --make … --model …",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Vehicles "),
        ),
        area,
    );
}

/// Cut `s` to at most `max` display columns, ending with `…` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fleet_data::seed::MockFleet;
    use fleet_data::store::FleetStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_snapshot() -> DashboardSnapshot {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        DashboardSnapshot::build(&MockFleet::generate(42, today).unwrap())
    }

    fn state(chart: ChartKind) -> DashboardViewState<'static> {
        DashboardViewState {
            timezone: "UTC",
            selected: 1,
            chart,
            status: None,
        }
    }

    fn render_to_string(snapshot: &DashboardSnapshot, state: &DashboardViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_dashboard(frame, frame.area(), snapshot, state, &theme))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── truncate ──────────────────────────────────────────────────────────────

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("2019 Toyota Prius", 24), "2019 Toyota Prius");
    }

    #[test]
    fn test_truncate_long_string() {
        let out = truncate("2021 Mercedes-Benz Sprinter Cargo Van", 12);
        assert_eq!(out, "2021 Merced…");
        assert_eq!(out.width(), 12);
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK character is two columns wide.
        let out = truncate("日本語の車両名", 6);
        assert_eq!(out, "日本…");
        assert!(out.width() <= 6);
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_dashboard_line_chart() {
        let content = render_to_string(&make_snapshot(), &state(ChartKind::Line));
        assert!(content.contains("FLEET DASHBOARD"));
        assert!(content.contains("John Anderson"));
        assert!(content.contains("2019 Toyota Prius"));
        assert!(content.contains("ELEC-21"));
        assert!(content.contains("(line)"));
    }

    #[test]
    fn test_render_dashboard_bar_chart() {
        let content = render_to_string(&make_snapshot(), &state(ChartKind::Bar));
        assert!(content.contains("(bar)"));
    }

    #[test]
    fn test_render_dashboard_status_replaces_hints() {
        let snapshot = make_snapshot();
        let mut st = state(ChartKind::Line);
        st.status = Some("Delete 2019 Toyota Prius? (y/n)");
        let content = render_to_string(&snapshot, &st);
        assert!(content.contains("Delete 2019 Toyota Prius? (y/n)"));
    }

    #[test]
    fn test_render_empty_fleet() {
        let snapshot = DashboardSnapshot::build(&FleetStore::new(MockFleet::user()));
        let content = render_to_string(&snapshot, &state(ChartKind::Line));
        assert!(content.contains("No vehicles in this fleet"));
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let snapshot = make_snapshot();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let theme = Theme::classic();
        terminal
            .draw(|frame| {
                render_dashboard(frame, frame.area(), &snapshot, &state(ChartKind::Bar), &theme)
            })
            .unwrap();
    }
}
