//! Date-indexed metric charts, drawn either as a line or as bars.

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use fleet_core::formatting::{format_number, format_short_date};

use crate::themes::Theme;

/// Bar heights are integers; values are scaled by this factor first.
const BAR_SCALE: f64 = 100.0;

/// Headroom above the largest value on the y axis.
const Y_HEADROOM: f64 = 1.1;

/// How a chart is drawn. `Tab` flips between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl ChartKind {
    pub fn toggle(self) -> Self {
        match self {
            ChartKind::Line => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Line,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
        }
    }
}

/// One plotted metric.
pub struct MetricChart<'a> {
    pub title: &'a str,
    /// Points, ascending by date.
    pub points: Vec<(NaiveDate, f64)>,
    pub decimals: u32,
    pub style: Style,
}

impl<'a> MetricChart<'a> {
    pub fn new(title: &'a str, points: Vec<(NaiveDate, f64)>, decimals: u32, style: Style) -> Self {
        Self {
            title,
            points,
            decimals,
            style,
        }
    }

    /// Upper y bound: the largest value plus headroom, or 1 when flat at 0.
    pub fn y_max(&self) -> f64 {
        let max = self.points.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        if max > 0.0 {
            max * Y_HEADROOM
        } else {
            1.0
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, kind: ChartKind, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.table_border)
            .title(Span::styled(
                format!(" {} ({}) ", self.title, kind.label()),
                theme.label,
            ));

        if self.points.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled("No data for this period", theme.dim)))
                    .block(block),
                area,
            );
            return;
        }

        match kind {
            ChartKind::Line => self.render_line(frame, area, block, theme),
            ChartKind::Bar => self.render_bars(frame, area, block),
        }
    }

    fn render_line(&self, frame: &mut Frame, area: Rect, block: Block, theme: &Theme) {
        let data: Vec<(f64, f64)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (i as f64, *v))
            .collect();
        let x_max = (data.len().saturating_sub(1)).max(1) as f64;
        let y_max = self.y_max();

        let x_labels = x_axis_labels(&self.points, theme);
        let y_labels = vec![
            Span::styled(format_number(0.0, self.decimals), theme.chart_axis),
            Span::styled(format_number(y_max, self.decimals), theme.chart_axis),
        ];

        let dataset = Dataset::default()
            .name(self.title)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(self.style)
            .data(&data);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(theme.chart_axis)
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(theme.chart_axis)
                    .bounds([0.0, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }

    fn render_bars(&self, frame: &mut Frame, area: Rect, block: Block) {
        let bars: Vec<Bar> = self
            .points
            .iter()
            .map(|(date, value)| {
                Bar::default()
                    .value(scale_bar(*value))
                    .label(Line::from(format_short_date(*date)))
                    .text_value(format_number(*value, self.decimals))
                    .style(self.style)
            })
            .collect();

        // Spread bars across the inner width.
        let inner = area.width.saturating_sub(2);
        let n = self.points.len() as u16;
        let bar_width = (inner / n.max(1)).saturating_sub(1).clamp(1, 8);

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(self.style);

        frame.render_widget(chart, area);
    }
}

/// First, middle and last dates as axis labels.
fn x_axis_labels<'a>(points: &[(NaiveDate, f64)], theme: &Theme) -> Vec<Span<'a>> {
    let mut picks: Vec<usize> = vec![0, points.len() / 2, points.len().saturating_sub(1)];
    picks.dedup();
    picks
        .into_iter()
        .filter_map(|i| points.get(i))
        .map(|(date, _)| Span::styled(format_short_date(*date), theme.chart_axis))
        .collect()
}

/// Bar height for `value`; negatives clamp to zero.
fn scale_bar(value: f64) -> u64 {
    (value.max(0.0) * BAR_SCALE).round() as u64
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_points() -> Vec<(NaiveDate, f64)> {
        (10..=16)
            .map(|d| (NaiveDate::from_ymd_opt(2024, 3, d).unwrap(), f64::from(d) / 2.0))
            .collect()
    }

    #[test]
    fn test_toggle() {
        assert_eq!(ChartKind::default(), ChartKind::Line);
        assert_eq!(ChartKind::Line.toggle(), ChartKind::Bar);
        assert_eq!(ChartKind::Bar.toggle(), ChartKind::Line);
    }

    #[test]
    fn test_y_max() {
        let theme = Theme::dark();
        let chart = MetricChart::new("Fuel", make_points(), 2, theme.chart_primary);
        assert!((chart.y_max() - 8.0 * Y_HEADROOM).abs() < 1e-9);

        let flat = MetricChart::new("CO2", vec![(make_points()[0].0, 0.0)], 2, theme.chart_primary);
        assert_eq!(flat.y_max(), 1.0);
    }

    #[test]
    fn test_scale_bar() {
        assert_eq!(scale_bar(4.567), 457);
        assert_eq!(scale_bar(0.0), 0);
        assert_eq!(scale_bar(-3.0), 0);
    }

    #[test]
    fn test_x_axis_labels() {
        let theme = Theme::dark();
        let labels = x_axis_labels(&make_points(), &theme);
        let text: Vec<&str> = labels.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["Mar 10", "Mar 13", "Mar 16"]);

        let single = x_axis_labels(&make_points()[..1], &theme);
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn test_render_both_kinds_do_not_panic() {
        let theme = Theme::dark();
        let chart = MetricChart::new("Fuel", make_points(), 2, theme.chart_primary);

        for kind in [ChartKind::Line, ChartKind::Bar] {
            let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
            terminal
                .draw(|frame| chart.render(frame, frame.area(), kind, &theme))
                .unwrap();
        }
    }

    #[test]
    fn test_render_empty_shows_placeholder() {
        let theme = Theme::light();
        let chart = MetricChart::new("Fuel", Vec::new(), 2, theme.chart_primary);
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|frame| chart.render(frame, frame.area(), ChartKind::Line, &theme))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("No data for this period"));
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let theme = Theme::dark();
        let chart = MetricChart::new("Fuel", make_points(), 2, theme.chart_primary);
        let mut terminal = Terminal::new(TestBackend::new(6, 3)).unwrap();
        terminal
            .draw(|frame| chart.render(frame, frame.area(), ChartKind::Bar, &theme))
            .unwrap();
    }
}
