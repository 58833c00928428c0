use ratatui::style::{Color, Modifier, Style};

use fleet_core::models::{AlertSeverity, FuelType};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark, 7–15 light. Absent or unparseable falls back to dark.
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|val| val.split(';').next_back().and_then(|bg| bg.parse::<u8>().ok()))
        .map(background_from_code)
        .unwrap_or(BackgroundType::Dark)
}

fn background_from_code(code: u8) -> BackgroundType {
    if code <= 6 {
        BackgroundType::Dark
    } else {
        BackgroundType::Light
    }
}

/// Every style used by the fleet screens.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Fuel types ───────────────────────────────────────────────────────────
    pub fuel_gasoline: Style,
    pub fuel_diesel: Style,
    pub fuel_hybrid: Style,
    pub fuel_electric: Style,

    // ── Alerts ───────────────────────────────────────────────────────────────
    pub alert_low: Style,
    pub alert_medium: Style,
    pub alert_high: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_selected: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Fuel consumption series.
    pub chart_primary: Style,
    /// CO₂ emissions series.
    pub chart_secondary: Style,
    pub chart_axis: Style,

    // ── Tabs ─────────────────────────────────────────────────────────────────
    pub tab: Style,
    pub tab_active: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            fuel_gasoline: Style::default().fg(Color::Yellow),
            fuel_diesel: Style::default().fg(Color::Magenta),
            fuel_hybrid: Style::default().fg(Color::Cyan),
            fuel_electric: Style::default().fg(Color::Green),

            alert_low: Style::default().fg(Color::Cyan),
            alert_medium: Style::default().fg(Color::Yellow),
            alert_high: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            chart_primary: Style::default().fg(Color::Cyan),
            chart_secondary: Style::default().fg(Color::Green),
            chart_axis: Style::default().fg(Color::DarkGray),

            tab: Style::default().fg(Color::Gray),
            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            fuel_gasoline: Style::default().fg(Color::Yellow),
            fuel_diesel: Style::default().fg(Color::Magenta),
            fuel_hybrid: Style::default().fg(Color::Blue),
            fuel_electric: Style::default().fg(Color::Green),

            alert_low: Style::default().fg(Color::Blue),
            alert_medium: Style::default().fg(Color::Yellow),
            alert_high: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            chart_primary: Style::default().fg(Color::Blue),
            chart_secondary: Style::default().fg(Color::Green),
            chart_axis: Style::default().fg(Color::Gray),

            tab: Style::default().fg(Color::DarkGray),
            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        }
    }

    /// Basic 8-colour ANSI palette without bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            fuel_gasoline: Style::default().fg(Color::Yellow),
            fuel_diesel: Style::default().fg(Color::Magenta),
            fuel_hybrid: Style::default().fg(Color::Cyan),
            fuel_electric: Style::default().fg(Color::Green),

            alert_low: Style::default().fg(Color::Cyan),
            alert_medium: Style::default().fg(Color::Yellow),
            alert_high: Style::default().fg(Color::Red),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_selected: Style::default().fg(Color::Black).bg(Color::White),

            chart_primary: Style::default().fg(Color::Cyan),
            chart_secondary: Style::default().fg(Color::Green),
            chart_axis: Style::default().fg(Color::DarkGray),

            tab: Style::default().fg(Color::Gray),
            tab_active: Style::default().fg(Color::Cyan),
        }
    }

    /// Choose a theme from the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names fall back to `auto_detect`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    pub fn fuel_style(&self, fuel_type: FuelType) -> Style {
        match fuel_type {
            FuelType::Gasoline => self.fuel_gasoline,
            FuelType::Diesel => self.fuel_diesel,
            FuelType::Hybrid => self.fuel_hybrid,
            FuelType::Electric => self.fuel_electric,
        }
    }

    /// Alert badge style; `None` renders dim.
    pub fn alert_style(&self, severity: AlertSeverity) -> Style {
        match severity {
            AlertSeverity::None => self.dim,
            AlertSeverity::Low => self.alert_low,
            AlertSeverity::Medium => self.alert_medium,
            AlertSeverity::High => self.alert_high,
        }
    }

    /// Zebra striping for table rows.
    pub fn row_style(&self, index: usize) -> Style {
        if index % 2 == 0 {
            self.table_row
        } else {
            self.table_row_alt
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
