use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Width of the `=` rule under the title.
pub const SEPARATOR_WIDTH: usize = 60;

/// Screen header rendering four lines:
///
/// 1. Screen title (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. `[ owner | timezone ]`.
/// 4. An empty line.
pub struct Header<'a> {
    pub title: &'a str,
    /// Fleet owner's display name.
    pub owner: &'a str,
    pub timezone: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, owner: &'a str, timezone: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            owner,
            timezone,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(self.title.to_uppercase(), self.theme.header)),
            Line::from(Span::styled(
                "=".repeat(SEPARATOR_WIDTH),
                self.theme.separator,
            )),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.owner, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.timezone, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
