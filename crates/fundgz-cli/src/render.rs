//! Valuation table rendering.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use fundgz_core::{Trend, ValuationSnapshot};
use std::io::{self, Write};

const HEADERS: [&str; 4] = ["Code", "Name", "Change %", "As of"];

/// Color of the change cell by trend. Falling funds are green, rising funds red.
pub fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Down => Color::Green,
        Trend::Up => Color::Red,
    }
}

/// Terminal styling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Styling {
    /// Style only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

/// Renders fetched snapshots as a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer {
    styling: Styling,
}

impl TableRenderer {
    pub fn new(styling: Styling) -> Self {
        Self { styling }
    }

    /// Renderer emitting no escape codes.
    pub fn plain() -> Self {
        Self::new(Styling::Never)
    }

    pub fn styling(&self) -> Styling {
        self.styling
    }

    /// Build the table; empty slots are skipped and order is kept.
    pub fn build_table(&self, slots: &[Option<ValuationSnapshot>]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        match self.styling {
            Styling::Auto => {}
            Styling::Always => {
                table.enforce_styling();
            }
            Styling::Never => {
                table.force_no_tty();
            }
        }

        table.set_header(HEADERS.iter().map(|title| {
            Cell::new(title)
                .add_attribute(Attribute::Bold)
                .fg(Color::Magenta)
        }));

        for snapshot in slots.iter().flatten() {
            table.add_row(vec![
                Cell::new(&snapshot.identifier),
                Cell::new(&snapshot.name),
                Cell::new(&snapshot.change_percent)
                    .fg(trend_color(snapshot.trend()))
                    .add_attribute(Attribute::Bold),
                Cell::new(&snapshot.as_of),
            ]);
        }

        for index in [2, 3] {
            if let Some(column) = table.column_mut(index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }

        table
    }

    /// Write the table followed by a newline. Returns the number of rows.
    pub fn render(
        &self,
        slots: &[Option<ValuationSnapshot>],
        out: &mut dyn Write,
    ) -> io::Result<usize> {
        let table = self.build_table(slots);
        writeln!(out, "{table}")?;
        Ok(slots.iter().flatten().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundgz_core::FundCode;

    fn snapshot(code: &str, name: &str, change: &str) -> ValuationSnapshot {
        ValuationSnapshot {
            identifier: FundCode::new(code).unwrap(),
            name: name.to_string(),
            change_percent: change.to_string(),
            as_of: "2021-03-02 15:00".to_string(),
        }
    }

    #[test]
    fn test_trend_colors() {
        assert_eq!(trend_color(Trend::Down), Color::Green);
        assert_eq!(trend_color(Trend::Up), Color::Red);
    }

    #[test]
    fn test_plain_render_skips_empty_slots() {
        let slots = vec![
            Some(snapshot("001186", "富国文体健康股票", "-2.03")),
            None,
            Some(snapshot("110020", "易方达沪深300", "0.35")),
        ];
        let mut out = Vec::new();

        let rows = TableRenderer::plain().render(&slots, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(rows, 2);
        assert!(!text.contains('\u{1b}'));
        for header in HEADERS {
            assert!(text.contains(header), "missing header {header}");
        }
        assert!(text.contains("富国文体健康股票"));
        assert!(text.contains("-2.03"));

        let first = text.find("001186").unwrap();
        let second = text.find("110020").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_styled_render_emits_escape_codes() {
        let slots = vec![Some(snapshot("001186", "Health", "-2.03"))];
        let mut out = Vec::new();

        TableRenderer::new(Styling::Always)
            .render(&slots, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains('\u{1b}'));
        assert!(text.contains("001186"));
    }

    #[test]
    fn test_only_change_cell_is_colored() {
        let slots = vec![
            Some(snapshot("000001", "Falling", "-0.00")),
            Some(snapshot("000002", "Rising", "+3.21")),
        ];
        let mut out = Vec::new();

        TableRenderer::new(Styling::Always)
            .render(&slots, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        let cells = |code: &str| -> Vec<String> {
            let line = text
                .lines()
                .find(|line| line.contains(code))
                .unwrap_or_else(|| panic!("no row for {code}"));
            line.split('┆').map(str::to_string).collect()
        };

        let falling = cells("000001");
        assert_eq!(falling.len(), 4);
        assert!(falling[2].contains("-0.00"));
        assert!(falling[2].contains("\u{1b}[38;5;10m"), "{:?}", falling[2]);
        assert!(!falling[0].contains("38;5;"), "{:?}", falling[0]);
        assert!(!falling[1].contains("38;5;"), "{:?}", falling[1]);
        assert!(!falling[3].contains("38;5;"), "{:?}", falling[3]);

        let rising = cells("000002");
        assert!(rising[2].contains("+3.21"));
        assert!(rising[2].contains("\u{1b}[38;5;9m"), "{:?}", rising[2]);
        assert!(!rising[0].contains("38;5;"), "{:?}", rising[0]);
    }

    #[test]
    fn test_all_empty_renders_header_only() {
        let mut out = Vec::new();
        let rows = TableRenderer::plain().render(&[None, None], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(rows, 0);
        assert!(text.contains("Code"));
    }
}
