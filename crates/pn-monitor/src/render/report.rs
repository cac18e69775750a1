//! Full health-check report: framed table plus the summary line.

use crate::domain::PollCycleResult;

use super::columns::default_columns;
use super::table::{self, truncate};

pub const REPORT_TITLE: &str = "PUBLIC NODES HEALTH CHECK";

/// Renders a [`PollCycleResult`] for a terminal of fixed width.
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer {
    terminal_width: usize,
    include_version: bool,
}

impl ReportRenderer {
    pub fn new(terminal_width: usize, include_version: bool) -> Self {
        Self {
            terminal_width,
            include_version,
        }
    }

    pub fn terminal_width(&self) -> usize {
        self.terminal_width
    }

    /// Report lines, each at most `terminal_width` display columns.
    ///
    /// Columns are built fresh on every call, so rendering the same cycle
    /// twice gives identical output.
    pub fn render(&self, cycle: &PollCycleResult) -> Vec<String> {
        let mut columns = default_columns(self.include_version);
        let table = table::render(cycle.statuses(), &mut columns, self.terminal_width);

        let table_width: usize = columns
            .iter()
            .filter(|c| c.enabled)
            .map(|c| c.width)
            .sum::<usize>()
            + columns.iter().filter(|c| c.enabled).count().saturating_sub(1);
        let rule = "=".repeat(table_width.min(self.terminal_width));

        let mut lines = Vec::with_capacity(table.len() + 6);
        lines.push(rule.clone());
        lines.push(truncate(REPORT_TITLE, self.terminal_width));
        lines.push(rule.clone());
        lines.extend(table);
        lines.push(rule.clone());
        lines.push(truncate(&cycle.summary().to_string(), self.terminal_width));
        lines.push(rule);
        lines
    }
}
