//! Rendering: column model, table layout and the framed report.

pub mod columns;
pub mod report;
pub mod table;

pub use columns::{default_columns, Alignment, ColumnKey, ColumnSpec};
pub use report::{ReportRenderer, REPORT_TITLE};
pub use table::{render, truncate};
