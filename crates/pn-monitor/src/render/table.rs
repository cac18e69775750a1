//! Two-pass table renderer.
//!
//! Pass one measures every enabled column over the full data set; pass two
//! lays out header, separator and rows at the final widths. Every emitted
//! line is hard-cut to the terminal width (display columns, not bytes).

use std::borrow::Cow;

use crate::domain::{classify, NodeStatus};

use super::columns::{Alignment, ColumnSpec};

/// Render the status table.
///
/// Column widths in `columns` are reset to their header width, then grown
/// to fit the data; on return they hold the final widths.
pub fn render(
    statuses: &[NodeStatus],
    columns: &mut [ColumnSpec],
    terminal_width: usize,
) -> Vec<String> {
    let cells = measure(statuses, columns);
    let enabled: Vec<&ColumnSpec> = columns.iter().filter(|c| c.enabled).collect();

    let mut lines = Vec::with_capacity(cells.len() + 2);

    let header: Vec<Cow<'_, str>> = enabled
        .iter()
        .map(|c| pad(c.display_name, c.width, c.alignment))
        .collect();
    lines.push(header.join(" "));

    let separator: Vec<String> = enabled.iter().map(|c| "-".repeat(c.width)).collect();
    lines.push(separator.join(" "));

    for row in &cells {
        let padded: Vec<Cow<'_, str>> = enabled
            .iter()
            .zip(row)
            .map(|(c, cell)| pad(cell, c.width, c.alignment))
            .collect();
        lines.push(padded.join(" "));
    }

    lines
        .into_iter()
        .map(|line| truncate(line.trim_end(), terminal_width))
        .collect()
}

/// First pass: cell text of every enabled column per row, growing widths.
fn measure(statuses: &[NodeStatus], columns: &mut [ColumnSpec]) -> Vec<Vec<String>> {
    for column in columns.iter_mut() {
        column.reset_width();
    }

    statuses
        .iter()
        .map(|status| {
            let classification = classify(status);
            columns
                .iter_mut()
                .filter(|c| c.enabled)
                .map(|column| {
                    let cell = column.key.value(status, classification);
                    column.fit(&cell);
                    cell
                })
                .collect()
        })
        .collect()
}

fn pad(text: &str, width: usize, alignment: Alignment) -> Cow<'_, str> {
    let alignment = match alignment {
        Alignment::Left => console::Alignment::Left,
        Alignment::Right => console::Alignment::Right,
    };
    console::pad_str(text, width, alignment, None)
}

/// Cut `line` to at most `width` display columns. No ellipsis.
pub fn truncate(line: &str, width: usize) -> String {
    console::truncate_str(line, width, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NodeEndpoint, RawStatus};
    use crate::render::columns::{default_columns, ColumnKey};

    fn connected(name: &str, top: u64, synced: u64, verified: u64, peers: u64) -> NodeStatus {
        NodeStatus::from_raw(
            NodeEndpoint::new(name, name, 9092),
            RawStatus {
                connected_peers: Some(peers),
                top_layer: Some(top),
                synced_layer: Some(synced),
                verified_layer: Some(verified),
            },
        )
    }

    fn width_of(columns: &[ColumnSpec], key: ColumnKey) -> usize {
        columns.iter().find(|c| c.key == key).map(|c| c.width).unwrap()
    }

    #[test]
    fn test_node_column_fits_longest_name() {
        let statuses = vec![
            connected("a", 1, 1, 1, 1),
            NodeStatus::disconnected(NodeEndpoint::new(
                "pub-node-very-long-8",
                "pub-node-very-long-8",
                9092,
            )),
        ];
        let mut columns = default_columns(false);
        render(&statuses, &mut columns, 200);
        assert_eq!(width_of(&columns, ColumnKey::Node), "pub-node-very-long-8".len());
        // Short values never shrink below the header
        assert_eq!(width_of(&columns, ColumnKey::Port), "Port".len());
        assert_eq!(width_of(&columns, ColumnKey::Status), "SYNCED & VERIFIED".len());
    }

    #[test]
    fn test_status_column_fits_longest_label() {
        let unreachable = vec![NodeStatus::disconnected(NodeEndpoint::new("n", "n", 9092))];
        let mut columns = default_columns(false);
        render(&unreachable, &mut columns, 200);
        assert_eq!(width_of(&columns, ColumnKey::Status), "NOT CONNECTED".len());

        let lagging = vec![connected("n", 100, 90, 90, 1)];
        let mut columns = default_columns(false);
        render(&lagging, &mut columns, 200);
        assert_eq!(width_of(&columns, ColumnKey::Status), "NOT SYNCED".len());
    }

    #[test]
    fn test_layout() {
        let statuses = vec![connected("n1", 100, 99, 98, 5)];
        let mut columns = default_columns(false);
        let lines = render(&statuses, &mut columns, 200);
        assert_eq!(
            lines,
            vec![
                "Node Port Status            Peers Top Synced Verified",
                "---- ---- ----------------- ----- --- ------ --------",
                "n1   9092 SYNCED & VERIFIED     5 100     99       98",
            ]
        );
    }

    #[test]
    fn test_disconnected_row_is_blank() {
        let statuses = vec![
            connected("n1", 100, 99, 98, 5),
            NodeStatus::disconnected(NodeEndpoint::new("n2", "n2", 9092)),
        ];
        let mut columns = default_columns(false);
        let lines = render(&statuses, &mut columns, 200);
        assert_eq!(lines[3], "n2   9092 NOT CONNECTED");
    }

    #[test]
    fn test_version_column_only_when_enabled() {
        let statuses = vec![connected("n1", 1, 1, 1, 1).with_version("v1.6.3")];

        let mut columns = default_columns(false);
        let lines = render(&statuses, &mut columns, 200);
        assert!(!lines[0].contains("Version"));
        assert!(!lines[2].contains("v1.6.3"));

        let mut columns = default_columns(true);
        let lines = render(&statuses, &mut columns, 200);
        assert!(lines[0].starts_with("Node Port Version Status"));
        assert!(lines[2].contains("v1.6.3"));
    }

    #[test]
    fn test_lines_never_exceed_terminal_width() {
        let statuses = vec![
            connected("pub-node1.smesh.cloud", 123_456, 123_455, 123_401, 42).with_version("v1.6.3"),
            NodeStatus::disconnected(NodeEndpoint::new("ñødé-ünïcödé", "x", 1)),
            connected("n3", 1, 50, 60, 0),
        ];
        for include_version in [false, true] {
            for width in 0..120 {
                let mut columns = default_columns(include_version);
                for line in render(&statuses, &mut columns, width) {
                    assert!(
                        console::measure_text_width(&line) <= width,
                        "line {line:?} exceeds {width}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_truncate_is_a_hard_cut() {
        assert_eq!(truncate("SYNCED & VERIFIED", 6), "SYNCED");
        assert_eq!(truncate("short", 80), "short");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_widths_reset_between_cycles() {
        let mut columns = default_columns(false);
        render(
            &[connected("a-rather-long-node-name", 1, 1, 1, 1)],
            &mut columns,
            200,
        );
        assert_eq!(width_of(&columns, ColumnKey::Node), 23);

        render(&[connected("b", 1, 1, 1, 1)], &mut columns, 200);
        assert_eq!(width_of(&columns, ColumnKey::Node), "Node".len());
    }
}
