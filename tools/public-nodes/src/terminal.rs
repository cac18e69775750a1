//! Terminal width detection.

use pn_monitor::config::FALLBACK_TERMINAL_WIDTH;

/// Width to render for: the override, else the attached terminal, else
/// `COLUMNS`, else the fallback.
pub fn detect_width(override_width: Option<usize>) -> usize {
    let detected = terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| w as usize);
    resolve_width(override_width, detected, std::env::var("COLUMNS").ok().as_deref())
}

fn resolve_width(
    override_width: Option<usize>,
    detected: Option<usize>,
    columns: Option<&str>,
) -> usize {
    override_width
        .or(detected.filter(|w| *w > 0))
        .or_else(|| {
            columns
                .and_then(|c| c.trim().parse::<usize>().ok())
                .filter(|w| *w > 0)
        })
        .unwrap_or(FALLBACK_TERMINAL_WIDTH)
}
