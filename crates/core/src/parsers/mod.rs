pub mod dslv_state;

pub use dslv_state::{MalformedTraceError, parse_trace};

/// Parse a comma-separated integer list as written by the state tracker.
///
/// Every entry is followed by a comma (`"0,48,96,"`), so a single trailing
/// empty piece is discarded. Returns the offending piece on failure.
pub(crate) fn parse_int_list(text: &str) -> Result<Vec<i32>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let body = text.strip_suffix(',').unwrap_or(text);
    body.split(',')
        .map(|piece| {
            let piece = piece.trim();
            piece.parse::<i32>().map_err(|_| piece.to_string())
        })
        .collect()
}
