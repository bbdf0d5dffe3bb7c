//! Window ID input
//!
//! Reads whitespace-delimited window numbers, as printed by window-listing
//! tools, from a byte stream.

use std::io::Read;

use thiserror::Error;
use tracing::warn;

use crate::screen::WindowId;

/// Errors that can occur while reading window IDs
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read window IDs from stdin: {0}")]
    Io(#[from] std::io::Error),
}

/// Read every window ID from `reader` until end of stream
pub fn read_window_ids<R: Read>(mut reader: R) -> Result<Vec<WindowId>, InputError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(parse_window_ids(&String::from_utf8_lossy(&data)))
}

/// Parse window IDs from text.
///
/// A leading byte-order mark is ignored. Tokens that are not unsigned 32-bit
/// integers are skipped with a warning.
pub fn parse_window_ids(text: &str) -> Vec<WindowId> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);

    text.split_whitespace()
        .filter_map(|token| match token.parse::<u32>() {
            Ok(id) => Some(WindowId(id)),
            Err(_) => {
                warn!("skipping non-numeric token from stdin: {:?}", token);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_tokens() {
        let ids = parse_window_ids("123 abc 456\n");
        assert_eq!(ids, vec![WindowId(123), WindowId(456)]);
    }

    #[test]
    fn test_only_whitespace() {
        assert!(parse_window_ids("   \n\t  ").is_empty());
        assert!(parse_window_ids("").is_empty());
    }

    #[test]
    fn test_newline_delimited_with_bom() {
        let ids = parse_window_ids("\u{FEFF}17\n42\r\n9000\n");
        assert_eq!(ids, vec![WindowId(17), WindowId(42), WindowId(9000)]);
    }

    #[test]
    fn test_out_of_range_and_signed() {
        let ids = parse_window_ids("4294967295 4294967296 -1 3.5 7");
        assert_eq!(ids, vec![WindowId(u32::MAX), WindowId(7)]);
    }

    #[test]
    fn test_read_from_stream() {
        let input: &[u8] = b"1 2\n3";
        let ids = read_window_ids(input).unwrap();
        assert_eq!(ids, vec![WindowId(1), WindowId(2), WindowId(3)]);
    }
}
