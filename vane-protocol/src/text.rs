//! Bounded text helpers
//!
//! All text on the link ends up in fixed-capacity buffers. Anything longer
//! than the buffer is cut at the last UTF-8 character boundary that fits.

use heapless::String;

/// Append as much of `text` as fits into `buffer`
///
/// Returns `true` if the whole of `text` was appended.
pub fn push_truncated<const N: usize>(buffer: &mut String<N>, text: &str) -> bool {
    let room = N - buffer.len();
    if text.len() <= room {
        // Cannot fail: length checked above
        let _ = buffer.push_str(text);
        return true;
    }

    let mut end = room;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let _ = buffer.push_str(&text[..end]);
    false
}

/// Copy `text` into a fresh buffer, truncating if needed
pub fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut buffer = String::new();
    push_truncated(&mut buffer, text);
    buffer
}
