//! Boundary-aware text chunker.
//!
//! The summarization service only accepts bounded payloads, so oversized
//! documents are split into chunks of at most `max_chars` characters.
//! Splits prefer the nearest newline or sentence-terminating period at or
//! before the limit; when neither exists the split falls back to the limit
//! itself. The fallback lands on a character index, so it can never break
//! a multi-byte character, though it may still split mid-word.

/// Split `text` into chunks of at most `max_chars` characters each.
///
/// Text that already fits is returned unchanged as the only chunk. Every
/// produced chunk is trimmed; the trimmed concatenation of all chunks
/// reproduces the input up to whitespace normalization.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut rest = text;

    loop {
        if rest.chars().count() <= max_chars {
            let tail = rest.trim();
            if !tail.is_empty() {
                chunks.push(tail.to_string());
            }
            break;
        }

        let split_at = split_position(rest, max_chars);
        let (head, tail) = rest.split_at(split_at);
        let head = head.trim();
        if !head.is_empty() {
            chunks.push(head.to_string());
        }
        rest = tail;
    }

    chunks
}

/// Byte index to split `s` at, given that it is longer than `max_chars`.
///
/// Scans backward from the character at index `max_chars` looking for a
/// newline or period; the boundary character itself starts the remainder.
/// A boundary at index 0 cannot make progress, so it is treated the same
/// as no boundary at all: split exactly at `max_chars` characters.
fn split_position(s: &str, max_chars: usize) -> usize {
    let mut limit = 0;
    let mut boundary = None;
    for (count, (idx, c)) in s.char_indices().enumerate() {
        if count > max_chars {
            break;
        }
        limit = idx;
        if count > 0 && (c == '\n' || c == '.') {
            boundary = Some(idx);
        }
    }
    boundary.unwrap_or(limit)
}
