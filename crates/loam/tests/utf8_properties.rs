//! Property tests for the UTF-8 substrate.

use loam::source::MemorySource;
use loam::utf8::{Char, Text, TextView};
use quickcheck_macros::quickcheck;

/// Decoding every code point of a valid UTF-8 buffer and re-encoding
/// them reproduces the buffer byte for byte.
#[quickcheck]
fn decode_encode_round_trips(input: String) -> bool {
    let text = Text::from(input.as_str());
    let mut encoded = Vec::with_capacity(input.len());
    let mut buffer = [0_u8; 4];
    for chr in text.chars() {
        if !chr.valid() {
            return false;
        }
        let length = chr.write_to(&mut buffer);
        encoded.extend_from_slice(&buffer[..length]);
    }
    encoded == input.as_bytes()
}

/// The cached count always equals the number of successful decodes.
#[quickcheck]
fn cached_length_matches_decodes(input: String) -> bool {
    let text = Text::from(input.as_str());
    text.len() == input.chars().count() && text.len() == text.chars().count()
}

/// Streaming decode over a memory source agrees with slice decode.
#[quickcheck]
fn stream_decode_agrees_with_slice_decode(input: String) -> bool {
    let mut source = MemorySource::new(input.as_bytes());
    let mut streamed = Vec::new();
    loop {
        let chr = Char::read_from(&mut source);
        if !chr.valid() {
            break;
        }
        streamed.push(chr);
    }
    let sliced: Vec<Char> = Text::from(input.as_str()).chars().collect();
    streamed == sliced
}

/// `substr` always yields `min(count, len - offset)` code points, drawn
/// from the source in order.
#[quickcheck]
fn substr_length_and_content(input: String, offset: usize, count: usize) -> bool {
    let text = Text::from(input.as_str());
    // Keep the raw values but bound them so the clamping paths are still
    // exercised without overflow concerns.
    let offset = offset % (text.len() + 2);
    let count = count % (text.len() + 2);

    let view = text.substr(offset, count);
    let clamped_offset = offset.min(text.len());
    let expected = count.min(text.len() - clamped_offset);
    if view.len() != expected {
        return false;
    }
    if !input.contains(view.as_str()) {
        return false;
    }
    // The view's own cached count is coherent.
    view.len() == view.as_str().chars().count()
}

/// Code-point indexing agrees with standard iteration.
#[quickcheck]
fn char_at_matches_iteration(input: String) -> bool {
    let text = Text::from(input.as_str());
    for (index, expected) in input.chars().enumerate() {
        match text.char_at(index) {
            Some(chr) if chr.value() == u32::from(expected) => {}
            _ => return false,
        }
    }
    text.char_at(input.chars().count()).is_none()
}

/// Walking a cursor to the end and back returns the code points in
/// reverse.
#[quickcheck]
fn cursor_reverses_cleanly(input: String) -> bool {
    let view = TextView::new(input.as_str());
    let mut cursor = view.cursor();
    let mut forward = Vec::new();
    while let Some(chr) = cursor.next() {
        forward.push(chr);
    }
    let mut backward = Vec::new();
    while let Some(chr) = cursor.prev() {
        backward.push(chr);
    }
    backward.reverse();
    forward == backward
}

/// The documented (length, bytes) ordering: any shorter string sorts
/// before any longer one.
#[quickcheck]
fn ordering_is_length_first(first: String, second: String) -> bool {
    let lhs = Text::from(first.as_str());
    let rhs = Text::from(second.as_str());
    if lhs.len() < rhs.len() {
        lhs < rhs
    } else if lhs.len() > rhs.len() {
        lhs > rhs
    } else {
        (lhs <= rhs) || (lhs > rhs)
    }
}

/// Prefix and suffix tests agree with the standard library's bytewise
/// semantics.
#[quickcheck]
fn prefix_suffix_agree_with_std(input: String, probe: String) -> bool {
    let text = Text::from(input.as_str());
    let view = TextView::new(probe.as_str());
    text.begins_with(&view) == input.starts_with(probe.as_str())
        && text.ends_with(&view) == input.ends_with(probe.as_str())
}
