#![no_main]

use libfuzzer_sys::fuzz_target;
use loam::source::{MemorySource, Source};
use loam::utf8::Char;
use loam::Tokeniser;

// Two invariants under arbitrary bytes: the streaming decoder always
// consumes at least one byte per code point, and the tokeniser always
// reaches EOF without more `next()` calls than bytes (plus one per call
// for the degenerate empty-token cases).
fuzz_target!(|data: &[u8]| {
    let mut source = MemorySource::new(data);
    let mut last_offset = 0_u64;
    while !source.at_end() {
        let chr = Char::read_from(&mut source);
        let offset = source.tell();
        if !source.at_end() {
            assert!(offset > last_offset, "decoder made no progress");
        }
        if chr.valid() {
            assert!(chr.value() <= 0x10_ffff);
            assert!((1..=4).contains(&chr.length()));
        }
        last_offset = offset;
    }

    let mut tokeniser = Tokeniser::from_bytes(data);
    let mut steps = 0_usize;
    while !tokeniser.next().is_eof() {
        steps += 1;
        assert!(steps <= data.len().saturating_mul(2) + 2, "tokeniser stalled");
    }
});
