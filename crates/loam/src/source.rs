//! Byte sources for the tokeniser.
//!
//! A [`Source`] hands out one byte at a time and supports a small, bounded
//! rewind: the UTF-8 stream decoder steps back over a byte that turned out
//! to start the next code point, and the tokeniser rewinds to a remembered
//! offset when an ellipsis fails to materialise. Both in-memory spans and
//! buffered files satisfy this trivially.
//!
//! End-of-input is a latch rather than a lookahead query: it becomes set
//! only once a read has gone past the final byte, and any successful seek
//! clears it again. The tokeniser's priming read relies on this ordering.

use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

use crate::error::SourceError;

/// A positioned stream of bytes with bounded rewind.
pub trait Source {
    /// Reads the next byte, or `None` once the input is exhausted.
    /// Reading past the final byte latches the end-of-input flag.
    fn read_byte(&mut self) -> Option<u8>;

    /// Current byte offset from the start of the input.
    fn tell(&self) -> u64;

    /// Repositions to an absolute offset that was previously observed via
    /// [`tell`](Source::tell), clearing the end-of-input latch. Returns
    /// `false` when the source cannot be repositioned.
    fn seek_to(&mut self, offset: u64) -> bool;

    /// Steps back over `count` already-read bytes, clearing the
    /// end-of-input latch. Returns `false` if the rewind would cross the
    /// start of input or the source cannot seek.
    fn seek_back(&mut self, count: u64) -> bool;

    /// `true` once a read has gone past the final byte.
    fn at_end(&self) -> bool;
}

/// A [`Source`] over any in-memory span of bytes.
///
/// The backing storage is anything that dereferences to `[u8]` — an owned
/// buffer, a borrowed slice, or a read-only memory map.
#[derive(Debug)]
pub struct MemorySource<B> {
    data: B,
    offset: usize,
    exhausted: bool,
}

impl<B: AsRef<[u8]>> MemorySource<B> {
    /// Wraps a span of bytes, positioned at the start.
    pub fn new(data: B) -> Self {
        Self {
            data,
            offset: 0,
            exhausted: false,
        }
    }
}

#[cfg(feature = "mmap")]
impl MemorySource<memmap2::Mmap> {
    /// Maps the file at `path` read-only and wraps the mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the file cannot be opened or mapped.
    pub fn map_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        // SAFETY: the mapping is read-only and lives as long as the source;
        // mutating the underlying file while mapped is the caller's hazard,
        // as with any mmap-backed reader.
        let map = unsafe { memmap2::Mmap::map(&file)? };
        Ok(Self::new(map))
    }
}

impl<B: AsRef<[u8]>> Source for MemorySource<B> {
    fn read_byte(&mut self) -> Option<u8> {
        match self.data.as_ref().get(self.offset) {
            Some(&byte) => {
                self.offset += 1;
                Some(byte)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    fn tell(&self) -> u64 {
        self.offset as u64
    }

    fn seek_to(&mut self, offset: u64) -> bool {
        let Ok(offset) = usize::try_from(offset) else {
            return false;
        };
        if offset > self.data.as_ref().len() {
            return false;
        }
        self.offset = offset;
        self.exhausted = false;
        true
    }

    fn seek_back(&mut self, count: u64) -> bool {
        let Ok(count) = usize::try_from(count) else {
            return false;
        };
        if count > self.offset {
            return false;
        }
        self.offset -= count;
        self.exhausted = false;
        true
    }

    fn at_end(&self) -> bool {
        self.exhausted
    }
}

/// A buffered file [`Source`].
///
/// Rewinds stay inside the buffer for the small distances the tokeniser
/// needs, so seeking back does not hit the file system.
#[derive(Debug)]
pub struct FileSource {
    file: BufReader<File>,
    offset: u64,
    exhausted: bool,
}

impl FileSource {
    /// Opens the file at `path` for tokenisation.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Ok(Self {
            file: BufReader::new(File::open(path)?),
            offset: 0,
            exhausted: false,
        })
    }
}

impl Source for FileSource {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0_u8; 1];
        match self.file.read(&mut byte) {
            Ok(1) => {
                self.offset += 1;
                Some(byte[0])
            }
            Ok(_) => {
                self.exhausted = true;
                None
            }
            Err(error) => {
                log::warn!("read failed at offset {}: {error}", self.offset);
                self.exhausted = true;
                None
            }
        }
    }

    fn tell(&self) -> u64 {
        self.offset
    }

    fn seek_to(&mut self, offset: u64) -> bool {
        if self.file.seek(SeekFrom::Start(offset)).is_err() {
            return false;
        }
        self.offset = offset;
        self.exhausted = false;
        true
    }

    fn seek_back(&mut self, count: u64) -> bool {
        if count > self.offset {
            return false;
        }
        let Ok(delta) = i64::try_from(count) else {
            return false;
        };
        if self.file.seek_relative(-delta).is_err() {
            return false;
        }
        self.offset -= count;
        self.exhausted = false;
        true
    }

    fn at_end(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySource, Source};

    #[test]
    fn reads_and_latches_end() {
        let mut source = MemorySource::new(b"ab".as_slice());
        assert!(!source.at_end());
        assert_eq!(source.read_byte(), Some(b'a'));
        assert_eq!(source.read_byte(), Some(b'b'));
        // The latch only trips once a read goes past the final byte.
        assert!(!source.at_end());
        assert_eq!(source.read_byte(), None);
        assert!(source.at_end());
    }

    #[test]
    fn seek_back_clears_latch() {
        let mut source = MemorySource::new(b"xy".as_slice());
        source.read_byte();
        source.read_byte();
        source.read_byte();
        assert!(source.at_end());
        assert!(source.seek_back(1));
        assert!(!source.at_end());
        assert_eq!(source.read_byte(), Some(b'y'));
    }

    #[test]
    fn seek_to_remembered_offset() {
        let mut source = MemorySource::new(b"hello".as_slice());
        source.read_byte();
        let mark = source.tell();
        source.read_byte();
        source.read_byte();
        assert!(source.seek_to(mark));
        assert_eq!(source.read_byte(), Some(b'e'));
        assert!(!source.seek_to(99));
        assert!(!source.seek_back(99));
    }
}
