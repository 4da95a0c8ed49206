use thiserror::Error;

/// Failures opening or repositioning a tokeniser byte source.
///
/// Tokenisation itself never fails — malformed input degrades to `Invalid`
/// tokens — so this type only covers acquiring the source in the first
/// place and the I/O layer underneath a seekable file stream.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The underlying file could not be opened, read or mapped.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
