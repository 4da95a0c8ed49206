//! Front-end core of the Loam bootstrap compiler.
//!
//! Loam source is UTF-8 and the compiler thinks in code points: the
//! [`utf8`] module provides the text substrate ([`utf8::Char`],
//! [`utf8::Text`], [`utf8::TextView`]), [`source`] the seek-back byte
//! streams feeding it, and [`tokeniser`] the single-pass, position-tracked
//! lexer that turns a stream into [`tokeniser::Token`]s. The [`symbols`]
//! module carries the lexically nested symbol-table stack the parser
//! hangs identifiers on, pre-loaded with the built-in type prelude.
//!
//! Alongside the text pipeline sits [`elf`], an endian-aware, 32/64-bit
//! class-dispatched reader over ELF object files, used by the toolchain
//! to inspect the binaries it produces. It shares nothing with the
//! tokeniser beyond the idea of a borrowed byte span.
//!
//! Failure is data, not control flow: malformed UTF-8 and malformed
//! literals become `Invalid` tokens, duplicate symbol insertion returns
//! `false`, out-of-range ELF symbol indices return `None`, and a
//! malformed ELF header answers `valid() == false` while its accessors
//! keep returning best-effort values. The crate logs noteworthy oddities
//! through the [`log`] facade and never installs a logger itself.

pub mod elf;
mod error;
pub mod source;
pub mod symbols;
pub mod tokeniser;
pub mod utf8;

pub use error::SourceError;
pub use source::{FileSource, MemorySource, Source};
pub use tokeniser::{Position, Span, Token, TokenKind, Tokeniser};
pub use utf8::{Char, Text, TextView};
