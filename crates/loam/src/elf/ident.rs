//! The fixed 16-byte identification prefix of every ELF file.

use super::{
    enums::{Abi, Class, Endian, IdentVersion},
    io::Memory,
};

/// The magic number `\x7f ELF`.
pub const ELF_MAGIC: [u8; 4] = [0x7f, 0x45, 0x4c, 0x46];

/// A view of the identification bytes: magic, class, endianness, version
/// and ABI.
///
/// The endian byte is decoded once at construction since every other
/// multi-byte read depends on it. All other fields read on demand and
/// degrade to their `Invalid`/default values on a truncated span.
#[derive(Clone, Copy, Debug)]
pub struct Ident<'data> {
    storage: Memory<'data>,
    endian: Endian,
}

impl<'data> Ident<'data> {
    /// Size of the identification prefix in bytes.
    pub const SIZE: usize = 16;

    /// Wraps a span beginning at the start of the file.
    #[must_use]
    pub fn new(storage: Memory<'data>) -> Self {
        let endian = storage.read_u8(5).map_or(Endian::Invalid, Endian::from);
        Self { storage, endian }
    }

    /// The span this view reads from.
    #[must_use]
    pub(super) const fn storage(&self) -> Memory<'data> {
        self.storage
    }

    /// The four magic bytes.
    #[must_use]
    pub fn magic(&self) -> [u8; 4] {
        self.storage.read_array(0).unwrap_or_default()
    }

    /// The class byte: 32- or 64-bit layouts.
    #[must_use]
    pub fn class(&self) -> Class {
        self.storage.read_u8(4).map_or(Class::Invalid, Class::from)
    }

    /// The data-encoding byte.
    #[must_use]
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    /// The identification version byte.
    #[must_use]
    pub fn version(&self) -> IdentVersion {
        self.storage
            .read_u8(6)
            .map_or(IdentVersion::Invalid, IdentVersion::from)
    }

    /// The OS ABI byte.
    #[must_use]
    pub fn abi(&self) -> Abi {
        self.storage.read_u8(7).map_or(Abi::SystemV, Abi::from)
    }

    /// The ABI version byte.
    #[must_use]
    pub fn abi_version(&self) -> u8 {
        self.storage.read_u8(8).unwrap_or_default()
    }
}
