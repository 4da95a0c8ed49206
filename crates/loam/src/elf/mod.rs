//! Reading ELF object files.
//!
//! [`Elf`] owns the backing bytes — a read-only memory map, an owned
//! buffer, or a set of fragments when building an image from scratch —
//! and hands out borrowed, lazily-read views: the class-dispatched
//! [`ElfHeader`], the program- and section-header tables, the
//! section-name [`StringTable`] and the [`SymbolTable`]. Nothing is
//! parsed up front beyond the magic check; every field is read on demand
//! through the endian-aware [`io::Memory`] span.
//!
//! ```no_run
//! # fn main() -> Result<(), loam::elf::Error> {
//! let elf = loam::elf::Elf::from_path("target/debug/loamc")?;
//! let header = elf.header();
//! if header.valid() {
//!     println!("{}-bit, {:?}", header.class().bits(), header.machine());
//! }
//! # Ok(())
//! # }
//! ```

pub mod enums;
mod elf32;
mod elf64;
mod ident;
pub mod io;
mod types;

use thiserror::Error;

use enums::{Class, Endian, SectionType};
pub use ident::{ELF_MAGIC, Ident};
use io::Memory;
pub use types::{
    ElfHeader, ElfSymbol, ProgramHeader, SectionHeader, StringTable, SymbolIter, SymbolTable,
};

/// Failures constructing an [`Elf`] from a file or buffer.
#[derive(Error, Debug)]
pub enum Error {
    /// The magic bytes are not `\x7f ELF`.
    #[error("unable to find the ELF magic in the given file")]
    InvalidMagic,
    /// The input is smaller than an identification prefix.
    #[error("{0} bytes is too small to be an ELF file")]
    TooSmall(usize),
    /// The file could not be opened or mapped.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

enum Backing {
    #[cfg(feature = "mmap")]
    Mapped(memmap2::Mmap),
    Buffer(Vec<u8>),
    Fragments(Vec<Box<[u8]>>),
}

impl Backing {
    fn bytes(&self) -> &[u8] {
        match self {
            #[cfg(feature = "mmap")]
            Self::Mapped(map) => map,
            Self::Buffer(buffer) => buffer,
            Self::Fragments(fragments) => match fragments.first() {
                Some(fragment) => fragment,
                None => &[],
            },
        }
    }
}

/// An ELF object file and its backing storage.
pub struct Elf {
    backing: Backing,
}

impl Elf {
    /// Maps the file at `path` read-only and validates the magic.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when opening or mapping fails, [`Error::TooSmall`]
    /// or [`Error::InvalidMagic`] when the content cannot be ELF.
    #[cfg(feature = "mmap")]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let file = std::fs::File::open(path)?;
        // SAFETY: mapped read-only and owned by the returned value;
        // concurrent truncation of the underlying file is the usual mmap
        // caveat and is accepted here as it was for the source files.
        let map = unsafe { memmap2::Mmap::map(&file)? };
        Self::validate(&map)?;
        Ok(Self {
            backing: Backing::Mapped(map),
        })
    }

    /// Takes ownership of an in-memory image and validates the magic.
    ///
    /// # Errors
    ///
    /// [`Error::TooSmall`] or [`Error::InvalidMagic`] when the content
    /// cannot be ELF.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        Self::validate(&bytes)?;
        Ok(Self {
            backing: Backing::Buffer(bytes),
        })
    }

    /// Starts an empty image of the given class, backed by fragment
    /// storage holding a zeroed file header.
    #[must_use]
    pub fn with_class(class: Class) -> Self {
        let size = match class {
            Class::Elf32 => elf32::Header::SIZE,
            _ => elf64::Header::SIZE,
        };
        let mut header = vec![0_u8; size].into_boxed_slice();
        header[..4].copy_from_slice(&ELF_MAGIC);
        header[4] = class as u8;
        Self {
            backing: Backing::Fragments(vec![header]),
        }
    }

    fn validate(bytes: &[u8]) -> Result<(), Error> {
        if bytes.len() < Ident::SIZE {
            return Err(Error::TooSmall(bytes.len()));
        }
        if bytes[..4] != ELF_MAGIC {
            return Err(Error::InvalidMagic);
        }
        Ok(())
    }

    fn memory(&self) -> Memory<'_> {
        Memory::new(self.backing.bytes())
    }

    /// The file header, dispatched on the class byte.
    #[must_use]
    pub fn header(&self) -> ElfHeader<'_> {
        ElfHeader::from_memory(self.memory())
    }

    /// The program headers, best-effort: entries whose bytes fall outside
    /// the file are skipped.
    #[must_use]
    pub fn program_headers(&self) -> Vec<ProgramHeader<'_>> {
        let header = self.header();
        let data = self.memory();
        let endian = header.endian();
        let class = header.class();
        let stride = usize::from(header.program_header_size());
        let entry_size = match class {
            Class::Elf32 => elf32::ProgramHeader::SIZE,
            _ => elf64::ProgramHeader::SIZE,
        };

        let mut headers = Vec::with_capacity(header.program_header_count().into());
        let mut offset = usize::try_from(header.phdr_offset()).unwrap_or(usize::MAX);
        for _ in 0..header.program_header_count() {
            let Some(storage) = data.subspan(offset, entry_size) else {
                break;
            };
            headers.push(match class {
                Class::Elf32 => {
                    ProgramHeader::Elf32(elf32::ProgramHeader::new(storage, endian))
                }
                _ => ProgramHeader::Elf64(elf64::ProgramHeader::new(storage, endian)),
            });
            offset = offset.saturating_add(stride);
        }
        headers
    }

    /// The section headers, best-effort exactly as
    /// [`program_headers`](Elf::program_headers).
    #[must_use]
    pub fn section_headers(&self) -> Vec<SectionHeader<'_>> {
        let header = self.header();
        let data = self.memory();
        let endian = header.endian();
        let class = header.class();
        let stride = usize::from(header.section_header_size());
        let entry_size = match class {
            Class::Elf32 => elf32::SectionHeader::SIZE,
            _ => elf64::SectionHeader::SIZE,
        };

        let mut headers = Vec::with_capacity(header.section_header_count().into());
        let mut offset = usize::try_from(header.shdr_offset()).unwrap_or(usize::MAX);
        for _ in 0..header.section_header_count() {
            let Some(storage) = data.subspan(offset, entry_size) else {
                break;
            };
            headers.push(match class {
                Class::Elf32 => {
                    SectionHeader::Elf32(elf32::SectionHeader::new(storage, endian))
                }
                _ => SectionHeader::Elf64(elf64::SectionHeader::new(storage, endian)),
            });
            offset = offset.saturating_add(stride);
        }
        headers
    }

    /// The bytes of a section, or an empty span when the header points
    /// outside the file.
    #[must_use]
    pub fn section_data(&self, section: &SectionHeader<'_>) -> &[u8] {
        let offset = usize::try_from(section.file_offset()).unwrap_or(usize::MAX);
        let length = usize::try_from(section.file_length()).unwrap_or(usize::MAX);
        self.memory()
            .subspan(offset, length)
            .map_or(&[], |memory| memory.bytes())
    }

    /// The section-name string table, from the section the header's
    /// names index points at. Empty when the index is out of range.
    #[must_use]
    pub fn section_names(&self) -> StringTable<'_> {
        let index = usize::from(self.header().section_names_index());
        self.section_headers()
            .get(index)
            .map_or_else(StringTable::default, |section| {
                StringTable::new(self.section_data(section))
            })
    }

    /// The name of a section, looked up in the section-name table.
    #[must_use]
    pub fn section_name(&self, section: &SectionHeader<'_>) -> &bstr::BStr {
        self.section_names().name_at(section.name_offset())
    }

    /// The symbol table, from the first `SHT_SYMTAB` section.
    #[must_use]
    pub fn symbol_table(&self) -> Option<SymbolTable<'_>> {
        let header = self.header();
        let section = self
            .section_headers()
            .into_iter()
            .find(|section| section.section_type() == SectionType::SymbolTable)?;
        Some(SymbolTable::new(
            Memory::new(self.section_data(&section)),
            header.class(),
            header.endian(),
        ))
    }

    /// The string table the symbol table links to, for symbol names.
    #[must_use]
    pub fn string_table(&self) -> Option<StringTable<'_>> {
        let sections = self.section_headers();
        let symtab = sections
            .iter()
            .find(|section| section.section_type() == SectionType::SymbolTable)?;
        let linked = sections.get(usize::try_from(symtab.link()).ok()?)?;
        if linked.section_type() != SectionType::StringTable {
            log::warn!("symbol table links to a non-string-table section");
            return None;
        }
        Some(StringTable::new(self.section_data(linked)))
    }

    /// Every symbol paired with its name from the linked string table.
    ///
    /// Empty when the file carries no symbol table; symbols whose name
    /// offsets fall outside the string table pair with an empty name.
    #[must_use]
    pub fn symbols(&self) -> Vec<(&bstr::BStr, ElfSymbol<'_>)> {
        let Some(table) = self.symbol_table() else {
            return Vec::new();
        };
        let names = self.string_table().unwrap_or_default();
        table
            .iter()
            .map(|symbol| (names.name_at(symbol.name_offset()), symbol))
            .collect()
    }

    /// The endianness recorded in the identification bytes.
    #[must_use]
    pub fn endian(&self) -> Endian {
        self.header().endian()
    }
}
