//! The enumerated fields of the ELF format.
//!
//! Every conversion from a raw field keeps unknown values representable —
//! either through an `Invalid` variant for the fields the reader
//! dispatches on, or an `Unknown` payload for open-ended registries like
//! the machine table — so a hostile file can be inspected without any
//! conversion failing.

use bitflags::bitflags;

/// The file class from the identification bytes: 32- or 64-bit layouts.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Class {
    /// Unrecognised class byte.
    #[default]
    Invalid = 0,
    /// 32-bit object file.
    Elf32 = 1,
    /// 64-bit object file.
    Elf64 = 2,
}

impl Class {
    /// The nominal pointer width, for display: 32 or 64. Zero when
    /// invalid.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Invalid => 0,
            Self::Elf32 => 32,
            Self::Elf64 => 64,
        }
    }
}

impl From<u8> for Class {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Elf32,
            2 => Self::Elf64,
            _ => Self::Invalid,
        }
    }
}

/// The data-encoding byte: the byte order of every multi-byte field.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Endian {
    /// Unrecognised encoding byte.
    #[default]
    Invalid = 0,
    /// Least significant byte first.
    Little = 1,
    /// Most significant byte first.
    Big = 2,
}

impl From<u8> for Endian {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Little,
            2 => Self::Big,
            _ => Self::Invalid,
        }
    }
}

/// The identification-prefix version byte.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum IdentVersion {
    /// Unrecognised version.
    #[default]
    Invalid = 0,
    /// The only defined version.
    Current = 1,
}

impl From<u8> for IdentVersion {
    fn from(value: u8) -> Self {
        if value == 1 { Self::Current } else { Self::Invalid }
    }
}

/// The object-file version field.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Version {
    /// Unrecognised version.
    #[default]
    Invalid,
    /// The only defined version.
    Current,
}

impl From<u32> for Version {
    fn from(value: u32) -> Self {
        if value == 1 { Self::Current } else { Self::Invalid }
    }
}

/// The operating-system ABI byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Abi {
    /// System V / unspecified.
    #[default]
    SystemV,
    /// Hewlett-Packard HP-UX.
    HpUx,
    /// NetBSD.
    NetBsd,
    /// GNU/Linux.
    Linux,
    /// GNU Hurd.
    Hurd,
    /// Sun Solaris.
    Solaris,
    /// AIX.
    Aix,
    /// IRIX.
    Irix,
    /// FreeBSD.
    FreeBsd,
    /// Compaq Tru64 UNIX.
    Tru64,
    /// Novell Modesto.
    Modesto,
    /// OpenBSD.
    OpenBsd,
    /// OpenVMS.
    OpenVms,
    /// Hewlett-Packard Non-Stop Kernel.
    NonStopKernel,
    /// Amiga Research OS.
    Aros,
    /// FenixOS.
    FenixOs,
    /// Nuxi CloudABI.
    CloudAbi,
    /// Anything else.
    Unknown(u8),
}

impl From<u8> for Abi {
    fn from(value: u8) -> Self {
        match value {
            0x00 => Self::SystemV,
            0x01 => Self::HpUx,
            0x02 => Self::NetBsd,
            0x03 => Self::Linux,
            0x04 => Self::Hurd,
            0x06 => Self::Solaris,
            0x07 => Self::Aix,
            0x08 => Self::Irix,
            0x09 => Self::FreeBsd,
            0x0a => Self::Tru64,
            0x0b => Self::Modesto,
            0x0c => Self::OpenBsd,
            0x0d => Self::OpenVms,
            0x0e => Self::NonStopKernel,
            0x0f => Self::Aros,
            0x10 => Self::FenixOs,
            0x11 => Self::CloudAbi,
            value => Self::Unknown(value),
        }
    }
}

/// The object-file type.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum ElfType {
    /// No type recorded.
    #[default]
    None,
    /// Relocatable file.
    Relocatable,
    /// Executable file.
    Executable,
    /// Shared object.
    Shared,
    /// Core dump.
    Core,
    /// OS- or processor-specific type.
    Unknown(u16),
}

impl From<u16> for ElfType {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Relocatable,
            2 => Self::Executable,
            3 => Self::Shared,
            4 => Self::Core,
            value => Self::Unknown(value),
        }
    }
}

/// The target machine of the object file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Machine {
    /// No specific machine.
    #[default]
    NonSpecific,
    /// SPARC.
    Sparc,
    /// x86 (i386).
    X86,
    /// MIPS.
    Mips,
    /// PowerPC.
    PowerPc,
    /// IBM S/390.
    S390,
    /// ARM (AArch32).
    Arm,
    /// SuperH.
    SuperH,
    /// Itanium.
    Ia64,
    /// x86-64 (amd64).
    X86_64,
    /// AArch64.
    AArch64,
    /// RISC-V.
    RiscV,
    /// Anything else.
    Unknown(u16),
}

impl From<u16> for Machine {
    fn from(value: u16) -> Self {
        match value {
            0x0000 => Self::NonSpecific,
            0x0002 => Self::Sparc,
            0x0003 => Self::X86,
            0x0008 => Self::Mips,
            0x0014 => Self::PowerPc,
            0x0016 => Self::S390,
            0x0028 => Self::Arm,
            0x002a => Self::SuperH,
            0x0032 => Self::Ia64,
            0x003e => Self::X86_64,
            0x00b7 => Self::AArch64,
            0x00f3 => Self::RiscV,
            value => Self::Unknown(value),
        }
    }
}

/// The type of a program header (loadable segment).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum ProgramType {
    /// Unused entry.
    #[default]
    Null,
    /// Loadable segment.
    Load,
    /// Dynamic-linking information.
    Dynamic,
    /// Interpreter path.
    Interp,
    /// Auxiliary notes.
    Note,
    /// Reserved, non-conforming.
    ShLib,
    /// The program-header table itself.
    Phdr,
    /// Thread-local storage template.
    Tls,
    /// OS- or processor-specific segment.
    Unknown(u32),
}

impl From<u32> for ProgramType {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Null,
            1 => Self::Load,
            2 => Self::Dynamic,
            3 => Self::Interp,
            4 => Self::Note,
            5 => Self::ShLib,
            6 => Self::Phdr,
            7 => Self::Tls,
            value => Self::Unknown(value),
        }
    }
}

/// The type of a section header.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum SectionType {
    /// Inactive entry.
    #[default]
    Null,
    /// Program-defined contents.
    ProgBits,
    /// A symbol table.
    SymbolTable,
    /// A string table.
    StringTable,
    /// Relocations with addends.
    RelocAddend,
    /// A symbol hash table.
    SymbolHash,
    /// Dynamic-linking information.
    Dynamic,
    /// Notes.
    Note,
    /// Zero-filled at load time.
    NoBits,
    /// Relocations without addends.
    Reloc,
    /// Reserved.
    Reserved,
    /// The dynamic linker's symbol table.
    DynamicSymbols,
    /// Initialiser function pointers.
    InitArray,
    /// Finaliser function pointers.
    FiniArray,
    /// Pre-initialiser function pointers.
    PreInitArray,
    /// A section group.
    Group,
    /// Extended symbol section indices.
    SymbolTableIndex,
    /// OS- or processor-specific section.
    Unknown(u32),
}

impl From<u32> for SectionType {
    fn from(value: u32) -> Self {
        match value {
            0x00 => Self::Null,
            0x01 => Self::ProgBits,
            0x02 => Self::SymbolTable,
            0x03 => Self::StringTable,
            0x04 => Self::RelocAddend,
            0x05 => Self::SymbolHash,
            0x06 => Self::Dynamic,
            0x07 => Self::Note,
            0x08 => Self::NoBits,
            0x09 => Self::Reloc,
            0x0a => Self::Reserved,
            0x0b => Self::DynamicSymbols,
            0x0e => Self::InitArray,
            0x0f => Self::FiniArray,
            0x10 => Self::PreInitArray,
            0x11 => Self::Group,
            0x12 => Self::SymbolTableIndex,
            value => Self::Unknown(value),
        }
    }
}

bitflags! {
    /// Access flags of a loadable segment.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
    pub struct SegmentFlags: u32 {
        /// The segment's contents may be executed.
        const EXECUTABLE = 0x1;
        /// The segment's contents may be written.
        const WRITABLE = 0x2;
        /// The segment's contents may be read.
        const READABLE = 0x4;
    }
}

bitflags! {
    /// Attribute flags of a section.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
    pub struct SectionFlags: u64 {
        /// Writable during execution.
        const WRITE = 0x1;
        /// Occupies memory during execution.
        const ALLOC = 0x2;
        /// Contains executable instructions.
        const EXEC_INSTR = 0x4;
        /// Mergeable to eliminate duplication.
        const MERGE = 0x10;
        /// Holds NUL-terminated strings.
        const STRINGS = 0x20;
        /// `info` carries a section header table index.
        const INFO_LINK = 0x40;
        /// Special link-order requirements.
        const LINK_ORDER = 0x80;
        /// Needs OS-specific processing.
        const OS_NONCONFORMING = 0x100;
        /// Member of a section group.
        const GROUP = 0x200;
        /// Holds thread-local storage.
        const TLS = 0x400;
        /// Holds compressed data.
        const COMPRESSED = 0x800;
    }
}

/// Symbol binding, the high nibble of a symbol's `info` field.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum SymbolBinding {
    /// Not visible outside the defining object.
    #[default]
    Local,
    /// Visible to all objects being combined.
    Global,
    /// Global with lower precedence.
    Weak,
    /// OS- or processor-specific binding.
    Unknown(u8),
}

impl From<u8> for SymbolBinding {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Local,
            1 => Self::Global,
            2 => Self::Weak,
            value => Self::Unknown(value),
        }
    }
}

/// Symbol classification, the low nibble of a symbol's `info` field.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum SymbolKind {
    /// No type.
    #[default]
    None,
    /// A data object.
    Object,
    /// A function or other executable code.
    Function,
    /// The section the symbol belongs to.
    Section,
    /// The source file associated with the object.
    File,
    /// An unallocated common block.
    Common,
    /// A thread-local entity.
    ThreadLocal,
    /// OS- or processor-specific type.
    Unknown(u8),
}

impl From<u8> for SymbolKind {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Object,
            2 => Self::Function,
            3 => Self::Section,
            4 => Self::File,
            5 => Self::Common,
            6 => Self::ThreadLocal,
            value => Self::Unknown(value),
        }
    }
}

/// Symbol visibility, the low two bits of a symbol's `other` field.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum SymbolVisibility {
    /// Visibility as implied by the binding.
    #[default]
    Default,
    /// Reserved, processor-specific.
    Internal,
    /// Not visible to other components.
    Hidden,
    /// Visible but not preemptable.
    Protected,
}

impl From<u8> for SymbolVisibility {
    fn from(value: u8) -> Self {
        match value & 0x03 {
            1 => Self::Internal,
            2 => Self::Hidden,
            3 => Self::Protected,
            _ => Self::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Abi, Class, Endian, Machine, SymbolBinding, SymbolVisibility};

    #[test]
    fn unknown_values_stay_representable() {
        assert_eq!(Class::from(7), Class::Invalid);
        assert_eq!(Endian::from(9), Endian::Invalid);
        assert_eq!(Abi::from(0x42), Abi::Unknown(0x42));
        assert_eq!(Machine::from(0x1234), Machine::Unknown(0x1234));
        assert_eq!(SymbolBinding::from(0xf), SymbolBinding::Unknown(0xf));
    }

    #[test]
    fn visibility_masks_to_two_bits() {
        assert_eq!(SymbolVisibility::from(0), SymbolVisibility::Default);
        assert_eq!(SymbolVisibility::from(2), SymbolVisibility::Hidden);
        assert_eq!(SymbolVisibility::from(0xfe), SymbolVisibility::Hidden);
    }

    #[test]
    fn class_widths() {
        assert_eq!(Class::Elf32.bits(), 32);
        assert_eq!(Class::Elf64.bits(), 64);
        assert_eq!(Class::Invalid.bits(), 0);
    }
}
