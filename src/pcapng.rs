//! PCAPNG file format
//!
//! See <https://github.com/pcapng/pcapng> for details.
//!
//! A capture file is organized in blocks. Blocks are organized in sections, each section
//! starting with a Section Header Block (SHB), and followed by blocks (interface description,
//! packets, etc.).
//!
//! Most blocks carry a list of *options*: typed, variable-length records of the form
//! `{code: u16, length: u16, value: [u8; length]}`, padded to 32 bits. The list is parsed
//! once, kept in encounter order, and is read-only afterwards. See [`PcapNGOptions`] for the
//! query interface (enumerate custom option codes, find an option by code, walk the chain).
//!
//! ## Endianness
//!
//! The endianness of a block is indicated by the Section Header Block that started the section
//! containing this block. Since a file can contain several sections, a single file can contain
//! both endianness variants.

use rusticata_macros::newtype_enum;

mod block;
mod capture;
mod enhanced_packet;
mod interface_description;
mod option;
mod option_chain;
mod packet;
mod section_header;
mod simple_packet;
mod time;

pub use block::*;
pub use capture::*;
pub use enhanced_packet::*;
pub use interface_description::*;
pub use option::*;
pub use option_chain::*;
pub use packet::*;
pub use section_header::*;
pub use simple_packet::*;
pub use time::*;

/// Section Header Block magic
pub const SHB_MAGIC: u32 = 0x0A0D_0D0A;
/// Interface Description Block magic
pub const IDB_MAGIC: u32 = 0x0000_0001;
/// Simple Packet Block magic
pub const SPB_MAGIC: u32 = 0x0000_0003;
/// Enhanced Packet Block magic
pub const EPB_MAGIC: u32 = 0x0000_0006;

/// Byte Order magic
pub const BOM_MAGIC: u32 = 0x1A2B_3C4D;

#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct OptionCode(pub u16);

newtype_enum! {
impl debug OptionCode {
    EndOfOpt = 0,
    Comment = 1,
    ShbHardware = 2,
    ShbOs = 3,
    ShbUserAppl = 4,
    IfTsresol = 9,
    IfTsoffset = 14,
    Custom2988 = 2988,
    Custom2989 = 2989,
    Custom19372 = 19372,
    Custom19373 = 19373,
}
}

impl OptionCode {
    /// Returns true for the codes reserved by the format (`opt_endofopt` and `opt_comment`)
    ///
    /// Reserved codes are never reported as custom options.
    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0 <= 1
    }

    /// Returns true if this code denotes a custom option (value starts with a PEN)
    #[inline]
    pub const fn is_custom(self) -> bool {
        matches!(self.0, 2988 | 2989 | 19372 | 19373)
    }

    /// Returns true if this code denotes a custom option with binary (non UTF-8) content
    #[inline]
    pub const fn is_custom_binary(self) -> bool {
        matches!(self.0, 2989 | 19373)
    }
}

impl From<u16> for OptionCode {
    fn from(code: u16) -> Self {
        OptionCode(code)
    }
}
