//! # PCAPNG parser with Kismet GPS support
//!
//! This crate contains a zero-copy parser for files in the pcap-ng format, loaded in memory,
//! with a focus on the *options* attached to blocks: options are kept in encounter order and
//! can be enumerated, searched by code, or walked as a chain (see [`PcapNGOptions`]).
//!
//! Packet-scoped custom options are exposed as [`CustomField`]s. The [`data`] module decodes
//! the GPS records written by Kismet in these fields, using a fixed-point encoding for
//! coordinates.
//!
//! # Example: reading packets and GPS positions
//!
//! ```rust
//! use pcapng_gps::*;
//!
//! # fn main() {
//! # let buffer: &[u8] = &[];
//! match PacketIterator::from_slice(buffer) {
//!     Ok(packets) => {
//!         for packet in packets {
//!             let packet = match packet {
//!                 Ok(packet) => packet,
//!                 Err(e) => { eprintln!("error while reading: {:?}", e); break; }
//!             };
//!             if let Some(comment) = &packet.header.comment {
//!                 println!("comment: {}", comment);
//!             }
//!             for gps in packet.header.iter_kismet_gps() {
//!                 match gps {
//!                     Ok(gps) => println!("Lat {}, Lon {}", gps.latitude, gps.longitude),
//!                     Err(e) => println!("invalid GPS record: {}", e),
//!                 }
//!             }
//!         }
//!     }
//!     Err(e) => eprintln!("not a pcap-ng file: {:?}", e),
//! }
//! # }
//! ```
//!
//! # Example: querying options
//!
//! ```rust
//! use pcapng_gps::*;
//!
//! # fn print_block_options(block: &Block) {
//! if let Some(codes) = block.custom_option_codes() {
//!     println!("custom options: {:?}", codes);
//! }
//! let mut comment = block.get_option(OptionCode::Comment);
//! while let Some(opt) = comment {
//!     println!("comment: {:?}", opt.as_str());
//!     comment = opt.next_with_code(OptionCode::Comment);
//! }
//! # }
//! ```

mod error;
mod linktype;
pub use error::*;
pub use linktype::*;

pub mod pcapng;
pub use pcapng::*;

pub mod data;
