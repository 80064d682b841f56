//! Helper functions to decode the content of custom fields
//!
//! ## Example
//!
//! ```rust
//! use pcapng_gps::data::KismetGpsV1;
//! use pcapng_gps::PacketHeader;
//!
//! fn print_gps(header: &PacketHeader) {
//!     for field in &header.custom_fields {
//!         match KismetGpsV1::extract(field.field_type, field.length, field.payload(), field.big_endian) {
//!             Ok(Some(gps)) => println!("Lat {}, Lon {}, Alt {}", gps.latitude, gps.longitude, gps.altitude),
//!             Ok(None) => println!("generic custom field {:?}", field.field_type),
//!             Err(e) => println!("invalid GPS record: {}", e),
//!         }
//!     }
//! }
//! ```

mod fixed_point;
mod kismet_gps;

pub use crate::data::fixed_point::*;
pub use crate::data::kismet_gps::*;
