use rusticata_macros::newtype_enum;

/// Data link type
///
/// The link-layer header type specifies the type of headers at the beginning
/// of the packet. It is stored in the Interface Description Block and copied to
/// every packet captured on that interface.
///
/// See <http://www.tcpdump.org/linktypes.html>
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Linktype(pub i32);

newtype_enum! {
impl display Linktype {
    NULL = 0,
    ETHERNET = 1,

    RAW = 101,

    IEEE802_11 = 105,
    LINUX_SLL = 113,
    IEEE802_11_RADIOTAP = 127,

    // Per-Packet Information, used by Kismet for 802.11 captures
    PPI = 192,
}
}
