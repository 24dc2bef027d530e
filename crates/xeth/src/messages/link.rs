//! Interface messages: carrier, speed, ifinfo, ifdel and upper/lower changes.

use std::fmt;

use zerocopy::byteorder::native_endian::{I16, I32, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::ethtool::Mbps;
use crate::message::MsgHeader;

/// Maximum interface name length (including null terminator).
pub const IFNAMSIZ: usize = 16;

/// Ethernet address length.
pub const ETH_ALEN: usize = 6;

/// Carrier state of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierFlag {
    Off,
    On,
    Unknown(u8),
}

impl CarrierFlag {
    /// Parse from wire value.
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => CarrierFlag::Off,
            1 => CarrierFlag::On,
            n => CarrierFlag::Unknown(n),
        }
    }
}

impl fmt::Display for CarrierFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarrierFlag::Off => f.write_str("off"),
            CarrierFlag::On => f.write_str("on"),
            CarrierFlag::Unknown(n) => write!(f, "@{n}"),
        }
    }
}

/// Kind of device an ifinfo or ifdel message describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevType {
    /// A port proxy owned by the xeth mux.
    XethPort,
    LinuxUnknown,
    LinuxVlan,
    LinuxBridge,
    LinuxVlanBridgePort,
    Other(u8),
}

impl DevType {
    /// Parse from wire value.
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => DevType::XethPort,
            128 => DevType::LinuxUnknown,
            129 => DevType::LinuxVlan,
            130 => DevType::LinuxBridge,
            131 => DevType::LinuxVlanBridgePort,
            n => DevType::Other(n),
        }
    }
}

impl fmt::Display for DevType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevType::XethPort => f.write_str("port"),
            DevType::LinuxUnknown => f.write_str("linux"),
            DevType::LinuxVlan => f.write_str("vlan"),
            DevType::LinuxBridge => f.write_str("bridge"),
            DevType::LinuxVlanBridgePort => f.write_str("vlan-bridge-port"),
            DevType::Other(n) => write!(f, "@{n}"),
        }
    }
}

/// Why an ifinfo message was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfinfoReason {
    New,
    Del,
    Up,
    Down,
    Dump,
    Reg,
    Unreg,
    Other(u8),
}

impl IfinfoReason {
    /// Parse from wire value.
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => IfinfoReason::New,
            1 => IfinfoReason::Del,
            2 => IfinfoReason::Up,
            3 => IfinfoReason::Down,
            4 => IfinfoReason::Dump,
            5 => IfinfoReason::Reg,
            6 => IfinfoReason::Unreg,
            n => IfinfoReason::Other(n),
        }
    }
}

impl fmt::Display for IfinfoReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IfinfoReason::New => f.write_str("new"),
            IfinfoReason::Del => f.write_str("del"),
            IfinfoReason::Up => f.write_str("up"),
            IfinfoReason::Down => f.write_str("down"),
            IfinfoReason::Dump => f.write_str("dump"),
            IfinfoReason::Reg => f.write_str("reg"),
            IfinfoReason::Unreg => f.write_str("unreg"),
            IfinfoReason::Other(n) => write!(f, "@{n}"),
        }
    }
}

/// Carrier change.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgCarrier {
    pub header: MsgHeader,
    pub ifindex: I32,
    pub flag: u8,
    pub pad: [u8; 3],
}

impl MsgCarrier {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn ifindex(&self) -> i32 {
        self.ifindex.get()
    }

    pub fn flag(&self) -> CarrierFlag {
        CarrierFlag::from_u8(self.flag)
    }
}

/// Speed change.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgSpeed {
    pub header: MsgHeader,
    pub ifindex: I32,
    pub mbps: U32,
}

impl MsgSpeed {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn ifindex(&self) -> i32 {
        self.ifindex.get()
    }

    pub fn mbps(&self) -> Mbps {
        Mbps(self.mbps.get())
    }
}

/// Interface info; establishes or refreshes an interface.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgIfinfo {
    pub header: MsgHeader,
    /// Null-padded interface name.
    pub ifname: [u8; IFNAMSIZ],
    /// Network namespace inode number; 1 for the initial namespace.
    pub net: U64,
    pub ifindex: I32,
    pub iflinkindex: I32,
    /// IFF_* flags.
    pub flags: U32,
    /// Port id, VLAN id or bridge id depending on `devtype`.
    pub id: U32,
    pub portid: I32,
    pub portindex: I16,
    pub subportindex: i8,
    pub devtype: u8,
    pub addr: [u8; ETH_ALEN],
    pub reason: u8,
    pub pad: u8,
}

impl MsgIfinfo {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Get the interface name up to the first null byte.
    ///
    /// Invalid UTF-8 is replaced.
    pub fn ifname(&self) -> String {
        let end = self
            .ifname
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(IFNAMSIZ);
        String::from_utf8_lossy(&self.ifname[..end]).into_owned()
    }

    pub fn net(&self) -> u64 {
        self.net.get()
    }

    pub fn ifindex(&self) -> i32 {
        self.ifindex.get()
    }

    pub fn iflinkindex(&self) -> i32 {
        self.iflinkindex.get()
    }

    pub fn flags(&self) -> u32 {
        self.flags.get()
    }

    pub fn id(&self) -> u32 {
        self.id.get()
    }

    pub fn portindex(&self) -> i16 {
        self.portindex.get()
    }

    pub fn devtype(&self) -> DevType {
        DevType::from_u8(self.devtype)
    }

    pub fn reason(&self) -> IfinfoReason {
        IfinfoReason::from_u8(self.reason)
    }

    /// Check the IFF_UP flag.
    pub fn is_up(&self) -> bool {
        self.flags() & libc::IFF_UP as u32 != 0
    }

    /// Get the hardware address.
    pub fn addr(&self) -> [u8; ETH_ALEN] {
        self.addr
    }
}

/// Interface deletion.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgIfdel {
    pub header: MsgHeader,
    pub ifindex: I32,
    pub devtype: u8,
    pub pad: [u8; 3],
}

impl MsgIfdel {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn ifindex(&self) -> i32 {
        self.ifindex.get()
    }

    pub fn devtype(&self) -> DevType {
        DevType::from_u8(self.devtype)
    }
}

/// Upper/lower device association change.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgChangeUpper {
    pub header: MsgHeader,
    pub upper: I32,
    pub lower: I32,
    pub linking: u8,
    pub pad: [u8; 7],
}

impl MsgChangeUpper {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn upper(&self) -> i32 {
        self.upper.get()
    }

    pub fn lower(&self) -> i32 {
        self.lower.get()
    }

    /// True when linking, false when unlinking.
    pub fn linking(&self) -> bool {
        self.linking != 0
    }
}

/// Format a hardware address as colon-separated hex.
pub fn format_mac(addr: &[u8]) -> String {
    addr.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;

    #[test]
    fn link_layouts() {
        assert_eq!(MsgCarrier::SIZE, 24);
        assert_eq!(MsgSpeed::SIZE, 24);
        assert_eq!(MsgIfinfo::SIZE, 72);
        assert_eq!(MsgIfdel::SIZE, 24);
        assert_eq!(MsgChangeUpper::SIZE, 32);
    }

    #[test]
    fn ifinfo_name() {
        let mut msg = MsgIfinfo {
            header: MsgHeader::new(Kind::Ifinfo),
            ..Default::default()
        };
        msg.ifname[..5].copy_from_slice(b"xeth1");
        assert_eq!(msg.ifname(), "xeth1");

        msg.ifname = [b'a'; IFNAMSIZ];
        assert_eq!(msg.ifname().len(), IFNAMSIZ);
    }

    #[test]
    fn ifinfo_flags() {
        let msg = MsgIfinfo {
            flags: U32::new(libc::IFF_UP as u32),
            devtype: 130,
            reason: 4,
            ..Default::default()
        };
        assert!(msg.is_up());
        assert_eq!(msg.devtype(), DevType::LinuxBridge);
        assert_eq!(msg.reason(), IfinfoReason::Dump);
    }

    #[test]
    fn enum_display() {
        assert_eq!(CarrierFlag::from_u8(1).to_string(), "on");
        assert_eq!(CarrierFlag::from_u8(0).to_string(), "off");
        assert_eq!(CarrierFlag::from_u8(5).to_string(), "@5");
        assert_eq!(DevType::from_u8(0).to_string(), "port");
        assert_eq!(IfinfoReason::from_u8(9).to_string(), "@9");
    }

    #[test]
    fn mac_format() {
        assert_eq!(
            format_mac(&[0x02, 0x00, 0xde, 0xad, 0xbe, 0xef]),
            "02:00:de:ad:be:ef"
        );
    }
}
