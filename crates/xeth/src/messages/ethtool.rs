//! Ethtool flag and link settings messages.

use zerocopy::byteorder::native_endian::{I32, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::ethtool::{Autoneg, Duplex, LinkModeBits, Mbps, Port};
use crate::message::MsgHeader;

/// Number of 64-bit words in each link-mode mask.
pub const LINK_MODE_MASK_WORDS: usize = 2;

/// Private ethtool flags of an interface.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgEthtoolFlags {
    pub header: MsgHeader,
    pub ifindex: I32,
    pub flags: U32,
}

impl MsgEthtoolFlags {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn ifindex(&self) -> i32 {
        self.ifindex.get()
    }

    pub fn flags(&self) -> u32 {
        self.flags.get()
    }
}

/// Ethtool link settings (mirrors struct ethtool_link_settings plus the
/// three link-mode masks).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgEthtoolSettings {
    pub header: MsgHeader,
    pub ifindex: I32,
    /// Speed in Mb/s; zero when autonegotiated.
    pub speed: U32,
    pub duplex: u8,
    pub port: u8,
    pub phy_address: u8,
    pub autoneg: u8,
    pub mdio_support: u8,
    pub eth_tp_mdix: u8,
    pub eth_tp_mdix_ctrl: u8,
    pub link_mode_masks_nwords: i8,
    pub reserved: [U32; 8],
    pub link_modes_supported: [U64; LINK_MODE_MASK_WORDS],
    pub link_modes_advertising: [U64; LINK_MODE_MASK_WORDS],
    pub link_modes_lp_advertising: [U64; LINK_MODE_MASK_WORDS],
}

impl MsgEthtoolSettings {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn ifindex(&self) -> i32 {
        self.ifindex.get()
    }

    pub fn speed(&self) -> Mbps {
        Mbps(self.speed.get())
    }

    pub fn duplex(&self) -> Duplex {
        Duplex::from_u8(self.duplex)
    }

    pub fn port(&self) -> Port {
        Port::from_u8(self.port)
    }

    pub fn autoneg(&self) -> Autoneg {
        Autoneg::from_u8(self.autoneg)
    }

    /// Link modes supported by the device.
    pub fn supported(&self) -> LinkModeBits {
        LinkModeBits::from_words(&self.link_modes_supported)
    }

    /// Link modes advertised by the device.
    pub fn advertising(&self) -> LinkModeBits {
        LinkModeBits::from_words(&self.link_modes_advertising)
    }

    /// Link modes advertised by the link partner.
    pub fn partner(&self) -> LinkModeBits {
        LinkModeBits::from_words(&self.link_modes_lp_advertising)
    }
}
