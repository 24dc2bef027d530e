//! Ethtool field types and their display forms.
//!
//! These are the small value formatters used by the diagnostic renderer:
//! speed in Mb/s, duplex, port, autonegotiation and link-mode bitmasks.

use std::fmt;

use zerocopy::byteorder::native_endian::U64;

// =============================================================================
// Speed
// =============================================================================

/// Link speed in megabits per second.
///
/// Zero means the speed is unspecified (e.g. left to autonegotiation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Mbps(pub u32);

impl Mbps {
    /// Check if the speed is unspecified.
    pub fn is_unspecified(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Mbps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unspecified() {
            f.write_str("unspecified")
        } else {
            write!(f, "{}Mb/s", self.0)
        }
    }
}

// =============================================================================
// Duplex, Port, Autoneg
// =============================================================================

/// Duplex mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Duplex {
    /// Half duplex.
    Half,
    /// Full duplex.
    Full,
    /// Unknown duplex.
    #[default]
    Unknown,
}

impl Duplex {
    /// Parse from kernel value.
    pub fn from_u8(v: u8) -> Self {
        match v {
            0x00 => Duplex::Half,
            0x01 => Duplex::Full,
            _ => Duplex::Unknown,
        }
    }
}

impl fmt::Display for Duplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Duplex::Half => "half",
            Duplex::Full => "full",
            Duplex::Unknown => "unknown",
        })
    }
}

/// Port type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Port {
    /// Twisted pair (RJ45).
    Tp,
    /// Attachment Unit Interface.
    Aui,
    /// BNC connector.
    Bnc,
    /// Media Independent Interface.
    Mii,
    /// Fiber optic.
    Fibre,
    /// Direct attach (copper SFP+).
    Da,
    /// No port.
    None,
    /// Other port type.
    #[default]
    Other,
}

impl Port {
    /// Parse from kernel value.
    pub fn from_u8(v: u8) -> Self {
        match v {
            0x00 => Port::Tp,
            0x01 => Port::Aui,
            0x02 => Port::Bnc,
            0x03 => Port::Mii,
            0x04 => Port::Fibre,
            0x05 => Port::Da,
            0xef => Port::None,
            _ => Port::Other,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Port::Tp => "tp",
            Port::Aui => "aui",
            Port::Bnc => "bnc",
            Port::Mii => "mii",
            Port::Fibre => "fibre",
            Port::Da => "da",
            Port::None => "none",
            Port::Other => "other",
        })
    }
}

/// Autonegotiation setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Autoneg {
    #[default]
    Off,
    On,
    /// Any value other than AUTONEG_DISABLE/AUTONEG_ENABLE.
    Unknown(u8),
}

impl Autoneg {
    /// Parse from kernel value.
    pub fn from_u8(v: u8) -> Self {
        match v {
            0x00 => Autoneg::Off,
            0x01 => Autoneg::On,
            n => Autoneg::Unknown(n),
        }
    }
}

impl fmt::Display for Autoneg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Autoneg::Off => f.write_str("off"),
            Autoneg::On => f.write_str("on"),
            Autoneg::Unknown(n) => write!(f, "@{n}"),
        }
    }
}

// =============================================================================
// Link Modes
// =============================================================================

/// Ethtool link-mode names, indexed by ETHTOOL_LINK_MODE_*_BIT.
const LINK_MODE_NAMES: &[&str] = &[
    "10baseT/Half",
    "10baseT/Full",
    "100baseT/Half",
    "100baseT/Full",
    "1000baseT/Half",
    "1000baseT/Full",
    "Autoneg",
    "TP",
    "AUI",
    "MII",
    "FIBRE",
    "BNC",
    "10000baseT/Full",
    "Pause",
    "Asym_Pause",
    "2500baseX/Full",
    "Backplane",
    "1000baseKX/Full",
    "10000baseKX4/Full",
    "10000baseKR/Full",
    "10000baseR_FEC",
    "20000baseMLD2/Full",
    "20000baseKR2/Full",
    "40000baseKR4/Full",
    "40000baseCR4/Full",
    "40000baseSR4/Full",
    "40000baseLR4/Full",
    "56000baseKR4/Full",
    "56000baseCR4/Full",
    "56000baseSR4/Full",
    "56000baseLR4/Full",
    "25000baseCR/Full",
    "25000baseKR/Full",
    "25000baseSR/Full",
    "50000baseCR2/Full",
    "50000baseKR2/Full",
    "100000baseKR4/Full",
    "100000baseSR4/Full",
    "100000baseCR4/Full",
    "100000baseLR4_ER4/Full",
    "50000baseSR2/Full",
    "1000baseX/Full",
    "10000baseCR/Full",
    "10000baseSR/Full",
    "10000baseLR/Full",
    "10000baseLRM/Full",
    "10000baseER/Full",
    "2500baseT/Full",
    "5000baseT/Full",
    "None",
    "RS",
    "BASER",
    "50000baseKR/Full",
    "50000baseSR/Full",
    "50000baseCR/Full",
    "50000baseLR_ER_FR/Full",
    "50000baseDR/Full",
    "100000baseKR2/Full",
    "100000baseSR2/Full",
    "100000baseCR2/Full",
    "100000baseLR2_ER2_FR2/Full",
    "100000baseDR2/Full",
    "200000baseKR4/Full",
    "200000baseSR4/Full",
    "200000baseLR4_ER4_FR4/Full",
    "200000baseDR4/Full",
    "200000baseCR4/Full",
    "100baseT1/Full",
    "1000baseT1/Full",
    "400000baseKR8/Full",
    "400000baseSR8/Full",
    "400000baseLR8_ER8_FR8/Full",
    "400000baseDR8/Full",
    "400000baseCR8/Full",
    "LLRS",
];

/// A physical link mode, identified by its ethtool bit number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkMode(pub u32);

impl LinkMode {
    pub const AUTONEG: LinkMode = LinkMode(6);
    pub const TP: LinkMode = LinkMode(7);
    pub const AUI: LinkMode = LinkMode(8);
    pub const MII: LinkMode = LinkMode(9);
    pub const FIBRE: LinkMode = LinkMode(10);
    pub const BNC: LinkMode = LinkMode(11);
    pub const PAUSE: LinkMode = LinkMode(13);
    pub const ASYM_PAUSE: LinkMode = LinkMode(14);
    pub const BACKPLANE: LinkMode = LinkMode(16);
    pub const FEC_NONE: LinkMode = LinkMode(49);
    pub const FEC_RS: LinkMode = LinkMode(50);
    pub const FEC_BASER: LinkMode = LinkMode(51);
    pub const FEC_LLRS: LinkMode = LinkMode(74);

    /// Get the ethtool name of this mode, if known.
    pub fn name(self) -> Option<&'static str> {
        LINK_MODE_NAMES.get(self.0 as usize).copied()
    }

    /// Look up a mode by its ethtool name.
    pub fn from_name(name: &str) -> Option<Self> {
        LINK_MODE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| LinkMode(i as u32))
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "@{}", self.0),
        }
    }
}

/// A set of link modes, as carried by the link-mode masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkModeBits(u128);

impl LinkModeBits {
    /// Number of bits the set can hold.
    pub const CAPACITY: u32 = u128::BITS;

    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from mask words; word 0 holds bits 0..64.
    pub fn from_words(words: &[U64]) -> Self {
        let bits = words
            .iter()
            .take(2)
            .enumerate()
            .fold(0u128, |acc, (i, w)| acc | (u128::from(w.get()) << (64 * i)));
        Self(bits)
    }

    /// Get the raw bits.
    pub fn bits(self) -> u128 {
        self.0
    }

    /// Add a mode to the set. Modes beyond the capacity are ignored.
    pub fn with(mut self, mode: LinkMode) -> Self {
        if mode.0 < Self::CAPACITY {
            self.0 |= 1u128 << mode.0;
        }
        self
    }

    /// Check if a mode is set.
    pub fn contains(self, mode: LinkMode) -> bool {
        mode.0 < Self::CAPACITY && self.0 & (1u128 << mode.0) != 0
    }

    /// Check if no mode is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the set modes in bit order.
    pub fn iter(self) -> impl Iterator<Item = LinkMode> {
        (0..Self::CAPACITY)
            .filter(move |bit| self.0 & (1u128 << bit) != 0)
            .map(LinkMode)
    }
}

impl FromIterator<LinkMode> for LinkModeBits {
    fn from_iter<I: IntoIterator<Item = LinkMode>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

impl fmt::Display for LinkModeBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, mode) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{mode}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mbps_display() {
        assert_eq!(Mbps(0).to_string(), "unspecified");
        assert_eq!(Mbps(1000).to_string(), "1000Mb/s");
        assert_eq!(Mbps(400_000).to_string(), "400000Mb/s");
    }

    #[test]
    fn duplex_values() {
        assert_eq!(Duplex::from_u8(0), Duplex::Half);
        assert_eq!(Duplex::from_u8(1), Duplex::Full);
        assert_eq!(Duplex::from_u8(0xff), Duplex::Unknown);
        assert_eq!(Duplex::Half.to_string(), "half");
        assert_eq!(Duplex::from_u8(7).to_string(), "unknown");
    }

    #[test]
    fn port_values() {
        assert_eq!(Port::from_u8(0x00), Port::Tp);
        assert_eq!(Port::from_u8(0x03), Port::Mii);
        assert_eq!(Port::from_u8(0xef), Port::None);
        assert_eq!(Port::from_u8(0xff), Port::Other);
        assert_eq!(Port::from_u8(0x04).to_string(), "fibre");
        assert_eq!(Port::from_u8(0x05).to_string(), "da");
        assert_eq!(Port::from_u8(0x42), Port::Other);
    }

    #[test]
    fn autoneg_values() {
        assert_eq!(Autoneg::from_u8(0).to_string(), "off");
        assert_eq!(Autoneg::from_u8(1).to_string(), "on");
        assert_eq!(Autoneg::from_u8(9).to_string(), "@9");
    }

    #[test]
    fn link_mode_names() {
        assert_eq!(LinkMode(0).name(), Some("10baseT/Half"));
        assert_eq!(LinkMode::AUTONEG.to_string(), "Autoneg");
        assert_eq!(LinkMode::FEC_RS.to_string(), "RS");
        assert_eq!(LinkMode::FEC_LLRS.to_string(), "LLRS");
        assert_eq!(LinkMode(120).to_string(), "@120");
        assert_eq!(LinkMode::from_name("100000baseCR4/Full"), Some(LinkMode(38)));
        assert_eq!(LinkMode::from_name("bogus"), None);
    }

    #[test]
    fn link_mode_bits_from_words() {
        let words = [U64::new(1 << 5 | 1 << 6), U64::new(1 << 2)];
        let bits = LinkModeBits::from_words(&words);
        assert!(bits.contains(LinkMode(5)));
        assert!(bits.contains(LinkMode::AUTONEG));
        assert!(bits.contains(LinkMode(66)));
        assert!(!bits.contains(LinkMode(0)));
        assert!(!bits.contains(LinkMode(500)));
        assert_eq!(bits.iter().count(), 3);
        assert_eq!(
            bits.to_string(),
            "1000baseT/Full, Autoneg, 200000baseCR4/Full"
        );
    }

    #[test]
    fn link_mode_bits_display() {
        assert_eq!(LinkModeBits::new().to_string(), "none");

        let bits: LinkModeBits = [LinkMode::TP, LinkMode(100)].into_iter().collect();
        assert_eq!(bits.to_string(), "TP, @100");
    }
}
