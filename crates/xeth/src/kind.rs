//! Message kind registry.
//!
//! The kind byte of the message header selects the payload layout. The set
//! of kinds is closed and ordered, but a newer driver may send ordinals this
//! crate does not know; those decode as [`Kind::Other`] and render as `@N`.

use std::fmt;

use crate::messages::{MsgEthtoolFlags, MsgEthtoolSettings, MsgIfa, MsgIfinfo, MsgNeighUpdate};

/// Ordinal reserved for "not a message".
pub const NOT_MSG: u8 = 0xff;

/// Side-band message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Break,
    LinkStat,
    EthtoolStat,
    EthtoolFlags,
    EthtoolSettings,
    DumpIfinfo,
    Carrier,
    Speed,
    Ifinfo,
    Ifa,
    DumpFibinfo,
    FibEntry,
    Ifdel,
    NeighUpdate,
    Ifvid,
    ChangeUpper,
    /// The buffer is not a side-band message.
    NotMessage,
    /// An ordinal outside the known set.
    ///
    /// Only [`Kind::from`] is guaranteed to produce canonical values; a
    /// hand-built `Other` holding a known ordinal behaves like that kind
    /// everywhere except `==`. Use [`Kind::canonical`] before comparing.
    Other(u8),
}

impl Kind {
    /// All known kinds in ordinal order.
    pub const KNOWN: [Kind; 16] = [
        Kind::Break,
        Kind::LinkStat,
        Kind::EthtoolStat,
        Kind::EthtoolFlags,
        Kind::EthtoolSettings,
        Kind::DumpIfinfo,
        Kind::Carrier,
        Kind::Speed,
        Kind::Ifinfo,
        Kind::Ifa,
        Kind::DumpFibinfo,
        Kind::FibEntry,
        Kind::Ifdel,
        Kind::NeighUpdate,
        Kind::Ifvid,
        Kind::ChangeUpper,
    ];

    /// Get the wire ordinal.
    pub fn ordinal(self) -> u8 {
        match self {
            Kind::Break => 0,
            Kind::LinkStat => 1,
            Kind::EthtoolStat => 2,
            Kind::EthtoolFlags => 3,
            Kind::EthtoolSettings => 4,
            Kind::DumpIfinfo => 5,
            Kind::Carrier => 6,
            Kind::Speed => 7,
            Kind::Ifinfo => 8,
            Kind::Ifa => 9,
            Kind::DumpFibinfo => 10,
            Kind::FibEntry => 11,
            Kind::Ifdel => 12,
            Kind::NeighUpdate => 13,
            Kind::Ifvid => 14,
            Kind::ChangeUpper => 15,
            Kind::NotMessage => NOT_MSG,
            Kind::Other(n) => n,
        }
    }

    /// Map the kind through its ordinal, folding `Other(n)` for a known or
    /// reserved `n` into the named variant.
    pub fn canonical(self) -> Kind {
        Kind::from(self.ordinal())
    }

    /// Get the canonical name, or `None` for an unknown ordinal.
    pub fn as_str(self) -> Option<&'static str> {
        let name = match self.canonical() {
            Kind::Break => "break",
            Kind::LinkStat => "link-stat",
            Kind::EthtoolStat => "ethtool-stat",
            Kind::EthtoolFlags => "ethtool-flags",
            Kind::EthtoolSettings => "ethtool-settings",
            Kind::DumpIfinfo => "dump-ifinfo",
            Kind::Carrier => "carrier",
            Kind::Speed => "speed",
            Kind::Ifinfo => "ifinfo",
            Kind::Ifa => "ifa",
            Kind::DumpFibinfo => "dump-fibinfo",
            Kind::FibEntry => "fib-entry",
            Kind::Ifdel => "ifdel",
            Kind::NeighUpdate => "neigh-update",
            Kind::Ifvid => "ifvid",
            Kind::ChangeUpper => "change-upper",
            Kind::NotMessage => "not-message",
            Kind::Other(_) => return None,
        };
        Some(name)
    }

    /// Get the exact byte length of a fixed-size kind.
    ///
    /// Kinds without an entry are variable-length or not length-checked.
    pub fn fixed_size(self) -> Option<usize> {
        match self.canonical() {
            Kind::EthtoolFlags => Some(MsgEthtoolFlags::SIZE),
            Kind::EthtoolSettings => Some(MsgEthtoolSettings::SIZE),
            Kind::Ifa => Some(MsgIfa::SIZE),
            Kind::Ifinfo => Some(MsgIfinfo::SIZE),
            Kind::NeighUpdate => Some(MsgNeighUpdate::SIZE),
            _ => None,
        }
    }

    /// Check if this is a known kind.
    pub fn is_known(self) -> bool {
        !matches!(self.canonical(), Kind::NotMessage | Kind::Other(_))
    }
}

impl From<u8> for Kind {
    fn from(v: u8) -> Self {
        match v {
            NOT_MSG => Kind::NotMessage,
            n if (n as usize) < Kind::KNOWN.len() => Kind::KNOWN[n as usize],
            n => Kind::Other(n),
        }
    }
}

impl From<Kind> for u8 {
    fn from(kind: Kind) -> Self {
        kind.ordinal()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(name) => f.write_str(name),
            None => write!(f, "@{}", self.ordinal()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Kind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
