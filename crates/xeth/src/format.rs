//! Human-readable rendering of side-band messages for diagnostics.
//!
//! Rendering never fails: unresolved interfaces render as `#<ifindex>` and
//! buffers too short for their kind render a truncation line, so a decode
//! loop can log every buffer it sees.
//!
//! # Example
//!
//! ```ignore
//! use std::collections::HashMap;
//!
//! let names = HashMap::from([(3, "xeth1".to_string())]);
//! print!("{}", xeth::format(&buf, &names));
//! // speed xeth1 1000Mb/s
//! ```

use std::fmt;

use crate::error::Error;
use crate::kind::Kind;
use crate::messages::{
    FibEntry, Message, MsgEthtoolFlags, MsgEthtoolSettings, format_mac, link_stat_name,
};
use crate::registry::{InterfaceRegistry, display_name};

/// Render a raw buffer as one or more newline-terminated lines.
pub fn format<R: InterfaceRegistry + ?Sized>(buf: &[u8], registry: &R) -> String {
    match Message::parse(buf) {
        Ok(msg) => Rendered { msg, registry }.to_string(),
        Err(Error::Truncated {
            kind,
            expected,
            actual,
        }) => format!("{kind} truncated ({actual} of {expected} bytes)\n"),
        Err(_) => format!("{} ({} bytes)\n", Kind::NotMessage, buf.len()),
    }
}

/// Display adapter pairing a message with the registry used to name its
/// interfaces.
pub struct Rendered<'a, R: ?Sized> {
    pub msg: Message<'a>,
    pub registry: &'a R,
}

impl<R: InterfaceRegistry + ?Sized> Rendered<'_, R> {
    fn name(&self, ifindex: i32) -> String {
        display_name(self.registry, ifindex)
    }

    fn settings(&self, f: &mut fmt::Formatter<'_>, msg: &MsgEthtoolSettings) -> fmt::Result {
        writeln!(f, "{} {}", Kind::EthtoolSettings, self.name(msg.ifindex()))?;
        writeln!(f, "\tspeed: {}", msg.speed())?;
        writeln!(f, "\tduplex: {}", msg.duplex())?;
        writeln!(f, "\tport: {}", msg.port())?;
        writeln!(f, "\tautoneg: {}", msg.autoneg())?;
        writeln!(f, "\tsupported: {}", msg.supported())?;
        writeln!(f, "\tadvertising: {}", msg.advertising())?;
        writeln!(f, "\tpartner: {}", msg.partner())
    }

    fn flags(&self, f: &mut fmt::Formatter<'_>, msg: &MsgEthtoolFlags) -> fmt::Result {
        let flags = msg.flags();
        write!(
            f,
            "{} {} {:#x}",
            Kind::EthtoolFlags,
            self.name(msg.ifindex()),
            flags
        )?;
        for bit in (0..u32::BITS).filter(|bit| flags & (1 << bit) != 0) {
            match self.registry.ethtool_flag_name(bit) {
                Some(name) => write!(f, " {name}")?,
                None => write!(f, " @{bit}")?,
            }
        }
        writeln!(f)
    }

    fn fib_entry(&self, f: &mut fmt::Formatter<'_>, fib: &FibEntry<'_>) -> fmt::Result {
        let entry = fib.entry;
        writeln!(
            f,
            "{} {}/{} table {} net {}",
            Kind::FibEntry,
            entry.address(),
            entry.prefix_len(),
            entry.table(),
            entry.net()
        )?;
        for nh in fib.next_hops {
            writeln!(
                f,
                "\tvia {} dev {} weight {}",
                nh.gw(),
                self.name(nh.ifindex()),
                nh.weight()
            )?;
        }
        Ok(())
    }
}

impl<R: InterfaceRegistry + ?Sized> fmt::Display for Rendered<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.msg.kind();
        match self.msg {
            Message::Speed(m) => writeln!(f, "{kind} {} {}", self.name(m.ifindex()), m.mbps()),
            Message::EthtoolSettings(m) => self.settings(f, m),
            Message::EthtoolFlags(m) => self.flags(f, m),
            Message::LinkStat(m) => {
                let name = link_stat_name(m.index())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("@{}", m.index()));
                writeln!(f, "{kind} {} {name}: {}", self.name(m.ifindex()), m.count())
            }
            Message::EthtoolStat(m) => {
                let name = self
                    .registry
                    .ethtool_stat_name(m.index())
                    .unwrap_or_else(|| format!("stat-{}", m.index()));
                writeln!(f, "{kind} {} {name}: {}", self.name(m.ifindex()), m.count())
            }
            Message::Carrier(m) => writeln!(f, "{kind} {} {}", self.name(m.ifindex()), m.flag()),
            Message::Ifinfo(m) => writeln!(
                f,
                "{kind} {} index {} net {} {} {} {}",
                m.ifname(),
                m.ifindex(),
                m.net(),
                format_mac(&m.addr()),
                m.devtype(),
                m.reason()
            ),
            Message::Ifa(m) => writeln!(
                f,
                "{kind} {} {} {}/{}",
                self.name(m.ifindex()),
                m.event(),
                m.address(),
                m.prefix_len()
            ),
            Message::Ifdel(m) => writeln!(f, "{kind} {} {}", self.name(m.ifindex()), m.devtype()),
            Message::NeighUpdate(m) => {
                write!(f, "{kind} {}", self.name(m.ifindex()))?;
                match m.dst() {
                    Some(dst) => write!(f, " {dst}")?,
                    None => write!(f, " family {}", m.family)?,
                }
                if m.is_valid() {
                    write!(f, " lladdr {}", format_mac(&m.lladdr()))?;
                }
                writeln!(f)
            }
            Message::FibEntry(ref fib) => self.fib_entry(f, fib),
            Message::ChangeUpper(m) => writeln!(
                f,
                "{kind} {} {} {}",
                self.name(m.upper()),
                if m.linking() { "link" } else { "unlink" },
                self.name(m.lower())
            ),
            Message::Break
            | Message::DumpIfinfo
            | Message::DumpFibinfo
            | Message::Ifvid(_)
            | Message::Other(_) => writeln!(f, "{kind}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ethtool::LinkMode;
    use crate::message::MsgHeader;
    use crate::messages::{MsgCarrier, MsgIfinfo, MsgSpeed, MsgStat};
    use crate::registry::NoNames;
    use std::collections::HashMap;
    use zerocopy::IntoBytes;
    use zerocopy::byteorder::native_endian::{I32, U32, U64};

    fn names() -> HashMap<i32, String> {
        HashMap::from([(3, "xeth1".to_string()), (4, "xeth2".to_string())])
    }

    fn speed(mbps: u32) -> MsgSpeed {
        MsgSpeed {
            header: MsgHeader::new(Kind::Speed),
            ifindex: I32::new(3),
            mbps: U32::new(mbps),
        }
    }

    #[test]
    fn format_speed() {
        assert_eq!(format(speed(0).as_bytes(), &names()), "speed xeth1 unspecified\n");
        assert_eq!(format(speed(1000).as_bytes(), &names()), "speed xeth1 1000Mb/s\n");
    }

    #[test]
    fn format_unresolved_interface() {
        assert_eq!(format(speed(10).as_bytes(), &NoNames), "speed #3 10Mb/s\n");
    }

    #[test]
    fn format_ethtool_settings() {
        let mut msg = MsgEthtoolSettings {
            header: MsgHeader::new(Kind::EthtoolSettings),
            ifindex: I32::new(4),
            speed: U32::new(0),
            duplex: 1,
            port: 0x04,
            autoneg: 1,
            ..Default::default()
        };
        let modes = 1u64 << LinkMode::AUTONEG.0 | 1u64 << LinkMode::FIBRE.0;
        msg.link_modes_supported[0] = U64::new(modes);
        msg.link_modes_advertising[0] = U64::new(1 << LinkMode::AUTONEG.0);

        let text = format(msg.as_bytes(), &names());
        assert_eq!(
            text,
            "ethtool-settings xeth2\n\
             \tspeed: unspecified\n\
             \tduplex: full\n\
             \tport: fibre\n\
             \tautoneg: on\n\
             \tsupported: Autoneg, FIBRE\n\
             \tadvertising: Autoneg\n\
             \tpartner: none\n"
        );
    }

    #[test]
    fn format_stats() {
        let msg = MsgStat {
            header: MsgHeader::new(Kind::LinkStat),
            ifindex: I32::new(3),
            index: U32::new(2),
            count: U64::new(4096),
        };
        assert_eq!(format(msg.as_bytes(), &names()), "link-stat xeth1 rx-bytes: 4096\n");

        let msg = MsgStat {
            header: MsgHeader::new(Kind::EthtoolStat),
            index: U32::new(7),
            ..msg
        };
        assert_eq!(format(msg.as_bytes(), &names()), "ethtool-stat xeth1 stat-7: 4096\n");
    }

    #[test]
    fn format_carrier_and_ifinfo() {
        let msg = MsgCarrier {
            header: MsgHeader::new(Kind::Carrier),
            ifindex: I32::new(4),
            flag: 1,
            pad: [0; 3],
        };
        assert_eq!(format(msg.as_bytes(), &names()), "carrier xeth2 on\n");

        let mut msg = MsgIfinfo {
            header: MsgHeader::new(Kind::Ifinfo),
            net: U64::new(1),
            ifindex: I32::new(3),
            addr: [2, 0, 0, 0, 0, 1],
            reason: 4,
            ..Default::default()
        };
        msg.ifname[..5].copy_from_slice(b"xeth1");
        assert_eq!(
            format(msg.as_bytes(), &NoNames),
            "ifinfo xeth1 index 3 net 1 02:00:00:00:00:01 port dump\n"
        );
    }

    #[test]
    fn format_degrades() {
        let header = MsgHeader::new(Kind::Speed);
        assert_eq!(
            format(header.as_bytes(), &names()),
            "speed truncated (16 of 24 bytes)\n"
        );
        assert_eq!(format(&[0xde, 0xad], &names()), "not-message (2 bytes)\n");

        let header = MsgHeader::new(Kind::Other(99));
        assert_eq!(format(header.as_bytes(), &names()), "@99\n");

        let header = MsgHeader::new(Kind::Break);
        assert_eq!(format(header.as_bytes(), &names()), "break\n");
    }
}
