//! Ingest loop state: classify, validate and dispatch one buffer at a time.
//!
//! The decoder owns the cache collaborator, so there is exactly one writer
//! per channel and records are dispatched in the order they are ingested.
//!
//! # Example
//!
//! ```ignore
//! use xeth::Decoder;
//!
//! let mut decoder = Decoder::builder()
//!     .mismatch_escalation(5)
//!     .build(my_caches);
//!
//! for buf in transport {
//!     if let Err(e) = decoder.ingest(&buf) {
//!         // Drop the buffer and keep draining.
//!         continue;
//!     }
//! }
//! println!("{:?}", decoder.stats());
//! ```

use std::collections::HashMap;

use tracing::{Level, debug, error, trace, warn};

use crate::dispatch::{Caches, dispatch};
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::message::Record;

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Mismatches per kind logged at `warn` before escalating to `error`.
    pub mismatch_escalation: u64,
    /// Forward ifa/ifinfo records to the caches.
    pub dispatch: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            mismatch_escalation: 3,
            dispatch: true,
        }
    }
}

/// Counters kept across [`Decoder::ingest`] calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodeStats {
    /// Buffers accepted as records.
    pub records: u64,
    /// Records that updated a cache.
    pub dispatched: u64,
    /// Buffers rejected as not-message.
    pub corrupt: u64,
    /// Buffers rejected for a size mismatch.
    pub mismatched: u64,
    /// Records with an ordinal outside the known set.
    pub unknown: u64,
}

/// Builder for [`Decoder`].
#[derive(Debug, Clone, Default)]
pub struct DecoderBuilder {
    config: DecoderConfig,
}

impl DecoderBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of size mismatches for one kind logged at `warn`; later ones
    /// for the same kind are logged at `error`.
    pub fn mismatch_escalation(mut self, n: u64) -> Self {
        self.config.mismatch_escalation = n;
        self
    }

    /// Enable or disable cache dispatch.
    ///
    /// With dispatch off, records are still validated and counted.
    pub fn dispatch(mut self, enabled: bool) -> Self {
        self.config.dispatch = enabled;
        self
    }

    /// Build a decoder that owns `caches`.
    pub fn build<C: Caches>(self, caches: C) -> Decoder<C> {
        Decoder {
            caches,
            config: self.config,
            stats: DecodeStats::default(),
            mismatches: HashMap::new(),
        }
    }
}

/// Single-writer decoder for one side-band channel.
pub struct Decoder<C> {
    caches: C,
    config: DecoderConfig,
    stats: DecodeStats,
    mismatches: HashMap<Kind, u64>,
}

impl Decoder<()> {
    /// Create a builder for configuring the decoder.
    ///
    /// The cache type is fixed by [`DecoderBuilder::build`].
    pub fn builder() -> DecoderBuilder {
        DecoderBuilder::new()
    }
}

impl<C: Caches> Decoder<C> {
    /// Create a decoder with the default configuration.
    pub fn new(caches: C) -> Self {
        DecoderBuilder::new().build(caches)
    }

    /// Classify, validate and dispatch one framed buffer.
    ///
    /// Errors mean the buffer should be dropped; the decoder stays usable.
    pub fn ingest<'a>(&mut self, buf: &'a [u8]) -> Result<Record<'a>> {
        let record = match Record::new(buf) {
            Ok(record) => record,
            Err(e) => {
                self.reject(&e, buf.len());
                return Err(e);
            }
        };

        self.stats.records += 1;
        let kind = record.kind();
        if !kind.is_known() {
            self.stats.unknown += 1;
            debug!(%kind, len = buf.len(), "unknown message kind");
        }

        if self.config.dispatch && dispatch(&record, &mut self.caches) {
            self.stats.dispatched += 1;
            trace!(%kind, "dispatched");
        }

        Ok(record)
    }

    fn reject(&mut self, e: &Error, len: usize) {
        match *e {
            Error::Corrupt => {
                self.stats.corrupt += 1;
                debug!(len, "dropping non-message buffer");
            }
            Error::Mismatch {
                kind,
                expected,
                actual,
            } => {
                self.stats.mismatched += 1;
                *self.mismatches.entry(kind).or_insert(0) += 1;
                if self.mismatch_level(kind) == Level::ERROR {
                    let count = self.mismatches(kind);
                    error!(%kind, expected, actual, count, "size mismatch");
                } else {
                    warn!(%kind, expected, actual, "size mismatch");
                }
            }
            // Record::new never truncates; only typed views do.
            Error::Truncated { .. } => {}
        }
    }

    /// Get the decoder configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Get the counters accumulated so far.
    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Get the number of mismatches seen for a kind.
    pub fn mismatches(&self, kind: Kind) -> u64 {
        self.mismatches.get(&kind).copied().unwrap_or(0)
    }

    /// Get the level the latest mismatch for a kind was logged at.
    ///
    /// Mismatches past `mismatch_escalation` for the same kind escalate
    /// from `WARN` to `ERROR`. `WARN` when none have been seen.
    pub fn mismatch_level(&self, kind: Kind) -> Level {
        if self.mismatches(kind) > self.config.mismatch_escalation {
            Level::ERROR
        } else {
            Level::WARN
        }
    }

    /// Get a reference to the caches.
    pub fn caches(&self) -> &C {
        &self.caches
    }

    /// Get a mutable reference to the caches.
    pub fn caches_mut(&mut self) -> &mut C {
        &mut self.caches
    }

    /// Consume the decoder, returning the caches.
    pub fn into_caches(self) -> C {
        self.caches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MsgHeader;
    use crate::messages::{MsgIfa, MsgIfinfo};
    use zerocopy::IntoBytes;
    use zerocopy::byteorder::native_endian::I32;

    #[derive(Default)]
    struct Counter {
        addresses: usize,
        infos: usize,
    }

    impl Caches for Counter {
        fn update_interface_address(&mut self, _msg: &MsgIfa) {
            self.addresses += 1;
        }

        fn update_interface_info(&mut self, _msg: &MsgIfinfo) {
            self.infos += 1;
        }
    }

    fn ifinfo() -> MsgIfinfo {
        MsgIfinfo {
            header: MsgHeader::new(Kind::Ifinfo),
            ifindex: I32::new(3),
            ..Default::default()
        }
    }

    #[test]
    fn builder_defaults() {
        let decoder = Decoder::new(Counter::default());
        assert_eq!(decoder.config(), &DecoderConfig::default());
        assert_eq!(decoder.config().mismatch_escalation, 3);
        assert!(decoder.config().dispatch);

        let decoder = Decoder::builder()
            .mismatch_escalation(0)
            .dispatch(false)
            .build(Counter::default());
        assert_eq!(decoder.config().mismatch_escalation, 0);
        assert!(!decoder.config().dispatch);
    }

    #[test]
    fn ingest_dispatches_and_counts() {
        let mut decoder = Decoder::new(Counter::default());
        let msg = ifinfo();

        let record = decoder.ingest(msg.as_bytes()).unwrap();
        assert_eq!(record.kind(), Kind::Ifinfo);
        decoder.ingest(MsgHeader::new(Kind::Break).as_bytes()).unwrap();

        assert_eq!(decoder.caches().infos, 1);
        assert_eq!(
            *decoder.stats(),
            DecodeStats {
                records: 2,
                dispatched: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn ingest_without_dispatch() {
        let mut decoder = Decoder::builder().dispatch(false).build(Counter::default());
        decoder.ingest(ifinfo().as_bytes()).unwrap();
        assert_eq!(decoder.stats().records, 1);
        assert_eq!(decoder.stats().dispatched, 0);
        assert_eq!(decoder.into_caches().infos, 0);
    }

    #[test]
    fn ingest_rejects() {
        let mut decoder = Decoder::new(Counter::default());

        assert_eq!(decoder.ingest(&[1, 2, 3]), Err(Error::Corrupt));

        let msg = ifinfo();
        let short = &msg.as_bytes()[..40];
        for _ in 0..5 {
            assert!(decoder.ingest(short).unwrap_err().is_mismatch());
        }

        let header = MsgHeader::new(Kind::Other(42));
        decoder.ingest(header.as_bytes()).unwrap();

        let stats = decoder.stats();
        assert_eq!(stats.corrupt, 1);
        assert_eq!(stats.mismatched, 5);
        assert_eq!(stats.records, 1);
        assert_eq!(stats.unknown, 1);
        assert_eq!(stats.dispatched, 0);
        assert_eq!(decoder.mismatches(Kind::Ifinfo), 5);
        assert_eq!(decoder.mismatches(Kind::Ifa), 0);
        assert_eq!(decoder.caches().infos, 0);
    }

    #[test]
    fn mismatch_escalates_per_kind() {
        let mut decoder = Decoder::builder()
            .mismatch_escalation(2)
            .build(Counter::default());
        let info = ifinfo();
        let short_info = &info.as_bytes()[..71];
        let ifa = MsgIfa {
            header: MsgHeader::new(Kind::Ifa),
            ..Default::default()
        };
        let short_ifa = &ifa.as_bytes()[..20];

        assert_eq!(decoder.mismatch_level(Kind::Ifinfo), Level::WARN);
        for _ in 0..2 {
            decoder.ingest(short_info).unwrap_err();
            assert_eq!(decoder.mismatch_level(Kind::Ifinfo), Level::WARN);
        }
        decoder.ingest(short_info).unwrap_err();
        assert_eq!(decoder.mismatches(Kind::Ifinfo), 3);
        assert_eq!(decoder.mismatch_level(Kind::Ifinfo), Level::ERROR);

        decoder.ingest(short_ifa).unwrap_err();
        assert_eq!(decoder.mismatch_level(Kind::Ifa), Level::WARN);
        assert_eq!(decoder.mismatch_level(Kind::Ifinfo), Level::ERROR);
    }

    #[test]
    fn zero_escalation_logs_every_mismatch_as_error() {
        let mut decoder = Decoder::builder()
            .mismatch_escalation(0)
            .build(Counter::default());
        assert_eq!(decoder.mismatch_level(Kind::Ifinfo), Level::WARN);

        let info = ifinfo();
        decoder.ingest(&info.as_bytes()[..40]).unwrap_err();
        assert_eq!(decoder.mismatch_level(Kind::Ifinfo), Level::ERROR);
    }

    #[test]
    fn caches_mut_is_the_owned_writer() {
        let mut decoder = Decoder::new(Counter::default());
        decoder.caches_mut().addresses = 7;
        assert_eq!(decoder.caches().addresses, 7);
    }
}
