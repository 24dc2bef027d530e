//! Message core for the xeth side-band channel.
//!
//! The xeth driver multiplexes switch ports over a single link and reports
//! port state (ethtool settings, link stats, addresses, FIB entries,
//! neighbors) to its userspace peer as fixed-layout records on a side-band
//! channel. This crate classifies those records by their header, checks
//! their lengths, routes interface updates to caller-owned caches and
//! renders any record for diagnostics.
//!
//! Framing, transport and the caches themselves belong to the caller.
//!
//! # Features
//!
//! - `serde` - Serialize [`Kind`] and [`decoder::DecodeStats`]
//!
//! # Example
//!
//! ```ignore
//! use xeth::{Decoder, InterfaceRegistry};
//!
//! let mut decoder = Decoder::builder().build(caches);
//!
//! while let Some(buf) = channel.recv()? {
//!     match decoder.ingest(&buf) {
//!         Ok(record) => print!("{}", xeth::format(record.as_bytes(), &names)),
//!         Err(e) => eprintln!("dropped: {e}"),
//!     }
//! }
//! ```
//!
//! # Lower level
//!
//! ```ignore
//! let kind = xeth::classify(&buf);
//! xeth::validate(kind, &buf)?;
//! let record = xeth::Record::new(&buf)?;
//! xeth::dispatch(&record, &mut caches);
//! ```

pub mod decoder;
pub mod dispatch;
pub mod error;
pub mod ethtool;
pub mod format;
pub mod kind;
pub mod message;
pub mod messages;
pub mod registry;

// Re-export common types at crate root for convenience
pub use decoder::{DecodeStats, Decoder, DecoderBuilder};
pub use dispatch::{Caches, dispatch};
pub use error::{Error, Result};
pub use format::format;
pub use kind::Kind;
pub use message::{HEADER_LEN, MsgHeader, Record, classify, validate};
pub use messages::Message;
pub use registry::{InterfaceRegistry, NoNames};
