//! Side-band message header, classification and validation.
//!
//! Every message starts with a 16-byte header whose leading padding fields
//! must be zero. The zero padding lets the receiver reject buffers that did
//! not come from the driver (stray reads, partial frames) without a length
//! or checksum field in every record.

use zerocopy::byteorder::native_endian::{U16, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::{Error, Result};
use crate::kind::Kind;

/// Size of the message header.
pub const HEADER_LEN: usize = std::mem::size_of::<MsgHeader>();

/// Message header (mirrors struct xeth_msg).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgHeader {
    /// Must be zero.
    pub z64: U64,
    /// Must be zero.
    pub z32: U32,
    /// Must be zero.
    pub z16: U16,
    /// Must be zero.
    pub z8: u8,
    /// Kind ordinal.
    pub kind: u8,
}

impl MsgHeader {
    /// Create a header for the given kind with zeroed padding.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind: kind.ordinal(),
            ..Self::default()
        }
    }

    /// Check the zero padding sentinel.
    pub fn is_msg(&self) -> bool {
        self.z64.get() == 0 && self.z32.get() == 0 && self.z16.get() == 0 && self.z8 == 0
    }

    /// Convert header to bytes.
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }

    /// Parse header from the front of a buffer.
    pub fn from_bytes(data: &[u8]) -> Option<&Self> {
        Self::ref_from_prefix(data).ok().map(|(r, _)| r)
    }
}

/// Classify a raw buffer.
///
/// Returns [`Kind::NotMessage`] if the buffer is shorter than the header or
/// any padding field is nonzero. Never fails otherwise; ordinals outside the
/// known set come back as [`Kind::Other`].
pub fn classify(buf: &[u8]) -> Kind {
    match MsgHeader::from_bytes(buf) {
        Some(header) if header.is_msg() => Kind::from(header.kind),
        _ => Kind::NotMessage,
    }
}

/// Validate a buffer's length against the size table.
pub fn validate(kind: Kind, buf: &[u8]) -> Result<()> {
    let kind = kind.canonical();
    if kind == Kind::NotMessage {
        return Err(Error::Corrupt);
    }
    match kind.fixed_size() {
        Some(expected) if expected != buf.len() => Err(Error::Mismatch {
            kind,
            expected,
            actual: buf.len(),
        }),
        _ => Ok(()),
    }
}

/// A classified and validated side-band record.
///
/// Holding a `Record` proves that [`validate`] accepted the (kind, buffer)
/// pair, which is what [`crate::dispatch::dispatch`] requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    kind: Kind,
    data: &'a [u8],
}

impl<'a> Record<'a> {
    /// Classify and validate a buffer.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let kind = classify(data);
        validate(kind, data)?;
        Ok(Self { kind, data })
    }

    /// The record's kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The whole record, header included.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// The bytes following the header.
    pub fn payload(&self) -> &'a [u8] {
        &self.data[HEADER_LEN..]
    }

    /// Record length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the record is empty. A record holds at least a header, so
    /// this is always false.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(kind: u8) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_LEN];
        buf[HEADER_LEN - 1] = kind;
        buf
    }

    #[test]
    fn header_layout() {
        assert_eq!(HEADER_LEN, 16);
        let hdr = MsgHeader::new(Kind::Speed);
        let bytes = hdr.as_bytes();
        assert_eq!(bytes[15], 7);
        assert!(bytes[..15].iter().all(|b| *b == 0));
    }

    #[test]
    fn classify_short_buffers() {
        assert_eq!(classify(&[]), Kind::NotMessage);
        for len in 0..HEADER_LEN {
            assert_eq!(classify(&vec![0u8; len]), Kind::NotMessage);
        }
    }

    #[test]
    fn classify_nonzero_padding() {
        for pos in 0..HEADER_LEN - 1 {
            let mut buf = header(Kind::Speed.ordinal());
            buf[pos] = 1;
            assert_eq!(classify(&buf), Kind::NotMessage, "padding byte {pos}");
        }
    }

    #[test]
    fn classify_kinds() {
        assert_eq!(classify(&header(7)), Kind::Speed);
        assert_eq!(classify(&header(9)), Kind::Ifa);
        assert_eq!(classify(&header(99)), Kind::Other(99));
        assert_eq!(classify(&header(0xff)), Kind::NotMessage);
    }

    #[test]
    fn validate_not_message() {
        assert_eq!(validate(Kind::NotMessage, &[]), Err(Error::Corrupt));
        assert_eq!(validate(Kind::Other(0xff), &[0; 32]), Err(Error::Corrupt));
    }

    #[test]
    fn validate_hand_built_other() {
        let buf = header(Kind::Ifa.ordinal());
        assert_eq!(
            validate(Kind::Other(9), &buf),
            Err(Error::Mismatch {
                kind: Kind::Ifa,
                expected: 32,
                actual: 16,
            })
        );
    }

    #[test]
    fn validate_fixed_sizes() {
        for kind in Kind::KNOWN {
            let Some(size) = kind.fixed_size() else {
                continue;
            };
            let mut buf = header(kind.ordinal());
            buf.resize(size, 0);
            assert_eq!(validate(kind, &buf), Ok(()));

            buf.push(0);
            assert_eq!(
                validate(kind, &buf),
                Err(Error::Mismatch {
                    kind,
                    expected: size,
                    actual: size + 1,
                })
            );

            buf.truncate(size - 1);
            assert!(matches!(
                validate(kind, &buf),
                Err(Error::Mismatch { kind: k, .. }) if k == kind
            ));
        }
    }

    #[test]
    fn validate_unsized_kinds_accept_any_length() {
        let mut buf = header(Kind::Ifvid.ordinal());
        assert_eq!(validate(Kind::Ifvid, &buf), Ok(()));
        buf.resize(200, 0);
        assert_eq!(validate(Kind::Ifvid, &buf), Ok(()));
        assert_eq!(validate(Kind::Other(40), &buf), Ok(()));
    }

    #[test]
    fn record_new() {
        let mut buf = header(Kind::Speed.ordinal());
        buf.extend_from_slice(&[0u8; 8]);
        let rec = Record::new(&buf).unwrap();
        assert_eq!(rec.kind(), Kind::Speed);
        assert_eq!(rec.payload().len(), 8);
        assert_eq!(rec.len(), 24);

        assert_eq!(Record::new(&buf[..4]), Err(Error::Corrupt));
    }

    #[test]
    fn classify_is_idempotent() {
        let buf = header(Kind::Ifinfo.ordinal());
        assert_eq!(classify(&buf), classify(&buf));
        assert_eq!(
            validate(classify(&buf), &buf),
            validate(classify(&buf), &buf)
        );
    }
}
