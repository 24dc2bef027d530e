//! Routing of validated records to the interface caches.
//!
//! Only ifa and ifinfo records mutate derived state. Dispatch must happen in
//! arrival order on a single ingest path, since later records (a speed for
//! an interface, say) depend on state established by earlier ones. Taking
//! the caches by `&mut` makes the single writer explicit.

use crate::kind::Kind;
use crate::message::Record;
use crate::messages::{MsgIfa, MsgIfinfo, view};

/// Mutators for the interface and address caches.
pub trait Caches {
    /// Apply an interface address change.
    fn update_interface_address(&mut self, msg: &MsgIfa);

    /// Apply an interface info update.
    fn update_interface_info(&mut self, msg: &MsgIfinfo);
}

impl<C: Caches + ?Sized> Caches for &mut C {
    fn update_interface_address(&mut self, msg: &MsgIfa) {
        (**self).update_interface_address(msg);
    }

    fn update_interface_info(&mut self, msg: &MsgIfinfo) {
        (**self).update_interface_info(msg);
    }
}

/// Route a validated record to its cache mutator.
///
/// Returns `true` if a cache was updated; every other kind is a no-op.
pub fn dispatch<C: Caches + ?Sized>(record: &Record<'_>, caches: &mut C) -> bool {
    let data = record.as_bytes();
    match record.kind() {
        Kind::Ifa => match view::<MsgIfa>(Kind::Ifa, data) {
            Ok(msg) => {
                caches.update_interface_address(msg);
                true
            }
            Err(_) => false,
        },
        Kind::Ifinfo => match view::<MsgIfinfo>(Kind::Ifinfo, data) {
            Ok(msg) => {
                caches.update_interface_info(msg);
                true
            }
            Err(_) => false,
        },
        _ => false,
    }
}
