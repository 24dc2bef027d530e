//! Interface registry used to render interface indices as names.

use std::collections::{BTreeMap, HashMap};

/// Resolves interface indices (and platform-installed stat and flag names)
/// for diagnostic rendering.
///
/// Lookups that miss return `None`; the renderer substitutes a placeholder.
pub trait InterfaceRegistry {
    /// Get the display name of an interface.
    fn interface_name(&self, ifindex: i32) -> Option<String>;

    /// Get the name of an ethtool statistic.
    fn ethtool_stat_name(&self, _index: u32) -> Option<String> {
        None
    }

    /// Get the name of an ethtool private flag bit.
    fn ethtool_flag_name(&self, _bit: u32) -> Option<String> {
        None
    }
}

impl InterfaceRegistry for HashMap<i32, String> {
    fn interface_name(&self, ifindex: i32) -> Option<String> {
        self.get(&ifindex).cloned()
    }
}

impl InterfaceRegistry for BTreeMap<i32, String> {
    fn interface_name(&self, ifindex: i32) -> Option<String> {
        self.get(&ifindex).cloned()
    }
}

impl<R: InterfaceRegistry + ?Sized> InterfaceRegistry for &R {
    fn interface_name(&self, ifindex: i32) -> Option<String> {
        (**self).interface_name(ifindex)
    }

    fn ethtool_stat_name(&self, index: u32) -> Option<String> {
        (**self).ethtool_stat_name(index)
    }

    fn ethtool_flag_name(&self, bit: u32) -> Option<String> {
        (**self).ethtool_flag_name(bit)
    }
}

/// A registry that resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNames;

impl InterfaceRegistry for NoNames {
    fn interface_name(&self, _ifindex: i32) -> Option<String> {
        None
    }
}

/// Render an interface index, falling back to `#<ifindex>`.
pub(crate) fn display_name<R: InterfaceRegistry + ?Sized>(registry: &R, ifindex: i32) -> String {
    registry
        .interface_name(ifindex)
        .unwrap_or_else(|| format!("#{ifindex}"))
}
