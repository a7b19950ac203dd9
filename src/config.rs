//! Configuration for an [IdentifierPool](crate::IdentifierPool).
//!
//! See [PoolConfig](PoolConfig).

use std::num::NonZeroU16;

/// Decides which blocked reservation a released identifier is handed to.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum WaiterOrder {
    /// Serves the most recently blocked reservation first. This is the default.
    NewestFirst,
    /// Serves the earliest blocked reservation first.
    OldestFirst,
}

impl Default for WaiterOrder {
    fn default() -> Self {
        WaiterOrder::NewestFirst
    }
}

/// Settings used when creating an [IdentifierPool](crate::IdentifierPool).
///
/// # Example
///
/// ```
/// # use packet_id_pool::{IdentifierPool, PoolConfig, WaiterOrder};
/// # use std::num::NonZeroU16;
/// let config = PoolConfig::new()
///     .limit(NonZeroU16::new(100).unwrap())
///     .waiter_order(WaiterOrder::OldestFirst);
///
/// let pool = IdentifierPool::with_config(config);
/// assert_eq!(pool.limit().get(), 100);
/// ```
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct PoolConfig {
    pub(crate) limit: NonZeroU16,
    pub(crate) waiter_order: WaiterOrder,
}

impl PoolConfig {
    /// Creates the default configuration: the whole identifier space and newest-first waiters.
    pub fn new() -> Self {
        Self {
            limit: NonZeroU16::MAX,
            waiter_order: WaiterOrder::default(),
        }
    }

    /// Sets the highest identifier the pool may mint, which is also the maximum number of
    /// reservations that may be outstanding at once.
    pub fn limit(mut self, limit: NonZeroU16) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the order in which blocked reservations are served.
    pub fn waiter_order(mut self, order: WaiterOrder) -> Self {
        self.waiter_order = order;
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use std::num::NonZeroU16;

    use crate::config::{PoolConfig, WaiterOrder};

    #[test]
    fn default_covers_the_whole_space() {
        let config = PoolConfig::default();

        assert_eq!(config.limit.get(), u16::MAX);
        assert_eq!(config.waiter_order, WaiterOrder::NewestFirst);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = PoolConfig::new()
            .limit(NonZeroU16::new(3).unwrap())
            .waiter_order(WaiterOrder::OldestFirst);

        assert_eq!(config.limit.get(), 3);
        assert_eq!(config.waiter_order, WaiterOrder::OldestFirst);
    }
}
