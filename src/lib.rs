//! A blocking pool of 16-bit packet identifiers.
//!
//! Request/response protocols such as MQTT tag each outstanding request with a two byte packet
//! identifier so that replies can be matched to the call that made them. An [IdentifierPool] hands
//! out identifiers that are unique among those currently in flight, reuses them once they are
//! released, and blocks callers when every identifier is outstanding until one is returned.
//!
//! # Example
//!
//! ```
//! # use packet_id_pool::IdentifierPool;
//! let pool = IdentifierPool::new();
//!
//! let first = pool.reserve();
//! let second = pool.reserve();
//! assert_eq!((first.get(), second.get()), (1, 2));
//!
//! // The most recently released identifier is reused first
//! pool.release(first);
//! assert_eq!(pool.reserve(), first);
//!
//! // Identifiers travel as two big-endian bytes
//! pool.release_bytes(second.to_bytes());
//! assert_eq!(pool.free_count(), 1);
//! ```
//!
//! # Saturation
//!
//! Once all identifiers up to the pool's [limit](PoolConfig::limit) are outstanding,
//! [reserve](IdentifierPool::reserve) parks the calling thread until another thread releases an
//! identifier, which is then handed directly to one of the parked callers. Which one is decided by
//! the configured [WaiterOrder]: by default the most recently parked caller is served first.
//! [try_reserve](IdentifierPool::try_reserve) never parks.
//!
//! There is no timeout. A caller that stops waiting by some external means must still release any
//! identifier it is later handed.
//!
//! # Misuse
//!
//! Every identifier must be released exactly once per reservation. When debug assertions are
//! enabled, releasing an identifier that is not outstanding panics; when they are disabled it is
//! not detected and *will* lead to the same identifier being issued twice.

#![warn(missing_docs)]

use std::num::NonZeroU16;
use std::panic::{RefUnwindSafe, UnwindSafe};

use crossbeam_utils::CachePadded;
#[cfg(feature = "tracing")]
use tracing::instrument;

pub use crate::codec::DecodeError;
pub use crate::config::{PoolConfig, WaiterOrder};
pub use crate::identifier::{Identifier, ZeroIdentifier};
pub use crate::reservation::Reservation;
use crate::free_stack::FreeStack;
use crate::ledger::OutstandingLedger;
use crate::util::sync::atomic::{AtomicUsize, Ordering};
use crate::util::sync::monitor::Monitor;
use crate::waiter::WaiterQueue;

pub mod codec;
pub mod config;
mod free_stack;
pub mod identifier;
mod ledger;
#[cfg(all(test, loom))]
mod loom;
pub mod reservation;
mod util;
mod waiter;

/// A pool of packet identifiers shared between the threads issuing requests over one session.
///
/// See the [crate-level documentation](crate) for an overview.
pub struct IdentifierPool {
    state: CachePadded<Monitor<State>>,
    // Mirrors of the locked state so diagnostics never contend on the lock
    free_count: AtomicUsize,
    waiting_count: AtomicUsize,
    high_water_mark: AtomicUsize,
    limit: NonZeroU16,
}

struct State {
    // The largest identifier minted so far, or zero if none has been
    high_water_mark: u16,
    free: FreeStack,
    waiters: WaiterQueue,
    // Catches identifiers released twice. When debug assertions are disabled this is elided
    ledger: OutstandingLedger,
}

impl IdentifierPool {
    /// Creates a pool covering the whole identifier space, serving the most recently blocked
    /// reservation first.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Creates a pool with the given configuration.
    pub fn with_config(config: PoolConfig) -> Self {
        let state = State {
            high_water_mark: 0,
            free: FreeStack::new(),
            waiters: WaiterQueue::new(config.waiter_order),
            ledger: OutstandingLedger::new(),
        };

        Self {
            state: CachePadded::new(Monitor::new(state)),
            free_count: AtomicUsize::new(0),
            waiting_count: AtomicUsize::new(0),
            high_water_mark: AtomicUsize::new(0),
            limit: config.limit,
        }
    }

    /// Reserves an identifier that is not currently outstanding.
    ///
    /// The most recently released identifier is reused first. If none is available, a fresh
    /// identifier is minted. If every identifier up to the [limit](Self::limit) is outstanding,
    /// this blocks until one is released and handed to this caller.
    ///
    /// # Example
    ///
    /// ```
    /// # use packet_id_pool::IdentifierPool;
    /// let pool = IdentifierPool::new();
    /// let a = pool.reserve();
    /// let b = pool.reserve();
    /// assert_ne!(a, b);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), ret))]
    pub fn reserve(&self) -> Identifier {
        let mut state = self.state.lock();

        if let Some(id) = self.take_available(&mut state) {
            return id;
        }

        debug_assert!(state.free.is_empty());

        let key = state.waiters.park();
        self.waiting_count.fetch_add(1, Ordering::Relaxed);
        debug_assert_eq!(state.waiters.len(), self.waiting_count());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            waiting = state.waiters.len(),
            "identifier space exhausted, parking reservation"
        );

        loop {
            if let Some(id) = state.waiters.claim(key) {
                return id;
            }

            state = self.state.wait(state);
        }
    }

    /// Reserves an identifier if one is available without blocking, returning `None` if every
    /// identifier up to the [limit](Self::limit) is outstanding.
    ///
    /// # Example
    ///
    /// ```
    /// # use packet_id_pool::{IdentifierPool, PoolConfig};
    /// # use std::num::NonZeroU16;
    /// let pool = IdentifierPool::with_config(PoolConfig::new().limit(NonZeroU16::MIN));
    /// let id = pool.try_reserve().unwrap();
    /// assert_eq!(pool.try_reserve(), None);
    ///
    /// pool.release(id);
    /// assert_eq!(pool.try_reserve(), Some(id));
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), ret))]
    pub fn try_reserve(&self) -> Option<Identifier> {
        let mut state = self.state.lock();
        self.take_available(&mut state)
    }

    /// Reserves an identifier like [reserve](Self::reserve), releasing it automatically when the
    /// returned [Reservation] is dropped.
    pub fn reserve_scoped(&self) -> Reservation {
        Reservation::new(self, self.reserve())
    }

    /// Releases an outstanding identifier, handing it to a blocked reservation if there is one.
    /// This never blocks beyond acquiring the pool's lock.
    ///
    /// # Panics
    ///
    /// When debug assertions are enabled, this panics if the identifier is not outstanding. When
    /// they are disabled, doing so *will* eventually cause the identifier to be issued twice.
    ///
    /// Release builds perform no such check: the release is accepted as is, and guaranteeing
    /// exactly one release per reservation is left entirely to the caller.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn release(&self, id: Identifier) {
        let mut state = self.state.lock();
        state.ledger.record_release(id);

        match state.waiters.fulfill_head(id) {
            Ok(()) => {
                state.ledger.record_reserve(id);
                self.waiting_count.fetch_sub(1, Ordering::Relaxed);
                debug_assert_eq!(state.waiters.len(), self.waiting_count());

                #[cfg(feature = "tracing")]
                tracing::trace!(%id, "handing identifier to parked reservation");

                self.state.notify_all();
            }
            Err(id) => {
                debug_assert!(state.waiters.is_empty());

                state.free.push(id);
                self.free_count.fetch_add(1, Ordering::Relaxed);
                debug_assert_eq!(state.free.len(), self.free_count());
            }
        }
    }

    /// Releases an outstanding identifier given its raw value. See [release](Self::release).
    ///
    /// Zero is never issued, so releasing it panics when debug assertions are enabled and is
    /// ignored otherwise.
    pub fn release_value(&self, value: u16) {
        debug_assert!(value != 0, "zero is not a packet identifier and cannot be released");

        if let Some(id) = Identifier::new(value) {
            self.release(id);
        }
    }

    /// Releases an outstanding identifier given its two byte, big-endian wire form. See
    /// [release_value](Self::release_value).
    ///
    /// # Example
    ///
    /// ```
    /// # use packet_id_pool::IdentifierPool;
    /// let pool = IdentifierPool::new();
    /// let id = pool.reserve();
    ///
    /// pool.release_bytes([0x00, 0x01]);
    /// assert_eq!(pool.reserve(), id);
    /// ```
    pub fn release_bytes(&self, bytes: [u8; codec::WIRE_LENGTH]) {
        self.release_value(codec::decode(bytes))
    }

    /// The number of released identifiers waiting to be reused. This is a snapshot which may be
    /// stale by the time it is returned, and is intended for monitoring and tests.
    pub fn free_count(&self) -> usize {
        self.free_count.load(Ordering::Relaxed)
    }

    /// The number of reservations blocked waiting for an identifier. This is a snapshot which may
    /// be stale by the time it is returned, and is intended for monitoring and tests.
    pub fn waiting_count(&self) -> usize {
        self.waiting_count.load(Ordering::Relaxed)
    }

    /// The largest identifier minted so far, or zero if none has been. This is a snapshot which
    /// may be stale by the time it is returned, and is intended for monitoring and tests.
    pub fn high_water_mark(&self) -> u16 {
        self.high_water_mark.load(Ordering::Relaxed) as u16
    }

    /// The highest identifier this pool will mint.
    pub fn limit(&self) -> NonZeroU16 {
        self.limit
    }

    fn take_available(&self, state: &mut State) -> Option<Identifier> {
        let id = if let Some(id) = state.free.pop() {
            self.free_count.fetch_sub(1, Ordering::Relaxed);
            id
        } else if state.high_water_mark < self.limit.get() {
            state.high_water_mark += 1;
            self.high_water_mark.fetch_add(1, Ordering::Relaxed);
            Identifier::new(state.high_water_mark)?
        } else {
            return None;
        };

        state.ledger.record_reserve(id);
        Some(id)
    }
}

impl Default for IdentifierPool {
    fn default() -> Self {
        Self::new()
    }
}

impl UnwindSafe for IdentifierPool {}

impl RefUnwindSafe for IdentifierPool {}
