//! RAII reservations for [IdentifierPool](crate::IdentifierPool).

use std::fmt::{Debug, Display, Formatter};
use std::{fmt, mem};

use crate::identifier::Identifier;
use crate::IdentifierPool;

/// An identifier reserved from an [IdentifierPool](crate::IdentifierPool).
///
/// The identifier will automatically be released when this is dropped.
///
/// # Example
///
/// ```
/// # use packet_id_pool::IdentifierPool;
/// # use std::mem;
/// let pool = IdentifierPool::new();
///
/// let reservation = pool.reserve_scoped();
/// assert_eq!(reservation.id().get(), 1);
/// assert_eq!(pool.free_count(), 0);
///
/// mem::drop(reservation);
/// assert_eq!(pool.free_count(), 1);
/// ```
#[must_use = "dropping a reservation immediately releases its identifier"]
pub struct Reservation<'a> {
    pool: &'a IdentifierPool,
    id: Identifier,
}

impl<'a> Reservation<'a> {
    pub(crate) fn new(pool: &'a IdentifierPool, id: Identifier) -> Self {
        Self { pool, id }
    }

    /// The reserved identifier.
    pub fn id(&self) -> Identifier {
        self.id
    }

    /// Detaches the identifier from this reservation without releasing it. The caller becomes
    /// responsible for eventually passing it to [release](crate::IdentifierPool::release), for
    /// example once the reply carrying it has arrived.
    ///
    /// # Example
    ///
    /// ```
    /// # use packet_id_pool::IdentifierPool;
    /// let pool = IdentifierPool::new();
    ///
    /// let id = pool.reserve_scoped().forget();
    /// assert_eq!(pool.free_count(), 0);
    ///
    /// pool.release(id);
    /// assert_eq!(pool.free_count(), 1);
    /// ```
    pub fn forget(self) -> Identifier {
        let result = self.id;
        mem::forget(self);
        result
    }
}

impl<'a> Drop for Reservation<'a> {
    fn drop(&mut self) {
        self.pool.release(self.id);
    }
}

impl<'a> Debug for Reservation<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("Reservation").field(&self.id).finish()
    }
}

impl<'a> Display for Reservation<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.id, f)
    }
}

#[cfg(all(test, not(loom)))]
mod test {
    use std::mem;
    use std::num::NonZeroU16;

    use crate::{IdentifierPool, PoolConfig};

    #[test]
    fn drop_releases_the_identifier() {
        let pool = IdentifierPool::new();
        let reservation = pool.reserve_scoped();
        let id = reservation.id();

        mem::drop(reservation);

        assert_eq!(pool.free_count(), 1);
        assert_eq!(pool.reserve(), id);
    }

    #[test]
    fn forget_keeps_the_identifier_outstanding() {
        let pool = IdentifierPool::new();
        let id = pool.reserve_scoped().forget();

        assert_eq!(pool.free_count(), 0);
        assert_ne!(pool.reserve(), id);
    }

    #[test]
    fn drop_hands_the_identifier_to_a_waiter() {
        let pool = IdentifierPool::with_config(PoolConfig::new().limit(NonZeroU16::MIN));
        let reservation = pool.reserve_scoped();

        crossbeam_utils::thread::scope(|scope| {
            let waiter = scope.spawn(|_| pool.reserve());

            while pool.waiting_count() == 0 {
                std::thread::yield_now();
            }

            mem::drop(reservation);
            assert_eq!(waiter.join().unwrap().get(), 1);
        })
        .unwrap();
    }

    #[test]
    fn formats_as_the_identifier() {
        let pool = IdentifierPool::new();
        let reservation = pool.reserve_scoped();

        assert_eq!(reservation.to_string(), "1");
        assert_eq!(format!("{:?}", reservation), "Reservation(Identifier(1))");
    }
}
