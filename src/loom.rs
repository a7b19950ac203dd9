use loom::model;
use loom::sync::atomic::{AtomicBool, Ordering};
use loom::sync::Arc;
use loom::thread;
use loom::thread::JoinHandle;
use std::num::NonZeroU16;

use crate::{IdentifierPool, PoolConfig, WaiterOrder};

fn limited(limit: u16, order: WaiterOrder) -> IdentifierPool {
    IdentifierPool::with_config(
        PoolConfig::new()
            .limit(NonZeroU16::new(limit).unwrap())
            .waiter_order(order),
    )
}

#[test]
fn debug_assertions_enabled() {
    if !cfg!(debug_assertions) {
        panic!("debug assertions must be enabled when running loom tests");
    }
}

// Uniqueness is also checked by the ledger, which panics if an outstanding identifier is issued
#[test]
fn concurrent_reservations_are_unique() {
    let mut model = model::Builder::new();
    model.preemption_bound = Some(3);

    model.check(|| {
        let pool = Arc::new(limited(1, WaiterOrder::NewestFirst));
        let held = Arc::new(AtomicBool::new(false));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                spawn((pool.clone(), held.clone()), |(pool, held)| {
                    let id = pool.reserve();
                    assert!(!held.swap(true, Ordering::SeqCst));
                    held.store(false, Ordering::SeqCst);
                    pool.release(id);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(pool.waiting_count(), 0);
        assert_eq!(pool.free_count(), 1);
    });
}

#[test]
fn reserve_waits_for_release() {
    model(|| {
        let pool = Arc::new(limited(1, WaiterOrder::NewestFirst));
        let id = pool.reserve();

        let flag = Arc::new(AtomicBool::new(false));

        let handle = spawn((pool.clone(), flag.clone()), |(pool, flag)| {
            let id = pool.reserve();
            flag.store(true, Ordering::SeqCst);
            id
        });

        assert!(!flag.load(Ordering::SeqCst));

        pool.release(id);
        assert_eq!(handle.join().unwrap(), id);
    });
}

// Each waiter releases what it is handed, so the single identifier must pass through both
// waiters and end up back on the free stack
#[test]
fn released_identifier_is_never_lost() {
    for order in &[WaiterOrder::NewestFirst, WaiterOrder::OldestFirst] {
        let order = *order;

        model(move || {
            let pool = Arc::new(limited(1, order));
            let id = pool.reserve();

            let handles: Vec<_> = (0..2)
                .map(|_| {
                    spawn(pool.clone(), |pool| {
                        let id = pool.reserve();
                        pool.release(id);
                        id
                    })
                })
                .collect();

            pool.release(id);

            for handle in handles {
                assert_eq!(handle.join().unwrap(), id);
            }

            assert_eq!(pool.waiting_count(), 0);
            assert_eq!(pool.free_count(), 1);
            assert_eq!(pool.high_water_mark(), 1);
        });
    }
}

fn spawn<T: 'static, U: 'static>(param: U, f: impl FnOnce(U) -> T + 'static) -> JoinHandle<T> {
    thread::spawn(move || f(param))
}
