use std::ops::{Deref, DerefMut};

/// A mutex paired with a condition variable. Waiting releases the lock while parked and
/// reacquires it before returning.
#[cfg(loom)]
pub struct Monitor<Inner> {
    lock: loom::sync::Mutex<Inner>,
    condition: loom::sync::Condvar,
}

#[cfg(loom)]
impl<Inner> Monitor<Inner> {
    pub fn new(value: Inner) -> Self {
        Self {
            lock: loom::sync::Mutex::new(value),
            condition: loom::sync::Condvar::new(),
        }
    }

    pub fn lock(&self) -> MonitorGuard<Inner> {
        MonitorGuard {
            inner: self.lock.lock().unwrap(),
        }
    }

    pub fn wait<'a>(&'a self, guard: MonitorGuard<'a, Inner>) -> MonitorGuard<'a, Inner> {
        MonitorGuard {
            inner: self.condition.wait(guard.inner).unwrap(),
        }
    }

    pub fn notify_all(&self) {
        self.condition.notify_all();
    }
}

#[cfg(not(loom))]
pub struct Monitor<Inner> {
    lock: parking_lot::Mutex<Inner>,
    condition: parking_lot::Condvar,
}

#[cfg(not(loom))]
impl<Inner> Monitor<Inner> {
    pub fn new(value: Inner) -> Self {
        Self {
            lock: parking_lot::Mutex::new(value),
            condition: parking_lot::Condvar::new(),
        }
    }

    pub fn lock(&self) -> MonitorGuard<Inner> {
        MonitorGuard {
            inner: self.lock.lock(),
        }
    }

    pub fn wait<'a>(&'a self, mut guard: MonitorGuard<'a, Inner>) -> MonitorGuard<'a, Inner> {
        self.condition.wait(&mut guard.inner);
        guard
    }

    pub fn notify_all(&self) {
        self.condition.notify_all();
    }
}

#[cfg(loom)]
pub struct MonitorGuard<'a, Inner> {
    inner: loom::sync::MutexGuard<'a, Inner>,
}

#[cfg(not(loom))]
pub struct MonitorGuard<'a, Inner> {
    inner: parking_lot::MutexGuard<'a, Inner>,
}

impl<'a, Inner> Deref for MonitorGuard<'a, Inner> {
    type Target = Inner;

    fn deref(&self) -> &Inner {
        self.inner.deref()
    }
}

impl<'a, Inner> DerefMut for MonitorGuard<'a, Inner> {
    fn deref_mut(&mut self) -> &mut Inner {
        self.inner.deref_mut()
    }
}
