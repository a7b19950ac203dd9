macro_rules! create_atomic {
    ($name:ident, $type:ty, $native:path) => {
        pub struct $name {
            inner: $native,
        }

        impl $name {
            pub fn new(value: $type) -> Self {
                type Native = $native;
                Self {
                    inner: Native::new(value),
                }
            }

            pub fn load(&self, ordering: Ordering) -> $type {
                self.inner.load(ordering.native())
            }

            pub fn fetch_add(&self, value: $type, ordering: Ordering) -> $type {
                self.inner.fetch_add(value, ordering.native())
            }

            pub fn fetch_sub(&self, value: $type, ordering: Ordering) -> $type {
                self.inner.fetch_sub(value, ordering.native())
            }
        }
    };
}

#[cfg(loom)]
create_atomic!(AtomicUsize, usize, loom::sync::atomic::AtomicUsize);

#[cfg(not(loom))]
create_atomic!(AtomicUsize, usize, std::sync::atomic::AtomicUsize);

#[allow(unused)]
#[derive(Copy, Clone)]
pub enum Ordering {
    Relaxed,
    SeqCst,
}

#[cfg(loom)]
impl Ordering {
    fn native(self) -> loom::sync::atomic::Ordering {
        match self {
            Ordering::Relaxed => loom::sync::atomic::Ordering::Relaxed,
            Ordering::SeqCst => loom::sync::atomic::Ordering::SeqCst,
        }
    }
}

#[cfg(not(loom))]
impl Ordering {
    fn native(self) -> std::sync::atomic::Ordering {
        match self {
            Ordering::Relaxed => std::sync::atomic::Ordering::Relaxed,
            Ordering::SeqCst => std::sync::atomic::Ordering::SeqCst,
        }
    }
}
