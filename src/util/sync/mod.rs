pub mod atomic;
pub mod monitor;
