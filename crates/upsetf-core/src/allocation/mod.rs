//! The remaining-weight ledger and the exclusive-intersection allocator.

mod allocator;
mod config;
mod ledger;

pub use allocator::{allocate_exclusive, ExclusiveAllocator};
pub use config::{AllocatorConfig, DEFAULT_EPSILON};
pub use ledger::Ledger;
