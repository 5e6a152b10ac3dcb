use lazy_static::lazy_static;
use std::sync::Mutex;

use super::{allocator::RingAllocator, utils::map_region};

/// How much memory the process-wide default instance manages.
pub const DEFAULT_REGION_SIZE: usize = 16 * 1024 * 1024;

lazy_static! {
    pub static ref ring_memory: Mutex<RingAllocator> = {
        /*
         * If the OS refuses the mapping the allocator gets an empty range,
         * which can never be initialized, so every allocation reports
         * out-of-memory instead of panicking
         */
        let allocator = match map_region(DEFAULT_REGION_SIZE) {
            Some((start, end)) => RingAllocator::new(start, end),
            None => RingAllocator::new(0, 0),
        };

        Mutex::new(allocator)
    };
}
