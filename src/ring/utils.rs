use libc::{
    _SC_PAGESIZE, MAP_ANONYMOUS, MAP_FAILED, MAP_PRIVATE, PROT_READ, PROT_WRITE, mmap, munmap,
    sysconf,
};
use std::{os::raw::c_void, ptr};

/// Natural word size of the machine, every header and payload address is
/// aligned to it.
pub const WORD_SIZE: usize = size_of::<usize>();

/*
 * Round an address or size up to the next word boundary
 */
pub fn align_up(value: usize) -> usize {
    (value + (WORD_SIZE - 1)) & !(WORD_SIZE - 1)
}

/*
 * Round an address down to the previous word boundary
 */
pub fn align_down(value: usize) -> usize {
    value & !(WORD_SIZE - 1)
}

/**
 * Takes page size from the OS
 */
pub fn get_page_size() -> usize {
    unsafe { sysconf(_SC_PAGESIZE) as usize }
}

/**
 * Takes a number and rounds up to the closer page size multiplier
 *
 * example:
 * system page size = 1024
 * size = 1540
 *
 * rounded to page size = 2048
 */
pub fn round_up_to_page_size(size: usize) -> usize {
    let page_size = get_page_size();
    ((size + page_size - 1) / page_size) * page_size
}

/**
 * Asks the OS for a raw block of memory with mmap and returns its bounding
 * addresses as (start, end). The allocator itself never calls this more
 * than once per region, the bounds stay fixed for the region's lifetime.
 */
pub fn map_region(size: usize) -> Option<(usize, usize)> {
    let block_size = round_up_to_page_size(size);

    let addr = unsafe {
        mmap(
            ptr::null_mut(),
            block_size,
            PROT_READ | PROT_WRITE,
            MAP_PRIVATE | MAP_ANONYMOUS,
            -1,
            0,
        )
    };

    if addr == MAP_FAILED {
        return None;
    }

    let start = addr as usize;

    Some((start, start + block_size))
}

/**
 * Uses munmap for returning a mapped region to the OS
 */
pub fn unmap_region(start: usize, end: usize) {
    unsafe {
        munmap(start as *mut c_void, end - start);
    }
}
