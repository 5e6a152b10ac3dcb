use super::{
    BlockHeader, MIN_SIZE,
    globals::ring_memory,
    utils::{align_down, align_up},
};

/// Allocator state for one managed region.
///
/// The struct only remembers the raw region bounds and three header
/// addresses: the chain head, the sentinel, and the next-fit cursor.
/// Everything else lives in the region itself. Addresses are kept as plain
/// integers, zero meaning "not initialized yet".
pub struct RingAllocator {
    start: usize,
    end: usize,
    first: usize,
    last: usize,
    current: usize,
}

impl RingAllocator {
    /// Wraps the raw bounds of a region. No memory is touched until
    /// [`init`](Self::init) runs, so the bounds may be unaligned or even
    /// too small to be usable.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            first: 0,
            last: 0,
            current: 0,
        }
    }

    /**
     * Lay the initial chain out inside the region: one free block spanning
     * the whole usable range, followed by the sentinel header whose next
     * pointer wraps back to the first block.
     *
     * The raw bounds get word-aligned first. If the aligned range can't
     * hold two headers plus MIN_SIZE bytes of payload the allocator stays
     * uninitialized and every allocation keeps failing.
     *
     * Calling this again once a chain exists is a no-op.
     */
    pub fn init(&mut self) {
        if self.first != 0 {
            return;
        }

        let aligned_start = align_up(self.start);
        let aligned_end = align_down(self.end);

        /*
         * Room for one free block and the end header?
         */
        if aligned_end < aligned_start + 2 * BlockHeader::size() + MIN_SIZE {
            return;
        }

        let first = aligned_start as *mut BlockHeader;
        let last = (aligned_end - BlockHeader::size()) as *mut BlockHeader;

        unsafe {
            /*
             * The sentinel is marked allocated so no search or coalesce
             * step ever hands out or absorbs its payload
             */
            (*first) = BlockHeader::new(last, true);
            (*last) = BlockHeader::new(first, false);
        }

        self.first = first as usize;
        self.last = last as usize;
        self.current = self.first;
    }

    /**
     * Allocate at least `size` contiguous bytes and return the address of
     * the first one, or None once no free block can satisfy the request.
     *
     * The search is next-fit: it starts at the cursor left behind by the
     * previous call and walks the chain circularly, so allocations spread
     * around the region instead of packing at the front. Along the way
     * adjacent free blocks get merged, which can make a block viable that
     * was individually too small.
     *
     * A zero byte request is valid and still returns a distinct pointer,
     * every request is floored to MIN_SIZE bytes.
     */
    pub fn alloc(&mut self, size: usize) -> Option<*mut u8> {
        if self.first == 0 {
            self.init();
            if self.first == 0 {
                return None;
            }
        }

        let aligned_size = align_up(size.max(MIN_SIZE));

        let mut search_start = self.current as *mut BlockHeader;
        let mut current = search_start;

        unsafe {
            loop {
                if (*current).is_free() {
                    /*
                     * Absorb consecutive free neighbors before judging the
                     * fit. The sentinel is never free, so this can't run
                     * past the wrap-around. If a merge swallows the header
                     * the scan started from (or the cursor itself), those
                     * markers move back to the surviving block so the
                     * round-trip check below stays sound.
                     */
                    loop {
                        let next = (*current).next();
                        if !(*next).is_free() {
                            break;
                        }
                        if next == search_start {
                            search_start = current;
                        }
                        if next as usize == self.current {
                            self.current = current as usize;
                        }
                        (*current).set_next((*next).next());
                    }

                    if (*current).payload_size() >= aligned_size {
                        if (*current).payload_size() - aligned_size
                            < BlockHeader::size() + MIN_SIZE
                        {
                            /*
                             * Remainder too small to host its own block,
                             * hand the whole block out
                             */
                            (*current).set_free(false);
                        } else {
                            /*
                             * Carve aligned_size off and give the rest its
                             * own free header, inheriting our old next
                             */
                            let remainder = (current as usize
                                + BlockHeader::size()
                                + aligned_size)
                                as *mut BlockHeader;

                            (*remainder) = BlockHeader::new((*current).next(), true);
                            (*current).set_next(remainder);
                            (*current).set_free(false);
                        }

                        let payload = (current as usize + BlockHeader::size()) as *mut u8;

                        /*
                         * Resume the next search past the block we just
                         * handed out
                         */
                        self.current = (*current).next() as usize;

                        return Some(payload);
                    }
                }

                current = (*current).next();

                if current == search_start {
                    /*
                     * Full circle without a fit: out of memory
                     */
                    return None;
                }
            }
        }
    }

    /**
     * Give a block back, making it available to later allocations.
     *
     * A null pointer is a no-op, and so is releasing a block that is
     * already free, double releases are absorbed silently rather than
     * reported.
     *
     * Coalescing is forward-only and one hop: if the chain-forward
     * neighbor is free it gets merged into this block right away. A free
     * predecessor is left alone, the next allocation scan picks such
     * pairs up lazily.
     */
    pub fn release(&mut self, ptr: *mut u8) {
        if ptr.is_null() || self.first == 0 {
            return;
        }

        let block = (ptr as usize - BlockHeader::size()) as *mut BlockHeader;

        unsafe {
            if (*block).is_free() {
                return;
            }

            (*block).set_free(true);

            let next = (*block).next();
            if (*next).is_free() {
                /*
                 * The cursor must keep pointing at a live header, move it
                 * back onto the merged block if it sat on the absorbed one
                 */
                if next as usize == self.current {
                    self.current = block as usize;
                }
                (*block).set_next((*next).next());
            }
        }
    }

    /**
     * Walk the chain and sum the payload bytes of every free block.
     * Useful to observe coalescing from the outside, the count never
     * includes header words.
     */
    pub fn free_bytes(&self) -> usize {
        if self.first == 0 {
            return 0;
        }

        let mut total = 0;
        let mut block = self.first as *mut BlockHeader;

        unsafe {
            loop {
                if (*block).is_free() {
                    total += (*block).payload_size();
                }

                block = (*block).next();

                if block as usize == self.first {
                    break;
                }
            }
        }

        total
    }
}

/**
 * Allocate from the process-wide default region, see
 * [`RingAllocator::alloc`]
 */
pub fn ringalloc(size: usize) -> Option<*mut u8> {
    ring_memory.lock().unwrap().alloc(size)
}

/**
 * Release a block obtained from [`ringalloc`], see
 * [`RingAllocator::release`]
 */
pub fn ringfree(ptr: *mut u8) {
    ring_memory.lock().unwrap().release(ptr);
}

/**
 * Free payload bytes left in the process-wide default region
 */
pub fn ring_free_bytes() -> usize {
    let mut memory_guard = ring_memory.lock().unwrap();

    memory_guard.init();
    memory_guard.free_bytes()
}
