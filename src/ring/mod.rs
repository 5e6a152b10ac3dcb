pub mod allocator;
pub mod globals;
pub mod utils;

/*
 * The ring allocator manages a single fixed block of raw memory handed to it
 * as two bounding addresses. It never asks the OS for more memory, all the
 * metadata it needs is stored in-band, inside the region itself.
 *
 * After initialization the region looks like this:
 *
 * ____________________________________________________________
 * |        |                                        |        |
 * | Header |          one big free block            | Header |
 * | (first)|                                        | (last) |
 * |________|________________________________________|________|
 *
 * Every allocation carves a block out of a free one, placing a new header
 * just behind the carved payload:
 *
 * ____________________________________________________________
 * |        |          |        |                     |        |
 * | Header | payload  | Header |     free space      | Header |
 * | (used) | for user | (free) |                     | (last) |
 * |________|__________|________|_____________________|________|
 *
 * Headers form a circular singly-linked chain: the last header, a sentinel
 * whose payload is never handed out, points back at the first one. A block
 * doesn't record its own size, it is derived from the distance to the next
 * header, so the chain is the single source of truth for the whole layout.
 */

/// Fewest payload bytes a block can carry. Requests below this are floored,
/// and a split never leaves a free remainder smaller than this.
pub const MIN_SIZE: usize = 8;

const FREE_FLAG: usize = 0x1;

/// In-band metadata placed at the start of every block, free or allocated.
///
/// Both logical fields live in one machine word: the low bit is the free
/// flag, the remaining bits are the address of the next header in the
/// chain. Headers are word-aligned so the low bit of a real address is
/// always zero. Every accessor masks accordingly, and every write of one
/// field preserves the other.
#[repr(C)]
pub struct BlockHeader {
    tagged_next: usize,
}

impl BlockHeader {
    pub fn new(next: *mut BlockHeader, free: bool) -> Self {
        Self {
            tagged_next: (next as usize & !FREE_FLAG) | free as usize,
        }
    }

    pub fn next(&self) -> *mut BlockHeader {
        (self.tagged_next & !FREE_FLAG) as *mut BlockHeader
    }

    pub fn set_next(&mut self, next: *mut BlockHeader) {
        self.tagged_next = (next as usize & !FREE_FLAG) | (self.tagged_next & FREE_FLAG);
    }

    pub fn is_free(&self) -> bool {
        self.tagged_next & FREE_FLAG != 0
    }

    pub fn set_free(&mut self, free: bool) {
        self.tagged_next = (self.tagged_next & !FREE_FLAG) | free as usize;
    }

    /// Usable bytes between this header and the next one. Not meaningful
    /// for the sentinel, whose next pointer wraps backwards to the first
    /// block.
    pub fn payload_size(&self) -> usize {
        self.next() as usize - self as *const BlockHeader as usize - BlockHeader::size()
    }

    pub fn size() -> usize {
        size_of::<BlockHeader>()
    }
}
