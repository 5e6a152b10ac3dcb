//! # ringalloc
//!
//! A dynamic memory allocator that manages one fixed, contiguous region of
//! raw memory and serves variable-size allocation and release requests
//! against it, without relying on any underlying system allocator.
//!
//! All bookkeeping lives inside the managed region itself: every block,
//! free or allocated, starts with a one-word header whose low bit carries
//! the free flag and whose remaining bits point at the next header. The
//! headers form a circular chain terminated by a sentinel, and a rotating
//! cursor gives the allocator next-fit behaviour instead of first-fit.
//!
//! The [`ring::allocator::RingAllocator`] struct holds the state for one
//! managed region; [`ring::globals`] provides a process-wide default
//! instance over a region obtained with `mmap`.

pub mod ring;
