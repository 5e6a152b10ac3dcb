use ringalloc::ring::allocator::{ring_free_bytes, ringalloc, ringfree};

fn main() {
    println!("Free bytes in region: {}", ring_free_bytes());

    let number = ringalloc(size_of::<u64>()).unwrap() as *mut u64;

    unsafe {
        *number = 42;
        println!("Number address: {:p}, value: {}", number, *number);
    }

    let word = ringalloc(size_of::<char>() * 13).unwrap();

    println!("Word address: {:p}", word);
    println!("Free bytes in region: {}", ring_free_bytes());

    ringfree(number as *mut u8);
    ringfree(word);

    println!("Free bytes after release: {}", ring_free_bytes());
}
