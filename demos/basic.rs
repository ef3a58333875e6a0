//! Basic list operations: append, slice, search, consume.
//!
//! Run with:
//!     cargo run --example basic

use bytes::Bytes;
use chunklist::{BufferList, Encoding};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut list = BufferList::new();
    list.append("The quick ")
        .append(Bytes::from_static(b"brown fox "))
        .append(vec![b"jumps ".to_vec(), b"over".to_vec()]);
    list.prepend(">> ");

    println!(
        "{} bytes in {} chunks: {:?}",
        list.len(),
        list.chunk_count(),
        list.to_string_encoded("utf8", ..)?
    );

    // Slices inside one chunk share its memory
    let brown = list.slice(13..18);
    println!("slice 13..18 = {:?}", String::from_utf8_lossy(&brown));

    // Ranges that cross chunks are copied into one buffer
    let across = list.slice(-10..-4);
    println!("slice -10..-4 = {:?}", String::from_utf8_lossy(&across));

    if let Some(at) = list.index_of("fox jumps", 0) {
        println!("'fox jumps' found at {at} (spans a chunk boundary)");
    }

    println!("hex of first 6 bytes: {}", list.decode(Encoding::Hex, ..6));

    list.consume(3);
    println!("after consume(3): {:?}", list.to_string_encoded("utf8", ..)?);

    Ok(())
}
