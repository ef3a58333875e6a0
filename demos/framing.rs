//! Decoding length-prefixed frames from reads that ignore frame boundaries.
//!
//! Run with:
//!     cargo run --example framing

use bytes::Bytes;
use chunklist::BufferList;

/// `u16` big-endian length, one type byte, then the payload.
const HEADER: usize = 3;

fn encode(kind: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(HEADER + payload.len());
    frame.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    frame.push(kind);
    frame.extend_from_slice(payload);
    frame
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create a byte stream of several frames
    let wire: Vec<u8> = [
        encode(1, b"hello"),
        encode(2, &[0xde, 0xad, 0xbe, 0xef]),
        encode(1, b"a somewhat longer payload"),
        encode(3, b""),
    ]
    .concat();

    let mut list = BufferList::new();
    let mut frames = 0;

    // Simulate network reads of 7 bytes at a time
    for read in wire.chunks(7) {
        list.append(Bytes::copy_from_slice(read));

        while list.len() >= HEADER {
            let len = usize::from(list.read_u16_be(0)?);
            if list.len() < HEADER + len {
                break;
            }
            let kind = list.read_u8(2)?;
            let payload = list.slice(HEADER as isize..(HEADER + len) as isize);
            list.consume((HEADER + len) as isize);

            frames += 1;
            println!(
                "frame {}: type={}, len={}, payload={:?}",
                frames,
                kind,
                payload.len(),
                payload
            );
        }
    }

    println!("\nTotal: {} frames, {} bytes left over", frames, list.len());

    Ok(())
}
