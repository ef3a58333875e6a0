#![no_main]

use bytes::Bytes;
use chunklist::BufferList;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<u8>, Vec<u8>, u8, i16)| {
    let (data, needle, chunk, offset) = input;
    let chunk = usize::from(chunk) + 1;

    let list: BufferList = data.chunks(chunk).map(Bytes::copy_from_slice).collect();

    let offset = isize::from(offset);
    let from = if offset < 0 {
        data.len().saturating_sub(offset.unsigned_abs())
    } else {
        (offset as usize).min(data.len())
    };

    // Verify: same answer as a flat scan
    let expected = if needle.is_empty() {
        Some(from)
    } else {
        (from..data.len()).find(|&i| data[i..].starts_with(&needle))
    };
    assert_eq!(list.index_of(&needle[..], offset), expected);
});
