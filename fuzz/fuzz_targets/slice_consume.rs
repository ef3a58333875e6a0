#![no_main]

use bytes::Bytes;
use chunklist::BufferList;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<u8>, Vec<u8>, i16, i16)| {
    let (data, cuts, start, end) = input;

    // Split the data using the cut bytes as chunk sizes
    let mut list = BufferList::new();
    let mut rest = &data[..];
    for cut in cuts.iter().map(|c| usize::from(*c) + 1) {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(cut.min(rest.len()));
        list.append(Bytes::copy_from_slice(head));
        rest = tail;
    }
    list.append(Bytes::copy_from_slice(rest));

    // Verify: total length and content match
    assert_eq!(list.len(), data.len());
    assert_eq!(list.slice(..), data);

    // Verify: slice, shallow_slice and copy agree
    let range = isize::from(start)..isize::from(end);
    let sliced = list.slice(range.clone());
    assert_eq!(list.shallow_slice(range.clone()).slice(..), sliced);
    let mut buf = vec![0u8; sliced.len()];
    assert_eq!(list.copy(&mut buf, 0, range), sliced.len());
    assert_eq!(buf, sliced);

    // Verify: numeric reads never panic and agree with the flat bytes
    for offset in 0..data.len().min(64) {
        let expected = data.get(offset..offset + 4).map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]));
        assert_eq!(list.read_u32_le(offset).ok(), expected);
    }

    // Verify: consume drops exactly the front
    let n = usize::from(start.unsigned_abs()).min(data.len());
    list.consume(n as isize);
    assert_eq!(list.len(), data.len() - n);
    assert_eq!(list.slice(..), data[n..]);
});
