#![no_main]

use std::fmt::Debug;

use libfuzzer_sys::fuzz_target;
use varcodec::{Codec, Nullable, Varint, ZigZagVarint};

// Decoding arbitrary bytes must never panic, `skip` must agree with `unmarshal`,
// and whatever decodes must survive a round trip.
fn check<T, C>(codec: &C, data: &[u8])
where
    T: PartialEq + Debug,
    C: Codec<T>,
{
    let decoded = codec.unmarshal(data);
    let skipped = codec.skip(data);
    match (&decoded, &skipped) {
        (Ok((value, n)), Ok(skipped)) => {
            assert_eq!(n, skipped);
            assert!(*n <= C::MAX_SIZE.get());

            let mut bs = vec![0u8; C::MAX_SIZE.get()];
            let written = codec.marshal(value, &mut bs);
            assert_eq!(written, codec.size(value));
            let (again, read) = codec.unmarshal(&bs[..written]).expect("re-decode");
            assert_eq!(&again, value);
            assert_eq!(read, written);
        }
        (Err(decode_err), Err(skip_err)) => assert_eq!(decode_err, skip_err),
        _ => panic!("unmarshal {decoded:?} disagrees with skip {skipped:?}"),
    }
}

fuzz_target!(|data: &[u8]| {
    check::<u8, _>(&Varint, data);
    check::<u16, _>(&Varint, data);
    check::<u32, _>(&Varint, data);
    check::<u64, _>(&Varint, data);
    check::<usize, _>(&Varint, data);

    check::<i8, _>(&ZigZagVarint, data);
    check::<i16, _>(&ZigZagVarint, data);
    check::<i32, _>(&ZigZagVarint, data);
    check::<i64, _>(&ZigZagVarint, data);
    check::<isize, _>(&ZigZagVarint, data);

    check::<Option<u64>, _>(&Nullable(Varint), data);
    check::<Option<Option<i32>>, _>(&Nullable(Nullable(ZigZagVarint)), data);
});
