//! Optional values on top of any base codec.
//!
//! The encoding is a single presence flag, followed by the base encoding when a
//! value is present. The base codec needs no knowledge of absence.

use std::num::NonZeroUsize;

use crate::{
    codec::{Codec, non_zero},
    error::DecodeError,
};

/// Presence flag of an absent value.
pub const NIL_FLAG: u8 = 0x00;
/// Presence flag of a value whose base encoding follows.
pub const NOT_NIL_FLAG: u8 = 0x01;

/// Lifts a `C: Codec<T>` into a codec for `Option<T>`.
///
/// Nests freely: `Nullable<Nullable<C>>` keeps `None` and `Some(None)` apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nullable<C>(pub C);

impl<C> Nullable<C> {
    pub const fn new(base: C) -> Self {
        Self(base)
    }
}

/// Reads the presence flag, reporting whether a base value follows it.
fn read_flag(bs: &[u8]) -> Result<bool, DecodeError> {
    match bs.first() {
        None => Err(DecodeError::TooSmallInput { consumed: 0 }),
        Some(&NIL_FLAG) => Ok(false),
        Some(&NOT_NIL_FLAG) => Ok(true),
        Some(&flag) => {
            log::debug!("Unknown presence flag {flag:#04x}");
            Err(DecodeError::WrongFormat { flag, consumed: 1 })
        }
    }
}

impl<T, C: Codec<T>> Codec<Option<T>> for Nullable<C> {
    const MAX_SIZE: NonZeroUsize = non_zero(1 + <C as Codec<T>>::MAX_SIZE.get());

    fn marshal(&self, value: &Option<T>, bs: &mut [u8]) -> usize {
        match value {
            None => {
                bs[0] = NIL_FLAG;
                1
            }
            Some(value) => {
                bs[0] = NOT_NIL_FLAG;
                1 + self.0.marshal(value, &mut bs[1..])
            }
        }
    }

    fn unmarshal(&self, bs: &[u8]) -> Result<(Option<T>, usize), DecodeError> {
        if !read_flag(bs)? {
            return Ok((None, 1));
        }
        let (value, n) = self.0.unmarshal(&bs[1..]).map_err(|err| err.offset_by(1))?;
        Ok((Some(value), 1 + n))
    }

    fn size(&self, value: &Option<T>) -> usize {
        match value {
            None => 1,
            Some(value) => 1 + self.0.size(value),
        }
    }

    fn skip(&self, bs: &[u8]) -> Result<usize, DecodeError> {
        if !read_flag(bs)? {
            return Ok(1);
        }
        let n = self.0.skip(&bs[1..]).map_err(|err| err.offset_by(1))?;
        Ok(1 + n)
    }
}

/// Lifts a `C: Codec<T>` into a codec for `Box<T>` with the same encoding, so that
/// `Nullable<Boxed<C>>` handles owned optional pointers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boxed<C>(pub C);

impl<T, C: Codec<T>> Codec<Box<T>> for Boxed<C> {
    const MAX_SIZE: NonZeroUsize = <C as Codec<T>>::MAX_SIZE;

    fn marshal(&self, value: &Box<T>, bs: &mut [u8]) -> usize {
        self.0.marshal(value.as_ref(), bs)
    }

    fn unmarshal(&self, bs: &[u8]) -> Result<(Box<T>, usize), DecodeError> {
        let (value, n) = self.0.unmarshal(bs)?;
        Ok((Box::new(value), n))
    }

    fn size(&self, value: &Box<T>) -> usize {
        self.0.size(value.as_ref())
    }

    fn skip(&self, bs: &[u8]) -> Result<usize, DecodeError> {
        self.0.skip(bs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{varint::Varint, zigzag::ZigZagVarint};

    fn round_trip<T, C>(codec: &C, value: T)
    where
        T: PartialEq + std::fmt::Debug,
        C: Codec<T>,
    {
        let mut bs = vec![0u8; C::MAX_SIZE.get()];
        let n = codec.marshal(&value, &mut bs);
        assert_eq!(n, codec.size(&value), "size mismatch for {value:?}");
        let (decoded, read) = codec.unmarshal(&bs[..n]).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(read, n);
        assert_eq!(codec.skip(&bs[..n]), Ok(n));
    }

    #[test]
    fn absent_is_one_flag_byte() {
        let codec = Nullable(Varint);
        let mut bs = [0xEEu8; 4];
        assert_eq!(codec.marshal(&None::<u32>, &mut bs), 1);
        assert_eq!(bs, [NIL_FLAG, 0xEE, 0xEE, 0xEE]);
        assert_eq!(codec.size(&None::<u32>), 1);

        let decoded: (Option<u32>, usize) = codec.unmarshal(&bs).unwrap();
        assert_eq!(decoded, (None, 1));
        assert_eq!(Codec::<Option<u32>>::skip(&codec, &bs), Ok(1));
    }

    #[test]
    fn present_is_flag_then_base() {
        let codec = Nullable(Varint);
        let mut bs = [0u8; 6];
        assert_eq!(codec.marshal(&Some(300u32), &mut bs), 3);
        assert_eq!(&bs[..3], &[NOT_NIL_FLAG, 0xAC, 0x02]);
        assert_eq!(codec.size(&Some(300u32)), 1 + Varint.size(&300u32));

        let decoded: (Option<u32>, usize) = codec.unmarshal(&bs).unwrap();
        assert_eq!(decoded, (Some(300), 3));
    }

    #[test]
    fn absent_differs_from_zero() {
        let codec = Nullable(ZigZagVarint);
        let mut none = [0u8; 2];
        let mut zero = [0u8; 2];
        let n_none = codec.marshal(&None::<i64>, &mut none);
        let n_zero = codec.marshal(&Some(0i64), &mut zero);
        assert_ne!(&none[..n_none], &zero[..n_zero]);
        round_trip(&codec, None::<i64>);
        round_trip(&codec, Some(0i64));
    }

    #[test]
    fn round_trips_over_widths() {
        for value in [0u8, 1, 127, 128, u8::MAX] {
            round_trip(&Nullable(Varint), Some(value));
        }
        for value in [0u64, 16384, u64::MAX] {
            round_trip(&Nullable(Varint), Some(value));
        }
        for value in [i16::MIN, -1, 0, 1, i16::MAX] {
            round_trip(&Nullable(ZigZagVarint), Some(value));
        }
        round_trip(&Nullable(ZigZagVarint), None::<isize>);
    }

    #[test]
    fn nested_nullable_keeps_levels_apart() {
        let codec = Nullable(Nullable(ZigZagVarint));
        let mut bs = [0u8; 4];

        assert_eq!(codec.marshal(&None::<Option<i32>>, &mut bs), 1);
        assert_eq!(bs[0], NIL_FLAG);

        assert_eq!(codec.marshal(&Some(None::<i32>), &mut bs), 2);
        assert_eq!(&bs[..2], &[NOT_NIL_FLAG, NIL_FLAG]);

        round_trip(&codec, None::<Option<i32>>);
        round_trip(&codec, Some(None::<i32>));
        round_trip(&codec, Some(Some(-42i32)));
        let max_size = <Nullable<Nullable<ZigZagVarint>> as Codec<Option<Option<i32>>>>::MAX_SIZE;
        assert_eq!(max_size.get(), 7);
    }

    #[test]
    fn owned_pointers() {
        let codec = Nullable(Boxed(ZigZagVarint));
        round_trip(&codec, None::<Box<i64>>);
        round_trip(&codec, Some(Box::new(-64i64)));

        let mut bs = [0u8; 11];
        let value = Some(Box::new(i64::MIN));
        let n = codec.marshal(&value, &mut bs);
        assert_eq!(n, 11);
        let (decoded, _): (Option<Box<i64>>, usize) = codec.unmarshal(&bs).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn empty_input() {
        let codec = Nullable(Varint);
        assert_eq!(
            Codec::<Option<u16>>::unmarshal(&codec, &[]),
            Err(DecodeError::TooSmallInput { consumed: 0 })
        );
        assert_eq!(
            Codec::<Option<u16>>::skip(&codec, &[]),
            Err(DecodeError::TooSmallInput { consumed: 0 })
        );
    }

    #[test]
    fn unknown_flag() {
        let codec = Nullable(Varint);
        for flag in [0x02u8, 0x7F, 0x80, 0xFF] {
            let err = DecodeError::WrongFormat { flag, consumed: 1 };
            assert_eq!(Codec::<Option<u16>>::unmarshal(&codec, &[flag]), Err(err));
            assert_eq!(Codec::<Option<u16>>::skip(&codec, &[flag, 0x00]), Err(err));
        }
    }

    #[test]
    fn base_errors_count_the_flag() {
        let codec = Nullable(Varint);

        // Flag with nothing after it
        let bs = [NOT_NIL_FLAG];
        let err = DecodeError::TooSmallInput { consumed: 1 };
        assert_eq!(Codec::<Option<u32>>::unmarshal(&codec, &bs), Err(err));
        assert_eq!(Codec::<Option<u32>>::skip(&codec, &bs), Err(err));

        // Unterminated base varint
        let bs = [NOT_NIL_FLAG, 0x80, 0x80];
        let err = DecodeError::TooSmallInput { consumed: 3 };
        assert_eq!(Codec::<Option<u32>>::unmarshal(&codec, &bs), Err(err));
        assert_eq!(Codec::<Option<u32>>::skip(&codec, &bs), Err(err));

        // 256 does not fit the base width
        let bs = [NOT_NIL_FLAG, 0x80, 0x02];
        let err = DecodeError::Overflow { consumed: 2 };
        assert_eq!(Codec::<Option<u8>>::unmarshal(&codec, &bs), Err(err));
        assert_eq!(Codec::<Option<u8>>::skip(&codec, &bs), Err(err));
    }

    #[test]
    fn nested_wrong_format_points_at_inner_flag() {
        let codec = Nullable(Nullable(Varint));
        let bs = [NOT_NIL_FLAG, 0x09];
        assert_eq!(
            Codec::<Option<Option<u8>>>::unmarshal(&codec, &bs),
            Err(DecodeError::WrongFormat {
                flag: 0x09,
                consumed: 2
            })
        );
    }
}
