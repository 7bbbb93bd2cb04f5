//! Signed integers as ZigZag-mapped varints.
//!
//! ZigZag interleaves the signed domain onto the unsigned one (`0, -1, 1, -2, 2, ...`
//! becomes `0, 1, 2, 3, 4, ...`), so values of small magnitude stay short whatever
//! their sign. The mapped value is then encoded by [`crate::varint`] at the same width.

use std::num::NonZeroUsize;

use crate::{
    codec::{Codec, non_zero},
    error::{DecodeError, EncodeError},
    varint::{self, VarUint},
};

mod private {
    pub trait Sealed {}
}

/// Signed integer widths with a ZigZag mapping onto the unsigned width of the same size.
pub trait ZigZag: Copy + private::Sealed {
    type Unsigned: VarUint;

    fn encode_zigzag(self) -> Self::Unsigned;

    fn decode_zigzag(value: Self::Unsigned) -> Self;
}

macro_rules! impl_zigzag {
    ($($ty:ty => $unsigned:ty),*) => {
        $(
            impl private::Sealed for $ty {}

            impl ZigZag for $ty {
                type Unsigned = $unsigned;

                #[inline]
                fn encode_zigzag(self) -> $unsigned {
                    let shifted = self.wrapping_shl(1);
                    if self < 0 {
                        (!shifted) as $unsigned
                    } else {
                        shifted as $unsigned
                    }
                }

                #[inline]
                fn decode_zigzag(value: $unsigned) -> Self {
                    let half = value >> 1;
                    if value & 1 == 1 {
                        (!half) as $ty
                    } else {
                        half as $ty
                    }
                }
            }
        )*
    };
}

impl_zigzag!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, isize => usize);

#[inline]
pub fn encode<T: ZigZag>(value: T) -> T::Unsigned {
    value.encode_zigzag()
}

#[inline]
pub fn decode<T: ZigZag>(value: T::Unsigned) -> T {
    T::decode_zigzag(value)
}

/// Writes `value` at the start of `bs`, returning the number of bytes written.
///
/// # Panics
///
/// If `bs` is shorter than [`size`] of `value`.
pub fn marshal<T: ZigZag>(value: T, bs: &mut [u8]) -> usize {
    varint::marshal(encode(value), bs)
}

pub fn try_marshal<T: ZigZag>(value: T, bs: &mut [u8]) -> Result<usize, EncodeError> {
    varint::try_marshal(encode(value), bs)
}

/// Parses a value of width `T` from the start of `bs`, with the failure modes of
/// [`varint::unmarshal`].
pub fn unmarshal<T: ZigZag>(bs: &[u8]) -> Result<(T, usize), DecodeError> {
    let (value, n) = varint::unmarshal::<T::Unsigned>(bs)?;
    Ok((decode(value), n))
}

pub fn size<T: ZigZag>(value: T) -> usize {
    varint::size(encode(value))
}

pub fn skip<T: ZigZag>(bs: &[u8]) -> Result<usize, DecodeError> {
    varint::skip::<T::Unsigned>(bs)
}

/// [`Codec`] for every signed width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZigZagVarint;

impl<T: ZigZag> Codec<T> for ZigZagVarint {
    const MAX_SIZE: NonZeroUsize = non_zero(<T::Unsigned as VarUint>::MAX_SIZE);

    fn marshal(&self, value: &T, bs: &mut [u8]) -> usize {
        marshal(*value, bs)
    }

    fn unmarshal(&self, bs: &[u8]) -> Result<(T, usize), DecodeError> {
        unmarshal(bs)
    }

    fn size(&self, value: &T) -> usize {
        size(*value)
    }

    fn skip(&self, bs: &[u8]) -> Result<usize, DecodeError> {
        skip::<T>(bs)
    }
}
