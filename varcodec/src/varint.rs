//! Unsigned variable-length integers.
//!
//! Values are split into 7-bit groups, least significant first. Every byte but the
//! last has its high bit set, so values below 128 take a single byte and a `u64`
//! takes at most ten.

use std::num::NonZeroUsize;

use crate::{
    codec::{Codec, non_zero},
    error::{DecodeError, EncodeError},
};

const SEGMENT_BITS: u8 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

mod private {
    pub trait Sealed {}
}

/// Unsigned integer widths with a varint encoding.
pub trait VarUint: Copy + private::Sealed {
    /// Number of bytes the largest value of this width encodes to.
    const MAX_SIZE: usize;
    /// Largest byte allowed in the last group, which only holds the bits the
    /// earlier groups left over.
    const LAST_BYTE: u8;

    fn into_u64(self) -> u64;

    /// Truncating conversion; callers only pass values that fit.
    fn from_u64(value: u64) -> Self;
}

macro_rules! impl_var_uint {
    ($($ty:ty),*) => {
        $(
            impl private::Sealed for $ty {}

            impl VarUint for $ty {
                const MAX_SIZE: usize = (<$ty>::BITS as usize).div_ceil(7);
                const LAST_BYTE: u8 =
                    ((1u16 << (<$ty>::BITS as usize - 7 * (Self::MAX_SIZE - 1))) - 1) as u8;

                #[inline]
                fn into_u64(self) -> u64 {
                    self as u64
                }

                #[inline]
                fn from_u64(value: u64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_var_uint!(u8, u16, u32, u64, usize);

/// Writes `value` at the start of `bs`, returning the number of bytes written.
///
/// # Panics
///
/// If `bs` is shorter than [`size`] of `value`.
pub fn marshal<T: VarUint>(value: T, bs: &mut [u8]) -> usize {
    let mut value = value.into_u64();
    let mut i = 0;
    while value >= u64::from(CONTINUE_BIT) {
        bs[i] = ((value as u8) & SEGMENT_BITS) | CONTINUE_BIT;
        value >>= 7;
        i += 1;
    }
    bs[i] = value as u8;
    i + 1
}

pub fn try_marshal<T: VarUint>(value: T, bs: &mut [u8]) -> Result<usize, EncodeError> {
    let needed = size(value);
    if bs.len() < needed {
        return Err(EncodeError::BufferTooSmall {
            needed,
            available: bs.len(),
        });
    }
    Ok(marshal(value, bs))
}

/// Parses a value of width `T` from the start of `bs`.
///
/// Fails with [`DecodeError::TooSmallInput`] if `bs` ends before the terminating
/// byte, and with [`DecodeError::Overflow`] if the encoded value does not fit `T`.
pub fn unmarshal<T: VarUint>(bs: &[u8]) -> Result<(T, usize), DecodeError> {
    let mut value = 0u64;
    for (i, &byte) in bs.iter().enumerate() {
        check_group::<T>(i, byte)?;
        value |= u64::from(byte & SEGMENT_BITS) << (7 * i);
        if byte & CONTINUE_BIT == 0 {
            return Ok((T::from_u64(value), i + 1));
        }
    }
    Err(DecodeError::TooSmallInput { consumed: bs.len() })
}

pub fn size<T: VarUint>(value: T) -> usize {
    let mut value = value.into_u64();
    let mut size = 1;
    while value >= u64::from(CONTINUE_BIT) {
        value >>= 7;
        size += 1;
    }
    size
}

/// Returns the length of the value at the start of `bs`, failing exactly where
/// [`unmarshal`] would.
pub fn skip<T: VarUint>(bs: &[u8]) -> Result<usize, DecodeError> {
    for (i, &byte) in bs.iter().enumerate() {
        check_group::<T>(i, byte)?;
        if byte & CONTINUE_BIT == 0 {
            return Ok(i + 1);
        }
    }
    Err(DecodeError::TooSmallInput { consumed: bs.len() })
}

// The last group a width allows must terminate and carry no bits beyond the width,
// so a decode never reads more than `T::MAX_SIZE` bytes.
#[inline]
fn check_group<T: VarUint>(i: usize, byte: u8) -> Result<(), DecodeError> {
    if i == T::MAX_SIZE - 1 && byte > T::LAST_BYTE {
        log::debug!(
            "Varint overflows {}: byte {byte:#04x} at offset {i}",
            std::any::type_name::<T>()
        );
        return Err(DecodeError::Overflow { consumed: i });
    }
    Ok(())
}

/// [`Codec`] for every unsigned width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Varint;

impl<T: VarUint> Codec<T> for Varint {
    const MAX_SIZE: NonZeroUsize = non_zero(T::MAX_SIZE);

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
