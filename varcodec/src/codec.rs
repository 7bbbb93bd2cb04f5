use std::num::NonZeroUsize;

use crate::error::{DecodeError, EncodeError};

/// A pure transformation between values of `T` and caller-owned byte regions.
///
/// Every implementation upholds the same accounting: `marshal` writes exactly
/// `size` bytes, and `unmarshal` and `skip` consume exactly that many bytes back.
pub trait Codec<T> {
    /// Largest number of bytes a single encoded value can occupy.
    const MAX_SIZE: NonZeroUsize;

    /// Writes `value` at the start of `bs` and returns the number of bytes written.
    ///
    /// # Panics
    ///
    /// If `bs` is shorter than [`Codec::size`] reports for `value`. Use
    /// [`Codec::try_marshal`] when the region length is not known to be sufficient.
    fn marshal(&self, value: &T, bs: &mut [u8]) -> usize;

    /// Reads one value from the start of `bs`, returning it along with the number of
    /// bytes it occupied.
    fn unmarshal(&self, bs: &[u8]) -> Result<(T, usize), DecodeError>;

    fn size(&self, value: &T) -> usize;

    /// Determines the length of the value at the start of `bs` without building it.
    fn skip(&self, bs: &[u8]) -> Result<usize, DecodeError>;

    /// Like [`Codec::marshal`], but leaves `bs` untouched and reports an error when
    /// it is too small.
    fn try_marshal(&self, value: &T, bs: &mut [u8]) -> Result<usize, EncodeError> {
        let needed = self.size(value);
        if bs.len() < needed {
            return Err(EncodeError::BufferTooSmall {
                needed,
                available: bs.len(),
            });
        }
        Ok(self.marshal(value, bs))
    }
}

pub(crate) const fn non_zero(size: usize) -> NonZeroUsize {
    match NonZeroUsize::new(size) {
        Some(size) => size,
        None => panic!("encoded values occupy at least one byte"),
    }
}
