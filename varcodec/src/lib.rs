//! Compact binary codecs for integers and optional values.
//!
//! Unsigned integers are encoded as varints, signed integers as ZigZag-mapped varints,
//! and any [`Codec`] can be lifted to optional values with [`Nullable`]. All codecs
//! write into and read from byte regions owned by the caller and keep no state.

pub mod codec;
pub mod error;
pub mod nullable;
pub mod varint;
pub mod zigzag;

pub use codec::Codec;
pub use error::{DecodeError, EncodeError};
pub use nullable::{Boxed, NIL_FLAG, NOT_NIL_FLAG, Nullable};
pub use varint::{VarUint, Varint};
pub use zigzag::{ZigZag, ZigZagVarint};
