use thiserror::Error;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum DecodeError {
    #[error("Input ended after {consumed} bytes before the value was complete")]
    TooSmallInput { consumed: usize },
    #[error("Varint overflows the target integer after {consumed} bytes")]
    Overflow { consumed: usize },
    #[error("Expected a presence flag, found {flag:#04x}")]
    WrongFormat { flag: u8, consumed: usize },
}

impl DecodeError {
    /// Number of bytes examined before decoding failed, counted from the start of
    /// the region handed to the outermost codec.
    pub fn consumed(&self) -> usize {
        match self {
            Self::TooSmallInput { consumed }
            | Self::Overflow { consumed }
            | Self::WrongFormat { consumed, .. } => *consumed,
        }
    }

    /// Re-bases an error raised by a nested codec that started `offset` bytes into
    /// the region.
    pub(crate) fn offset_by(self, offset: usize) -> Self {
        match self {
            Self::TooSmallInput { consumed } => Self::TooSmallInput {
                consumed: consumed + offset,
            },
            Self::Overflow { consumed } => Self::Overflow {
                consumed: consumed + offset,
            },
            Self::WrongFormat { flag, consumed } => Self::WrongFormat {
                flag,
                consumed: consumed + offset,
            },
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum EncodeError {
    #[error("Need {needed} bytes to encode but only {available} are available")]
    BufferTooSmall { needed: usize, available: usize },
}
