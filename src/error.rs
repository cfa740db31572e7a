//! Errors returned by sprite operations
use core::fmt;

use display_interface::DisplayError;

/// Why a sprite operation did nothing.
#[derive(Clone, Debug)]
pub enum Error {
    /// The sprite has no pixel store
    NotCreated,
    /// Width or height below one pixel
    InvalidSize,
    /// The pixel store could not be allocated
    OutOfMemory,
    /// The color depths of source and destination can't be combined
    UnsupportedDepth,
    /// Nothing of the source lands on the destination
    OutOfBounds,
    /// The destination transport failed
    Display(DisplayError),
}

// DisplayError has no PartialEq; all of its variants are unit variants
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::Display(a), Error::Display(b)) => {
                core::mem::discriminant(a) == core::mem::discriminant(b)
            }
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Eq for Error {}

impl From<DisplayError> for Error {
    fn from(err: DisplayError) -> Self {
        Error::Display(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotCreated => f.write_str("sprite not created"),
            Error::InvalidSize => f.write_str("invalid sprite size"),
            Error::OutOfMemory => f.write_str("sprite allocation failed"),
            Error::UnsupportedDepth => f.write_str("unsupported color depth pairing"),
            Error::OutOfBounds => f.write_str("outside of destination"),
            Error::Display(err) => write!(f, "display error: {err:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_compare_by_kind() {
        assert_eq!(Error::OutOfBounds, Error::OutOfBounds);
        assert_ne!(Error::OutOfBounds, Error::NotCreated);
        assert_eq!(
            Error::from(DisplayError::BusWriteError),
            Error::Display(DisplayError::BusWriteError)
        );
        assert_ne!(
            Error::Display(DisplayError::BusWriteError),
            Error::Display(DisplayError::DCError)
        );
        assert_ne!(Error::Display(DisplayError::DCError), Error::InvalidSize);
    }
}
