use crate::Result;
use bytes::{Buf, BufMut};

/// Read & write Bitcoin data structures to and from binary in Bitcoin encoding format.
///
/// Reads never panic on short buffers, running out of data results in [Error::TruncatedInput]
/// (or [Error::IncompleteTransaction] for a transaction).
///
/// [Error::TruncatedInput]: crate::Error::TruncatedInput
/// [Error::IncompleteTransaction]: crate::Error::IncompleteTransaction
pub trait Encodable {
    /// Read the data structure from a buffer.
    fn from_binary(buffer: &mut dyn Buf) -> Result<Self>
    where
        Self: Sized;

    /// Write the data structure to a buffer.
    fn to_binary(&self, buffer: &mut dyn BufMut) -> Result<()>;

    /// Return the size of the encoded form.
    // Implementations must compute this without encoding, it is used to size buffers before
    // encoding.
    fn encoded_size(&self) -> u64;
}
