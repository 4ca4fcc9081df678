//! bincode persistence of parameter structs.
//!
//! The training artifact (`model.bin` by default) is a bincode-encoded
//! [`PredictivePipelineParams`](crate::pipeline::PredictivePipelineParams):
//! format version, run metadata, the encoder's per-step parameters and the
//! classifier weights. Encoders and the classifier can also be saved on their
//! own through the same [`SerializableParams`] impl. Equal parameters always
//! encode to equal bytes, so retraining on unchanged inputs rewrites an
//! identical file.

use std::error::Error;

/// A parameter representation that can be serialized to and from bytes.
///
/// Implementors should contain only plain data, never live encoders or
/// handles into the external fitting library.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

/// Every serde type is stored with bincode.
///
/// bincode writes fields in declaration order with fixed-width numbers, so the
/// same parameters always produce the same bytes.
impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}
