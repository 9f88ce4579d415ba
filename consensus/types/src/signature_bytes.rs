use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use ssz::{Decode, DecodeError, Encode};
use std::fmt;

pub const SIGNATURE_BYTES_LEN: usize = 96;

/// The byte representation of a BLS signature.
///
/// Opaque to this crate; see `PublicKeyBytes`.
#[derive(Clone, Copy)]
pub struct SignatureBytes([u8; SIGNATURE_BYTES_LEN]);

impl SignatureBytes {
    /// Instantiates `Self` with all-zeros, the convention for an unsigned message.
    pub fn empty() -> Self {
        Self([0; SIGNATURE_BYTES_LEN])
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != SIGNATURE_BYTES_LEN {
            return Err(DecodeError::InvalidByteLength {
                len: bytes.len(),
                expected: SIGNATURE_BYTES_LEN,
            });
        }
        let mut array = [0; SIGNATURE_BYTES_LEN];
        array.copy_from_slice(bytes);
        Ok(Self(array))
    }

    pub fn as_serialized(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for SignatureBytes {
    fn eq(&self, other: &Self) -> bool {
        self.0[..] == other.0[..]
    }
}

impl Eq for SignatureBytes {}

impl Default for SignatureBytes {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", serde_utils::hex::encode(self.0))
    }
}

impl Encode for SignatureBytes {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        SIGNATURE_BYTES_LEN
    }

    fn ssz_bytes_len(&self) -> usize {
        SIGNATURE_BYTES_LEN
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.0)
    }
}

impl Decode for SignatureBytes {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        SIGNATURE_BYTES_LEN
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_bytes(bytes)
    }
}

impl Serialize for SignatureBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&serde_utils::hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for SignatureBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = deserializer.deserialize_str(serde_utils::hex::PrefixedHexVisitor)?;
        Self::from_bytes(&bytes).map_err(|e| serde::de::Error::custom(format!("{:?}", e)))
    }
}
