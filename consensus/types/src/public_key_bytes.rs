use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use ssz::{Decode, DecodeError, Encode};
use std::fmt;
use std::hash::{Hash, Hasher};

pub const PUBLIC_KEY_BYTES_LEN: usize = 48;

/// The byte representation of a BLS public key.
///
/// The bytes are opaque to this crate; cryptographic validity is established by an external
/// verifier before any key reaches consensus-critical code.
#[derive(Clone, Copy)]
pub struct PublicKeyBytes([u8; PUBLIC_KEY_BYTES_LEN]);

impl PublicKeyBytes {
    /// Instantiates `Self` with all-zeros.
    pub fn empty() -> Self {
        Self([0; PUBLIC_KEY_BYTES_LEN])
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != PUBLIC_KEY_BYTES_LEN {
            return Err(DecodeError::InvalidByteLength {
                len: bytes.len(),
                expected: PUBLIC_KEY_BYTES_LEN,
            });
        }
        let mut array = [0; PUBLIC_KEY_BYTES_LEN];
        array.copy_from_slice(bytes);
        Ok(Self(array))
    }

    pub fn as_serialized(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for PublicKeyBytes {
    fn eq(&self, other: &Self) -> bool {
        self.0[..] == other.0[..]
    }
}

impl Eq for PublicKeyBytes {}

impl Hash for PublicKeyBytes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0[..].hash(state);
    }
}

impl Default for PublicKeyBytes {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for PublicKeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", serde_utils::hex::encode(self.0))
    }
}

impl fmt::Display for PublicKeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", serde_utils::hex::encode(self.0))
    }
}

impl Encode for PublicKeyBytes {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        PUBLIC_KEY_BYTES_LEN
    }

    fn ssz_bytes_len(&self) -> usize {
        PUBLIC_KEY_BYTES_LEN
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.0)
    }
}

impl Decode for PublicKeyBytes {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        PUBLIC_KEY_BYTES_LEN
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_bytes(bytes)
    }
}

impl Serialize for PublicKeyBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&serde_utils::hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for PublicKeyBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = deserializer.deserialize_str(serde_utils::hex::PrefixedHexVisitor)?;
        Self::from_bytes(&bytes).map_err(|e| serde::de::Error::custom(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssz::{Decode, Encode};

    fn test_key() -> PublicKeyBytes {
        let mut bytes = [0; PUBLIC_KEY_BYTES_LEN];
        bytes[0] = 0xc0;
        bytes[47] = 0x0d;
        PublicKeyBytes::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn ssz_round_trip() {
        let original = test_key();
        let bytes = original.as_ssz_bytes();
        assert_eq!(bytes.len(), PUBLIC_KEY_BYTES_LEN);
        assert_eq!(PublicKeyBytes::from_ssz_bytes(&bytes).unwrap(), original);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(PublicKeyBytes::from_bytes(&[0; 47]).is_err());
        assert!(PublicKeyBytes::from_bytes(&[0; 49]).is_err());
    }
}
