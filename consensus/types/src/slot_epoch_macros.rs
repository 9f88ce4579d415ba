/// Implements the shared behaviour of the `Slot` and `Epoch` newtypes: conversions to and from
/// `u64`/`usize`, saturating arithmetic, formatting and the SSZ/tree-hash encodings of a plain
/// `u64`.
macro_rules! impl_common {
    ($type: ident) => {
        impl $type {
            pub const fn as_u64(&self) -> u64 {
                self.0
            }

            pub fn as_usize(&self) -> usize {
                self.0 as usize
            }

            pub fn saturating_add<T: Into<u64>>(&self, other: T) -> $type {
                $type(self.0.saturating_add(other.into()))
            }

            pub fn saturating_sub<T: Into<u64>>(&self, other: T) -> $type {
                $type(self.0.saturating_sub(other.into()))
            }
        }

        impl From<u64> for $type {
            fn from(x: u64) -> $type {
                $type(x)
            }
        }

        impl From<usize> for $type {
            fn from(x: usize) -> $type {
                $type(x as u64)
            }
        }

        impl From<$type> for u64 {
            fn from(x: $type) -> u64 {
                x.0
            }
        }

        impl From<$type> for usize {
            fn from(x: $type) -> usize {
                x.0 as usize
            }
        }

        impl std::ops::Add<$type> for $type {
            type Output = $type;

            fn add(self, other: $type) -> $type {
                $type(self.0.saturating_add(other.0))
            }
        }

        impl std::ops::Add<u64> for $type {
            type Output = $type;

            fn add(self, other: u64) -> $type {
                $type(self.0.saturating_add(other))
            }
        }

        impl std::ops::AddAssign for $type {
            fn add_assign(&mut self, other: $type) {
                self.0 = self.0.saturating_add(other.0);
            }
        }

        impl std::ops::Sub<$type> for $type {
            type Output = $type;

            fn sub(self, other: $type) -> $type {
                $type(self.0.saturating_sub(other.0))
            }
        }

        impl std::ops::Sub<u64> for $type {
            type Output = $type;

            fn sub(self, other: u64) -> $type {
                $type(self.0.saturating_sub(other))
            }
        }

        impl std::ops::SubAssign for $type {
            fn sub_assign(&mut self, other: $type) {
                self.0 = self.0.saturating_sub(other.0);
            }
        }

        impl std::ops::Mul<u64> for $type {
            type Output = $type;

            fn mul(self, rhs: u64) -> $type {
                $type(self.0.saturating_mul(rhs))
            }
        }

        impl std::ops::Div<u64> for $type {
            type Output = $type;

            fn div(self, rhs: u64) -> $type {
                $type(self.0 / rhs)
            }
        }

        impl std::ops::Rem<u64> for $type {
            type Output = $type;

            fn rem(self, rhs: u64) -> $type {
                $type(self.0 % rhs)
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::fmt::Debug for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($type), self.0)
            }
        }

        impl ssz::Encode for $type {
            fn is_ssz_fixed_len() -> bool {
                <u64 as ssz::Encode>::is_ssz_fixed_len()
            }

            fn ssz_fixed_len() -> usize {
                <u64 as ssz::Encode>::ssz_fixed_len()
            }

            fn ssz_bytes_len(&self) -> usize {
                <u64 as ssz::Encode>::ssz_bytes_len(&self.0)
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                <u64 as ssz::Encode>::ssz_append(&self.0, buf)
            }
        }

        impl ssz::Decode for $type {
            fn is_ssz_fixed_len() -> bool {
                <u64 as ssz::Decode>::is_ssz_fixed_len()
            }

            fn ssz_fixed_len() -> usize {
                <u64 as ssz::Decode>::ssz_fixed_len()
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, ssz::DecodeError> {
                Ok($type(<u64 as ssz::Decode>::from_ssz_bytes(bytes)?))
            }
        }

        impl tree_hash::TreeHash for $type {
            fn tree_hash_type() -> tree_hash::TreeHashType {
                tree_hash::TreeHashType::Basic
            }

            fn tree_hash_packed_encoding(&self) -> tree_hash::PackedEncoding {
                <u64 as tree_hash::TreeHash>::tree_hash_packed_encoding(&self.0)
            }

            fn tree_hash_packing_factor() -> usize {
                <u64 as tree_hash::TreeHash>::tree_hash_packing_factor()
            }

            fn tree_hash_root(&self) -> tree_hash::Hash256 {
                <u64 as tree_hash::TreeHash>::tree_hash_root(&self.0)
            }
        }
    };
}
