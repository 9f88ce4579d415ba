//! The `Slot` and `Epoch` types are defined as new types over u64 to enforce type-safety between
//! the two concepts.
//!
//! Both types support conversion, comparison and math operations with `u64`, but specifically not
//! with each other: crossing between the two requires an explicit conversion through
//! `Slot::epoch` or `Epoch::start_slot`/`Epoch::end_slot`, which always carries the
//! slots-per-epoch constant.
//!
//! All math operations on `Slot` and `Epoch` are saturating, they never wrap.

use serde_derive::{Deserialize, Serialize};

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(#[serde(with = "serde_utils::quoted_u64")] u64);

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Epoch(#[serde(with = "serde_utils::quoted_u64")] u64);

impl_common!(Slot);
impl_common!(Epoch);

impl Slot {
    pub const fn new(slot: u64) -> Slot {
        Slot(slot)
    }

    /// The epoch this slot belongs to.
    ///
    /// `slots_per_epoch` must be non-zero.
    pub fn epoch(self, slots_per_epoch: u64) -> Epoch {
        Epoch::new(self.0 / slots_per_epoch)
    }

    pub fn max_value() -> Slot {
        Slot(u64::MAX)
    }
}

impl Epoch {
    pub const fn new(epoch: u64) -> Epoch {
        Epoch(epoch)
    }

    pub fn max_value() -> Epoch {
        Epoch(u64::MAX)
    }

    /// The first slot in the epoch.
    pub fn start_slot(self, slots_per_epoch: u64) -> Slot {
        Slot::new(self.0.saturating_mul(slots_per_epoch))
    }

    /// The last slot in the epoch.
    pub fn end_slot(self, slots_per_epoch: u64) -> Slot {
        Slot::new(
            self.0
                .saturating_mul(slots_per_epoch)
                .saturating_add(slots_per_epoch.saturating_sub(1)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssz::{Decode, Encode};

    #[test]
    fn slot_to_epoch() {
        let slots_per_epoch = 8;

        assert_eq!(Slot::new(0).epoch(slots_per_epoch), Epoch::new(0));
        assert_eq!(Slot::new(7).epoch(slots_per_epoch), Epoch::new(0));
        assert_eq!(Slot::new(8).epoch(slots_per_epoch), Epoch::new(1));
        assert_eq!(Slot::new(25).epoch(slots_per_epoch), Epoch::new(3));
    }

    #[test]
    fn epoch_start_end() {
        let slots_per_epoch = 8;

        let epoch = Epoch::new(0);
        assert_eq!(epoch.start_slot(slots_per_epoch), Slot::new(0));
        assert_eq!(epoch.end_slot(slots_per_epoch), Slot::new(7));

        let epoch = Epoch::new(3);
        assert_eq!(epoch.start_slot(slots_per_epoch), Slot::new(24));
        assert_eq!(epoch.end_slot(slots_per_epoch), Slot::new(31));
    }

    #[test]
    fn end_slot_boundary() {
        let slots_per_epoch = 32;

        // The last epoch which can be represented by u64.
        let epoch = Epoch::new(u64::MAX / slots_per_epoch);
        assert_eq!(epoch.end_slot(slots_per_epoch), Slot::new(u64::MAX));
    }

    #[test]
    fn saturating_math() {
        assert_eq!(Slot::new(0) - 1, Slot::new(0));
        assert_eq!(Slot::new(0).saturating_sub(1_u64), Slot::new(0));
        assert_eq!(Slot::max_value() + 1, Slot::max_value());
        assert_eq!(Epoch::max_value() + 1, Epoch::max_value());
    }

    #[test]
    fn max_epoch_ssz_round_trip() {
        let max_epoch = Epoch::max_value();
        assert_eq!(
            &max_epoch.as_ssz_bytes(),
            &[255, 255, 255, 255, 255, 255, 255, 255]
        );
        assert_eq!(
            max_epoch,
            Epoch::from_ssz_bytes(&max_epoch.as_ssz_bytes()).unwrap()
        );
    }

    #[test]
    fn quoted_u64_serde() {
        let slot = Slot::new(42);
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, "\"42\"");
        assert_eq!(serde_json::from_str::<Slot>(&json).unwrap(), slot);
    }
}
