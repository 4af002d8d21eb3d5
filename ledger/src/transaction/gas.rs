//! Gas: the size-based cost unit of a transaction.
//!
//! One gas unit is one byte of transaction data. Gas times gas price gives
//! the fee. What a byte *should* cost is fee policy and lives outside this
//! crate.

use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Size-in-bytes cost unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gas(u64);

impl Gas {
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    /// Gas needed to carry `len` bytes.
    pub fn for_bytes(len: usize) -> Self {
        Self(len as u64)
    }

    /// The plain unsigned count, as it enters the identity hash.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Fee for this much gas at `price` per unit.
    pub fn fee_at(self, price: &BigUint) -> BigUint {
        price * BigUint::from(self.0)
    }
}

impl From<u64> for Gas {
    fn from(units: u64) -> Self {
        Self(units)
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} gas", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_gas_per_byte() {
        assert_eq!(Gas::for_bytes(512).as_u64(), 512);
    }

    #[test]
    fn fee_multiplies_price() {
        let fee = Gas::new(21_000).fee_at(&BigUint::from(3u32));
        assert_eq!(fee, BigUint::from(63_000u32));
    }

    #[test]
    fn fee_exceeds_u64_without_overflow() {
        let fee = Gas::new(u64::MAX).fee_at(&BigUint::from(u64::MAX));
        assert!(fee > BigUint::from(u64::MAX));
    }

    #[test]
    fn serde_is_transparent() {
        assert_eq!(serde_json::to_string(&Gas::new(42)).unwrap(), "42");
        assert_eq!(Gas::new(42).to_string(), "42 gas");
    }
}
