//! Coin denominations and fixed-size coin count tables
//!
//! Every amount in the system is expressed in minor currency units and every
//! coin is one of five fixed denominations. Coin counts are kept in a table
//! indexed by denomination rank, so a table always carries exactly the full
//! denomination set.

use super::error::VendingError;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Number of legal denominations
pub const DENOMINATION_COUNT: usize = 5;

/// A legal coin face value
///
/// Variants are declared in ascending order; the discriminant is the rank
/// used to index a [`CoinCounts`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Denomination {
    Five,
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl Denomination {
    /// All denominations, smallest first
    pub const ALL: [Denomination; DENOMINATION_COUNT] = [
        Denomination::Five,
        Denomination::Ten,
        Denomination::Twenty,
        Denomination::Fifty,
        Denomination::Hundred,
    ];

    /// All denominations, largest first (the allocation walk order)
    pub const DESCENDING: [Denomination; DENOMINATION_COUNT] = [
        Denomination::Hundred,
        Denomination::Fifty,
        Denomination::Twenty,
        Denomination::Ten,
        Denomination::Five,
    ];

    /// The smallest denomination; every price must be a multiple of it
    pub const SMALLEST: Denomination = Denomination::Five;

    /// Face value in minor units
    pub const fn value(self) -> u64 {
        match self {
            Denomination::Five => 5,
            Denomination::Ten => 10,
            Denomination::Twenty => 20,
            Denomination::Fifty => 50,
            Denomination::Hundred => 100,
        }
    }

    /// Position in the ascending table
    pub const fn rank(self) -> usize {
        self as usize
    }
}

impl TryFrom<u64> for Denomination {
    type Error = VendingError;

    fn try_from(coin: u64) -> Result<Self, Self::Error> {
        match coin {
            5 => Ok(Denomination::Five),
            10 => Ok(Denomination::Ten),
            20 => Ok(Denomination::Twenty),
            50 => Ok(Denomination::Fifty),
            100 => Ok(Denomination::Hundred),
            other => Err(VendingError::invalid_denomination(other)),
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Coin count per denomination
///
/// Used both for a buyer's holdings and for the transient manifests produced
/// by allocation and reset. Cannot be missing a denomination key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CoinCounts([u64; DENOMINATION_COUNT]);

impl CoinCounts {
    /// A table with every count at zero
    pub const fn zero() -> Self {
        CoinCounts([0; DENOMINATION_COUNT])
    }

    /// Build a table from `(denomination, count)` pairs; repeated denominations add up
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Denomination, u64)>,
    {
        let mut counts = Self::zero();
        for (denomination, count) in pairs {
            counts[denomination] += count;
        }
        counts
    }

    /// Iterate `(denomination, count)` smallest denomination first
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u64)> + '_ {
        Denomination::ALL.iter().map(move |&d| (d, self[d]))
    }

    /// Total value of the coins in minor units
    ///
    /// Saturates at `u64::MAX`; holdings never get there because credits
    /// are checked.
    pub fn value(&self) -> u64 {
        self.iter().fold(0u64, |total, (d, count)| {
            total.saturating_add(count.saturating_mul(d.value()))
        })
    }

    /// Total value of the coins of the given denominations only
    pub fn value_of(&self, denominations: &[Denomination]) -> u64 {
        denominations.iter().fold(0u64, |total, &d| {
            total.saturating_add(self[d].saturating_mul(d.value()))
        })
    }

    /// Number of coins across all denominations
    pub fn coin_count(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&count| count == 0)
    }

    /// Raw counts in ascending denomination order
    pub fn as_array(&self) -> [u64; DENOMINATION_COUNT] {
        self.0
    }
}

impl Index<Denomination> for CoinCounts {
    type Output = u64;

    fn index(&self, denomination: Denomination) -> &u64 {
        &self.0[denomination.rank()]
    }
}

impl IndexMut<Denomination> for CoinCounts {
    fn index_mut(&mut self, denomination: Denomination) -> &mut u64 {
        &mut self.0[denomination.rank()]
    }
}

impl From<[u64; DENOMINATION_COUNT]> for CoinCounts {
    fn from(counts: [u64; DENOMINATION_COUNT]) -> Self {
        CoinCounts(counts)
    }
}

impl fmt::Display for CoinCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (denomination, count) in self.iter().filter(|(_, c)| *c > 0) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", denomination, count)?;
            first = false;
        }
        write!(f, "}}")
    }
}
