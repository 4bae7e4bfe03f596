//! Exact-change allocation
//!
//! Decides which of a buyer's coins pay for a value and which coins come back
//! as change. The walk visits denominations from the largest down:
//!
//! - If more coins of the current denomination are held than the value needs,
//!   take exactly what is needed. When the smaller coins held cannot cover the
//!   remainder, take one extra coin of the current denomination together with
//!   every smaller coin ("breaking" the coin) and return the excess as change,
//!   built greedily from the smaller denominations. The walk ends there.
//! - Otherwise take every held coin of the current denomination and move on.
//!
//! Every function here is pure: it reads a snapshot and returns a new value.

use crate::types::{Allocation, CoinCounts, Denomination, VendingError};

/// Allocate `value` against `holdings`
///
/// Callers must ensure `value` does not exceed `holdings.value()` and is a
/// multiple of the smallest denomination.
///
/// # Returns
///
/// An [`Allocation`] whose debit never exceeds `holdings` for any
/// denomination and whose `debit - change` equals `value` exactly.
///
/// # Errors
///
/// `ChangeUnavailable` if the walk runs out of coins before the value is
/// settled, or the excess of a broken coin cannot be expressed in smaller
/// denominations. Neither happens when the preconditions hold.
pub fn allocate(holdings: &CoinCounts, value: u64) -> Result<Allocation, VendingError> {
    let mut debit = CoinCounts::zero();
    let mut remaining = value;

    for (position, &denomination) in Denomination::DESCENDING.iter().enumerate() {
        if remaining == 0 {
            break;
        }

        let face = denomination.value();
        let needed = remaining / face;
        let have = holdings[denomination];

        if have > needed {
            debit[denomination] = needed;
            remaining %= face;

            let smaller = &Denomination::DESCENDING[position + 1..];
            let smaller_value = holdings.value_of(smaller);
            if smaller_value < remaining {
                return break_coin(holdings, debit, denomination, smaller, remaining, value);
            }
        } else {
            debit[denomination] = have;
            remaining -= have * face;
        }
    }

    if remaining > 0 {
        return Err(VendingError::change_unavailable(value));
    }

    Ok(Allocation {
        debit,
        change: CoinCounts::zero(),
    })
}

/// Consume one more `denomination` coin plus all smaller coins and mint the excess
fn break_coin(
    holdings: &CoinCounts,
    mut debit: CoinCounts,
    denomination: Denomination,
    smaller: &[Denomination],
    remaining: u64,
    value: u64,
) -> Result<Allocation, VendingError> {
    debit[denomination] += 1;
    for &lower in smaller {
        debit[lower] = holdings[lower];
    }

    let excess = denomination.value() + holdings.value_of(smaller) - remaining;
    let change = mint_change(excess, smaller)
        .ok_or_else(|| VendingError::change_unavailable(value))?;

    Ok(Allocation { debit, change })
}

/// Express `value` greedily in `denominations` (largest first), with unlimited supply
///
/// Returns `None` when a remainder is left that no listed denomination divides.
pub fn mint_change(value: u64, denominations: &[Denomination]) -> Option<CoinCounts> {
    let mut change = CoinCounts::zero();
    let mut remaining = value;

    for &denomination in denominations {
        change[denomination] = remaining / denomination.value();
        remaining %= denomination.value();
    }

    (remaining == 0).then_some(change)
}
