//! Required-fee derivation and the global/local combiner.
//!
//! The global requirement comes from governance gas prices (falling back to
//! a zero fee in the bond denomination), the local one from the node's own
//! gas prices. Both are scaled by the gas limit and rounded up before being
//! merged into one combined requirement.

use std::collections::{BTreeMap, BTreeSet};

use feegate_types::{Coin, Coins, Dec, DecCoin, DecCoins};
use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::FeeError;
use crate::source::StakingConfig;

// =============================================================================
// Deriver
// =============================================================================

/// Scale each price by `gas_limit`: `fee = ceil(price * gas_limit)`.
///
/// Denomination order is preserved; the result is re-sorted so the sorted
/// invariant holds even for unsorted input.
pub fn required_fees(prices: &DecCoins, gas_limit: u64) -> Coins {
    Coins::sorted(
        prices
            .iter()
            .map(|p| Coin::new(p.denom.clone(), p.amount.mul_int(gas_limit).ceil()))
            .collect(),
    )
}

/// Zero price in the bond denomination, used when no global floor is set.
pub fn default_zero_global_fee<S>(staking: &S) -> Result<DecCoins, FeeError>
where
    S: StakingConfig + ?Sized,
{
    let bond_denom = staking
        .bond_denom()
        .map_err(FeeError::EmptyBaseDenomination)?;
    if bond_denom.is_empty() {
        return Err(FeeError::EmptyBaseDenomination(
            "empty staking bond denomination".to_string(),
        ));
    }
    Ok(vec![DecCoin::new(bond_denom, Dec::zero())].into())
}

/// Global required fees for `gas_limit`, or a zero bond-denom fee when the
/// global price vector is empty.
pub fn global_required_fees<S>(
    global_prices: DecCoins,
    staking: &S,
    gas_limit: u64,
) -> Result<Coins, FeeError>
where
    S: StakingConfig + ?Sized,
{
    let prices = if global_prices.is_empty() {
        default_zero_global_fee(staking)?
    } else {
        global_prices
    };
    Ok(required_fees(&prices, gas_limit))
}

// =============================================================================
// Combiner
// =============================================================================

/// Split a requirement into its non-zero coins and the set of zero-rated
/// denominations.
pub fn split_zero_fees(fees: &Coins) -> (Coins, BTreeSet<String>) {
    let mut non_zero = Vec::with_capacity(fees.len());
    let mut zero_denoms = BTreeSet::new();

    for coin in fees {
        if coin.is_zero() {
            zero_denoms.insert(coin.denom.clone());
        } else {
            non_zero.push(coin.clone());
        }
    }
    (Coins::sorted(non_zero), zero_denoms)
}

/// Merge the global and local requirements.
///
/// - An empty global requirement yields an empty result; the local floor
///   never stands in for an absent global policy.
/// - Denominations known to the global requirement take the higher of the
///   two amounts.
/// - Local-only denominations are ignored.
/// - Globally zero-rated denominations stay at zero whatever the local
///   amount.
pub fn combined_fee_requirement(global: &Coins, local: &Coins) -> Coins {
    if global.is_empty() {
        return Coins::default();
    }

    let (non_zero_global, zero_denoms) = split_zero_fees(global);

    let mut combined: BTreeMap<String, BigUint> = non_zero_global
        .into_iter()
        .map(|c| (c.denom, c.amount))
        .collect();

    for coin in local {
        if zero_denoms.contains(&coin.denom) {
            continue;
        }
        if let Some(amount) = combined.get_mut(&coin.denom) {
            if coin.amount > *amount {
                *amount = coin.amount.clone();
            }
        }
    }

    for denom in zero_denoms {
        combined.entry(denom).or_insert_with(BigUint::zero);
    }

    Coins::sorted(
        combined
            .into_iter()
            .map(|(denom, amount)| Coin::new(denom, amount))
            .collect(),
    )
}

// =============================================================================
// Fee splitting
// =============================================================================

/// Split attached fees into coins outside and inside `zero_denoms`.
pub fn split_coins_by_denoms(fees: &Coins, zero_denoms: &BTreeSet<String>) -> (Coins, Coins) {
    let (zero, non_zero): (Vec<Coin>, Vec<Coin>) = fees
        .iter()
        .cloned()
        .partition(|c| zero_denoms.contains(&c.denom));
    (Coins::sorted(non_zero), Coins::sorted(zero))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(s: &str) -> Coins {
        Coins::sorted(
            s.split(',')
                .filter(|p| !p.is_empty())
                .map(|p| p.parse().unwrap())
                .collect(),
        )
    }

    fn prices(s: &str) -> DecCoins {
        s.parse().unwrap()
    }

    struct Bond(Result<String, String>);

    impl StakingConfig for Bond {
        fn bond_denom(&self) -> Result<String, String> {
            self.0.clone()
        }
    }

    // -------------------------------------------------------------------------
    // Deriver
    // -------------------------------------------------------------------------

    #[test]
    fn test_required_fees_rounds_up() {
        let fees = required_fees(&prices("0.0025uatom,0.3photon,1stake"), 7);
        // 0.0175 -> 1, 2.1 -> 3, 7 -> 7
        assert_eq!(fees.to_string(), "3photon,7stake,1uatom");
    }

    #[test]
    fn test_required_fees_zero_gas() {
        let fees = required_fees(&prices("0.5uatom,2stake"), 0);
        assert_eq!(fees, coins("0stake,0uatom"));
    }

    #[test]
    fn test_required_fees_preserves_order() {
        let p = prices("1atom,0.01photon,3stake");
        let fees = required_fees(&p, 250);
        let denoms: Vec<_> = fees.denoms().collect();
        assert_eq!(denoms, ["atom", "photon", "stake"]);
        for (price, fee) in p.iter().zip(fees.iter()) {
            assert_eq!(fee.amount, price.amount.mul_int(250).ceil());
        }
    }

    #[test]
    fn test_global_fallback_to_bond_denom() {
        let staking = Bond(Ok("uatom".into()));
        let fees = global_required_fees(DecCoins::default(), &staking, 200_000).unwrap();
        assert_eq!(fees, coins("0uatom"));
    }

    #[test]
    fn test_global_uses_configured_prices() {
        let staking = Bond(Err("unreachable".into()));
        let fees = global_required_fees(prices("0.01uatom"), &staking, 1_000).unwrap();
        assert_eq!(fees, coins("10uatom"));
    }

    #[test]
    fn test_global_fallback_empty_bond_denom() {
        let err = global_required_fees(DecCoins::default(), &Bond(Ok(String::new())), 1).unwrap_err();
        assert!(matches!(err, FeeError::EmptyBaseDenomination(_)));

        let err = global_required_fees(DecCoins::default(), &Bond(Err("store offline".into())), 1)
            .unwrap_err();
        assert_eq!(err, FeeError::EmptyBaseDenomination("store offline".into()));
    }

    // -------------------------------------------------------------------------
    // Combiner
    // -------------------------------------------------------------------------

    #[test]
    fn test_combined_fee_requirement() {
        let cases = [
            ("global empty, local empty", "", "", ""),
            ("global empty, local nonempty", "", "1photon,2stake", ""),
            ("same vectors", "1photon,2stake", "1photon,2stake", "1photon,2stake"),
            ("local empty", "1photon,2stake", "", "1photon,2stake"),
            ("local all higher", "1photon,2stake", "10photon,20stake", "10photon,20stake"),
            ("local one higher", "1photon,2stake", "10photon,2stake", "10photon,2stake"),
            ("no overlap", "1photon,2stake", "1Newphoton,1Newstake", "1photon,2stake"),
            ("partial overlap, local lower", "1photon,2stake", "1Newphoton,1photon", "1photon,2stake"),
            ("partial overlap, local higher", "1photon,2stake", "1Newphoton,10photon", "10photon,2stake"),
            ("global zero, local overlapping zero", "1photon,0stake", "1photon,0stake", "1photon,0stake"),
            ("global zero, local non-overlapping zero", "1photon,0stake", "1photon,0quark", "1photon,0stake"),
            ("all zero both", "0photon,0stake", "0photon,0stake", "0photon,0stake"),
            ("local lower than global", "10photon,20stake", "1photon,2stake", "10photon,20stake"),
        ];

        for (name, global, local, expected) in cases {
            let combined = combined_fee_requirement(&coins(global), &coins(local));
            assert_eq!(combined, coins(expected), "{name}");
        }
    }

    #[test]
    fn test_zero_rated_global_denom_wins_over_local() {
        // global zero-rates stake; a non-zero local stake price cannot raise it
        let combined = combined_fee_requirement(&coins("1photon,0stake"), &coins("1photon,2stake"));
        assert_eq!(combined, coins("1photon,0stake"));

        let combined = combined_fee_requirement(&coins("0photon,0stake"), &coins("1photon,0quark"));
        assert_eq!(combined, coins("0photon,0stake"));
    }

    #[test]
    fn test_combine_is_idempotent() {
        for r in ["1atom,2stake", "0atom,5stake", "0atom,0stake", "7uatom"] {
            let r = coins(r);
            assert_eq!(combined_fee_requirement(&r, &r), r);
        }
    }

    #[test]
    fn test_combine_is_monotonic_in_local() {
        let global = coins("5atom,0photon,2stake");
        let mut previous = BigUint::zero();
        for local_atom in [0u32, 1, 5, 6, 100] {
            let local = coins(&format!("{local_atom}atom,3photon"));
            let combined = combined_fee_requirement(&global, &local);
            let atom = combined.amount_of("atom");
            assert!(atom >= previous);
            assert_eq!(combined.amount_of("photon"), BigUint::zero());
            previous = atom;
        }
        assert_eq!(previous, BigUint::from(100u32));
    }

    #[test]
    fn test_split_zero_fees() {
        let cases = [
            ("", "", vec![]),
            ("1photon,1uatom", "1photon,1uatom", vec![]),
            ("0photon,0uatom", "", vec!["photon", "uatom"]),
            ("0photon,1uatom", "1uatom", vec!["photon"]),
        ];

        for (fees, non_zero, zero) in cases {
            let (got_non_zero, got_zero) = split_zero_fees(&coins(fees));
            assert_eq!(got_non_zero, coins(non_zero), "{fees}");
            let zero: BTreeSet<String> = zero.into_iter().map(String::from).collect();
            assert_eq!(got_zero, zero, "{fees}");
        }
    }

    #[test]
    fn test_split_coins_by_denoms() {
        let fees = coins("1photon,1uatom");
        let set = |denoms: &[&str]| -> BTreeSet<String> {
            denoms.iter().map(|d| d.to_string()).collect()
        };

        let cases = [
            ("no zero denoms", set(&[]), "1photon,1uatom", ""),
            ("unrelated zero denom", set(&["stake"]), "1photon,1uatom", ""),
            ("split", set(&["uatom"]), "1photon", "1uatom"),
            ("all zero-rated", set(&["uatom", "photon"]), "", "1photon,1uatom"),
        ];

        for (name, zero_denoms, non_zero, zero) in cases {
            let (got_non_zero, got_zero) = split_coins_by_denoms(&fees, &zero_denoms);
            assert_eq!(got_non_zero, coins(non_zero), "{name}");
            assert_eq!(got_zero, coins(zero), "{name}");
        }

        let (a, b) = split_coins_by_denoms(&Coins::default(), &set(&["uatom"]));
        assert!(a.is_empty() && b.is_empty());
    }
}
