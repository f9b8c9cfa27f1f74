//! Price gate: scales raw oracle readings into a USD-per-unit price and
//! enforces the registration minimums.
//!
//! **PRs that only change price scaling or thresholds should edit this file only.**

use crate::types::{
    DataKey, Error, MINIMUM_DEPOSIT_USD, MINIMUM_FEE_USD, ORACLE_PRECISION, TOKEN_PRECISION,
};
use soroban_sdk::{contractclient, contracttype, Address, Env};

/// A single oracle reading: the raw price plus the ledger time it was set.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    /// USD price of one token unit, carrying [`ORACLE_PRECISION`] fractional
    /// digits.
    pub price: i128,
    pub timestamp: u64,
}

/// The external price-feed interface the registry consumes. Pull-only.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    /// The feed's latest reading.
    fn lastprice(env: Env) -> PriceData;
}

/// USD price of one whole token unit, as an integer.
///
/// Collapses the oracle's fixed fractional precision with truncating
/// division. The reading is trusted as-is: no staleness or sanity check is
/// applied.
pub fn unit_price(env: &Env) -> Result<i128, Error> {
    let oracle: Address = env
        .storage()
        .instance()
        .get(&DataKey::Oracle)
        .ok_or(Error::NotInitialized)?;
    let reading = PriceFeedClient::new(env, &oracle).lastprice();
    Ok(reading.price / ORACLE_PRECISION)
}

/// Gate for provider registration: `fee * unit_price >= MINIMUM_FEE_USD`.
pub fn require_fee_meets_minimum(env: &Env, fee: i128) -> Result<(), Error> {
    let value = fee.checked_mul(unit_price(env)?).ok_or(Error::Overflow)?;
    if value < MINIMUM_FEE_USD {
        return Err(Error::FeeTooLow);
    }
    Ok(())
}

/// Gate for subscriber registration. The deposit is normalized to whole
/// token units first (truncating), so the bound is strict:
/// `normalized * unit_price > MINIMUM_DEPOSIT_USD`.
pub fn require_deposit_meets_minimum(env: &Env, deposit_amount: i128) -> Result<(), Error> {
    let normalized = deposit_amount / TOKEN_PRECISION;
    let value = normalized
        .checked_mul(unit_price(env)?)
        .ok_or(Error::Overflow)?;
    if value <= MINIMUM_DEPOSIT_USD {
        return Err(Error::DepositTooLow);
    }
    Ok(())
}
