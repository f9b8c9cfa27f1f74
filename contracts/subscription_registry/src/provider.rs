//! Provider entrypoints: registration behind a one-time key, removal with
//! payout, earnings accrual, and the balance sweep.
//!
//! **PRs that only change provider behavior should edit this file only.**

use crate::price;
use crate::queries;
use crate::types::{
    DataKey, Error, Provider, ProviderFundsTransferredEvent, ProviderRegisteredEvent,
    ProviderRemovedEvent, ProviderWithdrawalEvent, BILLING_INTERVAL, MAX_PROVIDERS,
    PERSISTENT_BUMP_LEDGERS,
};
use soroban_sdk::{token, Address, BytesN, Env, Symbol};

/// Write a provider record and keep its TTL from expiring.
pub fn store_provider(env: &Env, provider_id: u32, provider: &Provider) {
    let key = DataKey::Provider(provider_id);
    env.storage().persistent().set(&key, provider);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

/// Pay `amount` out of the contract's custody to `to`.
fn transfer_out(env: &Env, to: &Address, amount: i128) -> Result<(), Error> {
    let token_addr: Address = env
        .storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)?;
    let client = token::Client::new(env, &token_addr);
    if client
        .try_transfer(&env.current_contract_address(), to, &amount)
        .is_err()
    {
        return Err(Error::ExternalTransferFailed);
    }
    Ok(())
}

/// Register a provider under a one-time `key` with a recurring `fee`.
///
/// All validation runs before any state is touched; consuming the key and
/// allocating the id is the final step. The key binding is never removed,
/// even after the provider is deactivated.
///
/// # Errors
/// * `InvalidAmount` - `fee` is zero or negative.
/// * `CapacityExceeded` - the provider cap is reached.
/// * `DuplicateKey` - `key` has already been consumed.
/// * `FeeTooLow` - `fee * unit_price` is below the registration minimum.
pub fn do_register_provider(
    env: &Env,
    owner: Address,
    key: BytesN<32>,
    fee: i128,
) -> Result<u32, Error> {
    owner.require_auth();

    if fee <= 0 {
        return Err(Error::InvalidAmount);
    }
    let count = queries::provider_count(env);
    if count >= MAX_PROVIDERS {
        return Err(Error::CapacityExceeded);
    }
    let key_index = DataKey::ProviderKey(key);
    if env.storage().persistent().has(&key_index) {
        return Err(Error::DuplicateKey);
    }
    price::require_fee_meets_minimum(env, fee)?;

    let provider_id = count + 1;
    let provider = Provider {
        owner: owner.clone(),
        fee,
        is_active: true,
        balance: 0,
        earnings: 0,
        last_withdraw_time: env.ledger().timestamp(),
        subscriber_count: 0,
    };
    store_provider(env, provider_id, &provider);
    env.storage().persistent().set(&key_index, &provider_id);
    env.storage().persistent().extend_ttl(
        &key_index,
        PERSISTENT_BUMP_LEDGERS,
        PERSISTENT_BUMP_LEDGERS,
    );
    env.storage()
        .instance()
        .set(&DataKey::ProviderCount, &provider_id);

    env.events().publish(
        (Symbol::new(env, "provider_registered"), provider_id),
        ProviderRegisteredEvent { owner, fee },
    );
    Ok(provider_id)
}

/// Deactivate a provider, paying any residual balance out to the owner.
///
/// The record, its earnings history, and the key binding all survive; only
/// `change_provider_state` can reactivate. Internal state is settled before
/// the payout, and a failed payout rolls the whole call back.
pub fn do_remove_provider(env: &Env, provider_id: u32, owner: Address) -> Result<(), Error> {
    owner.require_auth();

    let mut provider = queries::get_provider(env, provider_id)?;
    if owner != provider.owner {
        return Err(Error::Unauthorized);
    }

    let refund = provider.balance;
    provider.balance = 0;
    provider.is_active = false;
    store_provider(env, provider_id, &provider);

    if refund > 0 {
        transfer_out(env, &owner, refund)?;
    }

    env.events().publish(
        (Symbol::new(env, "provider_removed"), provider_id),
        ProviderRemovedEvent { owner, refund },
    );
    Ok(())
}

/// Accrue one billing cycle of earnings into the provider's balance.
///
/// `amount = subscriber_count * fee`. No tokens move here; the sweep is a
/// separate step so "earnings accrued" and "funds left custody" stay
/// distinguishable.
///
/// # Errors
/// * `Unauthorized` - caller is not the provider's owner.
/// * `ProviderNotActive` - an inactive provider accrues nothing further.
/// * `WithdrawalTooSoon` - less than one full interval since the last
///   accrual. Exactly one interval is sufficient.
/// * `NoFundsDue` - nothing owed this cycle.
pub fn do_withdraw_earnings(env: &Env, provider_id: u32, owner: Address) -> Result<(), Error> {
    owner.require_auth();

    let mut provider = queries::get_provider(env, provider_id)?;
    if owner != provider.owner {
        return Err(Error::Unauthorized);
    }
    if !provider.is_active {
        return Err(Error::ProviderNotActive);
    }

    let now = env.ledger().timestamp();
    let next_allowed = provider
        .last_withdraw_time
        .checked_add(BILLING_INTERVAL)
        .ok_or(Error::Overflow)?;
    if now < next_allowed {
        return Err(Error::WithdrawalTooSoon);
    }

    let amount = (provider.subscriber_count as i128)
        .checked_mul(provider.fee)
        .ok_or(Error::Overflow)?;
    if amount == 0 {
        return Err(Error::NoFundsDue);
    }

    provider.balance = provider.balance.checked_add(amount).ok_or(Error::Overflow)?;
    provider.earnings = provider
        .earnings
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    provider.last_withdraw_time = now;
    store_provider(env, provider_id, &provider);

    // USD value is computed at notification time, not when the accrual was
    // decided.
    let usd_value = amount
        .checked_mul(price::unit_price(env)?)
        .ok_or(Error::Overflow)?;
    env.events().publish(
        (Symbol::new(env, "provider_withdrawal"), provider_id),
        ProviderWithdrawalEvent {
            owner,
            amount,
            usd_value,
        },
    );
    Ok(())
}

/// Sweep the provider's accrued balance out to the owner's wallet.
///
/// Zeroes the balance first; the token transfer is the final effect, and a
/// failure rolls the zeroing back. Earnings are untouched.
pub fn do_transfer_funds(env: &Env, provider_id: u32, owner: Address) -> Result<(), Error> {
    owner.require_auth();

    let mut provider = queries::get_provider(env, provider_id)?;
    if owner != provider.owner {
        return Err(Error::Unauthorized);
    }

    let amount = provider.balance;
    if amount == 0 {
        return Err(Error::NoFundsDue);
    }

    provider.balance = 0;
    store_provider(env, provider_id, &provider);
    transfer_out(env, &owner, amount)?;

    env.events().publish(
        (Symbol::new(env, "provider_funds_transferred"), provider_id),
        ProviderFundsTransferredEvent { owner, amount },
    );
    Ok(())
}
