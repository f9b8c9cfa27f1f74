//! Subscriber entrypoints: registration with an initial deposit, top-ups,
//! and the pause flag.

use crate::price;
use crate::provider::store_provider;
use crate::queries;
use crate::types::{
    DataKey, Error, FundsDepositedEvent, Subscriber, SubscriberPlan, SubscriberRegisteredEvent,
    MAX_PROVIDERS, PERSISTENT_BUMP_LEDGERS,
};
use soroban_sdk::{token, Address, Env, Symbol, Vec};

/// Write a subscriber record and keep its TTL from expiring.
fn store_subscriber(env: &Env, subscriber_id: u32, subscriber: &Subscriber) {
    let key = DataKey::Subscriber(subscriber_id);
    env.storage().persistent().set(&key, subscriber);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

/// Pull `amount` from `from` into the contract's custody.
fn transfer_in(env: &Env, from: &Address, amount: i128) -> Result<(), Error> {
    let token_addr: Address = env
        .storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)?;
    let client = token::Client::new(env, &token_addr);
    if client
        .try_transfer(from, &env.current_contract_address(), &amount)
        .is_err()
    {
        return Err(Error::ExternalTransferFailed);
    }
    Ok(())
}

/// Register a subscriber, pulling the initial deposit into custody and
/// attaching it to `provider_ids`.
///
/// Every referenced provider must exist and be accepting subscribers.
/// Duplicate ids are tolerated; each occurrence counts once more on that
/// provider. A failed deposit transfer aborts the whole registration.
///
/// # Errors
/// * `InvalidAmount` - `deposit_amount` is zero or negative.
/// * `CapacityExceeded` - `provider_ids` is not strictly below the provider
///   cap.
/// * `NotFound` / `ProviderNotActive` - a referenced provider is missing or
///   deactivated.
/// * `DepositTooLow` - the normalized deposit's USD value does not exceed
///   the minimum.
pub fn do_register_subscriber(
    env: &Env,
    owner: Address,
    provider_ids: Vec<u32>,
    deposit_amount: i128,
) -> Result<u32, Error> {
    owner.require_auth();

    if deposit_amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if provider_ids.len() >= MAX_PROVIDERS {
        return Err(Error::CapacityExceeded);
    }
    for provider_id in provider_ids.iter() {
        let provider = queries::get_provider(env, provider_id)?;
        if !provider.is_active {
            return Err(Error::ProviderNotActive);
        }
    }
    price::require_deposit_meets_minimum(env, deposit_amount)?;

    transfer_in(env, &owner, deposit_amount)?;

    let subscriber_id = queries::subscriber_count(env)
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    let subscriber = Subscriber {
        owner: owner.clone(),
        balance: deposit_amount,
        is_paused: false,
        subscribed_providers: provider_ids.clone(),
        plan: SubscriberPlan::Standard,
    };
    store_subscriber(env, subscriber_id, &subscriber);
    env.storage()
        .instance()
        .set(&DataKey::SubscriberCount, &subscriber_id);

    for provider_id in provider_ids.iter() {
        let mut provider = queries::get_provider(env, provider_id)?;
        provider.subscriber_count = provider
            .subscriber_count
            .checked_add(1)
            .ok_or(Error::Overflow)?;
        store_provider(env, provider_id, &provider);
    }

    env.events().publish(
        (Symbol::new(env, "subscriber_registered"), subscriber_id),
        SubscriberRegisteredEvent {
            owner,
            deposit: deposit_amount,
        },
    );
    Ok(subscriber_id)
}

/// Top up a subscriber's prefunded balance.
///
/// No ownership check and no minimum: third parties may fund any
/// subscriber, even a paused one. The transfer-in happens before the
/// balance is credited.
pub fn do_deposit_funds(
    env: &Env,
    subscriber_id: u32,
    from: Address,
    amount: i128,
) -> Result<(), Error> {
    from.require_auth();

    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    let mut subscriber = queries::get_subscriber(env, subscriber_id)?;

    transfer_in(env, &from, amount)?;

    subscriber.balance = subscriber
        .balance
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    store_subscriber(env, subscriber_id, &subscriber);

    env.events().publish(
        (Symbol::new(env, "funds_deposited"), subscriber_id),
        FundsDepositedEvent { from, amount },
    );
    Ok(())
}

/// Set the subscriber-level opt-out flag.
pub fn do_pause(env: &Env, subscriber_id: u32, owner: Address) -> Result<(), Error> {
    set_paused(env, subscriber_id, owner, true)
}

/// Clear the subscriber-level opt-out flag.
pub fn do_resume(env: &Env, subscriber_id: u32, owner: Address) -> Result<(), Error> {
    set_paused(env, subscriber_id, owner, false)
}

fn set_paused(env: &Env, subscriber_id: u32, owner: Address, paused: bool) -> Result<(), Error> {
    owner.require_auth();

    let mut subscriber = queries::get_subscriber(env, subscriber_id)?;
    if owner != subscriber.owner {
        return Err(Error::Unauthorized);
    }
    subscriber.is_paused = paused;
    store_subscriber(env, subscriber_id, &subscriber);
    Ok(())
}
