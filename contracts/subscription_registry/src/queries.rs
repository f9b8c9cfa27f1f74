//! Read-only accessors. None of these mutate state; the mutating modules
//! share the record loaders below.

use crate::price;
use crate::types::{DataKey, Error, Provider, ProviderState, Subscriber, SubscriberState};
use soroban_sdk::{BytesN, Env};

/// Load a provider record or fail with `NotFound`. Id 0 is never bound.
pub fn get_provider(env: &Env, provider_id: u32) -> Result<Provider, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Provider(provider_id))
        .ok_or(Error::NotFound)
}

/// Load a subscriber record or fail with `NotFound`.
pub fn get_subscriber(env: &Env, subscriber_id: u32) -> Result<Subscriber, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Subscriber(subscriber_id))
        .ok_or(Error::NotFound)
}

/// Total providers ever registered; also the highest allocated id.
pub fn provider_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ProviderCount)
        .unwrap_or(0)
}

/// Total subscribers ever registered; also the highest allocated id.
pub fn subscriber_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::SubscriberCount)
        .unwrap_or(0)
}

pub fn get_provider_state(env: &Env, provider_id: u32) -> Result<ProviderState, Error> {
    let provider = get_provider(env, provider_id)?;
    Ok(ProviderState {
        subscriber_count: provider.subscriber_count,
        fee: provider.fee,
        owner: provider.owner,
        balance: provider.balance,
        is_active: provider.is_active,
    })
}

pub fn get_provider_earnings(env: &Env, provider_id: u32) -> Result<i128, Error> {
    Ok(get_provider(env, provider_id)?.earnings)
}

pub fn is_provider_active(env: &Env, provider_id: u32) -> Result<bool, Error> {
    Ok(get_provider(env, provider_id)?.is_active)
}

pub fn get_subscriber_state(env: &Env, subscriber_id: u32) -> Result<SubscriberState, Error> {
    let subscriber = get_subscriber(env, subscriber_id)?;
    Ok(SubscriberState {
        owner: subscriber.owner,
        balance: subscriber.balance,
        plan: subscriber.plan,
        is_paused: subscriber.is_paused,
    })
}

pub fn is_subscriber_paused(env: &Env, subscriber_id: u32) -> Result<bool, Error> {
    Ok(get_subscriber(env, subscriber_id)?.is_paused)
}

/// USD value of a subscriber's raw balance at the current oracle price.
/// The balance is not normalized, so the result carries the token's
/// fractional precision.
pub fn get_subscriber_deposit_value_usd(env: &Env, subscriber_id: u32) -> Result<i128, Error> {
    let subscriber = get_subscriber(env, subscriber_id)?;
    subscriber
        .balance
        .checked_mul(price::unit_price(env)?)
        .ok_or(Error::Overflow)
}

/// The provider id a registration key was burned for, or 0 if unbound.
pub fn get_provider_id_for_key(env: &Env, key: BytesN<32>) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::ProviderKey(key))
        .unwrap_or(0)
}
