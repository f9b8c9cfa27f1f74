#![no_std]

//! Two-sided subscription registry.
//!
//! Providers register a recurring fee behind a one-time 32-byte key;
//! subscribers pre-fund token balances and attach to providers. Registration
//! minimums are enforced in USD against an external price feed, earnings
//! accrue once per 30-day billing cycle, and a single admin controls
//! provider activation and the one-way upgrade lock.
//!
//! Every mutating entrypoint takes the acting address explicitly, requires
//! its authorization, and checks it against the stored owner (or admin). An
//! entrypoint that returns an error leaves no observable state change,
//! including any nested token transfer.

// ── Modules ──────────────────────────────────────────────────────────────────
mod admin;
mod price;
mod provider;
mod queries;
mod subscriber;
mod types;

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Vec};

// ── Re-exports (used by tests and external consumers) ────────────────────────
pub use price::{PriceData, PriceFeed, PriceFeedClient};
pub use types::*;

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct SubscriptionRegistry;

#[contractimpl]
impl SubscriptionRegistry {
    // ── Admin / Config ───────────────────────────────────────────────────

    /// Initialize the contract: set admin, token contract, and price feed.
    /// May only be called once.
    pub fn init(env: Env, admin: Address, token: Address, oracle: Address) -> Result<(), Error> {
        admin::do_init(&env, admin, token, oracle)
    }

    /// Get the current admin address.
    pub fn get_admin(env: Env) -> Result<Address, Error> {
        admin::get_admin(&env)
    }

    /// Toggle a provider's active flag. Admin only.
    pub fn change_provider_state(
        env: Env,
        admin: Address,
        provider_id: u32,
        active: bool,
    ) -> Result<(), Error> {
        admin::do_change_provider_state(&env, admin, provider_id, active)
    }

    /// Permanently disable future upgrades. Admin only; there is no unlock.
    pub fn lock_upgradeability(env: Env, admin: Address) -> Result<(), Error> {
        admin::do_lock_upgradeability(&env, admin)
    }

    /// Install new contract code. Admin only; fails with
    /// [`Error::UpgradesLocked`] once the lock has been set.
    pub fn upgrade(env: Env, admin: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
        admin::do_upgrade(&env, admin, new_wasm_hash)
    }

    /// Whether the upgrade lock has been set.
    pub fn is_upgrade_locked(env: Env) -> bool {
        admin::is_upgrade_locked(&env)
    }

    // ── Providers ────────────────────────────────────────────────────────

    /// Register a provider under a one-time `key` with a recurring `fee`.
    /// The key is permanently consumed; ids are sequential and never reused.
    pub fn register_provider(
        env: Env,
        owner: Address,
        key: BytesN<32>,
        fee: i128,
    ) -> Result<u32, Error> {
        provider::do_register_provider(&env, owner, key, fee)
    }

    /// Deactivate a provider, paying any residual balance to the owner.
    /// Owner only.
    pub fn remove_provider(env: Env, provider_id: u32, owner: Address) -> Result<(), Error> {
        provider::do_remove_provider(&env, provider_id, owner)
    }

    /// Accrue one billing cycle of earnings (`subscriber_count * fee`) into
    /// the provider's balance and emit the withdrawal notification. Owner
    /// only; at most once per 30-day interval.
    pub fn withdraw_provider_earnings(
        env: Env,
        provider_id: u32,
        owner: Address,
    ) -> Result<(), Error> {
        provider::do_withdraw_earnings(&env, provider_id, owner)
    }

    /// Sweep the provider's accrued balance out to the owner's wallet.
    /// Owner only.
    pub fn transfer_provider_funds(
        env: Env,
        provider_id: u32,
        owner: Address,
    ) -> Result<(), Error> {
        provider::do_transfer_funds(&env, provider_id, owner)
    }

    // ── Subscribers ──────────────────────────────────────────────────────

    /// Register a subscriber: pull `deposit_amount` into custody and attach
    /// to `provider_ids`.
    pub fn register_subscriber(
        env: Env,
        owner: Address,
        provider_ids: Vec<u32>,
        deposit_amount: i128,
    ) -> Result<u32, Error> {
        subscriber::do_register_subscriber(&env, owner, provider_ids, deposit_amount)
    }

    /// Top up a subscriber's balance. Anyone may fund any subscriber; no
    /// minimum applies.
    pub fn deposit_funds(
        env: Env,
        subscriber_id: u32,
        from: Address,
        amount: i128,
    ) -> Result<(), Error> {
        subscriber::do_deposit_funds(&env, subscriber_id, from, amount)
    }

    /// Set the subscriber's pause flag. Owner only.
    pub fn pause_subscriber(env: Env, subscriber_id: u32, owner: Address) -> Result<(), Error> {
        subscriber::do_pause(&env, subscriber_id, owner)
    }

    /// Clear the subscriber's pause flag. Owner only.
    pub fn resume_subscriber(env: Env, subscriber_id: u32, owner: Address) -> Result<(), Error> {
        subscriber::do_resume(&env, subscriber_id, owner)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Read a provider's public state.
    pub fn get_provider_state(env: Env, provider_id: u32) -> Result<ProviderState, Error> {
        queries::get_provider_state(&env, provider_id)
    }

    /// Cumulative lifetime earnings of a provider.
    pub fn get_provider_earnings(env: Env, provider_id: u32) -> Result<i128, Error> {
        queries::get_provider_earnings(&env, provider_id)
    }

    pub fn is_provider_active(env: Env, provider_id: u32) -> Result<bool, Error> {
        queries::is_provider_active(&env, provider_id)
    }

    /// Read a subscriber's public state.
    pub fn get_subscriber_state(env: Env, subscriber_id: u32) -> Result<SubscriberState, Error> {
        queries::get_subscriber_state(&env, subscriber_id)
    }

    pub fn is_subscriber_paused(env: Env, subscriber_id: u32) -> Result<bool, Error> {
        queries::is_subscriber_paused(&env, subscriber_id)
    }

    /// USD value of a subscriber's raw balance at the current oracle price.
    pub fn get_subscriber_deposit_value_usd(
        env: Env,
        subscriber_id: u32,
    ) -> Result<i128, Error> {
        queries::get_subscriber_deposit_value_usd(&env, subscriber_id)
    }

    /// USD price of one whole token unit at the current oracle reading.
    pub fn get_unit_price(env: Env) -> Result<i128, Error> {
        price::unit_price(&env)
    }

    /// Total providers ever registered. Free storage read for indexers.
    pub fn get_provider_count(env: Env) -> u32 {
        queries::provider_count(&env)
    }

    /// Total subscribers ever registered.
    pub fn get_subscriber_count(env: Env) -> u32 {
        queries::subscriber_count(&env)
    }

    /// The provider id a registration key was burned for, or 0 if unbound.
    pub fn get_provider_id_for_key(env: Env, key: BytesN<32>) -> u32 {
        queries::get_provider_id_for_key(&env, key)
    }
}
