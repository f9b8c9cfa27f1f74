//! Admin and config: init, provider activation, the upgrade lock.
//!
//! **PRs that only change admin behavior should edit this file only.**

use crate::provider::store_provider;
use crate::queries;
use crate::types::{DataKey, Error};
use soroban_sdk::{Address, BytesN, Env, Symbol};

pub fn do_init(env: &Env, admin: Address, token: Address, oracle: Address) -> Result<(), Error> {
    if env.storage().instance().has(&DataKey::Admin) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage().instance().set(&DataKey::Admin, &admin);
    env.storage().instance().set(&DataKey::Token, &token);
    env.storage().instance().set(&DataKey::Oracle, &oracle);
    Ok(())
}

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

/// Verify `caller` is the stored admin and has signed the invocation.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let stored = get_admin(env)?;
    if caller != &stored {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Toggle a provider's active flag. This is the only path that can
/// reactivate a removed provider.
pub fn do_change_provider_state(
    env: &Env,
    admin: Address,
    provider_id: u32,
    active: bool,
) -> Result<(), Error> {
    require_admin(env, &admin)?;

    let mut provider = queries::get_provider(env, provider_id)?;
    provider.is_active = active;
    store_provider(env, provider_id, &provider);

    env.events().publish(
        (Symbol::new(env, "provider_state_changed"), provider_id),
        active,
    );
    Ok(())
}

pub fn is_upgrade_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::UpgradesLocked)
        .unwrap_or(false)
}

/// Permanently disable future upgrades. One-way: no unlock exists.
pub fn do_lock_upgradeability(env: &Env, admin: Address) -> Result<(), Error> {
    require_admin(env, &admin)?;
    env.storage().instance().set(&DataKey::UpgradesLocked, &true);
    env.events()
        .publish((Symbol::new(env, "upgrades_locked"),), admin);
    Ok(())
}

/// Install new contract code, unless the lock has been set.
pub fn do_upgrade(env: &Env, admin: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
    require_admin(env, &admin)?;
    if is_upgrade_locked(env) {
        return Err(Error::UpgradesLocked);
    }
    env.deployer().update_current_contract_wasm(new_wasm_hash);
    Ok(())
}
