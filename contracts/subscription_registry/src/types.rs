use soroban_sdk::{contracterror, contracttype, Address, BytesN, Vec};

// ── Constants ────────────────────────────────────────────────────────────────

/// Hard cap on the number of providers the registry will ever allocate.
/// Also bounds how many providers a single subscriber may attach to
/// (strictly fewer than the cap).
pub const MAX_PROVIDERS: u32 = 100;

/// Withdrawal cooldown in seconds: one billing cycle of 30 days.
pub const BILLING_INTERVAL: u64 = 30 * 24 * 60 * 60;

/// Minimum USD value of `fee * unit_price` at provider registration
/// (inclusive bound).
pub const MINIMUM_FEE_USD: i128 = 50;

/// Minimum USD value of a normalized registration deposit (exclusive bound).
pub const MINIMUM_DEPOSIT_USD: i128 = 100;

/// Fixed fractional precision of the raw oracle reading (8 digits).
pub const ORACLE_PRECISION: i128 = 100_000_000;

/// Fixed fractional precision of the token (18 digits).
pub const TOKEN_PRECISION: i128 = 1_000_000_000_000_000_000;

/// Persistent storage TTL in ledgers (~30 days at 5 s/ledger).
/// Bumped on every write so records and key bindings never expire.
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

// ── Storage keys ─────────────────────────────────────────────────────────────

/// Discriminants for all storage keys.
///
/// Instance keys: contract config and the two monotonic id allocators, one
/// ledger entry shared by all of them. Persistent keys: per-entity records
/// and the registration-key index, each with their own TTL.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // --- instance() ---
    Admin,
    Token,
    Oracle,
    UpgradesLocked,
    ProviderCount,
    SubscriberCount,
    // --- persistent() ---
    /// Provider record keyed by provider id. Ids start at 1; 0 is "not found".
    Provider(u32),
    /// Subscriber record keyed by subscriber id, an independent id space.
    Subscriber(u32),
    /// Registration-key index entry. Never removed once written.
    ProviderKey(BytesN<32>),
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    NotFound = 404,
    Unauthorized = 401,
    Overflow = 403,
    AlreadyInitialized = 409,
    NotInitialized = 412,
    /// The provided amount or fee is zero or negative.
    InvalidAmount = 400,

    /// The registration key has already been consumed by an earlier provider.
    DuplicateKey = 1001,
    /// Provider cap reached, or a subscriber referenced too many providers.
    CapacityExceeded = 1002,
    /// `fee * unit_price` is below the registration minimum.
    FeeTooLow = 1003,
    /// The normalized deposit's USD value does not exceed the minimum.
    DepositTooLow = 1004,
    /// Less than one full billing interval since the last accrual.
    WithdrawalTooSoon = 1005,
    NoFundsDue = 1006,
    ProviderNotActive = 1007,
    /// Upgradeability has been permanently locked.
    UpgradesLocked = 1008,
    /// The token contract rejected a transfer; the whole call is rolled back.
    ExternalTransferFailed = 1009,
}

// ── Records ──────────────────────────────────────────────────────────────────

/// A registered service seller.
///
/// `owner` is set at registration and never reassigned. `earnings` is the
/// cumulative lifetime revenue and only ever increases; `balance` is the
/// accrued-but-unswept portion. Removal deactivates the record, it never
/// deletes it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Provider {
    pub owner: Address,
    /// Per-billing-cycle charge, in token units. Positive.
    pub fee: i128,
    /// Gates new subscriber attachment and further earnings accrual.
    pub is_active: bool,
    pub balance: i128,
    pub earnings: i128,
    /// Timestamp of the last successful accrual; starts at registration.
    pub last_withdraw_time: u64,
    pub subscriber_count: u32,
}

/// Reserved for future tiering; currently a single fixed value.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubscriberPlan {
    Standard = 0,
}

/// A registered service buyer with a prefunded balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscriber {
    pub owner: Address,
    pub balance: i128,
    pub is_paused: bool,
    /// Provider ids attached at registration. Duplicates are not rejected.
    pub subscribed_providers: Vec<u32>,
    pub plan: SubscriberPlan,
}

// ── Views ────────────────────────────────────────────────────────────────────

/// Public view of a provider record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderState {
    pub subscriber_count: u32,
    pub fee: i128,
    pub owner: Address,
    pub balance: i128,
    pub is_active: bool,
}

/// Public view of a subscriber record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriberState {
    pub owner: Address,
    pub balance: i128,
    pub plan: SubscriberPlan,
    pub is_paused: bool,
}

// ── Events ───────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug)]
pub struct ProviderRegisteredEvent {
    pub owner: Address,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ProviderRemovedEvent {
    pub owner: Address,
    /// Residual balance paid out to the owner at removal.
    pub refund: i128,
}

/// Emitted once per successful earnings accrual.
#[contracttype]
#[derive(Clone, Debug)]
pub struct ProviderWithdrawalEvent {
    pub owner: Address,
    pub amount: i128,
    /// `amount * unit_price`, computed when the event is emitted.
    pub usd_value: i128,
}

/// Emitted when an accrued balance is swept out to the owner's wallet.
#[contracttype]
#[derive(Clone, Debug)]
pub struct ProviderFundsTransferredEvent {
    pub owner: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriberRegisteredEvent {
    pub owner: Address,
    pub deposit: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FundsDepositedEvent {
    pub from: Address,
    pub amount: i128,
}
