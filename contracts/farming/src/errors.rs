use soroban_sdk::contracttype;

/// Error categories for classifying contract failures.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Initialisation order problems.
    Lifecycle = 1,
    /// Caller lacks the tier for an admin operation.
    Authorization = 2,
    /// Bad input, rejected before any state change.
    Validation = 3,
    /// Pool or position is not in a state that allows the operation.
    State = 4,
    /// An external asset movement failed; the whole invocation is rolled back.
    Transfer = 5,
    /// Accounting invariant broken. Indicates a defect, never a user error.
    Invariant = 6,
}

/// Contract error codes.
///
/// # Code ranges
/// | Range   | Purpose                      |
/// |---------|------------------------------|
/// | 1 – 9   | Lifecycle / authorisation    |
/// | 10 – 19 | Validation                   |
/// | 20 – 29 | Pool and position state      |
/// | 30 – 39 | Asset transfer               |
/// | 40 – 49 | Accounting invariants        |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    Paused = 4,
    Reentrancy = 5,

    InvalidInput = 10,
    LengthMismatch = 11,
    InvalidTimeWindow = 12,
    InvalidAmount = 13,
    BelowMinimumStake = 14,
    TokensIdentical = 15,
    TooManyRewardTokens = 16,
    RewardIndexOutOfRange = 17,

    PoolNotFound = 20,
    PoolNotStarted = 21,
    PoolEnded = 22,
    PoolInactive = 23,
    InsufficientStake = 24,
    CooldownActive = 25,
    PositionNotFound = 26,

    TransferFailed = 30,

    InvariantViolation = 40,
    ArithmeticOverflow = 41,
}

impl ContractError {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::Reentrancy => ErrorCategory::Lifecycle,

            ContractError::Unauthorized => ErrorCategory::Authorization,

            ContractError::InvalidInput
            | ContractError::LengthMismatch
            | ContractError::InvalidTimeWindow
            | ContractError::InvalidAmount
            | ContractError::BelowMinimumStake
            | ContractError::TokensIdentical
            | ContractError::TooManyRewardTokens
            | ContractError::RewardIndexOutOfRange => ErrorCategory::Validation,

            ContractError::Paused
            | ContractError::PoolNotFound
            | ContractError::PoolNotStarted
            | ContractError::PoolEnded
            | ContractError::PoolInactive
            | ContractError::InsufficientStake
            | ContractError::CooldownActive
            | ContractError::PositionNotFound => ErrorCategory::State,

            ContractError::TransferFailed => ErrorCategory::Transfer,

            ContractError::InvariantViolation | ContractError::ArithmeticOverflow => {
                ErrorCategory::Invariant
            }
        }
    }

    /// Whether a caller may retry the same call later and expect a different
    /// outcome without changing its inputs.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ContractError::Paused
                | ContractError::PoolNotStarted
                | ContractError::CooldownActive
                | ContractError::TransferFailed
        )
    }
}
