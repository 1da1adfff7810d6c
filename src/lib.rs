/// Single bank account: identifier and amount validation, balance and
/// append-only transaction history. Every mutation is validated into an event
/// first and only then applied, so a failed operation changes nothing.
pub mod account;

/// Exact decimal helpers: rounding to cents, parsing and range checks.
pub mod amount;

/// Typed account commands parsed from raw text fields.
pub mod command;

/// Transaction processor interface, plus "in memory" implementation that owns
/// many accounts and routes commands to them.
pub mod processor;

/// CSV driver around the processor, shared by the binary and integration tests.
pub mod bin_utils;
