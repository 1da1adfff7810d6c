use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::amount;

pub const ACCOUNT_NUMBER_LENGTH: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierRule {
    #[error("account number cannot be empty")]
    Empty,
    #[error("account number must contain only digits")]
    NonDigit,
    #[error("account number must be exactly 9 digits, got {len}")]
    WrongLength { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountRule {
    #[error("`{raw}` is not a number")]
    NotNumeric { raw: String },
    #[error("{amount} is not positive")]
    NotPositive { amount: Decimal },
    #[error("{amount} is negative")]
    Negative { amount: Decimal },
    #[error("{amount} would overflow the balance")]
    Overflow { amount: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Invalid account number `{value}`: {reason}")]
    InvalidIdentifier {
        value: String,
        reason: IdentifierRule,
    },
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: AmountRule },
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
}

/// Nine ASCII digits, checked once at construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn parse(value: &str) -> Result<Self, AccountError> {
        let rule = if value.is_empty() {
            Some(IdentifierRule::Empty)
        } else if !value.bytes().all(|b| b.is_ascii_digit()) {
            Some(IdentifierRule::NonDigit)
        } else if value.len() != ACCOUNT_NUMBER_LENGTH {
            Some(IdentifierRule::WrongLength { len: value.len() })
        } else {
            None
        };
        match rule {
            Some(reason) => Err(AccountError::InvalidIdentifier {
                value: value.to_owned(),
                reason,
            }),
            None => Ok(Self(value.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountNumber {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

/// Entry of the account log. Never changed once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
    pub balance_after: Decimal,
}

/// Outcome of a validated operation. Applying it cannot fail.
#[derive(Debug)]
struct AccountEvent {
    kind: TransactionKind,
    amount: Decimal,
    balance_after: Decimal,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    opening_balance: Decimal,
    balance: Decimal,
    history: Vec<TransactionRecord>,
}

impl Account {
    /// Validates both the identifier and the initial balance.
    pub fn create(identifier: &str, initial_balance: Decimal) -> Result<Self, AccountError> {
        let number = AccountNumber::parse(identifier)?;
        Self::open(number, initial_balance)
    }

    pub fn open(number: AccountNumber, initial_balance: Decimal) -> Result<Self, AccountError> {
        let opening_balance = amount::non_negative(initial_balance)?;
        debug!(account = %number, %opening_balance, "account opened");
        Ok(Self {
            number,
            opening_balance,
            balance: opening_balance,
            history: Vec::new(),
        })
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// All applied operations, oldest first.
    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<&TransactionRecord, AccountError> {
        let event = self.handle_deposit(amount)?;
        Ok(self.apply(event))
    }

    /// Runs the deposit checks without applying anything.
    pub fn check_deposit(&self, amount: Decimal) -> Result<(), AccountError> {
        self.handle_deposit(amount).map(|_| ())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<&TransactionRecord, AccountError> {
        let event = self.handle_withdrawal(amount)?;
        Ok(self.apply(event))
    }

    fn handle_deposit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        let amount = amount::positive(amount)?;
        let balance_after = amount::checked_add(self.balance, amount)?;
        Ok(AccountEvent {
            kind: TransactionKind::Deposit,
            amount,
            balance_after,
            timestamp: Utc::now(),
        })
    }

    fn handle_withdrawal(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        let amount = amount::positive(amount)?;
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        Ok(AccountEvent {
            kind: TransactionKind::Withdrawal,
            amount,
            balance_after: self.balance - amount,
            timestamp: Utc::now(),
        })
    }

    fn apply(&mut self, event: AccountEvent) -> &TransactionRecord {
        self.balance = event.balance_after;
        debug!(
            account = %self.number,
            kind = ?event.kind,
            amount = %event.amount,
            balance = %self.balance,
            "transaction applied"
        );
        let idx = self.history.len();
        self.history.push(TransactionRecord {
            kind: event.kind,
            amount: event.amount,
            timestamp: event.timestamp,
            balance_after: event.balance_after,
        });
        &self.history[idx]
    }
}
