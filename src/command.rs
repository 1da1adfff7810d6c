use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::{AccountError, AccountNumber},
    amount,
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Open,
    Deposit,
    Withdrawal,
    Transfer,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountCommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Counterparty account is required for {kind:?}")]
    CounterpartyRequired { kind: OperationKind },
    #[error(transparent)]
    InvalidField(#[from] AccountError),
}

/// Typed operation on one or two accounts. Amounts are parsed but not range checked,
/// that is up to [`crate::account::Account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountCommand {
    Open {
        account: AccountNumber,
        initial_balance: Decimal,
    },
    Deposit {
        account: AccountNumber,
        amount: Decimal,
    },
    Withdraw {
        account: AccountNumber,
        amount: Decimal,
    },
    Transfer {
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    },
}

impl AccountCommand {
    pub fn parse_command(
        kind: OperationKind,
        account: &str,
        amount: Option<&str>,
        counterparty: Option<&str>,
    ) -> Result<Self, AccountCommandError> {
        let account = AccountNumber::parse(account.trim())?;
        let amount = Self::parse_amount(kind, amount)?;
        match kind {
            OperationKind::Open => Ok(Self::Open {
                account,
                initial_balance: amount,
            }),
            OperationKind::Deposit => Ok(Self::Deposit { account, amount }),
            OperationKind::Withdrawal => Ok(Self::Withdraw { account, amount }),
            OperationKind::Transfer => {
                let Some(to) = counterparty.map(str::trim).filter(|c| !c.is_empty()) else {
                    return Err(AccountCommandError::CounterpartyRequired { kind });
                };
                Ok(Self::Transfer {
                    from: account,
                    to: AccountNumber::parse(to)?,
                    amount,
                })
            }
        }
    }

    fn parse_amount(
        kind: OperationKind,
        amount: Option<&str>,
    ) -> Result<Decimal, AccountCommandError> {
        let Some(raw) = amount.filter(|raw| !raw.trim().is_empty()) else {
            return Err(AccountCommandError::AmountRequired { kind });
        };
        Ok(amount::parse_amount(raw)?)
    }
}
