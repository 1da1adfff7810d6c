use thiserror::Error;

use crate::{
    account::{AccountError, AccountNumber},
    command::{AccountCommand, AccountCommandError, OperationKind},
};

pub mod in_memory_processor;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionProcessError {
    #[error(transparent)]
    CommandErr(#[from] AccountCommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error("Account {0} is already open")]
    DuplicateAccount(AccountNumber),
    #[error("Account {0} is not open")]
    UnknownAccount(AccountNumber),
    #[error("Cannot transfer from account {0} to itself")]
    SelfTransfer(AccountNumber),
}

pub trait TransactionProcessor {
    fn execute(&mut self, command: AccountCommand) -> Result<(), TransactionProcessError>;

    /// Parses raw operation fields and executes the resulting command.
    fn process_transaction(
        &mut self,
        kind: OperationKind,
        account: &str,
        amount: Option<&str>,
        counterparty: Option<&str>,
    ) -> Result<(), TransactionProcessError> {
        let command = AccountCommand::parse_command(kind, account, amount, counterparty)?;
        self.execute(command)
    }
}
