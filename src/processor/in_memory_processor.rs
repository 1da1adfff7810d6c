use std::collections::{BTreeMap, btree_map::Entry};

use tracing::debug;

use crate::{
    account::{Account, AccountNumber},
    command::AccountCommand,
};

use super::{TransactionProcessError, TransactionProcessor};

/// Accounts keyed by number, iterated in ascending number order.
#[derive(Debug, Default)]
pub struct InMemoryTransactionProcessor {
    accounts: BTreeMap<AccountNumber, Account>,
}

impl InMemoryTransactionProcessor {
    pub fn account(&self, number: &AccountNumber) -> Option<&Account> {
        self.accounts.get(number)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    fn account_mut(
        &mut self,
        number: &AccountNumber,
    ) -> Result<&mut Account, TransactionProcessError> {
        self.accounts
            .get_mut(number)
            .ok_or_else(|| TransactionProcessError::UnknownAccount(number.clone()))
    }
}

impl TransactionProcessor for InMemoryTransactionProcessor {
    fn execute(&mut self, command: AccountCommand) -> Result<(), TransactionProcessError> {
        match command {
            AccountCommand::Open {
                account,
                initial_balance,
            } => match self.accounts.entry(account) {
                Entry::Occupied(entry) => {
                    return Err(TransactionProcessError::DuplicateAccount(
                        entry.key().clone(),
                    ));
                }
                Entry::Vacant(entry) => {
                    let acc = Account::open(entry.key().clone(), initial_balance)?;
                    entry.insert(acc);
                }
            },
            AccountCommand::Deposit { account, amount } => {
                self.account_mut(&account)?.deposit(amount)?;
            }
            AccountCommand::Withdraw { account, amount } => {
                self.account_mut(&account)?.withdraw(amount)?;
            }
            AccountCommand::Transfer { from, to, amount } => {
                if from == to {
                    return Err(TransactionProcessError::SelfTransfer(from));
                }
                let Some(destination) = self.accounts.get(&to) else {
                    return Err(TransactionProcessError::UnknownAccount(to));
                };
                // two independent operations with no rollback, so the deposit is
                // validated before the source is debited
                destination.check_deposit(amount)?;
                let moved = self.account_mut(&from)?.withdraw(amount)?.amount;
                self.account_mut(&to)?.deposit(moved)?;
                debug!(%from, %to, %moved, "transfer completed");
            }
        };
        Ok(())
    }
}
