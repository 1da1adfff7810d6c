//! This module could be a separate crate on its own, to bootstrap [`bank_ledger`] within binary
//! but for simplicity purposes, it is included directly in the library.

use std::io::{Read, Write};

use crate::processor::{
    TransactionProcessError, TransactionProcessor,
    in_memory_processor::InMemoryTransactionProcessor,
};
use anyhow::Result;
use csv_parser::CsvOperationParser;
use csv_printer::{AccountSummary, print_accounts};
use thiserror::Error;
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("Malformed row: {0}")]
    Malformed(#[from] csv::Error),
    #[error(transparent)]
    Rejected(#[from] TransactionProcessError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, LineError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut processor = InMemoryTransactionProcessor::default();

        for (line, row) in parser {
            let outcome = row.map_err(LineError::from).and_then(|op| {
                processor
                    .process_transaction(
                        op.kind,
                        &op.account,
                        op.amount.as_deref(),
                        op.counterparty.as_deref(),
                    )
                    .map_err(LineError::from)
            });
            if let Err(err) = outcome {
                (self.error_printer)(line, err);
            }
        }

        print_accounts(
            self.output,
            processor.accounts().map(|acc| AccountSummary {
                account: acc.account_number().clone(),
                balance: acc.balance(),
                transactions: acc.history().len(),
            }),
        )
    }
}
