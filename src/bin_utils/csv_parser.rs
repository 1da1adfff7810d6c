use std::io::Read;

use crate::command::OperationKind;
use csv::{StringRecord, Trim};
use serde::Deserialize;

/// Raw CSV row. Fields stay textual so that bad values are reported by the
/// command layer instead of failing the whole row.
#[derive(Debug, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub account: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub counterparty: Option<String>,
}

/// Parses operation list in CSV format, yielding each row with its line number.
///
/// Rows that fail to deserialize are yielded as errors and parsing continues,
/// only an I/O error ends the iteration.
pub struct CsvOperationParser<R> {
    reader: csv::Reader<R>,
    record: StringRecord,
    done: bool,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            reader,
            record: StringRecord::new(),
            done: false,
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Operation>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map_or(0, |pos| pos.line());
                let row = self
                    .reader
                    .headers()
                    .and_then(|headers| self.record.deserialize(Some(headers)));
                Some((line, row))
            }
            Err(err) => {
                self.done = err.is_io_error();
                let line = err.position().map_or(0, |pos| pos.line());
                Some((line, Err(err)))
            }
        }
    }
}
