//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use snowleopard_core::RawTable;

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a table
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<RawTable> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading CSV file");
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read only the header row of a CSV file
    pub fn read_headers_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Vec<String>> {
        let file = File::open(path)?;
        Self::read_headers(file, options)
    }

    /// Read only the header row, normalized the same way [`CsvReader::read`] does
    pub fn read_headers<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Vec<String>> {
        let mut csv_reader = Self::builder(options).from_reader(reader);
        let headers = Self::header_names(&mut csv_reader)?;
        Ok(RawTable::new(headers).headers().to_vec())
    }

    /// Read CSV from a reader into a table
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<RawTable> {
        let mut csv_reader = Self::builder(options).from_reader(reader);
        let mut table = RawTable::new(Self::header_names(&mut csv_reader)?);

        for result in csv_reader.records() {
            let record = result?;
            table.push_row(record.iter());
        }

        tracing::debug!(
            columns = table.headers().len(),
            rows = table.row_count(),
            "read CSV table"
        );
        Ok(table)
    }

    fn builder(options: &CsvReadOptions) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(true)
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            });
        builder
    }

    fn header_names<R: Read>(csv_reader: &mut csv::Reader<R>) -> CsvResult<Vec<String>> {
        let headers = csv_reader.headers()?;

        // A whitespace-only first line shows up as a single blank field
        if headers.iter().all(|h| h.trim().is_empty()) && headers.len() <= 1 {
            return Err(CsvError::EmptyHeader);
        }

        Ok(headers.iter().map(str::to_string).collect())
    }
}
