//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use snowleopard_core::OutputTable;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a projected table to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        table: &OutputTable,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Self::write(table, file, options)?;
        tracing::debug!(path = %path.display(), rows = table.row_count(), "wrote CSV file");
        Ok(())
    }

    /// Write a projected table to a writer
    pub fn write<W: Write>(table: &OutputTable, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        if options.write_header {
            csv_writer.write_record(&table.columns)?;
        }

        for row in &table.rows {
            csv_writer.write_record(row.iter().map(|&n| format_number(n)))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Format a number without a trailing `.0` for integral values
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> OutputTable {
        OutputTable {
            columns: vec!["Quiz1".into(), "Final, total".into()],
            rows: vec![vec![10.0, 18.0], vec![-2.5, 0.0]],
        }
    }

    fn write_to_string(table: &OutputTable, options: &CsvWriteOptions) -> String {
        let mut buf = Vec::new();
        CsvWriter::write(table, &mut buf, options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(18.0), "18");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_write_default() {
        assert_eq!(
            write_to_string(&table(), &CsvWriteOptions::default()),
            "Quiz1,\"Final, total\"\n10,18\n-2.5,0\n"
        );
    }

    #[test]
    fn test_write_options() {
        let options = CsvWriteOptions {
            delimiter: b'\t',
            write_header: false,
            line_terminator: LineTerminator::CRLF,
            ..Default::default()
        };
        assert_eq!(write_to_string(&table(), &options), "10\t18\r\n-2.5\t0\r\n");
    }

    #[test]
    fn test_write_empty_table_has_header_only() {
        let table = OutputTable::new(vec!["a".into()]);
        assert_eq!(write_to_string(&table, &CsvWriteOptions::default()), "a\n");
    }

    #[test]
    fn test_write_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        CsvWriter::write_file(&table(), &path, &CsvWriteOptions::default()).unwrap();

        let raw = crate::CsvReader::read_file(&path, &Default::default()).unwrap();
        assert_eq!(raw.headers(), &["Quiz1", "Final, total"]);
        assert_eq!(raw.cell(1, "Quiz1"), Some("-2.5"));
    }
}
