use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::Sheet;
use std::io::Write;

/// CSV writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Whether fields are quoted when they need it. When false, fields are
    /// written verbatim.
    pub quoting: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
            quoting: true,
        }
    }
}

impl CsvOptions {
    /// Create options for TSV (tab-separated values)
    #[must_use]
    pub fn tsv() -> Self {
        CsvOptions {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Set whether fields may be quoted
    #[must_use]
    pub fn with_quoting(mut self, quoting: bool) -> Self {
        self.quoting = quoting;
        self
    }
}

impl Sheet {
    /// Write the sheet to a writer as CSV, one `\n`-terminated line per row
    pub fn write_csv<W: Write>(&self, writer: W, options: CsvOptions) -> Result<()> {
        let quote_style = if options.quoting {
            csv::QuoteStyle::Necessary
        } else {
            csv::QuoteStyle::Never
        };
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .quote_style(quote_style)
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(writer);

        for row in self.data() {
            let record: Vec<String> = row.iter().map(CellValue::as_str).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Convert the sheet to a CSV string with custom options
    #[must_use]
    pub fn to_csv_string_with_options(&self, options: CsvOptions) -> String {
        let mut buffer = Vec::new();
        // Writing into memory cannot fail
        let _ = self.write_csv(&mut buffer, options);
        String::from_utf8_lossy(&buffer).to_string()
    }

}
