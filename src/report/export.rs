//! CSV export of classified reviews
//!
//! Columns are `Review, Sentiment, Score`, one row per review in input order.

use crate::error::{AnalyzerError, Result};
use crate::sentiment::{ClassificationResult, Sentiment};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// File name offered for the download
pub const CSV_FILE_NAME: &str = "sentiment_analysis_results.csv";

const CSV_HEADER: [&str; 3] = ["Review", "Sentiment", "Score"];

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Review")]
    review: String,
    #[serde(rename = "Sentiment")]
    sentiment: String,
    #[serde(rename = "Score")]
    score: f64,
}

impl From<&ClassificationResult> for CsvRow {
    fn from(result: &ClassificationResult) -> Self {
        Self {
            review: result.review.clone(),
            sentiment: result.sentiment.to_string(),
            score: result.score,
        }
    }
}

impl TryFrom<CsvRow> for ClassificationResult {
    type Error = AnalyzerError;

    fn try_from(row: CsvRow) -> Result<Self> {
        Ok(Self {
            sentiment: row.sentiment.parse::<Sentiment>()?,
            review: row.review,
            score: row.score,
        })
    }
}

/// Write results as CSV, header first, even when there are no rows
pub fn write_csv<W: Write>(out: W, results: &[ClassificationResult]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for result in results {
        writer.serialize(CsvRow::from(result))?;
    }
    writer.flush()?;
    Ok(())
}

/// Results as a CSV document
pub fn to_csv(results: &[ClassificationResult]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, results)?;
    String::from_utf8(buf).map_err(|e| AnalyzerError::Internal(e.to_string()))
}

/// Parse a document produced by [`to_csv`]
pub fn from_csv(text: &str) -> Result<Vec<ClassificationResult>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().ne(CSV_HEADER.iter().copied()) {
        return Err(AnalyzerError::Internal(format!(
            "unexpected CSV header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    reader
        .deserialize::<CsvRow>()
        .map(|row| ClassificationResult::try_from(row?))
        .collect()
}
