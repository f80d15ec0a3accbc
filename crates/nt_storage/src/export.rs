use chrono::NaiveDate;
use nt_core::{Error, Result, ScoredArticle};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const COLUMNS: [&str; 6] = ["Title", "Source", "Published Date", "Description", "URL", "Sentiment"];
pub const SHEET_NAME: &str = "News";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(Error::Validation(format!("Unknown export format: {}", other))),
        }
    }
}

/// `news_search_<query>_<YYYYMMDD>.<ext>`. Anything in the query other than
/// ASCII letters, digits, `-` and `_` becomes `_`, so the name can go into a
/// `Content-Disposition` header as is.
pub fn export_filename(query: &str, format: ExportFormat, date: NaiveDate) -> String {
    let query: String = query
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("news_search_{}_{}.{}", query, date.format("%Y%m%d"), format.extension())
}

pub fn export(articles: &[ScoredArticle], format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => to_csv(articles),
        ExportFormat::Xlsx => to_xlsx(articles).map_err(|e| Error::Export(e.to_string())),
    }
}

fn row(article: &ScoredArticle) -> [&str; 6] {
    let record = &article.record;
    [
        &record.title,
        &record.source,
        &record.published_date,
        &record.description,
        &record.url,
        article.sentiment.as_str(),
    ]
}

fn to_csv(articles: &[ScoredArticle]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(COLUMNS)
        .map_err(|e| Error::Export(e.to_string()))?;
    for article in articles {
        writer
            .write_record(row(article))
            .map_err(|e| Error::Export(e.to_string()))?;
    }
    writer.into_inner().map_err(|e| Error::Export(e.to_string()))
}

fn to_xlsx(articles: &[ScoredArticle]) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    for (i, article) in articles.iter().enumerate() {
        for (col, value) in row(article).iter().enumerate() {
            worksheet.write_string(i as u32 + 1, col as u16, *value)?;
        }
    }

    workbook.save_to_buffer()
}
