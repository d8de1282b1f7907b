//! `.xlsx` export of result records.
//!
//! One worksheet, bold header row, one row per record in report order.

use std::path::Path;

use placescan_core::ResultRecord;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::ExportError;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Ergebnisse";
const WEBSITE_HEADER: &str = "Website";

/// Header row for a workbook. The website column is present only when
/// websites were requested for the run.
#[must_use]
pub fn column_headers(include_website: bool) -> Vec<&'static str> {
    let mut headers = vec![
        "Suchbegriff",
        "Name",
        "Straße",
        "Hausnummer",
        "PLZ",
        "Ort",
        "Telefon",
    ];
    if include_website {
        headers.push(WEBSITE_HEADER);
    }
    headers.push("Entfernung (m)");
    headers
}

/// Renders `records` into an in-memory `.xlsx` file.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if the workbook cannot be assembled.
pub fn write_workbook(
    records: &[ResultRecord],
    include_website: bool,
) -> Result<Vec<u8>, ExportError> {
    let mut workbook = build_workbook(records, include_website)?;
    Ok(workbook.save_to_buffer()?)
}

/// Writes `records` as an `.xlsx` file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if the workbook cannot be assembled or the
/// file cannot be written.
pub fn save_workbook(
    path: &Path,
    records: &[ResultRecord],
    include_website: bool,
) -> Result<(), ExportError> {
    let mut workbook = build_workbook(records, include_website)?;
    workbook.save(path)?;
    tracing::debug!(path = %path.display(), rows = records.len(), "workbook saved");
    Ok(())
}

fn build_workbook(records: &[ResultRecord], include_website: bool) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, header) in (0u16..).zip(column_headers(include_website)) {
        sheet.write_string_with_format(0, col, header, &bold)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (row, record) in (1u32..).zip(records) {
        write_record(sheet, row, record, include_website)?;
    }

    Ok(workbook)
}

fn write_record(
    sheet: &mut Worksheet,
    row: u32,
    record: &ResultRecord,
    include_website: bool,
) -> Result<(), ExportError> {
    let mut cells = vec![
        record.keyword.as_str(),
        record.name.as_str(),
        record.street.as_str(),
        record.house_number.as_str(),
        record.postal_code.as_str(),
        record.city.as_str(),
        record.phone.as_str(),
    ];
    if include_website {
        cells.push(record.website.as_deref().unwrap_or_default());
    }

    let mut col = 0u16;
    for cell in cells {
        sheet.write_string(row, col, cell)?;
        col += 1;
    }
    sheet.write_number(row, col, f64::from(record.distance_m))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(website: Option<&str>) -> ResultRecord {
        ResultRecord {
            keyword: "coach".to_owned(),
            name: "Coaching Müller".to_owned(),
            street: "Hauptstraße".to_owned(),
            house_number: "5".to_owned(),
            postal_code: "57462".to_owned(),
            city: "Olpe".to_owned(),
            phone: "02761 12345".to_owned(),
            website: website.map(str::to_owned),
            distance_m: 1234,
        }
    }

    #[test]
    fn headers_without_website() {
        assert_eq!(
            column_headers(false),
            vec![
                "Suchbegriff",
                "Name",
                "Straße",
                "Hausnummer",
                "PLZ",
                "Ort",
                "Telefon",
                "Entfernung (m)"
            ]
        );
    }

    #[test]
    fn website_column_sits_before_distance() {
        let headers = column_headers(true);
        assert_eq!(headers.len(), 9);
        assert_eq!(headers[7], "Website");
        assert_eq!(headers[8], "Entfernung (m)");
    }

    #[test]
    fn workbook_buffer_is_a_zip_archive() {
        let bytes = write_workbook(&[record(Some("https://example.de"))], true).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_workbook_still_renders() {
        let bytes = write_workbook(&[], false).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn save_writes_file() {
        let path = std::env::temp_dir().join(format!(
            "placescan-export-{}.xlsx",
            std::process::id()
        ));
        save_workbook(&path, &[record(None)], false).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
