// src/table/segment.rs
//! Lead-list segmentation by country.
//!
//! Splits a raw lead export into the two lists the outreach runs actually
//! use: a USA-only list, and an international list with India and China
//! removed. Output files sit next to the input, named by suffix.

use super::LeadTable;
use crate::constants::COUNTRY_COLUMN;
use crate::error::AppError;
use std::path::{Path, PathBuf};

const USA: &str = "United States";
const EXCLUDED_ABROAD: &[&str] = &["United States", "India", "China"];

const USA_SUFFIX: &str = "_usa_leads";
const INTERNATIONAL_SUFFIX: &str = "_everyone_minus_ind_china";

/// Where the two segment files were written and how many rows each holds.
#[derive(Debug)]
pub struct SegmentOutcome {
    pub usa_path: PathBuf,
    pub usa_rows: usize,
    pub international_path: PathBuf,
    pub international_rows: usize,
}

/// Splits the lead list at `input` into the USA and international segments.
///
/// Country matching is exact: "United States" only, not "USA" or "US". The
/// upstream lead exports normalize to the full name.
pub fn segment_by_country(input: &Path) -> Result<SegmentOutcome, AppError> {
    let table = LeadTable::from_csv_path(input)?;

    if !table.has_column(COUNTRY_COLUMN) {
        return Err(AppError::MissingColumn {
            column: COUNTRY_COLUMN.to_string(),
        });
    }

    let usa = table.filtered(|row| row.get(COUNTRY_COLUMN) == USA);
    let international =
        table.filtered(|row| !EXCLUDED_ABROAD.contains(&row.get(COUNTRY_COLUMN)));

    let usa_path = suffixed_path(input, USA_SUFFIX);
    let international_path = suffixed_path(input, INTERNATIONAL_SUFFIX);

    usa.write_csv_path(&usa_path)?;
    log::info!("Wrote {} USA leads to {}", usa.len(), usa_path.display());
    international.write_csv_path(&international_path)?;
    log::info!(
        "Wrote {} international leads to {}",
        international.len(),
        international_path.display()
    );

    Ok(SegmentOutcome {
        usa_rows: usa.len(),
        usa_path,
        international_rows: international.len(),
        international_path,
    })
}

/// `leads.csv` + `_usa_leads` → `leads_usa_leads.csv`, preserving the
/// directory and extension.
fn suffixed_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    input.with_file_name(format!("{}{}{}", stem, suffix, extension))
}
