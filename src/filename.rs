//! Reference dates from MSP filenames.
//!
//! MSP files only record seconds since midnight; the date itself lives in the
//! filename, at a fixed position that depends on the file type:
//!
//! * `.nc`: an 8-digit `YYYYMMDD` date after a 13-character prefix, e.g.
//!   `PKR_SMSP_STD_20110301.NC`.
//! * `.pf`: everything after a 4-character prefix is a 7-digit `YYYYDDD`
//!   year and day-of-year, e.g. `MSP_1997001.PF`.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use hifitime::Epoch;

use crate::{MspInputType, MspReadError};

const CALENDAR_DATE_OFFSET: usize = 13;
const CALENDAR_DATE_LEN: usize = 8;
const YEAR_DOY_OFFSET: usize = 4;
const YEAR_DOY_LEN: usize = 7;

impl MspInputType {
    /// Determine the file type from its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<MspInputType, MspReadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "nc" => Ok(MspInputType::Nc),
            "pf" => Ok(MspInputType::Pf),
            _ => Err(MspReadError::UnrecognisedFormat {
                file: path.to_path_buf(),
                ext,
            }),
        }
    }

    /// Midnight (UTC) of the day encoded in a filename stem of this type.
    pub fn reference_date(self, stem: &str) -> Result<Epoch, MspReadError> {
        match self {
            MspInputType::Nc => parse_calendar_date(stem),
            MspInputType::Pf => parse_year_doy(stem),
        }
    }
}

/// The file type and reference date of an MSP file, from its path alone.
pub fn reference_date(path: &Path) -> Result<(MspInputType, Epoch), MspReadError> {
    let input_type = MspInputType::from_path(path)?;
    let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
        MspReadError::BadFilenameDate {
            stem: path.display().to_string(),
            convention: "filename",
            reason: "the filename isn't valid UTF-8".to_string(),
        }
    })?;
    let date = input_type.reference_date(stem)?;
    Ok((input_type, date))
}

/// Parse the `YYYYMMDD` date at character 13 of an `.nc` stem.
pub fn parse_calendar_date(stem: &str) -> Result<Epoch, MspReadError> {
    const CONVENTION: &str = "YYYYMMDD";
    let field = digits(stem, CALENDAR_DATE_OFFSET, CALENDAR_DATE_LEN, CONVENTION)?;
    let date = NaiveDate::parse_from_str(field, "%Y%m%d").map_err(|e| {
        MspReadError::BadFilenameDate {
            stem: stem.to_string(),
            convention: CONVENTION,
            reason: format!("'{field}': {e}"),
        }
    })?;
    Ok(midnight_utc(date))
}

/// Parse the `YYYYDDD` code that makes up the rest of a `.pf` stem after its
/// 4-character prefix. Day 1 is the 1st of January.
pub fn parse_year_doy(stem: &str) -> Result<Epoch, MspReadError> {
    const CONVENTION: &str = "YYYYDDD";
    let field = stem.get(YEAR_DOY_OFFSET..).unwrap_or("");
    if field.len() != YEAR_DOY_LEN {
        return Err(MspReadError::BadFilenameDate {
            stem: stem.to_string(),
            convention: CONVENTION,
            reason: format!(
                "expected {YEAR_DOY_LEN} characters after the first {YEAR_DOY_OFFSET}, got '{field}'"
            ),
        });
    }
    let field = digits(stem, YEAR_DOY_OFFSET, YEAR_DOY_LEN, CONVENTION)?;

    // All ASCII digits, so these can't fail or overflow.
    let year: i32 = field[..4].parse().unwrap_or_default();
    let doy: u32 = field[4..].parse().unwrap_or_default();
    let date = NaiveDate::from_yo_opt(year, doy).ok_or_else(|| MspReadError::BadFilenameDate {
        stem: stem.to_string(),
        convention: CONVENTION,
        reason: format!("{year} has no day {doy}"),
    })?;
    Ok(midnight_utc(date))
}

/// Format a date as `YYYYMMDD`, the inverse of [`parse_calendar_date`]'s
/// field.
pub fn format_calendar_date(epoch: Epoch) -> String {
    let (year, month, day, ..) = epoch.to_gregorian_utc();
    format!("{year:04}{month:02}{day:02}")
}

/// The `len` characters of `stem` starting at `offset`, which must all be
/// ASCII digits.
fn digits<'a>(
    stem: &'a str,
    offset: usize,
    len: usize,
    convention: &'static str,
) -> Result<&'a str, MspReadError> {
    match stem.get(offset..offset + len) {
        Some(field) if field.bytes().all(|b| b.is_ascii_digit()) => Ok(field),
        Some(field) => Err(MspReadError::BadFilenameDate {
            stem: stem.to_string(),
            convention,
            reason: format!("'{field}' at character {offset} isn't all digits"),
        }),
        None => Err(MspReadError::BadFilenameDate {
            stem: stem.to_string(),
            convention,
            reason: format!("too short to hold {len} digits at character {offset}"),
        }),
    }
}

fn midnight_utc(date: NaiveDate) -> Epoch {
    // chrono guarantees month in 1..=12 and day in 1..=31.
    Epoch::from_gregorian_utc_at_midnight(date.year(), date.month() as u8, date.day() as u8)
}
