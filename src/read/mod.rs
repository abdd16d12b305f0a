mod msp;
mod nc;
mod select;

pub use msp::read_msp;

use std::{ops::RangeInclusive, str::FromStr};

use hifitime::Epoch;

use crate::MspReadError;

/// Parse a pair of timestamps into an inclusive time range for [`read_msp`].
///
/// Anything `hifitime` can parse is accepted, e.g. `2011-03-01T06:00:00 UTC`.
/// Timestamps without a time scale are taken to be UTC.
pub fn parse_time_range(start: &str, end: &str) -> Result<RangeInclusive<Epoch>, MspReadError> {
    let parse = |s: &str| {
        Epoch::from_str(s.trim()).map_err(|e| MspReadError::BadTimestamp {
            input: s.to_string(),
            reason: format!("{e:?}"),
        })
    };
    Ok(parse(start)?..=parse(end)?)
}
