use std::{ops::RangeInclusive, path::Path};

use hifitime::{Duration, Epoch};
use log::debug;
use ndarray::prelude::*;

use super::{
    nc::{nc_get_col_f32, nc_get_col_f64, nc_get_cube_i32, nc_open},
    select::{mask_indices, nm_to_angstrom, prune_dead_channels, range_mask, used_channel_mask},
};
use crate::{filename::reference_date, Brightness, MspReadError, FILTER_FACTOR_SCALE, NUM_ELEVATIONS};

/// The variables of an MSP file, copied out of it.
struct RawMsp {
    /// Seconds since midnight of the file's reference date.
    seconds: Vec<f64>,

    /// The wavelength of each channel \[nm\]. Unused channels are 0.
    wavelengths_nm: Vec<f32>,

    /// Raw peak counts, [time][wavelength][elevation].
    peak: Array3<i32>,

    /// The calibration factor of each channel (Rayleighs per count * 128).
    filter_factors: Vec<f64>,
}

impl RawMsp {
    /// Read everything needed from an MSP file. The file is open only for the
    /// duration of this call.
    fn read(file: &Path) -> Result<RawMsp, MspReadError> {
        let nc = nc_open(file)?;

        let seconds = nc_get_col_f64(&nc, file, "Time")?;
        let wavelengths_nm = nc_get_col_f32(&nc, file, "Wavelength")?;
        let peak = nc_get_cube_i32(
            &nc,
            file,
            "PeakIntensity",
            (seconds.len(), wavelengths_nm.len(), NUM_ELEVATIONS),
        )?;
        let filter_factors = nc_get_col_f64(&nc, file, "FilterFactor")?;
        if filter_factors.len() != wavelengths_nm.len() {
            return Err(MspReadError::BadShape {
                file: file.to_path_buf(),
                name: "FilterFactor",
                got: vec![filter_factors.len()],
                expected: format!("[{}]", wavelengths_nm.len()),
            });
        }

        Ok(RawMsp {
            seconds,
            wavelengths_nm,
            peak,
            filter_factors,
        })
    }
}

/// Read an MSP file and calibrate its peak counts into brightness
/// \[Rayleigh\].
///
/// The file type (and how its date is encoded in its name) is determined by
/// its extension: `.nc` or `.pf`, in any case.
///
/// # Arguments
///
/// * `file` - the MSP file. Its reference date comes from its name; the file
///   itself only has seconds since midnight.
/// * `time_range` - if given, only samples whose timestamps lie within this
///   inclusive range are kept. Samples keep their stored order.
/// * `elevation_range` - if given, only the elevation bins \[degrees from the
///   northern horizon\] within this inclusive range are kept.
///
/// # Returns
///
/// * Brightness arranged [time][wavelength][elevation]. Unused channels
///   (wavelength <= 1 Angstrom) are dropped, as are channels whose counts are
///   all zero over the selected times and elevations. A selection that
///   matches nothing gives an empty axis, not an error; an empty time or
///   elevation selection also leaves no channels.
pub fn read_msp<P: AsRef<Path>>(
    file: P,
    time_range: Option<RangeInclusive<Epoch>>,
    elevation_range: Option<RangeInclusive<f64>>,
) -> Result<Brightness, MspReadError> {
    let file = file.as_ref();
    debug!("Using MSP file: {}", file.display());
    let (input_type, reference_date) = reference_date(file)?;
    debug!("Input type: {input_type:?}");
    debug!("Reference date: {reference_date}");

    let raw = RawMsp::read(file)?;

    let all_timestamps: Vec<Epoch> = raw
        .seconds
        .iter()
        // Sub-second parts of the stored times are discarded.
        .map(|&s| reference_date + Duration::from_seconds(s.trunc()))
        .collect();
    match all_timestamps.as_slice() {
        [] => debug!("The file has no timesteps"),
        [t] => debug!("Only timestep: {t}"),
        [t0, .., tn] => {
            debug!("First timestep: {t0}");
            debug!("Last timestep:  {tn}");
        }
    }
    let time_indices = mask_indices(&range_mask(
        all_timestamps.iter().copied(),
        time_range.as_ref(),
    ));

    let all_elevations: Vec<u8> = (0..NUM_ELEVATIONS).map(|e| e as u8).collect();
    let elevation_indices = mask_indices(&range_mask(
        all_elevations.iter().map(|&e| f64::from(e)),
        elevation_range.as_ref(),
    ));

    let all_angstroms: Vec<i32> = raw.wavelengths_nm.iter().copied().map(nm_to_angstrom).collect();
    let mut channel_mask = used_channel_mask(&all_angstroms);
    debug!(
        "{} of {} channels are in use",
        channel_mask.iter().filter(|&&used| used).count(),
        channel_mask.len()
    );
    let num_dead = prune_dead_channels(
        raw.peak.view(),
        &time_indices,
        &elevation_indices,
        &all_angstroms,
        &mut channel_mask,
    );
    if num_dead > 0 {
        debug!("Dropped {num_dead} channels with no non-zero counts");
    }
    let channel_indices = mask_indices(&channel_mask);

    debug!(
        "Selected {} of {} timesteps, {} channels, {} of {} elevations",
        time_indices.len(),
        all_timestamps.len(),
        channel_indices.len(),
        elevation_indices.len(),
        all_elevations.len()
    );

    let data = calibrate(
        raw.peak.view(),
        &raw.filter_factors,
        &time_indices,
        &channel_indices,
        &elevation_indices,
    );

    let brightness = Brightness::new(
        data,
        time_indices.iter().map(|&i| all_timestamps[i]).collect(),
        // Used channels are all positive.
        channel_indices
            .iter()
            .map(|&i| all_angstroms[i].unsigned_abs())
            .collect(),
        elevation_indices.iter().map(|&i| all_elevations[i]).collect(),
    );
    if let Some(time_res) = brightness.time_res() {
        debug!("Time resolution: {}s", time_res.to_seconds());
    }
    Ok(brightness)
}

/// Gather the selected counts and convert them to Rayleighs. Each count is
/// widened to a float before it is scaled.
fn calibrate(
    peak: ArrayView3<i32>,
    filter_factors: &[f64],
    time_indices: &[usize],
    channel_indices: &[usize],
    elevation_indices: &[usize],
) -> Array3<f64> {
    Array3::from_shape_fn(
        (
            time_indices.len(),
            channel_indices.len(),
            elevation_indices.len(),
        ),
        |(t, c, e)| {
            let i_chan = channel_indices[c];
            let count = f64::from(peak[[time_indices[t], i_chan, elevation_indices[e]]]);
            count * filter_factors[i_chan] / FILTER_FACTOR_SCALE
        },
    )
}
