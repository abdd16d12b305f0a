//! Reading of meridian-scanning photometer (MSP) data.
//!
//! MSP files hold raw peak photometer counts per (time, wavelength channel,
//! elevation bin). [`read_msp`] turns one file into calibrated brightness in
//! Rayleighs, labelled by its three axes, and [`line_ratio`] divides two of its
//! wavelength channels.

pub mod error;
pub mod filename;
pub mod ratio;
pub mod read;

pub use error::MspReadError;
pub use ratio::line_ratio;
pub use read::{parse_time_range, read_msp};

use hifitime::{Duration, Epoch};
use ndarray::prelude::*;

/// The number of elevation bins in every MSP scan. Bin `i` is `i` degrees from
/// the northern horizon.
pub const NUM_ELEVATIONS: usize = 181;

/// Filter factors are expressed in Rayleighs per count * 128.
pub const FILTER_FACTOR_SCALE: f64 = 128.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MspInputType {
    /// 2011 onwards; netCDF-4, calendar date in the filename.
    Nc,
    /// 1983 to 2010; classic netCDF, year and day-of-year in the filename.
    Pf,
}

/// Calibrated MSP brightness and the coordinates of each of its axes.
#[derive(Debug, Clone)]
pub struct Brightness {
    /// Brightness \[Rayleigh\], arranged [time][wavelength][elevation].
    data: Array3<f64>,

    /// The timestamps of the selected samples, in the order they were stored.
    /// These are not guaranteed to be regularly spaced; a time selection
    /// keeps whichever samples fall within it.
    timestamps: Vec<Epoch>,

    /// The wavelength of each surviving channel \[Angstrom\].
    ///
    /// These are kept as ints so that channels can be looked up by exact
    /// value; the nanometre floats stored in the files are not reliably
    /// comparable.
    wavelengths: Vec<u32>,

    /// Elevation of each bin from the northern horizon \[degrees\].
    elevations: Vec<u8>,
}

impl Brightness {
    pub(crate) fn new(
        data: Array3<f64>,
        timestamps: Vec<Epoch>,
        wavelengths: Vec<u32>,
        elevations: Vec<u8>,
    ) -> Brightness {
        debug_assert_eq!(
            data.dim(),
            (timestamps.len(), wavelengths.len(), elevations.len())
        );
        Brightness {
            data,
            timestamps,
            wavelengths,
            elevations,
        }
    }

    pub fn data(&self) -> ArrayView3<f64> {
        self.data.view()
    }

    pub fn timestamps(&self) -> &[Epoch] {
        &self.timestamps
    }

    pub fn wavelengths(&self) -> &[u32] {
        &self.wavelengths
    }

    pub fn elevations(&self) -> &[u8] {
        &self.elevations
    }

    /// (time, wavelength, elevation)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The index of `wavelength` \[Angstrom\] on the wavelength axis, if that
    /// channel is present.
    pub fn wavelength_index(&self, wavelength: u32) -> Option<usize> {
        self.wavelengths.iter().position(|&w| w == wavelength)
    }

    /// The time × elevation brightness of a single channel.
    pub fn sel_wavelength(&self, wavelength: u32) -> Option<ArrayView2<f64>> {
        self.wavelength_index(wavelength)
            .map(|i| self.data.index_axis(Axis(1), i))
    }

    /// The smallest gap between two consecutive timestamps. `None` if there
    /// are fewer than two timestamps.
    pub fn time_res(&self) -> Option<Duration> {
        let mut gaps = self.timestamps.windows(2).map(|ts| ts[1] - ts[0]);
        let first = gaps.next()?;
        Some(gaps.fold(first, |acc, gap| acc.min(gap)))
    }
}
