//! Synthetic MSP files for the integration tests.

#![allow(dead_code)]

use std::path::Path;

use ndarray::Array3;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The contents of an MSP file, ready to be written out.
pub struct SyntheticMsp {
    pub seconds: Vec<f64>,
    pub wavelengths_nm: Vec<f32>,
    /// Left out of the file when `None`.
    pub filter_factors: Option<Vec<f32>>,
    /// Raw peak counts, [time][wavelength][elevation].
    pub peak: Array3<i16>,
}

impl SyntheticMsp {
    /// A file with 181 elevation bins and counts from `count(time, channel,
    /// elevation)`.
    pub fn new(
        seconds: Vec<f64>,
        wavelengths_nm: Vec<f32>,
        filter_factors: Vec<f32>,
        count: impl Fn(usize, usize, usize) -> i16,
    ) -> SyntheticMsp {
        let dim = (seconds.len(), wavelengths_nm.len(), 181);
        SyntheticMsp {
            seconds,
            wavelengths_nm,
            filter_factors: Some(filter_factors),
            peak: Array3::from_shape_fn(dim, |(t, c, e)| count(t, c, e)),
        }
    }

    /// Write a netCDF-4 file, as used from 2011.
    pub fn write_netcdf4(&self, path: &Path) -> Result<(), netcdf::Error> {
        self.write(path, netcdf::Options::NETCDF4)
    }

    /// Write a classic netCDF file, as used up to 2010.
    pub fn write_classic(&self, path: &Path) -> Result<(), netcdf::Error> {
        self.write(path, netcdf::Options::_64BIT_OFFSET)
    }

    fn write(&self, path: &Path, options: netcdf::Options) -> Result<(), netcdf::Error> {
        let (num_times, num_channels, num_elevations) = self.peak.dim();
        let mut nc = netcdf::create_with(path, options)?;
        nc.add_dimension("time", num_times)?;
        nc.add_dimension("wavelength", num_channels)?;
        nc.add_dimension("elevation", num_elevations)?;

        {
            let mut var = nc.add_variable::<f64>("Time", &["time"])?;
            var.put_values(&self.seconds, ..)?;
        }
        {
            let mut var = nc.add_variable::<f32>("Wavelength", &["wavelength"])?;
            var.put_values(&self.wavelengths_nm, ..)?;
        }
        {
            let mut var =
                nc.add_variable::<i16>("PeakIntensity", &["time", "wavelength", "elevation"])?;
            let counts: Vec<i16> = self.peak.iter().copied().collect();
            var.put_values(&counts, ..)?;
        }
        if let Some(filter_factors) = &self.filter_factors {
            let mut var = nc.add_variable::<f32>("FilterFactor", &["wavelength"])?;
            var.put_values(filter_factors, ..)?;
        }
        Ok(())
    }
}
