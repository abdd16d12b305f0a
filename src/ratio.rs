use log::warn;
use ndarray::Array2;

use crate::Brightness;

/// The brightness ratio of two wavelength channels \[Angstrom\], e.g. 4278 and
/// 6300, for every time and elevation.
///
/// If either channel isn't in `brightness` (it may never have been recorded,
/// or been dropped as unused or dead), a warning is logged for each missing
/// channel and `None` is returned. Zero denominators give inf or NaN.
pub fn line_ratio(brightness: &Brightness, wavelengths: (u32, u32)) -> Option<Array2<f64>> {
    let (numerator, denominator) = wavelengths;
    let num = brightness.sel_wavelength(numerator);
    let den = brightness.sel_wavelength(denominator);
    for (wavelength, sel) in [(numerator, &num), (denominator, &den)] {
        if sel.is_none() {
            warn!("Wavelength {wavelength} A not available; skipping ratio");
        }
    }

    match (num, den) {
        (Some(num), Some(den)) => Some(&num / &den),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::{Duration, Epoch};
    use ndarray::Array3;

    fn brightness() -> Brightness {
        let t0 = Epoch::from_gregorian_utc_at_midnight(2011, 3, 1);
        let timestamps = (0..2)
            .map(|i| t0 + Duration::from_seconds(f64::from(i) * 16.0))
            .collect();
        // Channel 0 is 4278, channel 1 is 6300.
        let mut data = Array3::zeros((2, 2, 3));
        for t in 0..2 {
            for e in 0..3 {
                data[[t, 0, e]] = (1 + t + e) as f64 * 10.0;
                data[[t, 1, e]] = (1 + t + e) as f64 * 2.0;
            }
        }
        // One zero denominator and one 0/0.
        data[[1, 1, 2]] = 0.0;
        data[[0, 0, 0]] = 0.0;
        data[[0, 1, 0]] = 0.0;
        Brightness::new(data, timestamps, vec![4278, 6300], vec![10, 20, 30])
    }

    #[test]
    fn test_ratio_of_present_wavelengths() {
        let ratio = line_ratio(&brightness(), (4278, 6300)).unwrap();
        assert_eq!(ratio.dim(), (2, 3));
        assert_abs_diff_eq!(ratio[[0, 1]], 5.0);
        assert_abs_diff_eq!(ratio[[1, 0]], 5.0);
        assert_abs_diff_eq!(ratio[[1, 1]], 5.0);

        let inverse = line_ratio(&brightness(), (6300, 4278)).unwrap();
        assert_abs_diff_eq!(inverse[[0, 2]], 0.2);
    }

    #[test]
    fn test_ratio_follows_float_division() {
        let ratio = line_ratio(&brightness(), (4278, 6300)).unwrap();
        assert!(ratio[[1, 2]].is_infinite());
        assert!(ratio[[0, 0]].is_nan());
    }

    #[test]
    fn test_ratio_with_missing_wavelength() {
        let b = brightness();
        assert!(line_ratio(&b, (4278, 5577)).is_none());
        assert!(line_ratio(&b, (5577, 4278)).is_none());
        assert!(line_ratio(&b, (5577, 4861)).is_none());
    }
}
