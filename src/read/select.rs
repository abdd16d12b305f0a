//! Choosing which samples and channels of an MSP file to keep.

use std::ops::RangeInclusive;

use itertools::Itertools;
use log::trace;
use ndarray::ArrayView3;

/// Channels at or below this wavelength \[Angstrom\] are unused.
const UNUSED_CHANNEL_ANGSTROM: i32 = 1;

/// Which `values` lie within the inclusive `range`. Everything is kept when
/// there is no range.
pub(super) fn range_mask<T: PartialOrd>(
    values: impl IntoIterator<Item = T>,
    range: Option<&RangeInclusive<T>>,
) -> Vec<bool> {
    values
        .into_iter()
        .map(|v| range.map_or(true, |r| r.contains(&v)))
        .collect()
}

/// The indices of the `true` elements of a mask.
pub(super) fn mask_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter().positions(|&keep| keep).collect()
}

/// Convert a stored channel wavelength \[nm\] to integer Angstrom. The
/// multiplication happens at the single precision the files store, and the
/// result is truncated, so 427.8 nm becomes 4278.
pub(super) fn nm_to_angstrom(nm: f32) -> i32 {
    (nm * 10.0) as i32
}

/// Channels that hold a real wavelength. Unused channels have a zero (or
/// otherwise tiny) wavelength.
pub(super) fn used_channel_mask(angstroms: &[i32]) -> Vec<bool> {
    angstroms
        .iter()
        .map(|&a| a > UNUSED_CHANNEL_ANGSTROM)
        .collect()
}

/// Unset the mask of every channel whose raw counts are all exactly zero over
/// the selected times and elevations. Zero is assumed never to be a genuine
/// reading; a broken channel reports nothing but zeros, and a healthy one
/// always sees some sky background.
///
/// `peak` is [time][wavelength][elevation], with every channel present.
/// Returns the number of channels pruned.
pub(super) fn prune_dead_channels(
    peak: ArrayView3<i32>,
    time_indices: &[usize],
    elevation_indices: &[usize],
    angstroms: &[i32],
    channel_mask: &mut [bool],
) -> usize {
    let mut num_pruned = 0;
    for (i_chan, used) in channel_mask.iter_mut().enumerate() {
        if !*used {
            continue;
        }
        let dead = time_indices
            .iter()
            .cartesian_product(elevation_indices.iter())
            .all(|(&i_time, &i_elev)| peak[[i_time, i_chan, i_elev]] == 0);
        if dead {
            trace!(
                "Channel {i_chan} ({} A) is all zeros; dropping it",
                angstroms[i_chan]
            );
            *used = false;
            num_pruned += 1;
        }
    }
    num_pruned
}
