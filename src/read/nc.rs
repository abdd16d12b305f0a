//! Helpers for pulling variables out of a netCDF file.

use std::path::Path;

use ndarray::Array3;
use netcdf::{File, Variable};

use crate::MspReadError;

/// Open a netCDF file (classic or netCDF-4) read only. The file is closed when
/// the returned handle is dropped.
pub(super) fn nc_open(file: &Path) -> Result<File, MspReadError> {
    Ok(netcdf::open(file)?)
}

/// Get a variable that must exist.
pub(super) fn nc_get_var<'f>(
    nc: &'f File,
    file: &Path,
    name: &'static str,
) -> Result<Variable<'f>, MspReadError> {
    nc.variable(name)
        .ok_or_else(|| MspReadError::MissingVariable {
            file: file.to_path_buf(),
            name,
        })
}

/// The length of each of a variable's dimensions.
pub(super) fn nc_get_shape(var: &Variable) -> Vec<usize> {
    var.dimensions().iter().map(|d| d.len()).collect()
}

/// Get a one-dimensional variable, checking that it is one-dimensional.
fn nc_get_col_var<'f>(
    nc: &'f File,
    file: &Path,
    name: &'static str,
) -> Result<Variable<'f>, MspReadError> {
    let var = nc_get_var(nc, file, name)?;
    let shape = nc_get_shape(&var);
    if shape.len() != 1 {
        return Err(MspReadError::BadShape {
            file: file.to_path_buf(),
            name,
            got: shape,
            expected: "one dimension".to_string(),
        });
    }
    Ok(var)
}

/// Read all of a one-dimensional variable as doubles, whatever its stored
/// type.
pub(super) fn nc_get_col_f64(
    nc: &File,
    file: &Path,
    name: &'static str,
) -> Result<Vec<f64>, MspReadError> {
    let var = nc_get_col_var(nc, file, name)?;
    let values: Vec<f64> = var.get_values(..)?;
    Ok(values)
}

/// Read all of a one-dimensional variable as singles, whatever its stored
/// type.
pub(super) fn nc_get_col_f32(
    nc: &File,
    file: &Path,
    name: &'static str,
) -> Result<Vec<f32>, MspReadError> {
    let var = nc_get_col_var(nc, file, name)?;
    let values: Vec<f32> = var.get_values(..)?;
    Ok(values)
}

/// Read all of a three-dimensional integer variable, which must have the
/// shape `dim`.
pub(super) fn nc_get_cube_i32(
    nc: &File,
    file: &Path,
    name: &'static str,
    dim: (usize, usize, usize),
) -> Result<Array3<i32>, MspReadError> {
    let var = nc_get_var(nc, file, name)?;
    let shape = nc_get_shape(&var);
    let bad_shape = |got: Vec<usize>| MspReadError::BadShape {
        file: file.to_path_buf(),
        name,
        got,
        expected: format!("[{}, {}, {}]", dim.0, dim.1, dim.2),
    };
    if shape != [dim.0, dim.1, dim.2] {
        return Err(bad_shape(shape));
    }

    let values: Vec<i32> = var.get_values(..)?;
    Array3::from_shape_vec(dim, values).map_err(|_| bad_shape(shape))
}
