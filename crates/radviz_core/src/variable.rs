//! Value functions and optimal controls sampled on a wealth x radius mesh.
//!
//! File layout: `[u16 x_count][u16 r_count][f64 x (x_count * r_count)]`.
//! The solver writes one block of `r_count` values per wealth point, so the
//! file is x-major; in memory the element read at `(x, r)` is stored at
//! `data[[r, x]]`, rows indexed by radius and columns by wealth. Consumers
//! index by `(r, x)` throughout.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ndarray::{Array2, ArrayView1};

use crate::binary::{ByteReader, ByteWriter, F64_SIZE, U16_SIZE, read_file, write_file};
use crate::error::{LoadError, Result};
use crate::grid::Grid;

/// A two dimensional array attached to (but not owning) its wealth and
/// radius grids.
#[derive(Debug, Clone)]
pub struct Variable {
    path: Option<PathBuf>,
    x_grid: Arc<Grid>,
    r_grid: Arc<Grid>,
    data: Array2<f64>,
}

impl Variable {
    /// Load a variable binary file, validating its header against the grids.
    pub fn load(x_grid: Arc<Grid>, r_grid: Arc<Grid>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let mut reader = ByteReader::new(path, &bytes);

        let x_size = reader.read_u16()? as usize;
        if x_size != x_grid.len() {
            return Err(LoadError::size_mismatch("1st dimension", x_grid.len(), x_size));
        }
        let r_size = reader.read_u16()? as usize;
        if r_size != r_grid.len() {
            return Err(LoadError::size_mismatch("2nd dimension", r_grid.len(), r_size));
        }
        reader.require(x_size * r_size * F64_SIZE)?;

        let mut data = Array2::zeros((r_size, x_size));
        for x_idx in 0..x_size {
            for r_idx in 0..r_size {
                data[[r_idx, x_idx]] = reader.read_f64()?;
            }
        }
        if reader.remaining() > 0 {
            tracing::warn!(
                path = %path.display(),
                trailing = reader.remaining(),
                "Ignoring trailing bytes after variable data"
            );
        }

        tracing::debug!(path = %path.display(), x_size, r_size, "Loaded variable");
        Ok(Self {
            path: Some(path.to_path_buf()),
            x_grid,
            r_grid,
            data,
        })
    }

    /// Wrap a precomputed array of shape `(r_grid.len(), x_grid.len())`.
    pub fn from_array(x_grid: Arc<Grid>, r_grid: Arc<Grid>, data: Array2<f64>) -> Result<Self> {
        let expected = (r_grid.len(), x_grid.len());
        if data.dim() != expected {
            return Err(LoadError::ShapeMismatch {
                what: "variable shape",
                expected: format!("{expected:?}"),
                actual: format!("{:?}", data.dim()),
            });
        }
        Ok(Self {
            path: None,
            x_grid,
            r_grid,
            data,
        })
    }

    /// Evaluate `f(r_idx, x_idx)` at every mesh point.
    pub fn from_fn(
        x_grid: Arc<Grid>,
        r_grid: Arc<Grid>,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Self {
        let data = Array2::from_shape_fn((r_grid.len(), x_grid.len()), |(r, x)| f(r, x));
        Self {
            path: None,
            x_grid,
            r_grid,
            data,
        }
    }

    /// Write the variable in the x-major layout read by [`Variable::load`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let (r_size, x_size) = self.data.dim();
        let mut writer = ByteWriter::with_capacity(2 * U16_SIZE + F64_SIZE * x_size * r_size);
        writer.write_len("1st dimension", x_size)?;
        writer.write_len("2nd dimension", r_size)?;
        for x_idx in 0..x_size {
            for r_idx in 0..r_size {
                writer.write_f64(self.data[[r_idx, x_idx]]);
            }
        }
        write_file(path.as_ref(), &writer.into_bytes())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn x_grid(&self) -> &Arc<Grid> {
        &self.x_grid
    }

    pub fn r_grid(&self) -> &Arc<Grid> {
        &self.r_grid
    }

    /// The data, rows indexed by radius and columns by wealth
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn get(&self, r_idx: usize, x_idx: usize) -> Option<f64> {
        self.data.get([r_idx, x_idx]).copied()
    }

    /// Values over the wealth grid at a fixed radius index
    pub fn r_section(&self, r_idx: usize) -> Result<ArrayView1<'_, f64>> {
        if r_idx >= self.data.nrows() {
            return Err(LoadError::IndexOutOfRange {
                what: "radius",
                index: r_idx,
                len: self.data.nrows(),
            });
        }
        Ok(self.data.row(r_idx))
    }

    /// Values over the radius grid at a fixed wealth index
    pub fn x_section(&self, x_idx: usize) -> Result<ArrayView1<'_, f64>> {
        if x_idx >= self.data.ncols() {
            return Err(LoadError::IndexOutOfRange {
                what: "wealth",
                index: x_idx,
                len: self.data.ncols(),
            });
        }
        Ok(self.data.column(x_idx))
    }

    /// Smallest and largest finite values, if any
    pub fn range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// File name of the source data, used as a plot title
    pub fn name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "variable".to_string())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "variable".to_string());
        write!(
            f,
            "{name}={{.d1={}, .d2={}, .shape={:?}}}",
            self.x_grid,
            self.r_grid,
            self.data.dim()
        )
    }
}
