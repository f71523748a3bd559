//! Discretized one dimensional domains.
//!
//! File layout: `[u16 count][f64 weight][f64 x count]`, little-endian.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::binary::{ByteReader, ByteWriter, F64_SIZE, U16_SIZE, read_file, write_file};
use crate::error::{GridError, Result};
use crate::format::format_shortest;

/// An increasing sequence of grid points plus the weighting exponent used to
/// distribute them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    #[serde(skip)]
    path: Option<PathBuf>,
    values: Vec<f64>,
    weight: f64,
}

impl Grid {
    /// Build a grid from explicit points.
    pub fn new(values: Vec<f64>, weight: f64) -> Self {
        Self {
            path: None,
            values,
            weight,
        }
    }

    /// Build `n` points on `[min, max]` distributed by the power `weight`:
    /// `d[i] = min + i^w * (max - min) / (n - 1)^w`.
    pub fn power(n: usize, min: f64, max: f64, weight: f64) -> Self {
        let values = match n {
            0 => Vec::new(),
            1 => vec![min],
            _ => {
                let h = (max - min) / ((n - 1) as f64).powf(weight);
                (0..n).map(|i| min + (i as f64).powf(weight) * h).collect()
            }
        };
        Self::new(values, weight)
    }

    /// Parse an initialization string `"n, min, max[, weight]"`.
    ///
    /// The weight defaults to 1 (equidistant points).
    pub fn parse_init(init: &str) -> std::result::Result<Self, GridError> {
        let invalid = || GridError::InvalidInit(init.to_string());
        let fields: Vec<&str> = init.split(',').map(str::trim).collect();
        if !(3..=4).contains(&fields.len()) {
            return Err(invalid());
        }
        let n: usize = fields[0].parse().map_err(|_| invalid())?;
        let min: f64 = fields[1].parse().map_err(|_| invalid())?;
        let max: f64 = fields[2].parse().map_err(|_| invalid())?;
        let weight: f64 = match fields.get(3) {
            Some(w) => w.parse().map_err(|_| invalid())?,
            None => 1.0,
        };
        Ok(Self::power(n, min, max, weight))
    }

    /// Load a grid binary file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let mut reader = ByteReader::new(path, &bytes);

        let count = reader.read_u16()? as usize;
        let weight = reader.read_f64()?;
        let values = reader.read_f64s(count)?;
        if reader.remaining() > 0 {
            tracing::warn!(
                path = %path.display(),
                trailing = reader.remaining(),
                "Ignoring trailing bytes after grid points"
            );
        }

        tracing::debug!(path = %path.display(), points = count, "Loaded grid");
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
            weight,
        })
    }

    /// Write the grid in the binary layout read by [`Grid::load`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = ByteWriter::with_capacity(U16_SIZE + F64_SIZE * (self.len() + 1));
        writer.write_len("grid", self.len())?;
        writer.write_f64(self.weight);
        for &value in &self.values {
            writer.write_f64(value);
        }
        write_file(path.as_ref(), &writer.into_bytes())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First grid point
    pub fn min(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Last grid point
    pub fn max(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Indices approximating an equipartition of the grid's domain.
    ///
    /// The first index is 0 and the last is `len - 1`. Each interior point `k`
    /// maps to the smallest index whose value exceeds `k * step`, where
    /// `step = (max - min) / (size - 1)`.
    pub fn eqpart(&self, size: usize) -> std::result::Result<Vec<usize>, GridError> {
        let (Some(min), Some(max)) = (self.min(), self.max()) else {
            return Err(GridError::Empty);
        };
        if size == 0 {
            return Ok(Vec::new());
        }

        let mut indices = vec![0; size];
        indices[size - 1] = self.len() - 1;
        if size > 2 {
            let step = (max - min) / (size - 1) as f64;
            for (k, index) in indices.iter_mut().enumerate().take(size - 1).skip(1) {
                let bound = k as f64 * step;
                *index = self
                    .values
                    .iter()
                    .position(|&v| v > bound)
                    .ok_or(GridError::NoUpperBracket(bound))?;
            }
        }
        Ok(indices)
    }

    /// For each query, the index of the smallest grid value that is not less
    /// than the query.
    pub fn lower_bound_index(&self, queries: &[f64]) -> std::result::Result<Vec<usize>, GridError> {
        queries
            .iter()
            .map(|&query| {
                self.values
                    .iter()
                    .enumerate()
                    .filter(|&(_, &v)| v >= query)
                    .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                        Some((_, bv)) if bv <= v => best,
                        _ => Some((i, v)),
                    })
                    .map(|(i, _)| i)
                    .ok_or(GridError::NoUpperBracket(query))
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "grid".to_string());
        let bound = |v: Option<f64>| v.map(format_shortest).unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{name}={{.n={}, .m={}, .M={}, .weight={}}}",
            self.len(),
            bound(self.min()),
            bound(self.max()),
            format_shortest(self.weight)
        )
    }
}
