//! Scalar model parameters.
//!
//! The solver dumps its model structure verbatim; the first five doubles are
//! alpha, beta, delta, gamma and R. Anything after them belongs to the
//! solver's in-memory callbacks and is ignored.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::binary::{ByteReader, ByteWriter, F64_SIZE, read_file, write_file};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParameterName {
    /// Attentional costs factor
    #[serde(rename = "alpha")]
    Alpha,
    /// Discount factor
    #[serde(rename = "beta")]
    Beta,
    /// Radius persistence
    #[serde(rename = "delta")]
    Delta,
    /// Complementarities factor
    #[serde(rename = "gamma")]
    Gamma,
    /// Gross return
    R,
}

impl ParameterName {
    /// File order of the parameters
    pub const ALL: [ParameterName; 5] = [
        ParameterName::Alpha,
        ParameterName::Beta,
        ParameterName::Delta,
        ParameterName::Gamma,
        ParameterName::R,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParameterName::Alpha => "alpha",
            ParameterName::Beta => "beta",
            ParameterName::Delta => "delta",
            ParameterName::Gamma => "gamma",
            ParameterName::R => "R",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!("unknown parameter '{s}' (expected one of alpha, beta, delta, gamma, R)")
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameters {
    pub alpha: f64,
    pub beta: f64,
    pub delta: f64,
    pub gamma: f64,
    #[serde(rename = "R")]
    pub r: f64,
}

impl Parameters {
    pub fn get(&self, name: ParameterName) -> f64 {
        match name {
            ParameterName::Alpha => self.alpha,
            ParameterName::Beta => self.beta,
            ParameterName::Delta => self.delta,
            ParameterName::Gamma => self.gamma,
            ParameterName::R => self.r,
        }
    }

    pub fn set(&mut self, name: ParameterName, value: f64) {
        let slot = match name {
            ParameterName::Alpha => &mut self.alpha,
            ParameterName::Beta => &mut self.beta,
            ParameterName::Delta => &mut self.delta,
            ParameterName::Gamma => &mut self.gamma,
            ParameterName::R => &mut self.r,
        };
        *slot = value;
    }

    /// Read the five leading doubles of a model file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let mut reader = ByteReader::new(path, &bytes);
        reader.require(ParameterName::ALL.len() * F64_SIZE)?;

        let mut params = Parameters {
            alpha: 0.0,
            beta: 0.0,
            delta: 0.0,
            gamma: 0.0,
            r: 0.0,
        };
        for name in ParameterName::ALL {
            params.set(name, reader.read_f64()?);
        }
        if reader.remaining() > 0 {
            tracing::debug!(
                path = %path.display(),
                ignored = reader.remaining(),
                "Skipping solver callback data after model parameters"
            );
        }
        Ok(params)
    }

    /// Write the five parameters in file order.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = ByteWriter::with_capacity(ParameterName::ALL.len() * F64_SIZE);
        for name in ParameterName::ALL {
            writer.write_f64(self.get(name));
        }
        write_file(path.as_ref(), &writer.into_bytes())
    }
}
