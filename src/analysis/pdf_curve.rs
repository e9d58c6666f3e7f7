//! Analytically known curves sampled over a domain

use super::stats::nan_mean;
use thiserror::Error;

/// Errors that can occur when pairing a domain with its values
#[derive(Error, Debug, PartialEq)]
pub enum CurveError {
    #[error("Curve '{name}' has {domain} domain points but {values} values")]
    LengthMismatch {
        name: String,
        domain: usize,
        values: usize,
    },
}

/// A curve given as `(domain[i], values[i])` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfCurve {
    name: String,
    domain: Vec<f64>,
    values: Vec<f64>,
}

impl PdfCurve {
    pub fn new(
        name: impl Into<String>,
        domain: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, CurveError> {
        let name = name.into();
        if domain.len() != values.len() {
            return Err(CurveError::LengthMismatch {
                name,
                domain: domain.len(),
                values: values.len(),
            });
        }

        Ok(Self {
            name,
            domain,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Returns a copy scaled so that the mean of its non-NaN values is 1.
    ///
    /// An all-NaN or empty curve stays NaN.
    pub fn normalized_to_unit_mean(&self) -> PdfCurve {
        let scale = nan_mean(&self.values);

        PdfCurve {
            name: self.name.clone(),
            domain: self.domain.clone(),
            values: self.values.iter().map(|value| value / scale).collect(),
        }
    }

    /// The curve as `(x, y)` pairs, in file order.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.domain
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .collect()
    }
}
