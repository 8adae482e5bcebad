//! Demand uncertainty as a two-component distribution mixture.

use anyhow::{Context, Result, bail};
use statrs::distribution::{Continuous, ContinuousCDF, Normal, Triangular, Uniform};

/// One component of a demand mixture.
#[derive(Debug, Clone)]
pub enum Component {
    Normal(Normal),
    Uniform(Uniform),
    Triangular(Triangular),
}

impl Component {
    pub fn normal(mean: f64, std_dev: f64) -> Result<Self> {
        let dist = Normal::new(mean, std_dev)
            .with_context(|| format!("invalid normal component ({mean}, {std_dev})"))?;
        Ok(Self::Normal(dist))
    }

    pub fn uniform(min: f64, max: f64) -> Result<Self> {
        let dist = Uniform::new(min, max)
            .with_context(|| format!("invalid uniform component ({min}, {max})"))?;
        Ok(Self::Uniform(dist))
    }

    pub fn triangular(min: f64, max: f64, mode: f64) -> Result<Self> {
        let dist = Triangular::new(min, max, mode)
            .with_context(|| format!("invalid triangular component ({min}, {max}, {mode})"))?;
        Ok(Self::Triangular(dist))
    }

    pub fn pdf(&self, x: f64) -> f64 {
        match self {
            Self::Normal(dist) => dist.pdf(x),
            Self::Uniform(dist) => dist.pdf(x),
            Self::Triangular(dist) => dist.pdf(x),
        }
    }

    pub fn cdf(&self, x: f64) -> f64 {
        match self {
            Self::Normal(dist) => dist.cdf(x),
            Self::Uniform(dist) => dist.cdf(x),
            Self::Triangular(dist) => dist.cdf(x),
        }
    }
}

/// Weighted mixture of two demand distributions.
///
/// Weights must be non-negative and sum to 1 (tolerance 1e-6) so that the
/// mixture PDF/CDF remain valid probability functions.
#[derive(Debug, Clone)]
pub struct Mixture {
    weights: [f64; 2],
    components: [Component; 2],
}

impl Mixture {
    pub fn new(weights: [f64; 2], components: [Component; 2]) -> Result<Self> {
        check_weights(&weights)?;
        Ok(Self {
            weights,
            components,
        })
    }

    /// Mixture density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        self.weights
            .iter()
            .zip(&self.components)
            .map(|(weight, component)| weight * component.pdf(x))
            .sum()
    }

    /// Mixture cumulative probability at `x`.
    ///
    /// Saturates to 0/1 outside the union of the component supports.
    pub fn cdf(&self, x: f64) -> f64 {
        self.weights
            .iter()
            .zip(&self.components)
            .map(|(weight, component)| weight * component.cdf(x))
            .sum()
    }
}

fn check_weights(weights: &[f64; 2]) -> Result<()> {
    if weights.iter().any(|&weight| !weight.is_finite() || weight < 0.0) {
        bail!("mixture weights must be finite and non-negative, but are {weights:?}");
    }

    let sum: f64 = weights.iter().sum();
    let tol = 1e-6;
    if (sum - 1.0).abs() > tol {
        bail!("mixture weights must sum to 1.0 (tolerance: {tol}), but sum to {sum}");
    }

    Ok(())
}
