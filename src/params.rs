use anyhow::{Result, bail};

/// Market parameters of a single scenario.
///
/// Validated once via [`MarketParams::validated`] and then immutable: the
/// evaluator and the sweep receive them by value and never modify them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketParams {
    /// Number of symmetric firms in the market.
    pub n_firms: f64,

    /// Risk weight on the renewable commitment term.
    pub delta: f64,

    /// Installed renewable capacity (MWh).
    pub renewable: f64,

    /// Upper bound of the demand-price support.
    pub alpha_star: f64,

    /// Slope of the inverse demand curve.
    pub price_slope: f64,

    /// Slope of the marginal cost curve.
    pub cost_slope: f64,
}

impl MarketParams {
    /// Validate all parameters and return the value unchanged.
    ///
    /// # Errors
    /// Returns an error if any parameter is non-finite or outside its
    /// admissible range.
    pub fn validated(self) -> Result<Self> {
        check_positive("number of firms", self.n_firms)?;
        check_non_negative("delta", self.delta)?;
        check_non_negative("renewable capacity", self.renewable)?;
        check_finite("alpha_star", self.alpha_star)?;
        check_positive("price slope", self.price_slope)?;
        check_finite("cost slope", self.cost_slope)?;

        Ok(self)
    }
}

fn check_finite(name: &str, val: f64) -> Result<()> {
    if !val.is_finite() {
        bail!("{name} must be finite, but is {val}");
    }
    Ok(())
}

fn check_positive(name: &str, val: f64) -> Result<()> {
    check_finite(name, val)?;
    if val <= 0.0 {
        bail!("{name} must be positive, but is {val}");
    }
    Ok(())
}

fn check_non_negative(name: &str, val: f64) -> Result<()> {
    check_finite(name, val)?;
    if val < 0.0 {
        bail!("{name} must be non-negative, but is {val}");
    }
    Ok(())
}
