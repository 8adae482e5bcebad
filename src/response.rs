//! Inclusive best-response evaluation and the scenario quantity sweep.

use crate::mixture::Mixture;
use crate::params::MarketParams;
use crate::quadrature::{self, QuadSettings};
use anyhow::{Result, bail};

/// Number of grid points in a scenario sweep.
pub const GRID_POINTS: usize = 100;

/// Visual margin subtracted from the true upper quantity bound.
const GRID_MARGIN: f64 = 100.0;

/// Upper bound of the quantity grid for the given market parameters.
pub fn grid_upper(params: &MarketParams) -> f64 {
    params.alpha_star / params.price_slope - params.renewable - GRID_MARGIN
}

/// Evaluator of the inclusive best-response function.
///
/// Holds the validated market parameters, the demand mixture and the
/// quadrature settings; evaluation is a pure function of the total
/// quantity.
pub struct BestResponse {
    params: MarketParams,
    mixture: Mixture,
    quad: QuadSettings,
}

impl BestResponse {
    pub fn new(params: MarketParams, mixture: Mixture) -> Self {
        Self {
            params,
            mixture,
            quad: QuadSettings::default(),
        }
    }

    /// Evaluate the inclusive best response at total quantity `total_qty`.
    ///
    /// Near the upper support bound the denominator
    /// `price_slope * (1 - CDF)` approaches zero and the result follows
    /// IEEE-754 arithmetic: it may be infinite or NaN, never a panic.
    pub fn evaluate(&self, total_qty: f64) -> f64 {
        self.evaluate_checked(total_qty).0
    }

    fn evaluate_checked(&self, total_qty: f64) -> (f64, bool) {
        let par = &self.params;

        let lower = par.price_slope * (total_qty + par.renewable);
        let upper = par.alpha_star;

        let truncated_mean =
            quadrature::integrate(|x| x * self.mixture.pdf(x), lower, upper, &self.quad);

        let numerator = truncated_mean.value - par.cost_slope;
        let denominator = par.price_slope * (1.0 - self.mixture.cdf(lower));

        let margin_term = numerator / denominator;
        let committed = total_qty + (1.0 + par.delta / par.n_firms) * par.renewable;

        (margin_term - committed, truncated_mean.converged)
    }

    /// Sweep `n_points` evenly spaced quantities from zero to the grid
    /// upper bound, inclusive at both ends.
    ///
    /// # Errors
    /// Fails if the grid is degenerate (upper bound not positive) or if
    /// fewer than two points are requested.
    pub fn sweep(&self, n_points: usize) -> Result<ResponseCurve> {
        if n_points < 2 {
            bail!("quantity grid needs at least 2 points, but {n_points} were requested");
        }

        let upper = grid_upper(&self.params);
        if upper <= 0.0 {
            bail!(
                "degenerate quantity grid: upper bound is {upper:.3}; \
                 renewable capacity exhausts the demand support"
            );
        }

        let mut points = Vec::with_capacity(n_points);
        let mut capped = 0_usize;
        for idx in 0..n_points {
            let qty = upper * idx as f64 / (n_points - 1) as f64;
            let (response, converged) = self.evaluate_checked(qty);
            if !converged {
                capped += 1;
            }
            points.push((qty, response));
        }

        if capped > 0 {
            log::warn!("quadrature hit the subdivision cap at {capped} of {n_points} grid points");
        }

        Ok(ResponseCurve { points })
    }
}

/// Best-response curve over a quantity grid.
///
/// Ordered (totalQuantity, perFirmBestResponse) pairs; consumed by the
/// plotting routine and not retained.
pub struct ResponseCurve {
    pub points: Vec<(f64, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixture::Component;

    fn uniform_market(renewable: f64) -> BestResponse {
        let params = MarketParams {
            n_firms: 3.0,
            delta: 1.0,
            renewable,
            alpha_star: 750.0,
            price_slope: 1.3,
            cost_slope: 2.4,
        }
        .validated()
        .unwrap();

        let mixture = Mixture::new(
            [0.0, 1.0],
            [
                Component::normal(700.0, 20.0).unwrap(),
                Component::uniform(0.0, 750.0).unwrap(),
            ],
        )
        .unwrap();

        BestResponse::new(params, mixture)
    }

    // Closed form of the response under Uniform(0, 750) demand.
    fn uniform_closed_form(total_qty: f64, renewable: f64) -> f64 {
        let lower = 1.3 * (total_qty + renewable);
        let numerator = (750.0_f64.powi(2) - lower.powi(2)) / 1500.0 - 2.4;
        let denominator = 1.3 * (1.0 - lower / 750.0);
        numerator / denominator - (total_qty + (1.0 + 1.0 / 3.0) * renewable)
    }

    #[test]
    fn matches_closed_form_for_uniform_demand() {
        let evaluator = uniform_market(100.0);
        for total_qty in [0.0, 75.0, 150.0, 300.0] {
            let expected = uniform_closed_form(total_qty, 100.0);
            let actual = evaluator.evaluate(total_qty);
            assert!(
                (actual - expected).abs() < 1e-5,
                "response({total_qty}) = {actual}, closed form {expected}"
            );
        }
    }

    #[test]
    fn response_at_zero_is_finite() {
        let evaluator = uniform_market(100.0);
        assert!(evaluator.evaluate(0.0).is_finite());
    }

    #[test]
    fn curve_is_monotone_non_increasing() {
        let evaluator = uniform_market(100.0);
        let curve = evaluator.sweep(GRID_POINTS).unwrap();

        for pair in curve.points.windows(2) {
            let (prev_qty, prev) = pair[0];
            let (next_qty, next) = pair[1];
            assert!(
                next <= prev + 1e-6,
                "response rose from {prev} at Q = {prev_qty} to {next} at Q = {next_qty}"
            );
        }
    }

    #[test]
    fn high_renewable_curve_stays_below_equal_split() {
        let evaluator = uniform_market(375.0);
        let curve = evaluator.sweep(GRID_POINTS).unwrap();

        for (qty, response) in curve.points {
            assert!(
                response < qty / 3.0,
                "response {response} at Q = {qty} is not below Q/n"
            );
        }
    }

    #[test]
    fn sweep_is_deterministic() {
        let evaluator = uniform_market(100.0);
        let first = evaluator.sweep(GRID_POINTS).unwrap();
        let second = evaluator.sweep(GRID_POINTS).unwrap();

        assert_eq!(first.points, second.points);
    }

    #[test]
    fn grid_has_expected_shape() {
        let evaluator = uniform_market(100.0);
        let curve = evaluator.sweep(GRID_POINTS).unwrap();

        assert_eq!(curve.points.len(), GRID_POINTS);
        assert_eq!(curve.points[0].0, 0.0);

        let upper = 750.0 / 1.3 - 100.0 - 100.0;
        let last = curve.points.last().unwrap().0;
        assert!((last - upper).abs() < 1e-12);
    }

    #[test]
    fn beyond_support_is_non_finite_not_panic() {
        let evaluator = uniform_market(100.0);

        // lowerLim exceeds alpha_star, so CDF saturates and the
        // denominator vanishes.
        let response = evaluator.evaluate(800.0);
        assert!(!response.is_finite());
    }

    #[test]
    fn degenerate_grid_is_rejected() {
        let evaluator = uniform_market(500.0);
        assert!(evaluator.sweep(GRID_POINTS).is_err());
    }

    #[test]
    fn rejects_single_point_grid() {
        let evaluator = uniform_market(100.0);
        assert!(evaluator.sweep(1).is_err());
    }
}
