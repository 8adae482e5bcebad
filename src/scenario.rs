//! The hardcoded figure scenarios of the equilibrium study.

use crate::mixture::{Component, Mixture};
use crate::params::MarketParams;
use anyhow::Result;

/// One figure scenario: market parameters, demand mixture and chart file.
pub struct Scenario {
    /// Short label used in progress logs.
    pub label: &'static str,

    /// Description of the demand distribution for the parameter report.
    pub distribution: &'static str,

    /// File name of the persisted chart.
    pub file_name: &'static str,

    pub params: MarketParams,
    pub mixture: Mixture,
}

impl Scenario {
    /// Print the resolved parameters of this scenario to stdout.
    pub fn print_params(&self) {
        let par = &self.params;
        println!("alpha_star: {}", par.alpha_star);
        println!("Renewable: {}", par.renewable);
        println!("firms: {}", par.n_firms);
        println!("cost slope: {:.3}", par.cost_slope);
        println!("price slope: {:.3}", par.price_slope);
        println!("Distribution: {}", self.distribution);
    }
}

fn base_params(renewable: f64) -> Result<MarketParams> {
    MarketParams {
        n_firms: 3.0,
        delta: 1.0,
        renewable,
        alpha_star: 750.0,
        price_slope: 1.3,
        cost_slope: 2.4,
    }
    .validated()
}

fn uniform_demand() -> Result<Mixture> {
    Mixture::new(
        [0.0, 1.0],
        [
            Component::normal(700.0, 20.0)?,
            Component::uniform(0.0, 750.0)?,
        ],
    )
}

fn bimodal_demand(peak_weight: f64) -> Result<Mixture> {
    Mixture::new(
        [peak_weight, 1.0 - peak_weight],
        [
            Component::triangular(650.0, 750.0, 700.0)?,
            Component::triangular(350.0, 500.0, 425.0)?,
        ],
    )
}

/// The five scenarios of the equilibrium study, in publication order.
pub fn all() -> Result<Vec<Scenario>> {
    Ok(vec![
        Scenario {
            label: "uniform demand, unique equilibrium",
            distribution: "Uniform 0-750",
            file_name: "UniformUnique.jpg",
            params: base_params(100.0)?,
            mixture: uniform_demand()?,
        },
        Scenario {
            label: "uniform demand, no profitable equilibrium",
            distribution: "Uniform 0-750",
            file_name: "UniformNoEq.jpg",
            params: base_params(375.0)?,
            mixture: uniform_demand()?,
        },
        Scenario {
            label: "bimodal demand, multiple equilibria",
            distribution: "Mixture - 25% Triangular(650, 750, mode 700), \
                           75% Triangular(350, 500, mode 425)",
            file_name: "BiModalMultipleEq.jpg",
            params: base_params(100.0)?,
            mixture: bimodal_demand(0.25)?,
        },
        Scenario {
            label: "bimodal demand, unique equilibrium",
            distribution: "Mixture - 30% Triangular(650, 750, mode 700), \
                           70% Triangular(350, 500, mode 425)",
            file_name: "BiModalUniqueEq.jpg",
            params: base_params(380.0)?,
            mixture: bimodal_demand(0.3)?,
        },
        Scenario {
            label: "bimodal demand, unique equilibrium outside the sufficiency conditions",
            distribution: "Mixture - 30% Triangular(650, 750, mode 700), \
                           70% Triangular(350, 500, mode 425)",
            file_name: "BiModalUniqueEq_Assumption2Violated.png",
            params: base_params(350.0)?,
            mixture: bimodal_demand(0.3)?,
        },
    ])
}
