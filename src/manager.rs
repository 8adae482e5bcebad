use crate::figure;
use crate::response::{BestResponse, GRID_POINTS, grid_upper};
use crate::scenario::{self, Scenario};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Drives figure generation for every scenario.
pub struct Manager {
    fig_dir: PathBuf,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(fig_dir: P) -> Result<Self> {
        let fig_dir = fig_dir.as_ref().to_path_buf();
        fs::create_dir_all(&fig_dir).with_context(|| format!("failed to create {fig_dir:?}"))?;

        Ok(Self { fig_dir })
    }

    /// Regenerate the full figure set: the equal-split reference chart
    /// followed by one chart per scenario.
    pub fn generate_figures(&self) -> Result<()> {
        let scenarios = scenario::all().context("failed to construct scenarios")?;

        let first = scenarios.first().context("scenario list is empty")?;
        self.generate_equal_split(first)
            .context("failed to generate equal-split figure")?;

        for scenario in &scenarios {
            self.generate_scenario(scenario)
                .with_context(|| format!("failed to generate figure {:?}", scenario.file_name))?;
        }

        Ok(())
    }

    fn generate_equal_split(&self, scenario: &Scenario) -> Result<()> {
        let path = self.fig_dir.join("qnLine.png");
        log::info!("generating {path:?}");

        figure::render_equal_split(&path, grid_upper(&scenario.params), scenario.params.n_firms)
    }

    fn generate_scenario(&self, scenario: &Scenario) -> Result<()> {
        log::info!("scenario: {}", scenario.label);
        scenario.print_params();

        let evaluator = BestResponse::new(scenario.params, scenario.mixture.clone());
        let curve = evaluator
            .sweep(GRID_POINTS)
            .context("failed to sweep response curve")?;

        let path = self.fig_dir.join(scenario.file_name);
        log::info!("generating {path:?}");

        figure::render_response(&path, &curve, scenario.params.n_firms)
    }
}
