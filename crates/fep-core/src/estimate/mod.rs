//! Zwanzig exponential-averaging estimator over extracted windows.
//!
//! For a window with reference energies `U_0` and perturbed energies `U_1`
//! (paired by sample index), `dG = -kT ln < exp(-(U_1 - U_0) / kT) >`,
//! reported in kcal/mol. Forward pairs `after` with `this`; backward pairs
//! `this` with `before`.

mod report;

pub use report::{EstimateReport, WindowReport};

use crate::common::constants::{
    AVOGADRO, HARTREE_TO_JOULE, KJ_PER_KCAL, molar_kcal_factor, thermal_energy,
};
use crate::domain::{
    ComputeResult, FepError, GeometryPosition, WindowBucket, WindowId, WindowSet,
};
use crate::numerics::{self, DecimalMathError};
use bigdecimal::BigDecimal;
use num_traits::{ToPrimitive, Zero};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Horizontal spread of the per-sample series around each window.
const SAMPLE_SERIES_OFFSET: f64 = 0.05;
const SAMPLE_SERIES_STEP: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }

    /// `(perturbed, reference)` energies for this direction.
    pub fn pair(self, bucket: &WindowBucket) -> (&[BigDecimal], &[BigDecimal]) {
        match self {
            Self::Forward => (
                bucket.samples(GeometryPosition::After),
                bucket.samples(GeometryPosition::This),
            ),
            Self::Backward => (
                bucket.samples(GeometryPosition::This),
                bucket.samples(GeometryPosition::Before),
            ),
        }
    }
}

/// Forward and backward free-energy differences (kcal/mol) per window.
///
/// A window with mismatched or empty sample sets has no entry for that
/// direction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FepEstimate {
    forward: BTreeMap<WindowId, BigDecimal>,
    backward: BTreeMap<WindowId, BigDecimal>,
}

impl FepEstimate {
    pub fn forward(&self) -> &BTreeMap<WindowId, BigDecimal> {
        &self.forward
    }

    pub fn backward(&self) -> &BTreeMap<WindowId, BigDecimal> {
        &self.backward
    }

    pub fn direction(&self, direction: Direction) -> &BTreeMap<WindowId, BigDecimal> {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    pub fn total(&self, direction: Direction) -> BigDecimal {
        self.direction(direction)
            .values()
            .fold(BigDecimal::zero(), |sum, value| sum + value)
    }
}

/// One point of the raw per-sample energy series.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledSample {
    pub window: WindowId,
    pub x: f64,
    pub energy_kcal_mol: f64,
}

pub fn estimate(windows: &WindowSet) -> ComputeResult<FepEstimate> {
    let mut result = FepEstimate::default();

    for (window, bucket) in windows.iter() {
        for direction in [Direction::Forward, Direction::Backward] {
            let (perturbed, reference) = direction.pair(bucket);
            let delta_g = zwanzig_delta_g(perturbed, reference).map_err(|source| {
                FepError::computation(
                    "RUN.FEP_ESTIMATE",
                    format!(
                        "{} estimate for window {} failed: {}",
                        direction.as_str(),
                        window,
                        source
                    ),
                )
            })?;

            match delta_g {
                Some(value) => {
                    debug!(
                        window = %window,
                        direction = direction.as_str(),
                        samples = perturbed.len(),
                        "estimated free-energy difference"
                    );
                    let target = match direction {
                        Direction::Forward => &mut result.forward,
                        Direction::Backward => &mut result.backward,
                    };
                    target.insert(window.clone(), value);
                }
                None => debug!(
                    window = %window,
                    direction = direction.as_str(),
                    perturbed = perturbed.len(),
                    reference = reference.len(),
                    "insufficient paired samples, omitting estimate"
                ),
            }
        }
    }

    info!(
        windows = windows.len(),
        forward = result.forward.len(),
        backward = result.backward.len(),
        "free-energy estimation complete"
    );
    Ok(result)
}

/// Exponential-average free-energy difference in kcal/mol.
///
/// Returns `Ok(None)` unless both sets are non-empty and of equal length.
pub fn zwanzig_delta_g(
    perturbed: &[BigDecimal],
    reference: &[BigDecimal],
) -> Result<Option<BigDecimal>, DecimalMathError> {
    if perturbed.is_empty() || perturbed.len() != reference.len() {
        return Ok(None);
    }

    let thermal = thermal_energy();
    let boltzmann_factors = energy_differences_joule(perturbed, reference)
        .map(|delta| numerics::exp(&(&(-delta) / &thermal)))
        .collect::<Vec<_>>();
    let average = numerics::mean(&boltzmann_factors)?;
    let delta_g = -(numerics::ln(&average)? * molar_kcal_factor());
    Ok(Some(delta_g.with_prec(numerics::WORKING_PRECISION)))
}

/// Per-sample forward energy differences in kcal/mol, laid out around each
/// window for scatter display. Only windows with a forward estimate appear.
pub fn scaled_forward_samples(windows: &WindowSet) -> Vec<ScaledSample> {
    let to_kcal_mol = &*AVOGADRO / &(BigDecimal::from(1000) * &*KJ_PER_KCAL);
    let mut samples = Vec::new();

    for (window, bucket) in windows.iter() {
        let (perturbed, reference) = Direction::Forward.pair(bucket);
        if perturbed.is_empty() || perturbed.len() != reference.len() {
            continue;
        }

        for (index, delta) in energy_differences_joule(perturbed, reference).enumerate() {
            let Some(energy_kcal_mol) = (delta * &to_kcal_mol).to_f64() else {
                continue;
            };
            samples.push(ScaledSample {
                window: window.clone(),
                x: window.value() - SAMPLE_SERIES_OFFSET + SAMPLE_SERIES_STEP * index as f64,
                energy_kcal_mol,
            });
        }
    }

    samples
}

fn energy_differences_joule<'a>(
    perturbed: &'a [BigDecimal],
    reference: &'a [BigDecimal],
) -> impl Iterator<Item = BigDecimal> + 'a {
    perturbed
        .iter()
        .zip(reference)
        .map(|(upper, lower)| (upper - lower) * &*HARTREE_TO_JOULE)
}
