//! Launch-angle hill climb for maximum horizontal range.
//!
//! Starting from the supplied launch vector, the angle is raised by a fixed
//! increment until the range first strictly decreases. Only the increasing-angle
//! direction is explored, so the start angle must sit below the optimum of a
//! unimodal range curve. Every evaluated trajectory is handed to a [`SampleSink`].

use range_core::constants::{DEFAULT_ANGLE_STEP_DEG, DEG_TO_RAD};
use range_core::{KinematicVector, SimulationParams};
use range_trajectory::{Integrator, Trajectory};

/// Receives every trajectory the search evaluates, tagged with its rounded launch angle.
pub trait SampleSink {
    type Error;

    fn record(&mut self, trajectory: &Trajectory, tag: i64) -> Result<(), Self::Error>;
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    type Error = S::Error;

    fn record(&mut self, trajectory: &Trajectory, tag: i64) -> Result<(), Self::Error> {
        (**self).record(trajectory, tag)
    }
}

/// How the launch vector is advanced between evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationScheme {
    /// Rebuild from magnitude and `angle() + step`. Accumulates rounding drift
    /// and depends on `x > 0` through the restricted arctangent.
    #[default]
    Rederive,
    /// Apply a 2x2 rotation matrix to the current components.
    Matrix,
}

impl RotationScheme {
    pub fn label(&self) -> &'static str {
        match self {
            RotationScheme::Rederive => "rederive",
            RotationScheme::Matrix => "matrix",
        }
    }
}

/// Rotate `v` counter-clockwise by `step_deg` degrees.
pub fn rotate_launch_vector(
    v: KinematicVector,
    step_deg: f64,
    scheme: RotationScheme,
) -> KinematicVector {
    match scheme {
        RotationScheme::Rederive => KinematicVector::from_polar(v.magnitude(), v.angle() + step_deg),
        RotationScheme::Matrix => {
            let (sin, cos) = (step_deg * DEG_TO_RAD).sin_cos();
            KinematicVector::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
        }
    }
}

/// Integer tag for a launch vector: its angle rounded half away from zero.
#[inline]
pub fn angle_tag(v: &KinematicVector) -> i64 {
    v.angle().round() as i64
}

/// Tunables for [`maximize_range`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    pub angle_step_deg: f64,
    pub rotation: RotationScheme,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            angle_step_deg: DEFAULT_ANGLE_STEP_DEG,
            rotation: RotationScheme::default(),
        }
    }
}

/// One evaluated launch angle.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStep {
    pub tag: i64,
    pub angle_deg: f64,
    pub launch: KinematicVector,
    pub range: f64,
    pub samples: usize,
}

/// All evaluations in order, plus the index of the local maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub steps: Vec<SearchStep>,
    pub best: usize,
}

impl SearchReport {
    pub fn best_step(&self) -> &SearchStep {
        &self.steps[self.best]
    }

    pub fn evaluations(&self) -> usize {
        self.steps.len()
    }
}

/// Climb the launch angle until the range first strictly decreases.
///
/// `params.v0` is advanced in place and is left at the last evaluated (worse)
/// launch vector. Ties continue the climb. There is no iteration cap; sink errors
/// abort the search immediately.
pub fn maximize_range<I, S>(
    params: &mut SimulationParams,
    integrator: &I,
    sink: &mut S,
    options: &SearchOptions,
) -> Result<SearchReport, S::Error>
where
    I: Integrator + ?Sized,
    S: SampleSink + ?Sized,
{
    let mut steps = vec![evaluate(params, integrator, sink)?];

    loop {
        let previous_range = steps[steps.len() - 1].range;

        params.v0 = rotate_launch_vector(params.v0, options.angle_step_deg, options.rotation);
        let step = evaluate(params, integrator, sink)?;
        let current_range = step.range;
        steps.push(step);

        if current_range < previous_range {
            break;
        }
    }

    let best = steps.len() - 2;
    Ok(SearchReport { steps, best })
}

fn evaluate<I, S>(
    params: &SimulationParams,
    integrator: &I,
    sink: &mut S,
) -> Result<SearchStep, S::Error>
where
    I: Integrator + ?Sized,
    S: SampleSink + ?Sized,
{
    let trajectory = integrator.integrate(params);
    let tag = angle_tag(&params.v0);
    sink.record(&trajectory, tag)?;

    Ok(SearchStep {
        tag,
        angle_deg: params.v0.angle(),
        launch: params.v0,
        range: trajectory.range(),
        samples: trajectory.len(),
    })
}
