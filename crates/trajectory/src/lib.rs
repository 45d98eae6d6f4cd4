//! Forward-Euler trajectory integration under gravity and density-scaled quadratic drag.
//!
//! A trajectory starts at the origin and is stepped until the first sample below
//! ground; that sample is then pulled back onto `y = 0` by linear interpolation.

use range_core::{KinematicVector, SimulationParams};

/// How the local air density is derived at each new sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DensityModel {
    /// `p * exp(-y / y0)`, evaluated at the freshly computed altitude.
    #[default]
    Barometric,
    /// Density fixed at the reference value `p` for the whole flight.
    Uniform,
}

impl DensityModel {
    /// Density at altitude `y` for the given parameters.
    #[inline]
    pub fn density_at(&self, params: &SimulationParams, y: f64) -> f64 {
        match self {
            DensityModel::Barometric => barometric_density(params.p, params.y0, y),
            DensityModel::Uniform => params.p,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DensityModel::Barometric => "barometric",
            DensityModel::Uniform => "uniform",
        }
    }
}

/// Closed-form exponential atmosphere.
#[inline]
pub fn barometric_density(reference: f64, scale_height: f64, y: f64) -> f64 {
    reference * f64::exp(-y / scale_height)
}

/// One row of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub point: KinematicVector,
    pub density: f64,
}

/// Index-aligned time, position and density sequences of a single flight.
///
/// After [`Integrator::integrate`] returns, the first point is the origin and the
/// last point sits exactly on the ground. The last time entry is the raw stepped
/// time, not the interpolated landing time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    pub t: Vec<f64>,
    pub point: Vec<KinematicVector>,
    pub p: Vec<f64>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            t: Vec::with_capacity(capacity),
            point: Vec::with_capacity(capacity),
            p: Vec::with_capacity(capacity),
        }
    }

    /// Append one aligned sample.
    pub fn push(&mut self, t: f64, point: KinematicVector, density: f64) {
        self.t.push(t);
        self.point.push(point);
        self.p.push(density);
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        Some(Sample {
            t: *self.t.get(index)?,
            point: *self.point.get(index)?,
            density: *self.p.get(index)?,
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.t
            .iter()
            .zip(&self.point)
            .zip(&self.p)
            .map(|((&t, &point), &density)| Sample { t, point, density })
    }

    /// Final (landing) sample.
    pub fn landing(&self) -> Option<Sample> {
        self.len().checked_sub(1).and_then(|last| self.get(last))
    }

    /// Horizontal distance of the landing sample; zero for an empty trajectory.
    pub fn range(&self) -> f64 {
        self.point.last().map(|p| p.x).unwrap_or_default()
    }

    /// Highest sample of the flight.
    pub fn apex(&self) -> Option<Sample> {
        let (index, _) = self
            .point
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.y.total_cmp(&b.y))?;
        self.get(index)
    }

    pub fn clear(&mut self) {
        self.t.clear();
        self.point.clear();
        self.p.clear();
    }
}

/// Produces a complete trajectory for a parameter record.
pub trait Integrator {
    fn integrate(&self, params: &SimulationParams) -> Trajectory;
}

impl<F> Integrator for F
where
    F: Fn(&SimulationParams) -> Trajectory,
{
    fn integrate(&self, params: &SimulationParams) -> Trajectory {
        self(params)
    }
}

/// Explicit Euler stepping with drag `(rho / p) * b2_per_mass * |v|` per unit velocity.
///
/// Requires `g > 0` and `time_step > 0`; otherwise the ground is never reached and
/// `integrate` does not return.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerDragIntegrator {
    pub density: DensityModel,
}

impl EulerDragIntegrator {
    pub fn new(density: DensityModel) -> Self {
        Self { density }
    }
}

impl Integrator for EulerDragIntegrator {
    fn integrate(&self, params: &SimulationParams) -> Trajectory {
        let dt = params.time_step;
        let mut v = params.v0;
        let mut trajectory = Trajectory::new();
        trajectory.push(0.0, KinematicVector::ZERO, params.p);

        let mut i = 0;
        while trajectory.point[i].y >= 0.0 {
            let point = trajectory.point[i].add(&v.scale(dt));

            // Acceleration uses the state at the start of the step.
            let drag_acceleration = trajectory.p[i] / params.p * params.b2_per_mass * v.magnitude();
            v = KinematicVector::new(
                v.x - drag_acceleration * v.x * dt,
                v.y - (drag_acceleration * v.y + params.g) * dt,
            );

            let density = self.density.density_at(params, point.y);
            trajectory.push(trajectory.t[i] + dt, point, density);
            i += 1;
        }

        // i >= 1 here: the seed sample sits at y = 0, so the loop runs at least once.
        trajectory.point[i] = interpolate_landing(trajectory.point[i - 1], trajectory.point[i]);
        trajectory.p[i] = params.p;
        trajectory
    }
}

/// Move `below` onto the ground along the segment from `above`.
///
/// `above.y >= 0 > below.y`. With `r = -above.y / below.y` the landing abscissa is
/// `(above.x + r * below.x) / (r + 1)`.
pub fn interpolate_landing(above: KinematicVector, below: KinematicVector) -> KinematicVector {
    let r = -above.y / below.y;
    KinematicVector::new((above.x + r * below.x) / (r + 1.0), 0.0)
}
