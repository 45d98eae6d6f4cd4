//! Core kinematics, launch parameters, and constants shared across the projectile range workspace.

/// Physical and angular constants (SI units unless stated otherwise).
pub mod constants {
    /// Degrees-to-radians conversion factor.
    pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
    /// Radians-to-degrees conversion factor.
    pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;
    /// Gravitational acceleration used when a configuration omits `g` (m/s²).
    pub const DEFAULT_GRAVITY_M_S2: f64 = 9.8;
    /// Launch-angle increment applied between search evaluations (degrees).
    pub const DEFAULT_ANGLE_STEP_DEG: f64 = 1.0;
}

/// Two-dimensional kinematic vectors used for both velocities and positions.
pub mod vector {
    use super::constants::{DEG_TO_RAD, RAD_TO_DEG};

    /// Cartesian `(x, y)` pair; `x` is horizontal range, `y` is altitude.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct KinematicVector {
        pub x: f64,
        pub y: f64,
    }

    impl KinematicVector {
        pub const ZERO: KinematicVector = KinematicVector { x: 0.0, y: 0.0 };

        #[inline]
        pub const fn new(x: f64, y: f64) -> Self {
            Self { x, y }
        }

        /// Build a vector from a magnitude and an angle above the positive x-axis in degrees.
        #[inline]
        pub fn from_polar(magnitude: f64, angle_deg: f64) -> Self {
            let theta = angle_deg * DEG_TO_RAD;
            Self {
                x: magnitude * theta.cos(),
                y: magnitude * theta.sin(),
            }
        }

        /// Euclidean norm.
        #[inline]
        pub fn magnitude(&self) -> f64 {
            (self.x * self.x + self.y * self.y).sqrt()
        }

        /// Angle from the positive x-axis in degrees, `atan(y / x)`.
        ///
        /// This is the restricted arctangent: it is only meaningful while `x > 0`.
        /// At `x == 0` it saturates to ±90° (or NaN for the zero vector) and for
        /// `x < 0` it folds into the wrong half-plane.
        #[inline]
        pub fn angle(&self) -> f64 {
            (self.y / self.x).atan() * RAD_TO_DEG
        }

        /// Component-wise sum.
        #[inline]
        pub fn add(&self, other: &KinematicVector) -> KinematicVector {
            KinematicVector::new(self.x + other.x, self.y + other.y)
        }

        /// Scale both components.
        #[inline]
        pub fn scale(&self, s: f64) -> KinematicVector {
            KinematicVector::new(self.x * s, self.y * s)
        }
    }
}

/// Launch and atmosphere parameters consumed by the integrator.
pub mod params {
    use super::constants::DEFAULT_GRAVITY_M_S2;
    use super::vector::KinematicVector;

    /// Parameter record shared by the integrator and the range search.
    ///
    /// The search owns one of these and replaces `v0` between evaluations;
    /// integrators only read it.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SimulationParams {
        /// Gravitational acceleration (m/s²).
        pub g: f64,
        /// Reference air density at launch altitude.
        pub p: f64,
        /// Density scale height (m).
        pub y0: f64,
        /// Drag coefficient over projectile mass (1/m).
        pub b2_per_mass: f64,
        /// Constant integration step (s).
        pub time_step: f64,
        /// Launch velocity (m/s).
        pub v0: KinematicVector,
    }

    impl SimulationParams {
        /// Parameters with the default gravity.
        pub fn new(p: f64, y0: f64, b2_per_mass: f64, time_step: f64, v0: KinematicVector) -> Self {
            Self {
                g: DEFAULT_GRAVITY_M_S2,
                p,
                y0,
                b2_per_mass,
                time_step,
                v0,
            }
        }

        /// Launch speed, held fixed by the search.
        #[inline]
        pub fn launch_speed(&self) -> f64 {
            self.v0.magnitude()
        }

        /// Launch angle in degrees.
        #[inline]
        pub fn launch_angle(&self) -> f64 {
            self.v0.angle()
        }
    }
}

pub use params::SimulationParams;
pub use vector::KinematicVector;
