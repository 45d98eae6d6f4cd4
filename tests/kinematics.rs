use projectile_range::core::KinematicVector;
use projectile_range::core::constants::{DEG_TO_RAD, RAD_TO_DEG};

#[test]
fn magnitude_is_euclidean_norm() {
    assert_eq!(KinematicVector::new(3.0, 4.0).magnitude(), 5.0);
    assert_eq!(KinematicVector::new(-3.0, -4.0).magnitude(), 5.0);
    assert_eq!(KinematicVector::ZERO.magnitude(), 0.0);
}

#[test]
fn angle_is_measured_from_positive_x_in_degrees() {
    assert!((KinematicVector::new(1.0, 1.0).angle() - 45.0).abs() < 1e-12);
    assert!((KinematicVector::new(2.0, -2.0).angle() + 45.0).abs() < 1e-12);
    assert_eq!(KinematicVector::new(5.0, 0.0).angle(), 0.0);
    let steep = KinematicVector::new(1.0, 3.0_f64.sqrt());
    assert!((steep.angle() - 60.0).abs() < 1e-12);
}

#[test]
fn angle_is_restricted_arctangent_outside_right_half_plane() {
    // Vertical saturates to +90, and the left half-plane folds back onto the right.
    assert!((KinematicVector::new(0.0, 1.0).angle() - 90.0).abs() < 1e-12);
    assert!((KinematicVector::new(-1.0, 1.0).angle() + 45.0).abs() < 1e-12);
    assert!(KinematicVector::ZERO.angle().is_nan());
}

#[test]
fn polar_construction_round_trips_angle_and_magnitude() {
    for angle in [1.0, 17.5, 30.0, 45.0, 63.2, 89.0] {
        let v = KinematicVector::from_polar(250.0, angle);
        assert!((v.magnitude() - 250.0).abs() < 1e-9, "magnitude at {angle}");
        assert!((v.angle() - angle).abs() < 1e-9, "angle at {angle}");
    }
}

#[test]
fn degree_constants_are_reciprocal() {
    assert!((DEG_TO_RAD * RAD_TO_DEG - 1.0).abs() < 1e-15);
    assert!((180.0 * DEG_TO_RAD - std::f64::consts::PI).abs() < 1e-15);
}

#[test]
fn add_and_scale_are_component_wise() {
    let a = KinematicVector::new(1.5, -2.0);
    let b = KinematicVector::new(0.5, 4.0);
    assert_eq!(a.add(&b), KinematicVector::new(2.0, 2.0));
    assert_eq!(a.scale(2.0), KinematicVector::new(3.0, -4.0));
}
