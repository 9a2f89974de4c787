use super::*;
use crate::animation::ease::{Direction, Ease};

fn ramp() -> AnimatedValue<f64> {
    AnimatedValue::new(vec![Keyframe::new(0.0, 0.0), Keyframe::new(4.0, 10.0)]).unwrap()
}

#[test]
fn linear_midpoint_is_exact() {
    assert_eq!(ramp().evaluate(2.0), 5.0);
}

#[test]
fn boundaries_are_exact() {
    let a = AnimatedValue::new(vec![
        Keyframe::new(1.0, 0.3).with_easing(Ease::Elastic {
            dir: Direction::Out,
            amplitude: 0.1,
            period: 0.25,
        }),
        Keyframe::new(2.5, 0.7).with_easing(Ease::Cubic(Direction::InOut)),
        Keyframe::new(4.0, 1.9),
    ])
    .unwrap();
    assert_eq!(a.evaluate(1.0), 0.3);
    assert_eq!(a.evaluate(2.5), 0.7);
    assert_eq!(a.evaluate(4.0), 1.9);
}

#[test]
fn clamps_outside_range() {
    let a = ramp();
    assert_eq!(a.evaluate(-3.0), 0.0);
    assert_eq!(a.evaluate(100.0), 10.0);
}

#[test]
fn single_key_is_constant() {
    let a = AnimatedValue::new(vec![Keyframe::new(3.0, [1.0, 2.0])]).unwrap();
    for t in [-1.0, 3.0, 7.0] {
        assert_eq!(a.evaluate(t), [1.0, 2.0]);
    }
    assert_eq!(AnimatedValue::constant(4.0).evaluate(12.0), 4.0);
}

#[test]
fn left_key_easing_shapes_segment() {
    let a = AnimatedValue::new(vec![
        Keyframe::new(0.0, 0.0).with_easing(Ease::Quadratic(Direction::In)),
        Keyframe::new(1.0, 1.0).with_easing(Ease::Quadratic(Direction::Out)),
        Keyframe::new(2.0, 2.0),
    ])
    .unwrap();
    assert_eq!(a.evaluate(0.5), 0.25);
    assert_eq!(a.evaluate(1.5), 1.75);
}

#[test]
fn seeking_backwards_is_stateless() {
    let a = ramp();
    let forward: Vec<f64> = [0.5, 1.0, 3.0].iter().map(|&t| a.evaluate(t)).collect();
    let backward: Vec<f64> = [3.0, 1.0, 0.5].iter().map(|&t| a.evaluate(t)).collect();
    assert_eq!(forward, backward.into_iter().rev().collect::<Vec<_>>());
}

#[test]
fn vectors_interpolate_per_component() {
    let a = AnimatedValue::new(vec![
        Keyframe::new(0.0, [0.0, 10.0, -4.0]),
        Keyframe::new(2.0, [2.0, 20.0, 4.0]),
    ])
    .unwrap();
    assert_eq!(a.evaluate(1.0), [1.0, 15.0, 0.0]);
}

#[test]
fn quats_slerp() {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let a = AnimatedValue::new(vec![
        Keyframe::new(0.0, Quat::IDENTITY),
        Keyframe::new(1.0, Quat([0.0, 0.0, h, h])),
    ])
    .unwrap();
    let q = a.evaluate(0.5).0;
    let len: f64 = q.iter().map(|c| c * c).sum::<f64>().sqrt();
    assert!((len - 1.0).abs() < 1e-12);
}

#[test]
fn construction_errors() {
    assert!(AnimatedValue::<f64>::new(vec![]).is_err());
    assert!(
        AnimatedValue::new(vec![Keyframe::new(1.0, 0.0), Keyframe::new(1.0, 2.0)]).is_err()
    );
    assert!(
        AnimatedValue::new(vec![Keyframe::new(2.0, 0.0), Keyframe::new(1.0, 2.0)]).is_err()
    );
    assert!(AnimatedValue::new(vec![Keyframe::new(f64::NAN, 0.0)]).is_err());
}

#[test]
fn colors_blend_in_linear_light() {
    let a = AnimatedValue::new(vec![
        Keyframe::new(0.0, ColorKey([1.0, 0.0, 0.0, 1.0])),
        Keyframe::new(1.0, ColorKey([0.0, 0.0, 1.0, 0.0])),
    ])
    .unwrap();
    let ColorKey([r, g, b, alpha]) = a.evaluate(0.5);
    // half of full intensity in linear light, re-encoded
    let half = 1.055 * 0.5f64.powf(1.0 / 2.4) - 0.055;
    assert!((r - half).abs() < 1e-9, "{r}");
    assert!((b - half).abs() < 1e-9, "{b}");
    assert_eq!(g, 0.0);
    assert_eq!(alpha, 0.5);
    assert_eq!(a.evaluate(0.0), ColorKey([1.0, 0.0, 0.0, 1.0]));
}

#[test]
fn velocity_is_the_time_derivative() {
    assert_eq!(ramp().velocity(1.0), 2.5);
    assert_eq!(ramp().velocity(-1.0), 0.0);
    assert_eq!(ramp().velocity(4.0), 0.0);

    let eased = AnimatedValue::new(vec![
        Keyframe::new(1.0, [0.0, 2.0]).with_easing(Ease::Quadratic(Direction::In)),
        Keyframe::new(3.0, [4.0, 0.0]),
    ])
    .unwrap();
    // u = 0.5: d/dt of (t-1)^2/4 scaled by each component delta
    let v = eased.velocity(2.0);
    assert!((v[0] - 2.0).abs() < 1e-12);
    assert!((v[1] + 1.0).abs() < 1e-12);

    let h = 1e-6;
    let fd = (eased.evaluate(2.4 + h)[0] - eased.evaluate(2.4 - h)[0]) / (2.0 * h);
    assert!((eased.velocity(2.4)[0] - fd).abs() < 1e-6);
}
