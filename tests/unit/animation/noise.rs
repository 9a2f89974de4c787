use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn single_octave_crosses_zero_on_the_lattice() {
    let noise = Noise {
        octaves: 1,
        ..Noise::default()
    };
    for t in [-3.0, -1.0, 0.0, 1.0, 2.0, 17.0] {
        assert_eq!(noise.sample(0, t), 0.0, "t={t}");
    }
    assert_ne!(noise.sample(0, 0.5), 0.0);
}

#[test]
fn integer_lacunarity_keeps_the_zeros() {
    let noise = Noise::default();
    for t in 0..8 {
        assert_eq!(noise.sample(7, f64::from(t)), 0.0);
    }
}

#[test]
fn samples_are_bounded_and_deterministic() {
    for interpolant in [Interpolant::Linear, Interpolant::Cubic, Interpolant::Quintic] {
        let noise = Noise {
            amplitude: 2.0,
            octaves: 4,
            interpolant,
            ..Noise::default()
        };
        let bound = noise.bound();
        assert_eq!(bound, 2.0 + 1.0 + 0.5 + 0.25);
        for i in 0..400 {
            let t = f64::from(i) * 0.037 - 3.0;
            let v = noise.sample(5, t);
            assert!(v.abs() <= bound, "{interpolant:?} t={t}: {v}");
            assert_eq!(v, noise.sample(5, t));
        }
    }
}

#[test]
fn frequency_scales_the_clock() {
    let slow = Noise::default();
    let fast = Noise {
        frequency: 4.0,
        ..Noise::default()
    };
    assert_eq!(fast.sample(1, 0.3), slow.sample(1, 1.2));
}

#[test]
fn vector_components_use_separate_channels() {
    let noise = Noise {
        seed: 42,
        ..Noise::default()
    };
    let Value::Vec3(v) = noise.evaluate(ValueType::Vec3, 0.4) else {
        panic!("not a vec3");
    };
    assert_eq!(v[0], noise.sample(42, 0.4));
    assert_ne!(v[0], v[1]);
    assert_ne!(v[1], v[2]);
    assert_eq!(
        noise.evaluate(ValueType::Float, 0.4),
        Value::Float(noise.sample(42, 0.4))
    );
}

#[test]
fn invalid_parameters_are_rejected() {
    assert!(Noise::default().validate().is_ok());
    for bad in [
        Noise {
            octaves: 0,
            ..Noise::default()
        },
        Noise {
            octaves: Noise::MAX_OCTAVES + 1,
            ..Noise::default()
        },
        Noise {
            frequency: f64::INFINITY,
            ..Noise::default()
        },
        Noise {
            gain: f64::NAN,
            ..Noise::default()
        },
    ] {
        assert!(bad.validate().is_err(), "{bad:?}");
    }
}
