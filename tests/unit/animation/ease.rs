use super::*;

const DIRS: [Direction; 4] = [
    Direction::In,
    Direction::Out,
    Direction::InOut,
    Direction::OutIn,
];

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

fn all_eases() -> Vec<Ease> {
    let mut out = vec![Ease::Linear, Ease::Step { count: 3 }];
    for dir in DIRS {
        out.extend([
            Ease::Quadratic(dir),
            Ease::Cubic(dir),
            Ease::Quartic(dir),
            Ease::Quintic(dir),
            Ease::Power {
                dir,
                exponent: 2.5,
            },
            Ease::Sinus(dir),
            Ease::Exp {
                dir,
                base: DEFAULT_EXP_BASE,
            },
            Ease::Circular(dir),
            Ease::Back {
                dir,
                overshoot: DEFAULT_OVERSHOOT,
            },
        ]);
    }
    for dir in [Direction::In, Direction::Out] {
        out.push(Ease::Bounce {
            dir,
            a: DEFAULT_OVERSHOOT,
        });
        out.push(Ease::Elastic {
            dir,
            amplitude: DEFAULT_ELASTIC_AMPLITUDE,
            period: DEFAULT_ELASTIC_PERIOD,
        });
    }
    out
}

#[test]
fn endpoints_are_stable() {
    for ease in all_eases() {
        let e = Easing::new(ease);
        assert!(close(e.apply(0.0), 0.0), "{ease:?} at 0");
        assert!(close(e.apply(1.0), 1.0), "{ease:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    let e = Easing::LINEAR;
    assert_eq!(e.apply(-1.0), 0.0);
    assert_eq!(e.apply(2.0), 1.0);
}

#[test]
fn spot_values() {
    assert_eq!(Ease::Quadratic(Direction::Out).eval(0.5), 0.75);
    assert_eq!(Ease::Cubic(Direction::InOut).eval(0.25), 0.0625);
    assert_eq!(Ease::Cubic(Direction::InOut).eval(0.5), 0.5);
    assert_eq!(Ease::Quadratic(Direction::OutIn).eval(0.25), 0.375);
    let exp = Ease::Exp {
        dir: Direction::In,
        base: DEFAULT_EXP_BASE,
    };
    assert!(close(exp.eval(0.5), 31.0 / 1023.0));
}

#[test]
fn back_overshoots_below_zero() {
    let back = Ease::Back {
        dir: Direction::In,
        overshoot: DEFAULT_OVERSHOOT,
    };
    assert!(back.eval(0.2) < 0.0);
}

#[test]
fn step_holds_until_next_jump() {
    let e = Easing::new(Ease::Step { count: 4 });
    assert_eq!(e.apply(0.3), 0.25);
    assert_eq!(e.apply(0.99), 0.75);
    assert_eq!(e.apply(1.0), 1.0);
}

#[test]
fn monotonic_families_increase() {
    for dir in DIRS {
        for ease in [
            Ease::Quadratic(dir),
            Ease::Cubic(dir),
            Ease::Sinus(dir),
            Ease::Circular(dir),
        ] {
            let a = ease.eval(0.2);
            let b = ease.eval(0.5);
            let c = ease.eval(0.8);
            assert!(a < b && b < c, "{ease:?}");
        }
    }
}

#[test]
fn interval_holds_flat_outside() {
    let e = Easing::LINEAR.with_interval(0.25, 0.75).unwrap();
    assert_eq!(e.apply(0.1), 0.0);
    assert_eq!(e.apply(0.5), 0.5);
    assert_eq!(e.apply(0.9), 1.0);
}

#[test]
fn truncation_renormalizes_boundaries() {
    let e = Easing::new(Ease::Quadratic(Direction::In))
        .with_truncation(0.5, 1.0)
        .unwrap();
    assert!(close(e.apply(0.0), 0.0));
    assert!(close(e.apply(1.0), 1.0));
    assert!(close(e.apply(0.5), (0.5625 - 0.25) / 0.75));
}

#[test]
fn invalid_windows_are_rejected() {
    assert!(Easing::LINEAR.with_truncation(0.6, 0.4).is_err());
    assert!(Easing::LINEAR.with_truncation(-0.1, 0.4).is_err());
    assert!(Easing::LINEAR.with_interval(0.5, 0.5).is_err());
    // both offsets land on the same step
    assert!(
        Easing::new(Ease::Step { count: 1 })
            .with_truncation(0.1, 0.2)
            .is_err()
    );
}

#[test]
fn solve_inverts_apply() {
    let plain = Easing::new(Ease::Cubic(Direction::InOut));
    let truncated = Easing::new(Ease::Sinus(Direction::Out))
        .with_truncation(0.2, 0.9)
        .unwrap();
    let windowed = Easing::new(Ease::Exp {
        dir: Direction::In,
        base: DEFAULT_EXP_BASE,
    })
    .with_interval(0.1, 0.6)
    .unwrap();
    for e in [plain, truncated, windowed] {
        let u = 0.3;
        let v = e.apply(u);
        let back = e.solve(v).unwrap();
        assert!((back - u).abs() < 1e-9, "{e:?}: {back}");
    }
}

#[test]
fn solve_is_unavailable_for_oscillating_curves() {
    let e = Easing::new(Ease::Back {
        dir: Direction::Out,
        overshoot: DEFAULT_OVERSHOOT,
    });
    assert!(e.solve(0.5).is_none());
}

#[test]
fn names_resolve_with_defaults() {
    assert_eq!(Ease::from_name("linear", &[]).unwrap(), Ease::Linear);
    assert_eq!(
        Ease::from_name("cubic_in_out", &[]).unwrap(),
        Ease::Cubic(Direction::InOut)
    );
    assert_eq!(
        Ease::from_name("quadratic_out_in", &[]).unwrap(),
        Ease::Quadratic(Direction::OutIn)
    );
    assert_eq!(
        Ease::from_name("exp_out", &[]).unwrap(),
        Ease::Exp {
            dir: Direction::Out,
            base: 1024.0
        }
    );
    assert_eq!(
        Ease::from_name("elastic_in", &[2.0]).unwrap(),
        Ease::Elastic {
            dir: Direction::In,
            amplitude: 2.0,
            period: 0.25
        }
    );
    assert_eq!(
        Ease::from_name("step", &[5.0]).unwrap(),
        Ease::Step { count: 5 }
    );
}

#[test]
fn bad_names_and_args_are_rejected() {
    assert!(Ease::from_name("wobble_in", &[]).is_err());
    assert!(Ease::from_name("cubic", &[]).is_err());
    assert!(Ease::from_name("bounce_in_out", &[]).is_err());
    assert!(Ease::from_name("elastic_out_in", &[]).is_err());
    assert!(Ease::from_name("exp_in", &[1.0]).is_err());
    assert!(Ease::from_name("cubic_in", &[1.0]).is_err());
    assert!(Ease::from_name("step", &[1.5]).is_err());
    assert!(Ease::from_name("power_in", &[f64::NAN]).is_err());
}

fn numeric_slope(f: impl Fn(f64) -> f64, x: f64) -> f64 {
    let h = 1e-6;
    (f(x + h) - f(x - h)) / (2.0 * h)
}

#[test]
fn derivative_matches_finite_differences() {
    // away from the bounce, step and half-way seams
    for ease in all_eases() {
        for x in [0.13, 0.37, 0.61, 0.83] {
            let want = numeric_slope(|x| ease.eval(x), x);
            let got = ease.derivative(x);
            assert!(
                (got - want).abs() < 1e-4 * want.abs().max(1.0),
                "{ease:?} at {x}: {got} vs {want}"
            );
        }
    }
}

#[test]
fn derivative_follows_domain_adjustments() {
    let windowed = Easing::new(Ease::Quadratic(Direction::In))
        .with_interval(0.25, 0.75)
        .unwrap();
    assert_eq!(windowed.derivative(0.1), 0.0);
    assert_eq!(windowed.derivative(0.9), 0.0);
    // d/du (2u - 0.5)^2 at u = 0.5
    assert!(close(windowed.derivative(0.5), 2.0));

    let truncated = Easing::new(Ease::Quadratic(Direction::In))
        .with_truncation(0.5, 1.0)
        .unwrap();
    for u in [0.2, 0.5, 0.8] {
        let want = numeric_slope(|u| truncated.apply(u), u);
        assert!((truncated.derivative(u) - want).abs() < 1e-6, "u={u}");
    }
    assert_eq!(Easing::LINEAR.derivative(1.5), 0.0);
}
