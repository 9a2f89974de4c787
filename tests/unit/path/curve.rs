use super::*;
use crate::path::segment::{SegmentKind, segments_from_catmull_rom};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn near(a: Point, b: Point, eps: f64) -> bool {
    (a - b).hypot() < eps
}

fn square() -> Path {
    Path::new(
        vec![
            PathSegment::Move(p(0.0, 0.0)),
            PathSegment::Line(p(10.0, 0.0)),
            PathSegment::Line(p(10.0, 10.0)),
            PathSegment::Line(p(0.0, 10.0)),
            PathSegment::Close,
        ],
        Sampling::default(),
    )
    .unwrap()
}

#[test]
fn arc_length_endpoints() {
    let path = square();
    assert_eq!(path.evaluate(0.0, PathMode::ArcLength), p(0.0, 0.0));
    // close target
    assert_eq!(path.evaluate(1.0, PathMode::ArcLength), p(0.0, 0.0));
    assert_eq!(path.length(), 40.0);
}

#[test]
fn arc_length_walks_corners() {
    let path = square();
    assert!(near(path.evaluate(0.125, PathMode::ArcLength), p(5.0, 0.0), 1e-12));
    assert!(near(path.evaluate(0.25, PathMode::ArcLength), p(10.0, 0.0), 1e-12));
    assert!(near(path.evaluate(0.5, PathMode::ArcLength), p(10.0, 10.0), 1e-12));
    assert!(near(path.evaluate(0.875, PathMode::ArcLength), p(0.0, 5.0), 1e-12));
}

#[test]
fn arc_length_mode_has_constant_speed() {
    // control points bunched at the end: parametric speed varies a lot
    let path = Path::new(
        vec![
            PathSegment::Move(p(0.0, 0.0)),
            PathSegment::Cubic {
                ctrl1: p(90.0, 0.0),
                ctrl2: p(95.0, 0.0),
                to: p(100.0, 0.0),
            },
        ],
        Sampling::default(),
    )
    .unwrap();

    for k in 0..=20 {
        let u = f64::from(k) / 20.0;
        let q = path.evaluate(u, PathMode::ArcLength);
        assert!((q.x - 100.0 * u).abs() < 1e-6, "u={u}: {q:?}");
    }

    let raw = path.evaluate(0.5, PathMode::Parametric);
    assert!((raw.x - 81.875).abs() < 1e-9);
}

#[test]
fn curved_samples_are_evenly_spaced() {
    let path = Path::from_svg("M0 0 C 0 80 100 80 100 0 Q 100 -60 200 0", Sampling::default())
        .unwrap();
    let pts: Vec<Point> = (0..=40)
        .map(|k| path.evaluate(f64::from(k) / 40.0, PathMode::ArcLength))
        .collect();
    let chords: Vec<f64> = pts.windows(2).map(|w| (w[1] - w[0]).hypot()).collect();
    let mean = chords.iter().sum::<f64>() / chords.len() as f64;
    for c in chords {
        assert!((c - mean).abs() / mean < 0.02, "chord {c} vs mean {mean}");
    }
}

#[test]
fn subpaths_share_the_unit_range_by_length() {
    let path = Path::new(
        vec![
            PathSegment::Move(p(0.0, 0.0)),
            PathSegment::Line(p(10.0, 0.0)),
            PathSegment::Move(p(100.0, 100.0)),
            PathSegment::Line(p(100.0, 130.0)),
        ],
        Sampling::default(),
    )
    .unwrap();
    assert_eq!(path.length(), 40.0);
    assert!(near(path.evaluate(0.25, PathMode::ArcLength), p(10.0, 0.0), 1e-12));
    assert!(near(path.evaluate(0.5, PathMode::ArcLength), p(100.0, 110.0), 1e-12));
    assert_eq!(path.evaluate(1.0, PathMode::ArcLength), p(100.0, 130.0));
}

#[test]
fn drawing_after_close_restarts_at_subpath_start() {
    let path = Path::new(
        vec![
            PathSegment::Move(p(0.0, 0.0)),
            PathSegment::Line(p(10.0, 0.0)),
            PathSegment::Close,
            PathSegment::Line(p(0.0, 10.0)),
        ],
        Sampling::default(),
    )
    .unwrap();
    assert_eq!(path.length(), 30.0);
    assert_eq!(path.end_point(), p(0.0, 10.0));
}

#[test]
fn parametric_mode_splits_by_segment_count() {
    let path = Path::new(
        vec![
            PathSegment::Move(p(0.0, 0.0)),
            PathSegment::Line(p(10.0, 0.0)),
            PathSegment::Line(p(10.0, 100.0)),
        ],
        Sampling::default(),
    )
    .unwrap();
    assert_eq!(path.evaluate(0.25, PathMode::Parametric), p(5.0, 0.0));
    assert_eq!(path.evaluate(0.5, PathMode::Parametric), p(10.0, 0.0));
    assert_eq!(path.evaluate(1.0, PathMode::Parametric), p(10.0, 100.0));
}

#[test]
fn out_of_range_u_is_clamped() {
    let path = square();
    for mode in [PathMode::Parametric, PathMode::ArcLength] {
        assert_eq!(path.evaluate(-1.0, mode), path.start_point());
        assert_eq!(path.evaluate(2.0, mode), path.end_point());
    }
}

#[test]
fn degenerate_paths_return_their_point() {
    let lone = Path::new(vec![PathSegment::Move(p(3.0, 4.0))], Sampling::default()).unwrap();
    let dot = Path::new(
        vec![PathSegment::Move(p(1.0, 1.0)), PathSegment::Line(p(1.0, 1.0))],
        Sampling::default(),
    )
    .unwrap();
    for u in [0.0, 0.3, 1.0] {
        for mode in [PathMode::Parametric, PathMode::ArcLength] {
            assert_eq!(lone.evaluate(u, mode), p(3.0, 4.0));
            assert_eq!(dot.evaluate(u, mode), p(1.0, 1.0));
        }
    }
    assert_eq!(dot.length(), 0.0);
}

#[test]
fn construction_errors() {
    assert!(Path::new(vec![], Sampling::default()).is_err());
    assert!(Path::new(vec![PathSegment::Line(p(1.0, 1.0))], Sampling::default()).is_err());
    let bad = Sampling {
        precision: 0,
        newton_iterations: 4,
    };
    assert!(Path::new(vec![PathSegment::Move(p(0.0, 0.0))], bad).is_err());
    let greedy = Sampling {
        precision: 8,
        newton_iterations: MAX_NEWTON_ITERATIONS + 1,
    };
    assert!(Path::new(vec![PathSegment::Move(p(0.0, 0.0))], greedy).is_err());
    assert!(PathSegment::from_points(SegmentKind::Quad, &[p(1.0, 1.0)]).is_err());
    assert!(PathSegment::from_points(SegmentKind::Cubic, &[p(0.0, 0.0); 2]).is_err());
    assert!(Path::from_svg("M 0 0 X 4", Sampling::default()).is_err());
}

#[test]
fn svg_data_maps_to_segments() {
    let path = Path::from_svg("M0 0 Q 5 10 10 0 Z", Sampling::default()).unwrap();
    assert_eq!(
        path.segments(),
        &[
            PathSegment::Move(p(0.0, 0.0)),
            PathSegment::Quad {
                ctrl: p(5.0, 10.0),
                to: p(10.0, 0.0)
            },
            PathSegment::Close,
        ]
    );
}

#[test]
fn catmull_rom_passes_through_anchors() {
    let anchors = [p(0.0, 0.0), p(10.0, 10.0), p(20.0, 0.0)];
    let segments = segments_from_catmull_rom(&anchors, p(-10.0, 10.0), p(30.0, 10.0), 0.5).unwrap();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0], PathSegment::Move(p(0.0, 0.0)));
    let PathSegment::Cubic { ctrl1, ctrl2, to } = segments[1] else {
        panic!("not a cubic");
    };
    // tangents are the neighbour differences over 6 * tension
    assert!(near(ctrl1, p(20.0 / 3.0, 0.0), 1e-12));
    assert!(near(ctrl2, p(10.0 - 20.0 / 3.0, 10.0), 1e-12));
    assert_eq!(to, p(10.0, 10.0));

    let path = Path::new(segments, Sampling::default()).unwrap();
    assert_eq!(path.evaluate(0.5, PathMode::Parametric), p(10.0, 10.0));
    assert_eq!(path.end_point(), p(20.0, 0.0));
}

#[test]
fn catmull_rom_rejects_bad_input() {
    let o = p(0.0, 0.0);
    assert!(segments_from_catmull_rom(&[o], o, o, 0.5).is_err());
    assert!(segments_from_catmull_rom(&[o, p(1.0, 0.0)], o, o, 0.0).is_err());
    assert!(segments_from_catmull_rom(&[o, p(f64::NAN, 0.0)], o, o, 0.5).is_err());
}
