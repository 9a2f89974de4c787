use super::*;
use crate::animation::noise::Interpolant;

#[test]
fn shorthand_forms_deserialize() {
    let def: SceneDef = serde_json::from_str(
        r#"{
            "root": "g",
            "nodes": [
                { "id": "c", "kind": { "constant": { "value": [1, 2] } } },
                { "id": "t", "kind": "time" },
                { "id": "a", "kind": { "animated": { "keys": [
                    { "time": 0, "value": 0, "ease": "cubic_in" },
                    { "time": 1, "value": 1, "ease": { "name": "exp_out", "args": [64], "truncate": [0.1, 0.9] } }
                ] } } },
                { "id": "p", "kind": { "path": {
                    "path": [ { "move": [0, 0] }, { "line": { "x": 1, "y": 0 } }, "close" ],
                    "progress": [ { "time": 0, "value": 0 } ]
                } } },
                { "id": "e", "kind": { "expr": { "expr": "t * 2", "resources": { "t": "t" } } } },
                { "id": "g", "kind": { "group": { "children": ["c", "a", "p", "e"] } } }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(def.settings, EvalSettings::default());
    assert_eq!(def.nodes.len(), 6);
    match &def.nodes[0].kind {
        NodeKindDef::Constant { ty, value } => {
            assert_eq!(*ty, None);
            assert_eq!(value.implied_type(), Some(ValueType::Vec2));
        }
        other => panic!("unexpected kind: {other:?}"),
    }
    assert_eq!(def.nodes[1].kind, NodeKindDef::Time);
    match &def.nodes[2].kind {
        NodeKindDef::Animated { keys, .. } => {
            assert_eq!(keys[0].ease, Some(EasingDef::Name("cubic_in".to_owned())));
            assert!(matches!(
                &keys[1].ease,
                Some(EasingDef::Full { truncate: Some([a, b]), .. }) if *a == 0.1 && *b == 0.9
            ));
        }
        other => panic!("unexpected kind: {other:?}"),
    }
    match &def.nodes[3].kind {
        NodeKindDef::Path { path, mode, .. } => {
            assert_eq!(*mode, PathMode::ArcLength);
            assert_eq!(
                path,
                &PathDef::Segments(vec![
                    SegmentDef::Move(Vec2Def { x: 0.0, y: 0.0 }),
                    SegmentDef::Line(Vec2Def { x: 1.0, y: 0.0 }),
                    SegmentDef::Close,
                ])
            );
        }
        other => panic!("unexpected kind: {other:?}"),
    }
    match &def.nodes[4].kind {
        NodeKindDef::Expr { ty, expr, .. } => {
            assert_eq!(*ty, ValueType::Float);
            assert_eq!(expr.sources(), ["t * 2".to_owned()]);
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn json_round_trip_is_lossless() {
    let def = SceneDef {
        settings: EvalSettings {
            path_precision: 16,
            newton_iterations: 2,
        },
        root: "gate".to_owned(),
        nodes: vec![
            NodeDef {
                id: "a".to_owned(),
                kind: NodeKindDef::Animated {
                    ty: Some(ValueType::Color),
                    keys: vec![
                        KeyDef {
                            time: 0.1,
                            value: ValueDef::List(vec![0.1, 0.2, 0.3, 1.0 / 3.0]),
                            ease: Some(EasingDef::Full {
                                name: "elastic_out".to_owned(),
                                args: vec![0.2, 0.3],
                                interval: Some([0.25, 0.75]),
                                truncate: None,
                            }),
                        },
                        KeyDef {
                            time: 2.0 / 3.0,
                            value: ValueDef::List(vec![1.0, 0.0, 0.0, 1.0]),
                            ease: None,
                        },
                    ],
                    space: ColorSpace::Hsv,
                    time_offset: 0.5,
                },
            },
            NodeDef {
                id: "n".to_owned(),
                kind: NodeKindDef::Noise {
                    ty: ValueType::Vec2,
                    noise: Noise {
                        frequency: 0.3,
                        octaves: 5,
                        seed: 9,
                        ..Noise::default()
                    },
                    time_offset: 0.0,
                },
            },
            NodeDef {
                id: "v".to_owned(),
                kind: NodeKindDef::Velocity {
                    animation: "a".to_owned(),
                },
            },
            NodeDef {
                id: "s".to_owned(),
                kind: NodeKindDef::Path {
                    path: PathDef::Smooth(SmoothPathDef {
                        points: vec![Vec2Def { x: 0.0, y: 0.0 }, Vec2Def { x: 1.5, y: 2.0 }],
                        control1: None,
                        control2: Some(Vec2Def { x: 3.0, y: 1.0 }),
                        tension: 0.25,
                    }),
                    progress: vec![KeyDef {
                        time: 0.0,
                        value: ValueDef::Scalar(1.0),
                        ease: None,
                    }],
                    mode: PathMode::ArcLength,
                    time_offset: 0.0,
                },
            },
            NodeDef {
                id: "p".to_owned(),
                kind: NodeKindDef::Path {
                    path: PathDef::Svg("M0 0 C 1 2 3 4 5 6".to_owned()),
                    progress: vec![KeyDef {
                        time: 0.0,
                        value: ValueDef::Scalar(0.3),
                        ease: None,
                    }],
                    mode: PathMode::Parametric,
                    time_offset: 0.0,
                },
            },
            NodeDef {
                id: "gate".to_owned(),
                kind: NodeKindDef::TimeRange {
                    child: "a".to_owned(),
                    start: 1.0,
                    end: Some(4.25),
                    before: BeforePolicy::HoldFirst,
                    after: AfterPolicy::Freeze,
                    render_time: None,
                },
            },
        ],
    };

    let s = serde_json::to_string_pretty(&def).unwrap();
    let de: SceneDef = serde_json::from_str(&s).unwrap();
    assert_eq!(de, def);
}

#[test]
fn noise_and_smooth_path_defaults() {
    let def: SceneDef = serde_json::from_str(
        r#"{
            "root": "n",
            "nodes": [
                { "id": "n", "kind": { "noise": { "seed": 3, "interpolant": "cubic" } } },
                { "id": "p", "kind": { "path": {
                    "path": { "points": [[0, 0], [1, 1], [2, 0]] },
                    "progress": [ { "time": 0, "value": 0 } ]
                } } },
                { "id": "q", "kind": { "path": {
                    "path": [ { "move": [0, 0] }, { "quad": [[1, 1]] } ],
                    "progress": [ { "time": 0, "value": 0 } ]
                } } }
            ]
        }"#,
    )
    .unwrap();

    match &def.nodes[0].kind {
        NodeKindDef::Noise { ty, noise, .. } => {
            assert_eq!(*ty, ValueType::Float);
            assert_eq!(
                *noise,
                Noise {
                    seed: 3,
                    interpolant: Interpolant::Cubic,
                    ..Noise::default()
                }
            );
        }
        other => panic!("unexpected kind: {other:?}"),
    }
    match &def.nodes[1].kind {
        NodeKindDef::Path {
            path: PathDef::Smooth(smooth),
            ..
        } => {
            assert_eq!(smooth.points.len(), 3);
            assert_eq!(smooth.tension, 0.5);
            assert_eq!(smooth.control1, None);
        }
        other => panic!("unexpected kind: {other:?}"),
    }
    // short segments parse; the point count is a build-time error
    match &def.nodes[2].kind {
        NodeKindDef::Path {
            path: PathDef::Segments(segs),
            ..
        } => assert_eq!(segs[1], SegmentDef::Quad(vec![Vec2Def { x: 1.0, y: 1.0 }])),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn unknown_node_kind_is_rejected() {
    let r: Result<NodeDef, _> = serde_json::from_str(r#"{ "id": "x", "kind": "camera" }"#);
    assert!(r.is_err());
}
