use crate::foundation::math::{clamp, linear2srgb, linear_norm, luma, mix, srgb2linear};

/// Largest builtin arity; evaluation passes arguments in a fixed array of this size.
pub(crate) const MAX_ARGS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Abs,
    Acos,
    Acosh,
    Asin,
    Asinh,
    Atan,
    Atanh,
    Cbrt,
    Ceil,
    Clamp,
    Close,
    CloseP,
    Cos,
    Cosh,
    Cube,
    Degrees,
    Eq,
    Exp,
    Exp2,
    Floor,
    Fract,
    Gt,
    Gte,
    Hypot,
    IsFinite,
    IsInf,
    IsNan,
    IsNormal,
    Linear,
    Linear2Srgb,
    Linearstep,
    Log,
    Log2,
    Lt,
    Lte,
    Luma,
    Max,
    Min,
    Mix,
    Mla,
    ModE,
    ModF,
    ModT,
    Pow,
    Radians,
    Round,
    Sat,
    Sign,
    Sin,
    Sinh,
    Smooth,
    Smoothstep,
    Sqr,
    Sqrt,
    Srgb2Linear,
    Srgbmix,
    Tan,
    Tanh,
    Trunc,
}

// sorted by name
const TABLE: &[(&str, Builtin)] = &[
    ("abs", Builtin::Abs),
    ("acos", Builtin::Acos),
    ("acosh", Builtin::Acosh),
    ("asin", Builtin::Asin),
    ("asinh", Builtin::Asinh),
    ("atan", Builtin::Atan),
    ("atanh", Builtin::Atanh),
    ("cbrt", Builtin::Cbrt),
    ("ceil", Builtin::Ceil),
    ("clamp", Builtin::Clamp),
    ("close", Builtin::Close),
    ("close_p", Builtin::CloseP),
    ("cos", Builtin::Cos),
    ("cosh", Builtin::Cosh),
    ("cube", Builtin::Cube),
    ("degrees", Builtin::Degrees),
    ("eq", Builtin::Eq),
    ("exp", Builtin::Exp),
    ("exp2", Builtin::Exp2),
    ("floor", Builtin::Floor),
    ("fract", Builtin::Fract),
    ("gt", Builtin::Gt),
    ("gte", Builtin::Gte),
    ("hypot", Builtin::Hypot),
    ("isfinite", Builtin::IsFinite),
    ("isinf", Builtin::IsInf),
    ("isnan", Builtin::IsNan),
    ("isnormal", Builtin::IsNormal),
    ("linear", Builtin::Linear),
    ("linear2srgb", Builtin::Linear2Srgb),
    ("linearstep", Builtin::Linearstep),
    ("log", Builtin::Log),
    ("log2", Builtin::Log2),
    ("lt", Builtin::Lt),
    ("lte", Builtin::Lte),
    ("luma", Builtin::Luma),
    ("max", Builtin::Max),
    ("min", Builtin::Min),
    ("mix", Builtin::Mix),
    ("mla", Builtin::Mla),
    ("mod_e", Builtin::ModE),
    ("mod_f", Builtin::ModF),
    ("mod_t", Builtin::ModT),
    ("pow", Builtin::Pow),
    ("radians", Builtin::Radians),
    ("round", Builtin::Round),
    ("sat", Builtin::Sat),
    ("sign", Builtin::Sign),
    ("sin", Builtin::Sin),
    ("sinh", Builtin::Sinh),
    ("smooth", Builtin::Smooth),
    ("smoothstep", Builtin::Smoothstep),
    ("sqr", Builtin::Sqr),
    ("sqrt", Builtin::Sqrt),
    ("srgb2linear", Builtin::Srgb2Linear),
    ("srgbmix", Builtin::Srgbmix),
    ("tan", Builtin::Tan),
    ("tanh", Builtin::Tanh),
    ("trunc", Builtin::Trunc),
];

const CONSTANTS: &[(&str, f64)] = &[
    ("e", std::f64::consts::E),
    ("phi", 1.618_033_988_749_895),
    ("pi", std::f64::consts::PI),
    ("tau", std::f64::consts::TAU),
];

pub(crate) fn constant(name: &str) -> Option<f64> {
    CONSTANTS.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

fn bool_f(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn close_p(a: f64, b: f64, p: f64) -> f64 {
    bool_f((a - b).abs() <= p * a.abs().max(b.abs()))
}

fn hermite(t: f64) -> f64 {
    (3.0 - 2.0 * t) * t * t
}

impl Builtin {
    pub(crate) fn lookup(name: &str) -> Option<Self> {
        TABLE
            .binary_search_by(|(n, _)| n.cmp(&name))
            .ok()
            .map(|i| TABLE[i].1)
    }

    pub(crate) fn name(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, b)| *b == self)
            .map_or("?", |(n, _)| *n)
    }

    pub(crate) fn arity(self) -> usize {
        match self {
            Self::Clamp
            | Self::CloseP
            | Self::Linear
            | Self::Linearstep
            | Self::Luma
            | Self::Mix
            | Self::Mla
            | Self::Smooth
            | Self::Smoothstep
            | Self::Srgbmix => 3,
            Self::Close
            | Self::Eq
            | Self::Gt
            | Self::Gte
            | Self::Hypot
            | Self::Lt
            | Self::Lte
            | Self::Max
            | Self::Min
            | Self::ModE
            | Self::ModF
            | Self::ModT
            | Self::Pow => 2,
            _ => 1,
        }
    }

    /// Apply to the first [`Builtin::arity`] entries of `a`. Domain errors yield NaN or Inf.
    pub(crate) fn call(self, a: &[f64; MAX_ARGS]) -> f64 {
        let [x, y, z] = *a;
        match self {
            Self::Abs => x.abs(),
            Self::Acos => x.acos(),
            Self::Acosh => x.acosh(),
            Self::Asin => x.asin(),
            Self::Asinh => x.asinh(),
            Self::Atan => x.atan(),
            Self::Atanh => x.atanh(),
            Self::Cbrt => x.cbrt(),
            Self::Ceil => x.ceil(),
            Self::Clamp => clamp(x, y, z),
            Self::Close => close_p(x, y, 1e-6),
            Self::CloseP => close_p(x, y, z),
            Self::Cos => x.cos(),
            Self::Cosh => x.cosh(),
            Self::Cube => x * x * x,
            Self::Degrees => x.to_degrees(),
            Self::Eq => bool_f(x == y),
            Self::Exp => x.exp(),
            Self::Exp2 => x.exp2(),
            Self::Floor => x.floor(),
            Self::Fract => x - x.trunc(),
            Self::Gt => bool_f(x > y),
            Self::Gte => bool_f(x >= y),
            Self::Hypot => x.hypot(y),
            Self::IsFinite => bool_f(x.is_finite()),
            Self::IsInf => bool_f(x.is_infinite()),
            Self::IsNan => bool_f(x.is_nan()),
            Self::IsNormal => bool_f(x.is_normal()),
            Self::Linear => linear_norm(x, y, z),
            Self::Linear2Srgb => linear2srgb(x),
            Self::Linearstep => clamp(linear_norm(x, y, z), 0.0, 1.0),
            Self::Log => x.ln(),
            Self::Log2 => x.log2(),
            Self::Lt => bool_f(x < y),
            Self::Lte => bool_f(x <= y),
            Self::Luma => luma(x, y, z),
            // f64::max/min drop NaN operands
            Self::Max if x.is_nan() || y.is_nan() => f64::NAN,
            Self::Min if x.is_nan() || y.is_nan() => f64::NAN,
            Self::Max => x.max(y),
            Self::Min => x.min(y),
            Self::Mix => mix(x, y, z),
            Self::Mla => x * y + z,
            Self::ModE => x - y * sign(y) * (x / y.abs()).floor(),
            Self::ModF => x - y * (x / y).floor(),
            Self::ModT => x - y * (x / y).trunc(),
            Self::Pow => x.powf(y),
            Self::Radians => x.to_radians(),
            Self::Round => x.round(),
            Self::Sat => clamp(x, 0.0, 1.0),
            Self::Sign => sign(x),
            Self::Sin => x.sin(),
            Self::Sinh => x.sinh(),
            Self::Smooth => hermite(linear_norm(x, y, z)),
            Self::Smoothstep => hermite(clamp(linear_norm(x, y, z), 0.0, 1.0)),
            Self::Sqr => x * x,
            Self::Sqrt => x.sqrt(),
            Self::Srgb2Linear => srgb2linear(x),
            Self::Srgbmix => linear2srgb(mix(srgb2linear(x), srgb2linear(y), z)),
            Self::Tan => x.tan(),
            Self::Tanh => x.tanh(),
            Self::Trunc => x.trunc(),
        }
    }
}
