/// `a + (b - a) * t`, exact at `t == 0`.
#[inline]
pub(crate) fn mix(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse of [`mix`]: where `x` sits between `a` and `b`.
#[inline]
pub(crate) fn linear_norm(a: f64, b: f64, x: f64) -> f64 {
    (x - a) / (b - a)
}

/// Clamp without the `min <= max` precondition of `f64::clamp`; NaN bounds pass `x` through.
#[inline]
pub(crate) fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

pub(crate) fn srgb2linear(x: f64) -> f64 {
    if x < 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

pub(crate) fn linear2srgb(x: f64) -> f64 {
    if x < 0.0031308 {
        x * 12.92
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

/// HSL to sRGB-encoded RGB. Hue is in turns and wraps; saturation and lightness are in `[0, 1]`.
pub(crate) fn hsl2srgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let a = s * l.min(1.0 - l);
    let f = |n: f64| {
        let k = (n + h * 12.0).rem_euclid(12.0);
        l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
    };
    [f(0.0), f(8.0), f(4.0)]
}

/// HSV to sRGB-encoded RGB. Hue is in turns and wraps; saturation and value are in `[0, 1]`.
pub(crate) fn hsv2srgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let f = |n: f64| {
        let k = (n + h * 6.0).rem_euclid(6.0);
        v - v * s * k.min(4.0 - k).min(1.0).max(0.0)
    };
    [f(5.0), f(3.0), f(1.0)]
}

/// Relative luminance with BT.709 weights.
pub(crate) fn luma(r: f64, g: f64, b: f64) -> f64 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

const SLERP_LERP_THRESHOLD: f64 = 0.9995;

/// Shortest-arc spherical interpolation between two quaternions.
///
/// Nearly parallel inputs fall back to a normalized lerp.
pub(crate) fn quat_slerp(a: [f64; 4], b: [f64; 4], t: f64) -> [f64; 4] {
    let mut a = a;
    let mut cos_alpha = dot4(a, b);
    if cos_alpha < 0.0 {
        cos_alpha = -cos_alpha;
        a = a.map(|c| -c);
    }

    if cos_alpha > SLERP_LERP_THRESHOLD {
        return normalize4(std::array::from_fn(|i| mix(a[i], b[i], t)));
    }

    let alpha = cos_alpha.min(1.0).acos();
    let theta = alpha * t;
    let sin_alpha = alpha.sin();
    let s0 = theta.cos() - cos_alpha * theta.sin() / sin_alpha;
    let s1 = theta.sin() / sin_alpha;
    std::array::from_fn(|i| s0 * a[i] + s1 * b[i])
}

fn dot4(a: [f64; 4], b: [f64; 4]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

fn normalize4(q: [f64; 4]) -> [f64; 4] {
    let len = dot4(q, q).sqrt();
    if len == 0.0 {
        return q;
    }
    q.map(|c| c / len)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
