pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
