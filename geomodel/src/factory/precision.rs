use num_traits::Float;

/// Rounds `value` to the nearest multiple of `1 / scale`, halves rounded up.
///
/// Non-positive scales mean floating precision and non-finite values are never rounded; in both
/// cases the value is returned unchanged.
pub fn make_precise<N: Float>(scale: N, value: N) -> N {
    if is_fixed(scale) && value.is_finite() {
        let half = N::one() / (N::one() + N::one());
        (value * scale + half).floor() / scale
    } else {
        value
    }
}

/// Rounds `value` up onto the `1 / scale` grid.
pub fn make_precise_ceil<N: Float>(scale: N, value: N) -> N {
    if is_fixed(scale) && value.is_finite() {
        (value * scale).ceil() / scale
    } else {
        value
    }
}

/// Rounds `value` down onto the `1 / scale` grid.
pub fn make_precise_floor<N: Float>(scale: N, value: N) -> N {
    if is_fixed(scale) && value.is_finite() {
        (value * scale).floor() / scale
    } else {
        value
    }
}

/// Normalizes a user supplied scale: non-finite and non-positive scales become 0 (floating).
pub fn normalize_scale<N: Float>(scale: N) -> N {
    if is_fixed(scale) {
        scale
    } else {
        N::zero()
    }
}

fn is_fixed<N: Float>(scale: N) -> bool {
    scale.is_finite() && scale > N::zero()
}
