use symbiosis_common::{Result, SymbiosisError};

/// Added to the norm product so zero vectors score 0 instead of NaN
pub const SIMILARITY_EPSILON: f64 = 1e-9;

/// Cosine similarity of two equal-length vectors
///
/// Computes `dot(a, b) / (|a| * |b| + SIMILARITY_EPSILON)`. The result is
/// nominally in `[-1, 1]`. Inputs whose products overflow are rescaled by
/// their largest component first, so finite vectors always give a finite score.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(SymbiosisError::invalid_input(format!(
            "vector dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let (dot, norm) = dot_and_norm(a, b, 1.0, 1.0);
    if dot.is_finite() && norm.is_finite() {
        return Ok(dot / (norm + SIMILARITY_EPSILON));
    }

    let (dot, norm) = dot_and_norm(a, b, max_abs(a), max_abs(b));
    Ok(dot / (norm + SIMILARITY_EPSILON))
}

/// Dot product and norm product of `a / scale_a` and `b / scale_b`
fn dot_and_norm(a: &[f64], b: &[f64], scale_a: f64, scale_b: f64) -> (f64, f64) {
    let (dot, norm_a, norm_b) = a
        .iter()
        .map(|x| x / scale_a)
        .zip(b.iter().map(|y| y / scale_b))
        .fold((0.0, 0.0, 0.0), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    (dot, norm_a.sqrt() * norm_b.sqrt())
}

fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0_f64, |m, x| m.max(x.abs())).max(f64::MIN_POSITIVE)
}
