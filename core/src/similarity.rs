use crate::error::{Error, Result};

/// Cosine similarity `dot(a, b) / (|a| * |b|)`, clamped to `[-1, 1]`.
///
/// Fails with [`Error::DimensionMismatch`] when the lengths differ and with
/// [`Error::DegenerateVector`] when either norm is zero (empty vectors included).
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch { left: a.len(), right: b.len() });
    }

    // scale by the largest component so squares neither underflow nor overflow
    let scale_a = max_abs(a);
    let scale_b = max_abs(b);
    if scale_a == 0.0 || scale_b == 0.0 {
        return Err(Error::DegenerateVector);
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (x / scale_a, y / scale_b);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}

fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0_f64, |m, x| m.max(x.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors() {
        let v = [2.0, 1.0, 0.0, 7.5];
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn orthogonal_vectors() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn opposite_vectors() {
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn scale_invariant() {
        let a = cosine_similarity(&[2.0, 1.0, 0.0], &[1.0, 0.0, 1.0]).unwrap();
        let b = cosine_similarity(&[20.0, 10.0, 0.0], &[0.5, 0.0, 0.5]).unwrap();
        assert!((a - b).abs() < 1e-12);
        assert!((a - 2.0 / (5.0f64.sqrt() * 2.0f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn dimension_mismatch() {
        assert_eq!(
            cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(Error::DimensionMismatch { left: 2, right: 3 })
        );
    }

    #[test]
    fn zero_norm_is_an_error() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), Err(Error::DegenerateVector));
        assert_eq!(cosine_similarity(&[1.0, 1.0], &[0.0, 0.0]), Err(Error::DegenerateVector));
        assert_eq!(cosine_similarity(&[], &[]), Err(Error::DegenerateVector));
    }

    #[test]
    fn tiny_components_are_not_degenerate() {
        let v = [1e-200, 1e-200];
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-12);
        let w = [1e-200, 0.0];
        assert!((cosine_similarity(&v, &w).unwrap() - 1.0 / 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn huge_components_do_not_overflow() {
        let v = [1e200, 1e200];
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-12);
        assert!((cosine_similarity(&v, &[-1e200, -1e200]).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn mixed_magnitudes() {
        let got = cosine_similarity(&[1e-200, 0.0], &[1e200, 1e200]).unwrap();
        assert!((got - 1.0 / 2.0f64.sqrt()).abs() < 1e-12);
    }
}
