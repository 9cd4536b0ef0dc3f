use nalgebra::{DMatrix, DVector};
use serde::Deserialize;

/// Degree and sample count used when drawing interpolated curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    pub degree: usize,
    pub samples: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            degree: 5,
            samples: 300,
        }
    }
}

const SVD_EPS: f64 = 1e-12;

// ---------------------------------------------------------------------------
// Polynomial
// ---------------------------------------------------------------------------

/// Least-squares polynomial, stored against x mapped onto [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    /// Coefficients, lowest power first.
    coefficients: Vec<f64>,
    center: f64,
    half_range: f64,
}

impl Polynomial {
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn eval(&self, x: f64) -> f64 {
        let t = (x - self.center) / self.half_range;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c)
    }
}

/// Fit a polynomial of `degree` to `(xs, ys)` by least squares.
///
/// The degree is lowered to `n - 1` when there are too few points. Returns
/// `None` for empty or mismatched input, non-finite values, or when all x
/// values coincide.
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Option<Polynomial> {
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return None;
    }

    let (min, max) = min_max(xs)?;
    let half_range = (max - min) / 2.0;
    if half_range <= 0.0 {
        return None;
    }
    let center = (max + min) / 2.0;

    let degree = degree.min(xs.len() - 1);
    let vandermonde = DMatrix::from_fn(xs.len(), degree + 1, |r, c| {
        ((xs[r] - center) / half_range).powi(c as i32)
    });
    let rhs = DVector::from_column_slice(ys);

    let solution = vandermonde.svd(true, true).solve(&rhs, SVD_EPS).ok()?;
    log::trace!("polyfit degree {degree}: {solution:?}");

    Some(Polynomial {
        coefficients: solution.iter().copied().collect(),
        center,
        half_range,
    })
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Fit `(xs, ys)` and sample the curve at `samples` points between the
/// smallest and largest x.
pub fn sample_fit(xs: &[f64], ys: &[f64], degree: usize, samples: usize) -> Option<Vec<[f64; 2]>> {
    let poly = polyfit(xs, ys, degree)?;
    let (min, max) = min_max(xs)?;
    Some(
        linspace(min, max, samples)
            .into_iter()
            .map(|x| [x, poly.eval(x)])
            .collect(),
    )
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn recovers_exact_quintic() {
        let f = |x: f64| 2.0 - x + 0.5 * x.powi(2) + 0.1 * x.powi(3) - 0.01 * x.powi(5);
        let xs = linspace(-3.0, 4.0, 20);
        let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();

        let poly = polyfit(&xs, &ys, 5).unwrap();
        assert_eq!(poly.degree(), 5);
        for x in [-2.5, 0.0, 1.3, 3.9] {
            assert_relative_eq!(poly.eval(x), f(x), epsilon = 1e-8);
        }
    }

    #[test]
    fn handles_benchmark_scale_x() {
        // quadratic timings over array lengths up to a million
        let xs: Vec<f64> = (1..=12).map(|i| (i * 100_000) as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|&n| 1e-9 * n * n + 2e-3 * n + 5.0).collect();

        let poly = polyfit(&xs, &ys, 5).unwrap();
        for (&x, &y) in xs.iter().zip(&ys) {
            assert_relative_eq!(poly.eval(x), y, max_relative = 1e-6);
        }
    }

    #[test]
    fn degree_clamped_to_point_count() {
        let poly = polyfit(&[1.0, 3.0], &[2.0, 6.0], 5).unwrap();
        assert_eq!(poly.degree(), 1);
        assert_relative_eq!(poly.eval(2.0), 4.0, epsilon = 1e-10);
    }

    #[test]
    fn degenerate_input_has_no_fit() {
        assert!(polyfit(&[], &[], 5).is_none());
        assert!(polyfit(&[1.0, 2.0], &[1.0], 5).is_none());
        assert!(polyfit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0], 5).is_none());
        assert!(polyfit(&[1.0, f64::NAN], &[1.0, 2.0], 1).is_none());
    }

    #[test]
    fn sampled_curve_spans_x_range() {
        let xs = [10.0, 1.0, 5.0, 7.0];
        let ys = [100.0, 1.0, 25.0, 49.0];

        let curve = sample_fit(&xs, &ys, 5, 300).unwrap();
        assert_eq!(curve.len(), 300);
        assert_eq!(curve[0][0], 1.0);
        assert_eq!(curve[299][0], 10.0);
        assert!(curve.windows(2).all(|w| w[0][0] < w[1][0]));
        assert_relative_eq!(curve[0][1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(curve[299][1], 100.0, epsilon = 1e-6);
    }

    #[test]
    fn linspace_edges() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }
}
