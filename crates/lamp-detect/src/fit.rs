//! Algebraic least-squares circle fit (Kasa, 1976).

use nalgebra::{Matrix3, Vector3};

/// A circle fitted to a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedCircle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

/// Fit a circle to 2D points by minimizing the algebraic distance
/// `x² + y² - 2·a·x - 2·b·y - c`.
///
/// Points are shifted to their centroid before building the normal
/// equations. Requires at least 3 points that are not collinear; returns
/// `None` otherwise.
pub fn fit_circle(points: &[[f64; 2]]) -> Option<FittedCircle> {
    let n = points.len();
    if n < 3 {
        return None;
    }

    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
    let (mean_x, mean_y) = (sum_x / n as f64, sum_y / n as f64);

    // normal equations AᵀA·u = Aᵀz with rows [x, y, 1] and z = x² + y²
    let mut ata = Matrix3::<f64>::zeros();
    let mut atz = Vector3::<f64>::zeros();
    for p in points {
        let (x, y) = (p[0] - mean_x, p[1] - mean_y);
        let row = Vector3::new(x, y, 1.0);
        ata += row * row.transpose();
        atz += row * (x * x + y * y);
    }

    let u = ata.try_inverse()? * atz;
    let (a, b) = (u[0] / 2.0, u[1] / 2.0);
    let r2 = u[2] + a * a + b * b;
    if !r2.is_finite() || r2 <= 0.0 {
        return None;
    }

    Some(FittedCircle {
        cx: a + mean_x,
        cy: b + mean_y,
        radius: r2.sqrt(),
    })
}
