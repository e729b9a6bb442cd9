use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::{constants::DPI, tesseral_errors::TesseralError};

/// Reduce an angle in radians to its principal value in [0, 2π).
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Solve the Kepler equation `E - e·sin(E) = M` for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly M in radians
/// * `eccentricity`: orbital eccentricity, `0 <= e < 1`
///
/// Return
/// ------
/// * the eccentric anomaly E in radians, or a root-finding error if the Newton
///   iteration fails to converge.
pub(crate) fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> Result<f64, TesseralError> {
    if eccentricity == 0.0 {
        return Ok(mean_anomaly);
    }

    let f = |e_anom: f64| -> f64 { e_anom - eccentricity * e_anom.sin() - mean_anomaly };
    let df = |e_anom: f64| -> f64 { 1.0 - eccentricity * e_anom.cos() };

    // Starting point E ≈ M + e·sin(M), adequate for elliptic orbits below parabolic speed
    let x0 = mean_anomaly + eccentricity * mean_anomaly.sin();

    let mut tol = SimpleConvergency {
        eps: f64::EPSILON * 1e2, // ~2e-14
        max_iter: 50,
    };

    Ok(find_root_newton_raphson(x0, &f, &df, &mut tol)?)
}

/// True anomaly from the eccentric anomaly.
pub(crate) fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos())
}
