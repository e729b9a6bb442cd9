//! # Eccentricity (Hansen) functions
//!
//! The eccentricity dependence of a tesseral term is the Hansen coefficient
//! `X^(-(n+1), n-2p)_(n-2p+q)(e)`. Evaluating it is the expensive part of the
//! model, so the engine splits the work in two:
//!
//! - [`hansen_kernel`] evaluates the transcendental magnitude itself; the quad
//!   cache ([`crate::tesseral_quad::TesseralQuad`]) calls it only when its
//!   eccentricity window must be refitted;
//! - [`compute_eccentricity_function`] returns the cheap angular/index structure
//!   (trigonometric selectors of the periapsis longitude and the chain-rule terms
//!   mapping `(e, ϖ)` onto `(ex, ey)`), recomputed at every evaluation and
//!   multiplied termwise with the cached Taylor kernel in the perturbation
//!   assembly.

use crate::{
    constants::{CIRCULAR_ECCENTRICITY_EPS, DPI},
    equinoctial::EquinoctialOrbitState,
    kepler::{eccentric_anomaly, true_anomaly},
    tesseral_errors::TesseralError,
    tesseral_quad::TesseralQuad,
};

/// Number of nodes of the periodic trapezoidal quadrature.
const QUADRATURE_NODES: usize = 256;

/// Finite-difference step of the kernel eccentricity derivative.
const DERIVATIVE_STEP: f64 = 1e-6;

/// Hansen coefficient `X^(-(n+1), k)_j(e)` of the tesseral expansion.
///
/// Computed from its Fourier definition
/// `X = (1/2π) ∫ (a/r)^(n+1) · cos(k·f - j·M) dM` over one orbit, with the
/// periodic trapezoidal rule (spectrally accurate for this analytic periodic
/// integrand) and a Newton Kepler solve per node.
///
/// Arguments
/// ---------
/// * `n`: harmonic degree (the integrand power is `n + 1`)
/// * `k`: true-anomaly multiplier, `n - 2p` for a quad
/// * `j`: mean-anomaly multiplier, `n - 2p + q` for a quad
/// * `eccentricity`: evaluation point, `0 <= e < 1`
pub fn hansen_kernel(n: usize, k: i32, j: i32, eccentricity: f64) -> Result<f64, TesseralError> {
    if eccentricity == 0.0 {
        // Circular limit: the Fourier integral collapses to a Kronecker delta
        return Ok(if k == j { 1.0 } else { 0.0 });
    }

    let mut sum = 0.0;
    for node in 0..QUADRATURE_NODES {
        let mean_anomaly = DPI * node as f64 / QUADRATURE_NODES as f64;
        let ecc_anomaly = eccentric_anomaly(mean_anomaly, eccentricity)?;
        let nu = true_anomaly(ecc_anomaly, eccentricity);

        let a_over_r = 1.0 / (1.0 - eccentricity * ecc_anomaly.cos());
        sum += a_over_r.powi(n as i32 + 1) * (k as f64 * nu - j as f64 * mean_anomaly).cos();
    }

    Ok(sum / QUADRATURE_NODES as f64)
}

/// Eccentricity derivative of [`hansen_kernel`], by central difference
/// (one-sided at the circular boundary).
pub fn hansen_kernel_derivative(
    n: usize,
    k: i32,
    j: i32,
    eccentricity: f64,
) -> Result<f64, TesseralError> {
    let h = DERIVATIVE_STEP;
    if eccentricity < h {
        let plus = hansen_kernel(n, k, j, eccentricity + h)?;
        let here = hansen_kernel(n, k, j, eccentricity)?;
        Ok((plus - here) / h)
    } else {
        let plus = hansen_kernel(n, k, j, eccentricity + h)?;
        let minus = hansen_kernel(n, k, j, eccentricity - h)?;
        Ok((plus - minus) / (2.0 * h))
    }
}

/// Eccentricity-function vector of one quad:
/// `[cos qϖ, sin qϖ, de/dex, de/dey, dϖ/dex, dϖ/dey]`.
///
/// Pure function of the quad index `q` and the eccentricity-vector components of
/// the equinoctial state. The magnitude dependence on `e` is deliberately **not**
/// evaluated here: it comes from the quad's Taylor cache; this function only
/// supplies the angular/index structure multiplied termwise in the assembly.
///
/// For a circular orbit the eccentricity-vector direction is undefined; the
/// vector is clamped to the `ϖ = 0` limit `[1, 0, 1, 0, 0, 0]` (the cached kernel
/// vanishes for `q != 0` at `e = 0`, so the clamped periapsis terms contribute
/// nothing).
pub fn compute_eccentricity_function(
    orbit: &EquinoctialOrbitState,
    quad: &TesseralQuad,
) -> [f64; 6] {
    let eccentricity = orbit.eccentricity();
    if eccentricity < CIRCULAR_ECCENTRICITY_EPS {
        return [1.0, 0.0, 1.0, 0.0, 0.0, 0.0];
    }

    let q_pom = quad.q() as f64 * orbit.periapsis_longitude();
    let e2 = eccentricity.powi(2);

    [
        q_pom.cos(),
        q_pom.sin(),
        orbit.ex / eccentricity,
        orbit.ey / eccentricity,
        -orbit.ey / e2,
        orbit.ex / e2,
    ]
}

#[cfg(test)]
mod eccentricity_function_test {
    use super::*;

    #[test]
    fn test_hansen_kernel_circular_limit() {
        assert_eq!(hansen_kernel(2, 2, 2, 0.0).unwrap(), 1.0);
        assert_eq!(hansen_kernel(3, 1, 2, 0.0).unwrap(), 0.0);
        assert_eq!(hansen_kernel(7, -1, 1, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_hansen_kernel_closed_forms() {
        // X^(-1,0)_0 = 1 for any eccentricity
        let x = hansen_kernel(0, 0, 0, 0.2).unwrap();
        assert!((x - 1.0).abs() < 1e-12);

        // X^(-2,0)_0 = (1 - e²)^(-1/2)
        let e = 0.3;
        let x = hansen_kernel(1, 0, 0, e).unwrap();
        assert!((x - 1.0 / (1.0 - e * e).sqrt()).abs() < 1e-12);

        // X^(-3,0)_0 = (1 - e²)^(-3/2)
        let x = hansen_kernel(2, 0, 0, e).unwrap();
        assert!((x - (1.0 - e * e).powf(-1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_hansen_kernel_small_eccentricity_orders() {
        // Leading behavior X ~ O(e^|q|): first-order coefficients stay bounded,
        // higher offsets vanish faster
        let e = 1e-3;
        let first = hansen_kernel(2, 2, 3, e).unwrap();
        let second = hansen_kernel(2, 2, 4, e).unwrap();
        assert!(first.abs() < 10.0 * e);
        assert!(second.abs() < 20.0 * e * e);
    }

    #[test]
    fn test_hansen_kernel_derivative_matches_secant() {
        let e = 0.1;
        let d = hansen_kernel_derivative(2, 0, 0, e).unwrap();
        // d/de (1-e²)^(-3/2) = 3e·(1-e²)^(-5/2)
        let expected = 3.0 * e * (1.0 - e * e).powf(-2.5);
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn test_structure_vector_on_apsis_axis() {
        // ϖ = 0 puts the eccentricity vector on the x axis
        let orbit =
            EquinoctialOrbitState::from_keplerian(0.0, 42164200.0, 0.1, 0.5, 0.0, 0.0, 0.0);
        let quad = TesseralQuad::for_tests(2, 2, 0, 2, &orbit);

        let g = compute_eccentricity_function(&orbit, &quad);
        assert_eq!(g[0], 1.0);
        assert_eq!(g[1], 0.0);
        assert!((g[2] - 1.0).abs() < 1e-14);
        assert_eq!(g[3], 0.0);
        assert_eq!(g[4], 0.0);
        assert!((g[5] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_structure_vector_circular_clamp() {
        let orbit =
            EquinoctialOrbitState::from_keplerian(0.0, 42164200.0, 0.0, 0.5, 0.0, 0.0, 0.0);
        let quad = TesseralQuad::for_tests(2, 2, 0, 2, &orbit);

        let g = compute_eccentricity_function(&orbit, &quad);
        assert_eq!(g, [1.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    }
}
