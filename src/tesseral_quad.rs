//! # Tesseral quad cache
//!
//! A [`TesseralQuad`] is one resonant `(n, m, p, q)` term of the Kaula expansion,
//! carrying its unnormalized field coefficients and a staged approximation of its
//! eccentricity dependence: a degree-2 Taylor polynomial of the Hansen kernel,
//! valid over a window around a central eccentricity, refitted only when the
//! propagated eccentricity drifts outside the window. This keeps the per-step
//! cost of the perturbation O(1) per quad while the expensive kernel quadrature
//! runs only on window refits.

use serde::{Deserialize, Serialize};

use crate::{
    eccentricity_function::{hansen_kernel, hansen_kernel_derivative},
    equinoctial::EquinoctialOrbitState,
    gravity_field::GravityFieldProvider,
    tesseral_errors::TesseralError,
};

/// Default half-width of the eccentricity validity window.
pub const DELTA_ECCENTRICITY: f64 = 0.02;

/// One resonant tesseral term `(n, m, p, q)` with its cached eccentricity Taylor fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TesseralQuad {
    n: usize,
    m: usize,
    p: usize,
    q: i32,
    /// Unnormalized cosine coefficient `C(n, m)` of the gravity field
    fc: f64,
    /// Unnormalized sine coefficient `S(n, m)` of the gravity field
    fs: f64,
    central_eccentricity: f64,
    delta_eccentricity: f64,
    /// Hansen kernel about the central eccentricity: value, slope, second-order term
    taylor_coefficients: [f64; 3],
    /// Same fit applied to the eccentricity derivative of the kernel
    diff_taylor_coefficients: [f64; 3],
}

impl TesseralQuad {
    /// Build one quad, looking up its field coefficients and fitting the initial
    /// eccentricity window around the orbit's current eccentricity.
    ///
    /// Fails with a configuration error if the gravity field does not carry the
    /// requested `(n, m)` coefficients.
    pub fn new(
        provider: &impl GravityFieldProvider,
        n: usize,
        m: usize,
        p: usize,
        q: i32,
        orbit: &EquinoctialOrbitState,
    ) -> Result<Self, TesseralError> {
        debug_assert!(n >= 1 && m >= 1 && m <= n);

        let mut quad = TesseralQuad {
            n,
            m,
            p,
            q,
            fc: provider.c(n, m)?,
            fs: provider.s(n, m)?,
            central_eccentricity: orbit.eccentricity(),
            delta_eccentricity: DELTA_ECCENTRICITY,
            taylor_coefficients: [0.0; 3],
            diff_taylor_coefficients: [0.0; 3],
        };
        quad.refit_taylor()?;

        Ok(quad)
    }

    /// Recenter the validity window when the orbit eccentricity has drifted out
    /// of it, refitting both Taylor triplets. No-op (idempotent) while the
    /// eccentricity stays inside the window; this is the only mutating operation
    /// on an existing quad.
    pub fn update_eccentricity_interval(
        &mut self,
        orbit: &EquinoctialOrbitState,
    ) -> Result<(), TesseralError> {
        let eccentricity = orbit.eccentricity();
        if (eccentricity - self.central_eccentricity).abs() > self.delta_eccentricity {
            self.central_eccentricity = eccentricity;
            self.delta_eccentricity = DELTA_ECCENTRICITY;
            self.refit_taylor()?;
        }
        Ok(())
    }

    /// Cached Hansen kernel value at the given eccentricity (degree-2 Taylor).
    pub fn eccentricity_function_value(&self, eccentricity: f64) -> f64 {
        let dx = eccentricity - self.central_eccentricity;
        let t = &self.taylor_coefficients;
        t[0] + t[1] * dx + t[2] * dx * dx
    }

    /// Cached eccentricity derivative of the Hansen kernel.
    pub fn eccentricity_function_derivative(&self, eccentricity: f64) -> f64 {
        let dx = eccentricity - self.central_eccentricity;
        let t = &self.diff_taylor_coefficients;
        t[0] + t[1] * dx + t[2] * dx * dx
    }

    /// Harmonic degree `n`.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Harmonic order `m`.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Inclination-function index `p`.
    pub fn p(&self) -> usize {
        self.p
    }

    /// Eccentricity index `q` of the `(n - 2p + q)` family.
    pub fn q(&self) -> i32 {
        self.q
    }

    /// Unnormalized cosine coefficient of the term.
    pub fn fc(&self) -> f64 {
        self.fc
    }

    /// Unnormalized sine coefficient of the term.
    pub fn fs(&self) -> f64 {
        self.fs
    }

    /// Center of the eccentricity validity window.
    pub fn central_eccentricity(&self) -> f64 {
        self.central_eccentricity
    }

    /// Half-width of the eccentricity validity window.
    pub fn delta_eccentricity(&self) -> f64 {
        self.delta_eccentricity
    }

    /// Cached Taylor triplet (value, slope, second-order term).
    pub fn taylor_coefficients(&self) -> [f64; 3] {
        self.taylor_coefficients
    }

    /// Cached Taylor triplet of the kernel derivative.
    pub fn diff_taylor_coefficients(&self) -> [f64; 3] {
        self.diff_taylor_coefficients
    }

    /// True-anomaly multiplier `k = n - 2p` of the term.
    pub(crate) fn true_anomaly_multiplier(&self) -> i32 {
        self.n as i32 - 2 * self.p as i32
    }

    /// Mean-anomaly multiplier `j = n - 2p + q` of the term.
    pub(crate) fn mean_anomaly_multiplier(&self) -> i32 {
        self.true_anomaly_multiplier() + self.q
    }

    /// Refit both Taylor triplets from kernel evaluations at three window nodes.
    fn refit_taylor(&mut self) -> Result<(), TesseralError> {
        let center = self.central_eccentricity;
        let delta = self.delta_eccentricity;

        // Window nodes, clamped so the fit never samples a negative eccentricity
        let (x0, x1, x2) = if center - delta >= 0.0 {
            (center - delta, center, center + delta)
        } else if center > 0.0 {
            (0.0, center, center + delta)
        } else {
            (0.0, delta / 2.0, delta)
        };

        let n = self.n;
        let k = self.true_anomaly_multiplier();
        let j = self.mean_anomaly_multiplier();

        self.taylor_coefficients =
            Self::fit_parabola(center, x0, x1, x2, |e| hansen_kernel(n, k, j, e))?;
        self.diff_taylor_coefficients =
            Self::fit_parabola(center, x0, x1, x2, |e| hansen_kernel_derivative(n, k, j, e))?;

        Ok(())
    }

    /// Fit the parabola through three nodes and expand it as a Taylor triplet
    /// about `center` (Newton divided differences).
    fn fit_parabola(
        center: f64,
        x0: f64,
        x1: f64,
        x2: f64,
        kernel: impl Fn(f64) -> Result<f64, TesseralError>,
    ) -> Result<[f64; 3], TesseralError> {
        let g0 = kernel(x0)?;
        let g1 = kernel(x1)?;
        let g2 = kernel(x2)?;

        let d01 = (g1 - g0) / (x1 - x0);
        let d12 = (g2 - g1) / (x2 - x1);
        let curvature = (d12 - d01) / (x2 - x0);

        let value = g0 + d01 * (center - x0) + curvature * (center - x0) * (center - x1);
        let slope = d01 + curvature * (2.0 * center - x0 - x1);

        Ok([value, slope, curvature])
    }

    /// Test-only constructor bypassing the gravity field lookup.
    #[cfg(test)]
    pub(crate) fn for_tests(
        n: usize,
        m: usize,
        p: usize,
        q: i32,
        orbit: &EquinoctialOrbitState,
    ) -> Self {
        let mut quad = TesseralQuad {
            n,
            m,
            p,
            q,
            fc: 1e-6,
            fs: 1e-6,
            central_eccentricity: orbit.eccentricity(),
            delta_eccentricity: DELTA_ECCENTRICITY,
            taylor_coefficients: [0.0; 3],
            diff_taylor_coefficients: [0.0; 3],
        };
        quad.refit_taylor().expect("kernel fit");
        quad
    }
}

#[cfg(test)]
mod tesseral_quad_test {
    use super::*;
    use crate::gravity_field::UnnormalizedGravityField;

    fn test_field() -> UnnormalizedGravityField {
        UnnormalizedGravityField::new(
            3.986004415e14,
            6378136.46,
            vec![
                vec![1.0],
                vec![0.0, 0.0],
                vec![-1.0826266835e-3, -2.414e-10, 1.5745360428e-6],
            ],
            vec![
                vec![0.0],
                vec![0.0, 0.0],
                vec![0.0, 1.5431e-9, -9.0386807559e-7],
            ],
        )
        .unwrap()
    }

    fn orbit_with_eccentricity(e: f64) -> EquinoctialOrbitState {
        EquinoctialOrbitState::from_keplerian(50678.0, 42164200.0, e, 0.8, 0.1, 0.2, 0.3)
    }

    #[test]
    fn test_initial_window() {
        let orbit = orbit_with_eccentricity(0.001);
        let quad = TesseralQuad::new(&test_field(), 2, 2, 0, 0, &orbit).unwrap();

        assert_eq!(quad.central_eccentricity(), orbit.eccentricity());
        assert_eq!(quad.delta_eccentricity(), 0.02);
        assert_eq!(quad.fc(), 1.5745360428e-6);
        assert_eq!(quad.fs(), -9.0386807559e-7);
    }

    #[test]
    fn test_update_is_idempotent() {
        let orbit = orbit_with_eccentricity(0.05);
        let mut quad = TesseralQuad::new(&test_field(), 2, 2, 0, 0, &orbit).unwrap();

        quad.update_eccentricity_interval(&orbit).unwrap();
        let taylor = quad.taylor_coefficients();
        let diff = quad.diff_taylor_coefficients();

        quad.update_eccentricity_interval(&orbit).unwrap();
        assert_eq!(quad.taylor_coefficients(), taylor);
        assert_eq!(quad.diff_taylor_coefficients(), diff);
    }

    #[test]
    fn test_update_triggers_on_boundary_crossing() {
        let orbit = orbit_with_eccentricity(0.001);
        let mut quad = TesseralQuad::new(&test_field(), 2, 2, 0, 0, &orbit).unwrap();

        // Inside the window: no recenter
        quad.update_eccentricity_interval(&orbit_with_eccentricity(0.015))
            .unwrap();
        assert_eq!(quad.central_eccentricity(), orbit.eccentricity());

        // Outside the window: the window recenters at the new eccentricity
        let drifted = orbit_with_eccentricity(0.1);
        quad.update_eccentricity_interval(&drifted).unwrap();
        assert_eq!(quad.central_eccentricity(), drifted.eccentricity());
        assert_eq!(quad.delta_eccentricity(), 0.02);
    }

    #[test]
    fn test_taylor_fit_matches_kernel() {
        let orbit = orbit_with_eccentricity(0.05);
        let quad = TesseralQuad::new(&test_field(), 2, 2, 0, 0, &orbit).unwrap();

        // Exact at the window center (a fit node)
        let direct = hansen_kernel(2, 2, 2, 0.05).unwrap();
        assert!((quad.eccentricity_function_value(0.05) - direct).abs() < 1e-12);

        // Quadratic accuracy close to the center
        let direct = hansen_kernel(2, 2, 2, 0.055).unwrap();
        assert!((quad.eccentricity_function_value(0.055) - direct).abs() < 1e-5);

        let direct = hansen_kernel_derivative(2, 2, 2, 0.05).unwrap();
        assert!((quad.eccentricity_function_derivative(0.05) - direct).abs() < 1e-12);
    }

    #[test]
    fn test_circular_orbit_window() {
        let orbit = orbit_with_eccentricity(0.0);
        let quad = TesseralQuad::new(&test_field(), 2, 2, 0, 0, &orbit).unwrap();

        assert_eq!(quad.central_eccentricity(), 0.0);
        // The lower node collapses onto e = 0, which is itself a fit node
        assert!((quad.eccentricity_function_value(0.0) - 1.0).abs() < 1e-12);

        let quad = TesseralQuad::new(&test_field(), 2, 2, 0, 2, &orbit).unwrap();
        assert!(quad.eccentricity_function_value(0.0).abs() < 1e-12);
    }

    #[test]
    fn test_error_on_missing_coefficients() {
        let orbit = orbit_with_eccentricity(0.001);
        let err = TesseralQuad::new(&test_field(), 5, 2, 0, 0, &orbit).unwrap_err();
        assert_eq!(
            err,
            TesseralError::UnsupportedFieldDegree {
                requested: 5,
                available: 2
            }
        );
    }
}
