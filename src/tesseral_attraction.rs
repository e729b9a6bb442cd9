//! # Semi-analytical tesseral perturbation engine
//!
//! [`StelaTesseralAttraction`] maintains the catalog of resonant tesseral quads
//! for a given mean orbit and integration setup, and evaluates the gradient of
//! the averaged tesseral potential with respect to the equinoctial state.
//!
//! The catalog is built by [`StelaTesseralAttraction::update_quads`]: every
//! `(n, m, p, q)` combination of the Kaula expansion whose angular argument
//! `(n - 2p + q)·λ̇ - m·θ̇` beats slower than the filter threshold is retained.
//! Each retained quad caches a local Taylor fit of its Hansen eccentricity
//! kernel; [`StelaTesseralAttraction::compute_perturbation`] refreshes those
//! windows and assembles the six partials in a single pass over the catalog.

use itertools::Itertools;
use nalgebra::{Matrix6, Vector6};

use crate::{
    constants::{DPI, EARTH_ROTATION_RATE},
    eccentricity_function::compute_eccentricity_function,
    equinoctial::EquinoctialOrbitState,
    gravity_field::GravityFieldProvider,
    inclination_function::compute_f,
    tesseral_errors::TesseralError,
    tesseral_quad::TesseralQuad,
    time::sidereal_angle,
};

/// Default tesseral order bound `|q| <= 2` of the catalog enumeration.
pub const DEFAULT_TESSERAL_ORDER: i32 = 2;

/// Default mean integration step of the propagation, seconds.
pub const DEFAULT_INTEGRATION_STEP: f64 = 86400.0;

/// Default number of integration steps a retained term must span.
pub const DEFAULT_MIN_STEP_COUNT: u32 = 5;

/// Semi-analytical tesseral attraction model over a spherical-harmonic field.
///
/// The model owns its gravity field provider and the current quad catalog. The
/// catalog depends on the orbit through the resonance filter, so callers rebuild
/// it with [`update_quads`](Self::update_quads) whenever the mean semi-major
/// axis changes enough to alter which terms resonate.
#[derive(Debug, Clone)]
pub struct StelaTesseralAttraction<P: GravityFieldProvider> {
    provider: P,
    max_degree: usize,
    tesseral_order: i32,
    integration_step: f64,
    min_step_count: u32,
    quads: Vec<TesseralQuad>,
}

impl<P: GravityFieldProvider> StelaTesseralAttraction<P> {
    /// Build a model with an explicit catalog configuration.
    ///
    /// Arguments
    /// ---------
    /// * `provider`: spherical-harmonic gravity field
    /// * `max_degree`: truncation degree of the Kaula expansion
    /// * `tesseral_order`: bound on the eccentricity index, `|q| <= tesseral_order`
    /// * `integration_step`: mean integration step of the propagation, seconds
    /// * `min_step_count`: number of steps the period of a retained term must span
    pub fn new(
        provider: P,
        max_degree: usize,
        tesseral_order: i32,
        integration_step: f64,
        min_step_count: u32,
    ) -> Self {
        StelaTesseralAttraction {
            provider,
            max_degree,
            tesseral_order,
            integration_step,
            min_step_count,
            quads: Vec::new(),
        }
    }

    /// Build a model with the standard catalog configuration: the provider's full
    /// degree, `|q| <= 2`, one-day steps, five-step resonance threshold.
    pub fn with_defaults(provider: P) -> Self {
        let max_degree = provider.max_degree();
        Self::new(
            provider,
            max_degree,
            DEFAULT_TESSERAL_ORDER,
            DEFAULT_INTEGRATION_STEP,
            DEFAULT_MIN_STEP_COUNT,
        )
    }

    /// Gravity field backing the model.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Current quad catalog, in enumeration order.
    pub fn quads(&self) -> &[TesseralQuad] {
        &self.quads
    }

    /// Rebuild the quad catalog for the given mean orbit.
    ///
    /// Enumerates `n` in `2..=max_degree`, `m` in `1..=n`, `p` in
    /// `0..=min(max_degree/2, n)` and `q` in `-tesseral_order..=tesseral_order`,
    /// and retains a combination when the period of its angular argument,
    /// `2π / |(n - 2p + q)·n0 - m·θ̇|`, exceeds `min_step_count` integration
    /// steps. A stationary argument is always retained. The inclination
    /// function is undefined for `p > n`, so `p` never exceeds `n`.
    ///
    /// Fails with a configuration error when the requested truncation degree
    /// or a coefficient lookup exceeds what the field provides; the catalog is
    /// left empty in that case.
    pub fn update_quads(&mut self, orbit: &EquinoctialOrbitState) -> Result<(), TesseralError> {
        self.quads.clear();

        if self.max_degree > self.provider.max_degree() {
            return Err(TesseralError::UnsupportedFieldDegree {
                requested: self.max_degree,
                available: self.provider.max_degree(),
            });
        }

        let mean_motion = orbit.keplerian_mean_motion(self.provider.mu());
        let threshold = self.min_step_count as f64 * self.integration_step;

        let mut quads = Vec::new();
        for n in 2..=self.max_degree {
            for m in 1..=n {
                for p in 0..=(self.max_degree / 2).min(n) {
                    for q in -self.tesseral_order..=self.tesseral_order {
                        let j = n as i32 - 2 * p as i32 + q;
                        let rate = j as f64 * mean_motion - m as f64 * EARTH_ROTATION_RATE;
                        if rate == 0.0 || DPI / rate.abs() > threshold {
                            quads.push(TesseralQuad::new(&self.provider, n, m, p, q, orbit)?);
                        }
                    }
                }
            }
        }

        debug_assert!(quads
            .iter()
            .map(|quad| (quad.n(), quad.m(), quad.p(), quad.q()))
            .all_unique());

        self.quads = quads;
        Ok(())
    }

    /// Recenter the eccentricity window of one quad onto the current orbit.
    /// No-op while the eccentricity stays inside the quad's window.
    ///
    /// Panics if `index` is out of bounds of the catalog.
    pub fn refresh(
        &mut self,
        index: usize,
        orbit: &EquinoctialOrbitState,
    ) -> Result<(), TesseralError> {
        self.quads[index].update_eccentricity_interval(orbit)
    }

    /// Gradient of the averaged tesseral potential with respect to the
    /// equinoctial state, ordered `(a, ex, ey, ix, iy, λ)`.
    ///
    /// Every quad's eccentricity window is refreshed first, so the cached
    /// Taylor kernels are always evaluated inside their validity interval.
    /// An empty catalog yields the zero vector.
    pub fn compute_perturbation(
        &mut self,
        orbit: &EquinoctialOrbitState,
    ) -> Result<Vector6<f64>, TesseralError> {
        let mu = self.provider.mu();
        let equatorial_radius = self.provider.equatorial_radius();
        let a = orbit.semi_major_axis;
        let eccentricity = orbit.eccentricity();
        let node = orbit.ascending_node();
        let theta = sidereal_angle(orbit.reference_epoch);

        let mut gradient = Vector6::zeros();

        for index in 0..self.quads.len() {
            self.refresh(index, orbit)?;
            let quad = &self.quads[index];

            let f = compute_f(orbit, quad);
            let g = compute_eccentricity_function(orbit, quad);

            let j = quad.mean_anomaly_multiplier() as f64;
            let m = quad.m() as f64;
            let beta = m - j + quad.q() as f64;

            // Kaula argument ψ = j·λ + β·Ω - m·θ - q·ϖ, its periapsis part
            // assembled from the structure selectors cos/sin(qϖ)
            let psi0 = j * orbit.mean_longitude + beta * node - m * theta;
            let (sin_psi0, cos_psi0) = psi0.sin_cos();
            let cos_psi = cos_psi0 * g[0] + sin_psi0 * g[1];
            let sin_psi = sin_psi0 * g[0] - cos_psi0 * g[1];

            // Kaula S_nmpq: the coefficient roles swap for odd n - m
            let (fc, fs) = if (quad.n() - quad.m()) % 2 == 0 {
                (quad.fc(), quad.fs())
            } else {
                (-quad.fs(), quad.fc())
            };
            let harmonic = fc * cos_psi + fs * sin_psi;
            let harmonic_prime = -fc * sin_psi + fs * cos_psi;

            let kernel = quad.eccentricity_function_value(eccentricity);
            let kernel_derivative = quad.eccentricity_function_derivative(eccentricity);

            let scale = mu / a * (equatorial_radius / a).powi(quad.n() as i32);
            let term = scale * f[0] * kernel;

            let du_de = scale * f[0] * kernel_derivative * harmonic;
            let du_dpom = -quad.q() as f64 * term * harmonic_prime;
            let du_di = scale * f[1] * kernel * harmonic;
            let du_dnode = beta * term * harmonic_prime;

            gradient[0] -= (quad.n() as f64 + 1.0) / a * term * harmonic;
            gradient[1] += du_de * g[2] + du_dpom * g[4];
            gradient[2] += du_de * g[3] + du_dpom * g[5];
            gradient[3] += du_di * f[2] + du_dnode * f[4];
            gradient[4] += du_di * f[3] + du_dnode * f[5];
            gradient[5] += j * term * harmonic_prime;
        }

        Ok(gradient)
    }

    /// Short-period tesseral reconstruction. The model carries no short-period
    /// expansion; mean elements pass through unchanged, so the contribution is
    /// identically zero.
    pub fn compute_short_periods(&self, _orbit: &EquinoctialOrbitState) -> Vector6<f64> {
        Vector6::zeros()
    }

    /// State-transition contribution of the tesseral terms. Not part of the
    /// validated model scope; the contribution is identically zero.
    pub fn compute_partial_derivatives(&self, _orbit: &EquinoctialOrbitState) -> Matrix6<f64> {
        Matrix6::zeros()
    }
}
