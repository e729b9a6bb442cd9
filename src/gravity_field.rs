//! # Gravity field access
//!
//! The perturbation engine consumes spherical-harmonic coefficients through the
//! [`GravityFieldProvider`] capability interface: **unnormalized** coefficients
//! `C[n][m]`, `S[n][m]`, the gravitational parameter `mu` and the reference
//! equatorial radius `ae`. Format-specific readers (ICGEM, GRIM, ...) live outside
//! this crate; whatever adapter is used only needs to implement this trait.
//!
//! [`UnnormalizedGravityField`] is the in-memory implementation backed by
//! lower-triangular coefficient tables, used by tests and by callers that obtain
//! their coefficients elsewhere.

use crate::tesseral_errors::TesseralError;

/// Capability interface over a spherical-harmonic gravity field.
///
/// The tesseral engine requests **unnormalized** coefficients: it performs its own
/// internal scaling consistent with the Kaula expansion convention.
pub trait GravityFieldProvider {
    /// Maximum degree for which coefficients are available.
    fn max_degree(&self) -> usize;

    /// Maximum order for which coefficients are available.
    fn max_order(&self) -> usize;

    /// Central-body gravitational parameter, m³/s².
    fn mu(&self) -> f64;

    /// Reference equatorial radius, meters.
    fn equatorial_radius(&self) -> f64;

    /// Unnormalized cosine coefficient `C(n, m)`.
    ///
    /// Fails with a configuration error when the field does not carry the requested
    /// degree/order; the engine never truncates silently.
    fn c(&self, n: usize, m: usize) -> Result<f64, TesseralError>;

    /// Unnormalized sine coefficient `S(n, m)`.
    fn s(&self, n: usize, m: usize) -> Result<f64, TesseralError>;
}

/// In-memory gravity field holding unnormalized lower-triangular coefficient tables.
///
/// Row `n` of each table holds the orders `0..=n`, so `c_table[n][m]` is `C(n, m)`.
/// Row 0 corresponds to degree 0 (conventionally `C(0,0) = 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct UnnormalizedGravityField {
    mu: f64,
    equatorial_radius: f64,
    c_table: Vec<Vec<f64>>,
    s_table: Vec<Vec<f64>>,
}

impl UnnormalizedGravityField {
    /// Build a field from lower-triangular coefficient tables.
    ///
    /// Arguments
    /// ---------
    /// * `mu`: gravitational parameter, m³/s²
    /// * `equatorial_radius`: reference equatorial radius, meters
    /// * `c_table`, `s_table`: unnormalized coefficients, row `n` holding orders `0..=n`
    ///
    /// Return
    /// ------
    /// * the field, or [`TesseralError::MalformedCoefficientTable`] if a row does not
    ///   hold exactly `n + 1` entries or the two tables differ in shape.
    pub fn new(
        mu: f64,
        equatorial_radius: f64,
        c_table: Vec<Vec<f64>>,
        s_table: Vec<Vec<f64>>,
    ) -> Result<Self, TesseralError> {
        if c_table.len() != s_table.len() {
            return Err(TesseralError::MalformedCoefficientTable(c_table.len()));
        }
        for (n, (c_row, s_row)) in c_table.iter().zip(s_table.iter()).enumerate() {
            if c_row.len() != n + 1 || s_row.len() != n + 1 {
                return Err(TesseralError::MalformedCoefficientTable(n));
            }
        }

        Ok(UnnormalizedGravityField {
            mu,
            equatorial_radius,
            c_table,
            s_table,
        })
    }

    fn lookup(&self, table: &[Vec<f64>], n: usize, m: usize) -> Result<f64, TesseralError> {
        let row = table.get(n).ok_or(TesseralError::UnsupportedFieldDegree {
            requested: n,
            available: self.max_degree(),
        })?;
        row.get(m)
            .copied()
            .ok_or(TesseralError::UnsupportedFieldOrder {
                requested: m,
                available: n,
            })
    }
}

impl GravityFieldProvider for UnnormalizedGravityField {
    fn max_degree(&self) -> usize {
        self.c_table.len().saturating_sub(1)
    }

    fn max_order(&self) -> usize {
        self.max_degree()
    }

    fn mu(&self) -> f64 {
        self.mu
    }

    fn equatorial_radius(&self) -> f64 {
        self.equatorial_radius
    }

    fn c(&self, n: usize, m: usize) -> Result<f64, TesseralError> {
        self.lookup(&self.c_table, n, m)
    }

    fn s(&self, n: usize, m: usize) -> Result<f64, TesseralError> {
        self.lookup(&self.s_table, n, m)
    }
}
