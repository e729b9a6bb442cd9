//! # Kaula inclination function
//!
//! Evaluation of the Kaula inclination function `F(n, m, p)` from its closed
//! triple-sum form (associated-Legendre derived), together with its inclination
//! derivative and the chain-rule terms mapping `(i, Ω)` onto the equinoctial
//! inclination vector `(ix, iy)`. The six values are recomputed per quad per
//! evaluation; they depend continuously on the orbit state, unlike the staged
//! eccentricity Taylor cache.

use crate::{
    constants::EQUATORIAL_INCLINATION_EPS, equinoctial::EquinoctialOrbitState,
    tesseral_quad::TesseralQuad,
};

fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0, |acc, k| acc * k as f64)
}

fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        0.0
    } else {
        factorial(n) / (factorial(k) * factorial(n - k))
    }
}

/// Kaula inclination function `F(n, m, p)` and its derivative `dF/di`.
///
/// Closed form (Kaula 1966, eq. 3.62): a sum of monomials
/// `A · sin^(n-m-2t)(i) · cos^s(i)`, accumulated together with the termwise
/// analytical derivative. The amplitudes use `f64` factorials up to `(2n)!`,
/// which limits the usable degree to about 80; semi-analytical truncation
/// degrees stay far below that.
///
/// Arguments
/// ---------
/// * `n`, `m`, `p`: harmonic indices, `1 <= m <= n`, `0 <= p <= n`
/// * `inclination`: orbital inclination in radians
///
/// Return
/// ------
/// * `(F, dF/di)`
pub fn kaula_inclination_function(n: usize, m: usize, p: usize, inclination: f64) -> (f64, f64) {
    let sin_i = inclination.sin();
    let cos_i = inclination.cos();
    let k = (n - m) / 2;

    let mut value = 0.0;
    let mut derivative = 0.0;

    for t in 0..=p.min(k) {
        let sin_power = n - m - 2 * t;
        let coef_t = factorial(2 * n - 2 * t)
            / (factorial(t)
                * factorial(n - t)
                * factorial(sin_power)
                * 2f64.powi((2 * n - 2 * t) as i32));

        for s in 0..=m {
            // Inner alternating sum over the split index c
            let c_low = (p - t).saturating_sub(m - s);
            let c_high = (p - t).min(sin_power + s);
            if c_low > c_high {
                continue;
            }

            let mut inner = 0.0;
            for c in c_low..=c_high {
                let sign = if (c as i64 - k as i64).rem_euclid(2) == 1 {
                    -1.0
                } else {
                    1.0
                };
                inner += sign * binomial(sin_power + s, c) * binomial(m - s, p - t - c);
            }

            let amplitude = coef_t * binomial(m, s) * inner;
            value += amplitude * sin_i.powi(sin_power as i32) * cos_i.powi(s as i32);

            if sin_power > 0 {
                derivative += amplitude
                    * sin_power as f64
                    * sin_i.powi(sin_power as i32 - 1)
                    * cos_i.powi(s as i32 + 1);
            }
            if s > 0 {
                derivative -= amplitude
                    * s as f64
                    * sin_i.powi(sin_power as i32 + 1)
                    * cos_i.powi(s as i32 - 1);
            }
        }
    }

    (value, derivative)
}

/// Inclination-function vector of one quad: `[F, dF/di, di/dix, di/diy, dΩ/dix, dΩ/diy]`.
///
/// Pure function of the quad indices and the inclination-vector components of the
/// equinoctial state. The last four entries are the chain-rule terms the engine uses
/// to assemble the `(ix, iy)` partials of the averaged potential in the same pass.
///
/// For an equatorial orbit the inclination-vector direction is undefined; the
/// chain-rule entries are clamped to the `Ω = 0` limit `[.., 2, 0, 0, 0]`.
pub fn compute_f(orbit: &EquinoctialOrbitState, quad: &TesseralQuad) -> [f64; 6] {
    let inclination = orbit.inclination();
    let (value, derivative) =
        kaula_inclination_function(quad.n(), quad.m(), quad.p(), inclination);

    let sin_half = orbit.sin_half_inclination();
    if sin_half < EQUATORIAL_INCLINATION_EPS {
        return [value, derivative, 2.0, 0.0, 0.0, 0.0];
    }

    let cos_half = (1.0 - sin_half.powi(2)).sqrt();
    let di_dix = 2.0 * orbit.ix / (sin_half * cos_half);
    let di_diy = 2.0 * orbit.iy / (sin_half * cos_half);
    let dnode_dix = -orbit.iy / sin_half.powi(2);
    let dnode_diy = orbit.ix / sin_half.powi(2);

    [value, derivative, di_dix, di_diy, dnode_dix, dnode_diy]
}
