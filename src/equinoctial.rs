use serde::{Deserialize, Serialize};

use crate::{
    constants::{Meter, Radian, CIRCULAR_ECCENTRICITY_EPS, EQUATORIAL_INCLINATION_EPS, MJD},
    kepler::principal_angle,
};

/// Mean equinoctial orbital elements, the singularity-free state of the
/// semi-analytical propagation.
///
/// Units:
/// - a: meters (semi-major axis)
/// - ex, ey: dimensionless (eccentricity vector, `ex = e·cos(ω + Ω)`, `ey = e·sin(ω + Ω)`)
/// - ix, iy: dimensionless (inclination vector, `ix = sin(i/2)·cos(Ω)`, `iy = sin(i/2)·sin(Ω)`)
/// - mean_longitude: radians (`λ = Ω + ω + M`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquinoctialOrbitState {
    pub reference_epoch: MJD, // Reference epoch (MJD, TAI)
    pub semi_major_axis: Meter,
    pub ex: f64,
    pub ey: f64,
    pub ix: f64,
    pub iy: f64,
    pub mean_longitude: Radian,
}

impl EquinoctialOrbitState {
    /// Build the equinoctial state from classical Keplerian elements.
    ///
    /// Arguments
    /// ---------
    /// * `reference_epoch`: epoch of the elements (MJD, TAI)
    /// * `semi_major_axis`: meters
    /// * `eccentricity`: unitless, `0 <= e < 1`
    /// * `inclination`: radians
    /// * `ascending_node`: longitude of the ascending node Ω, radians
    /// * `periapsis_argument`: argument of perigee ω, radians
    /// * `mean_anomaly`: radians
    pub fn from_keplerian(
        reference_epoch: MJD,
        semi_major_axis: Meter,
        eccentricity: f64,
        inclination: Radian,
        ascending_node: Radian,
        periapsis_argument: Radian,
        mean_anomaly: Radian,
    ) -> Self {
        let periapsis_longitude = periapsis_argument + ascending_node;
        let sin_half_incl = (inclination / 2.0).sin();

        EquinoctialOrbitState {
            reference_epoch,
            semi_major_axis,
            ex: eccentricity * periapsis_longitude.cos(),
            ey: eccentricity * periapsis_longitude.sin(),
            ix: sin_half_incl * ascending_node.cos(),
            iy: sin_half_incl * ascending_node.sin(),
            mean_longitude: principal_angle(mean_anomaly + periapsis_longitude),
        }
    }

    /// Orbital eccentricity `e = sqrt(ex² + ey²)`.
    pub fn eccentricity(&self) -> f64 {
        (self.ex.powi(2) + self.ey.powi(2)).sqrt()
    }

    /// Longitude of periapsis `ϖ = ω + Ω`, zero for a circular orbit.
    pub fn periapsis_longitude(&self) -> Radian {
        if self.eccentricity() < CIRCULAR_ECCENTRICITY_EPS {
            0.0
        } else {
            self.ey.atan2(self.ex)
        }
    }

    /// Norm of the inclination vector, `sin(i/2)`.
    pub fn sin_half_inclination(&self) -> f64 {
        (self.ix.powi(2) + self.iy.powi(2)).sqrt()
    }

    /// Orbital inclination in radians.
    pub fn inclination(&self) -> Radian {
        2.0 * self.sin_half_inclination().asin()
    }

    /// Longitude of the ascending node Ω, zero for an equatorial orbit.
    pub fn ascending_node(&self) -> Radian {
        if self.sin_half_inclination() < EQUATORIAL_INCLINATION_EPS {
            0.0
        } else {
            self.iy.atan2(self.ix)
        }
    }

    /// Keplerian mean motion `n0 = sqrt(mu / a³)` in radians per second.
    pub fn keplerian_mean_motion(&self, mu: f64) -> f64 {
        (mu / self.semi_major_axis.powi(3)).sqrt()
    }
}
