use hifitime::Epoch;

use crate::constants::{MJD, DPI, SECONDS_PER_DAY, T1950, T2000};

/// Convert a [`hifitime::Epoch`] into a Modified Julian Date in the TAI time scale.
///
/// Argument
/// --------
/// * `epoch`: the date to convert
///
/// Return
/// ------
/// * the date as a float MJD (TAI)
pub fn mjd_tai(epoch: &Epoch) -> MJD {
    epoch.to_mjd_tai_days()
}

/// Convert an offset in seconds from the 1950-01-01 00:00:00 reference epoch into an MJD (TAI).
///
/// Mean-element ephemerides are conventionally dated from the 1950 origin; this helper maps
/// that convention onto the internal MJD representation.
///
/// Argument
/// --------
/// * `seconds`: elapsed seconds since 1950-01-01T00:00:00 TAI
///
/// Return
/// ------
/// * the date as a float MJD (TAI)
pub fn mjd_from_seconds_since_1950(seconds: f64) -> MJD {
    T1950 + seconds / SECONDS_PER_DAY
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date.
///
/// This function implements the IAU 1982/2000 polynomial formula
/// for the mean sidereal time at 0h, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// The semi-analytical engine uses this angle as the Earth rotation angle of the
/// tesseral argument; time-scale refinements (UT1 corrections, EOP) are the
/// responsibility of the caller and are not applied here.
///
/// # Arguments
/// * `tjm` - Modified Julian Date
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # References
/// * IAU 1982, IERS Conventions 1996/2000.
/// * Explanatory Supplement to the Astronomical Almanac (1992).
pub fn sidereal_angle(tjm: MJD) -> f64 {
    // Polynomial coefficients for GMST at 0h (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    // Extract the integer MJD (0h) and compute centuries since J2000.0
    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // GMST at 0h using the polynomial expression, converted from seconds to radians
    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / 86400.0;

    // Contribution from the fraction of the day, scaled by the sidereal/solar day ratio
    let h = tjm.fract() * DPI;
    let mut gmst = gmst0 + h * RAP;

    // Normalize to [0, 2π)
    let mut i: i64 = (gmst / DPI).floor() as i64;
    if gmst < 0.0 {
        i -= 1;
    }
    gmst -= i as f64 * DPI;

    gmst
}

#[cfg(test)]
mod time_test {
    use super::*;

    #[test]
    fn test_sidereal_angle() {
        let tut = 57028.478514610404;
        assert_eq!(sidereal_angle(tut), 4.851925725092499);

        assert_eq!(sidereal_angle(T2000), 4.894961212789145);
    }

    #[test]
    fn test_mjd_from_seconds_since_1950() {
        assert_eq!(mjd_from_seconds_since_1950(0.0), T1950);
        assert_eq!(mjd_from_seconds_since_1950(86400.0), T1950 + 1.0);
        assert_eq!(
            mjd_from_seconds_since_1950(17396.0 * 86400.0 + 35.0),
            33282.0 + 17396.0 + 35.0 / 86400.0
        );
    }

    #[test]
    fn test_mjd_tai() {
        let epoch = Epoch::from_mjd_tai(T1950);
        assert_eq!(mjd_tai(&epoch), T1950);
    }
}
