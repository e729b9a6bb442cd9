//! # Constants and type definitions
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `tesseral` library.
//!
//! ## Overview
//!
//! - Geophysical constants of the rotating Earth
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate
//!
//! These definitions are used by the equinoctial state, the tesseral quad cache and the
//! perturbation engine.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// MJD epoch of 1950-01-01 00:00:00, the reference origin of mean-element ephemerides
pub const T1950: f64 = 33282.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Earth rotation rate in radians per second (IERS)
pub const EARTH_ROTATION_RATE: f64 = 7.292115146706979e-5;

/// Eccentricity below which an orbit is treated as circular in angular accessors
pub const CIRCULAR_ECCENTRICITY_EPS: f64 = 1e-10;

/// Inclination-vector norm below which an orbit is treated as equatorial
pub const EQUATORIAL_INCLINATION_EPS: f64 = 1e-10;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
