pub mod constants;
pub mod eccentricity_function;
pub mod equinoctial;
pub mod gravity_field;
pub mod inclination_function;
mod kepler;
pub mod tesseral_attraction;
pub mod tesseral_errors;
pub mod tesseral_quad;
pub mod time;
