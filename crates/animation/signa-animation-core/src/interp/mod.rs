//! Interpolation helpers.
//!
//! Component-wise lerp, quaternion NLERP with shortest-arc sign correction,
//! and cubic-bezier timing.

pub mod functions;

pub use functions::{bezier_value, linear_value, nlerp_quat, step_value};
