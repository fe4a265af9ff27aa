//! Output encoders.
pub mod jpeg;
