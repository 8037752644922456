//! Coefficient penalties.

mod scad;

pub use scad::ScadPenalty;
