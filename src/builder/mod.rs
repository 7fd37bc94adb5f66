//! Native build stage.
//!
//! Turns a generated project descriptor into build output with
//! `cbuildgen`, CMake and Ninja.

pub mod cmake;

pub use cmake::CprjBuilder;
