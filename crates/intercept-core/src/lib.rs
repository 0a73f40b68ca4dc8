//! Core types and definitions for the interceptor engagement simulator.
//!
//! This crate defines the vocabulary shared by the simulation crate:
//! planar geometry, engagement enums, tuning constants, and the immutable
//! snapshot types recorded each tick. It has no simulation logic and no
//! randomness.

pub mod constants;
pub mod enums;
pub mod state;
pub mod types;

pub use glam::DVec2;
