//! Doom-style fire simulation
//!
//! Seed the bottom row of a [`FireGrid`], then let [`PropagationEngine`]
//! carry the heat upward one row per tick. [`AnimationLoop`] drives a
//! [`FireEffect`] on a background thread and publishes [`FireFrame`]s.

pub mod animation;
pub mod effect;
pub mod engine;
pub mod grid;
pub mod seeder;

pub use animation::{AnimationHandle, AnimationLoop};
pub use effect::{DefaultDecay, FireEffect, FireFrame};
pub use engine::{DecaySource, PropagationEngine, RandomDecay};
pub use grid::FireGrid;
