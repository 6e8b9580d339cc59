//! Doom fire engine
//!
//! The simulation core lives in [`fire`]; [`config`] and [`settings`] describe
//! how a run is parameterized. Rendering is left to the caller, who receives a
//! [`FireFrame`] of palette indices after every tick.

pub mod config;
pub mod error;
pub mod fire;
pub mod settings;

pub use config::{DecayProfile, FireConfig, Viewport, WindDirection};
pub use error::{FireError, Result};
pub use fire::{
    AnimationHandle, AnimationLoop, DecaySource, DefaultDecay, FireEffect, FireFrame, FireGrid,
    PropagationEngine, RandomDecay,
};
