//! Simulation core for a top-down arcade shooter: five stages of five
//! levels, energy-shard quotas, weapon drops and bosses.
//!
//! The core is front-end agnostic. [`compute::tick`] advances a
//! [`entities::GameState`] by one frame; rendering goes through
//! [`render::Surface`] and sound through [`events::AudioSink`].

pub mod catalog;
pub mod combat;
pub mod compute;
pub mod config;
pub mod delay;
pub mod entities;
pub mod error;
pub mod events;
pub mod hud;
pub mod input;
pub mod motion;
pub mod progression;
pub mod render;
pub mod spawn;
pub mod weapon;

pub use error::{GameError, Result};
