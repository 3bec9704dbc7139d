//! Fitting engine: computes the final attributes of a fitted ship from a static rules
//! catalog.
//!
//! The pipeline runs four passes over a fresh ship graph per calculation:
//! [`dogma::assembly`] builds entities and seeds base values, [`dogma::routing`] turns
//! catalog effects into modifier edges, [`dogma::resolution`] evaluates every attribute with
//! stacking penalties, and [`dogma::capacitor`] simulates capacitor depletion.
//! [`dogma::calculate`] runs all of them; [`parallel::calculate_batch`] runs many fits on a
//! rayon pool.

pub mod config;
pub mod constants;
pub mod data;
pub mod dogma;
pub mod error;
pub mod parallel;

pub use config::EngineConfig;
pub use data::{Catalog, Fit, MemoryCatalog, Skills};
pub use dogma::{calculate, CalculationRequest, Entity, Ship};
pub use error::{DogmaError, Result};
