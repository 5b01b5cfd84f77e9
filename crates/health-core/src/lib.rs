//! Core types and trait definitions for the community health tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend (`health-store-sqlite`) and geocoding adapters
//! (`health-geocode`) implement the traits defined here; the HTTP layers
//! (`health-api`, `health-web`) drive the intake and dashboard operations.

#![allow(async_fn_in_trait)]

pub mod dashboard;
pub mod error;
pub mod facility;
pub mod geocode;
pub mod intake;
pub mod issue;
pub mod store;

pub use error::{BoxError, Error, Result};

#[cfg(test)]
mod testing;
