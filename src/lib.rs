//! Green Light Optimal Speed Advisory.
//!
//! The core is two pure functions: [`geo::distance`] turns a vehicle and a
//! junction position into meters, and [`advisory::advise`] turns that distance
//! plus a signal prediction into a recommended speed and driver message.
//! [`routes`] wraps them in an HTTP service backed by a junction registry and
//! an external phase predictor.

pub mod advisory;
pub mod config;
pub mod error;
pub mod geo;
pub mod junctions;
pub mod predictor;
pub mod routes;
pub mod types;

pub use advisory::{advise, Advisory, AdvisoryKind, Phase, SignalPrediction};
pub use config::{AdvisoryConfig, ServiceConfig};
pub use error::{Error, Result};
pub use geo::{distance, GeoPoint};
