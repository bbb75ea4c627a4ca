//! Prediction server: exposes the prediction action over HTTP

pub mod api;
pub mod config;
