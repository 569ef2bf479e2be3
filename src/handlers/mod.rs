//! HTTP handlers

pub mod health;
pub mod model;
pub mod recommendations;
pub mod sensors;
pub mod dataset;
