//! Static file server for generated charts.

pub mod app;
