//! Bank marketing campaign explorer: load the campaign table once, filter it
//! by age and job, and compare outcome shares of the subset with the whole.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
