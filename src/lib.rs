#![forbid(unsafe_code)]

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod filter;
pub mod formats;
pub mod layout;
pub mod logging;
pub mod rating;
pub mod report;
pub mod scene;
pub mod selection;
