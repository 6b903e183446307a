//! crdctl - create and read custom resources through dynamic, raw and typed clients

pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod resources;
