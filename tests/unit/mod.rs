//! Unit tests module


mod output_test;
mod registry_test;
