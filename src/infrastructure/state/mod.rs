//! State persistence adapters

mod json_file;

pub use json_file::JsonStateStore;
