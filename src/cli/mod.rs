// src/cli/mod.rs
//
// Command-line interface module

mod output;

pub use output::{format_json, format_json_batch, format_report, format_summary};
