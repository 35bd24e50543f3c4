//! `gridcmp` command-line building blocks: file-type routing, comparison
//! modes and console presentation. The binary in `main.rs` wires these to
//! argument parsing.

pub mod exit_codes;
pub mod file_type;
pub mod modes;
pub mod render;
