//! Bench Picker - stratified selection of benchmark positions.
//!
//! Positions are read as FEN lines, grouped by how many pieces are on the
//! board, and sampled so every piece count is represented as evenly as the
//! requested sample size allows.
//!
//! # Modules
//!
//! - [`candidate`] - Validating input lines into candidates grouped by piece count
//! - [`sampler`] - Quota allocation and the stratified draw
//! - [`input`] - Where input lines come from
//! - [`config`] - Optional `bench-picker.toml` settings

pub mod candidate;
pub mod config;
pub mod error;
pub mod input;
pub mod sampler;

pub use candidate::{Candidate, CandidatePool};
pub use config::{ConfigError, PickerConfig};
pub use error::PickError;
pub use input::InputSource;
pub use sampler::{allocate_quotas, select, PickReport, Selection, DEFAULT_TARGET};
