//! Shared configuration and error types for the weighted selector workspace.

pub mod config;
pub mod error;

pub use config::{
    AppConfig, EntryConfig, SelectorConfig, SimulationConfig, DEFAULT_SIZE_THRESHOLD,
};
pub use error::{WrrError, WrrResult};
