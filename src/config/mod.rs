//! Configuration loading and management for the benefit engine.
//!
//! This module loads host defaults and the per-state tax table from YAML files,
//! either from a directory or from the copies compiled into the crate.
//!
//! # Example
//!
//! ```no_run
//! use benefit_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("States configured: {}", config.state_taxes().states().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineSettings, StateTaxConfig, StateTaxEntry, StateTaxFile, StateTaxMethod, StateTaxTable,
    TaxBracket, TaxMethod, normalize_state_code,
};
