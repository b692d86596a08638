//! Configuration module for querydeck.
//!
//! Handles named connection targets, worker, builder and logging settings.

mod settings;

pub use settings::{
    expand_env_vars, BuilderSettings, ConnectionSettings, LoggingSettings, Settings,
    SettingsError, WorkerSettings,
};
