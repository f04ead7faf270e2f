//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode between startup and the final
//! snapshot so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: homestead_core::config::ConfigError,
    },

    /// The game could not be constructed.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: homestead_core::GameError,
    },

    /// The frame runner refused to start.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: homestead_core::runner::RunnerError,
    },

    /// The final snapshot could not be serialized.
    #[error("snapshot serialization failed: {source}")]
    Json {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },

    /// The log filter was rejected.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
