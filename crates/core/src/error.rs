use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum PowerError {
    #[error("config error: {0}")]
    Config(String),

    #[error("cannot spawn helper '{path}': {source}")]
    Spawn {
        path: String,
        source: std::io::Error,
    },

    #[error("helper '{path}' exited with status {code}")]
    HelperExit {
        path: String,
        code: i32,
        /// Whatever the helper printed before dying — surfaced to the
        /// operator as diagnostic text, never treated as a reading.
        diagnostic: String,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PowerError {
    /// `true` for spawn-level failures. These are fatal on the very first
    /// poll cycle and skip-and-retry on every later one.
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }
}

/// Failure modes of the helper output parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The `battery=` field is missing, has no digits after the `=`, or the
    /// digits run into an unexpected terminator character.
    #[error("malformed or missing battery= field in helper output")]
    MalformedBatteryField,
}

pub type Result<T, E = PowerError> = std::result::Result<T, E>;
