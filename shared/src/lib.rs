pub mod types;
pub mod config;
pub mod error;
pub mod email;
pub mod directory;
pub mod signup_gate;
pub mod classifier;
pub mod claims;

use tracing_subscriber::EnvFilter;

pub use classifier::{ConfirmationClassifier, ConfirmationOutcome};
pub use config::TriggerConfig;
pub use directory::{CognitoDirectory, Directory};
pub use error::{DirectoryError, SignupError};
pub use signup_gate::SignupGate;

/// Install the log subscriber shared by every trigger binary.
///
/// Lambda stamps each log line itself, so timestamps and targets are left out.
/// Verbosity follows `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
