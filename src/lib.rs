// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds argument parsing and terminal setup.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod time_series;
pub mod ui;
pub mod vocabulary;
pub mod word_source;

pub use engine::{Engine, SessionHandle};
pub use error::{AppError, ConfigIssue, SessionError};
pub use session::{FinalReport, Session, SessionConfig};
pub use vocabulary::Vocabulary;
