//! # stockroom-cli: Interactive Inventory Shell
//!
//! Menu-driven front end over `stockroom-core` and `stockroom-store`.
//!
//! ## Startup Sequence
//! 1. Parse flags (`--config`, `--file`)
//! 2. Initialize tracing (stderr, so the menu on stdout stays clean)
//! 3. Load configuration
//! 4. Load the inventory file if configured and present
//! 5. Run the menu loop over stdin/stdout

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod menu;
pub mod prompt;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{AppConfig, ConfigError};
pub use menu::{Action, Shell};
pub use prompt::{Prompter, ShellError};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every stock change
/// - default - warnings, plus save/load outcomes from the stockroom crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,stockroom=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
