//! Command implementations for the lumen CLI.

mod init;
mod process;
mod run;

// Re-export all command functions
pub use init::cmd_init;
pub use process::cmd_process;
pub use run::cmd_run;
