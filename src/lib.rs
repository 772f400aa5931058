//! # craftops
//!
//! Game-server operations: remote console commands and offsite B2 backups.
//!
//! This crate glues three things together: running a local shell command
//! with captured output, delivering one console command to a game server
//! (over an RCON session or a control-panel HTTP API), and driving
//! duplicity backup/verify/prune cycles against B2 object storage.
//!
//! One operation per invocation; every suspension point is an explicit
//! `.await` in declared order, and the first failure aborts the run.
//!
//! ## Quick Start
//!
//! ```no_run
//! use craftops::{BackupJob, CommandRunner, ShellRunner};
//!
//! # async fn example() -> craftops::Result<()> {
//! // Run a local command
//! let output = ShellRunner.run("ls -la ./").await?;
//! println!("{}", output.stdout);
//!
//! // Back up, then verify
//! let section = craftops::config::BackupSection {
//!     key_id: Some("0012ab".into()),
//!     application_key: Some("secret/key".into()),
//!     bucket: Some("mc-backups".into()),
//!     source_dir: Some("/srv/minecraft/world".into()),
//!     ..Default::default()
//! };
//! let job = BackupJob::new(section.resolve()?);
//! job.backup(&ShellRunner).await?;
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod remote;
pub mod runner;

pub use backup::BackupJob;
pub use config::{Config, TransportKind};
pub use error::{CraftopsError, Result};
pub use remote::{PanelConsole, RconConsole, RemoteConsole};
pub use runner::{CommandOutput, CommandRunner, ShellRunner};
