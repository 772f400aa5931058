//! Offsite backups through the duplicity CLI against B2 object storage.
//!
//! `backup` runs an incremental backup and then a verify pass, strictly in
//! that order; a failing backup aborts the cycle before verify runs.
//! `prune` is a separate operation and is never invoked implicitly.

use tracing::info;

use crate::config::BackupSettings;
use crate::error::Result;
use crate::runner::CommandRunner;

const REDACTED: &str = "***";

/// One configured backup target: a source directory and a B2 bucket.
#[derive(Debug, Clone)]
pub struct BackupJob {
    settings: BackupSettings,
}

impl BackupJob {
    pub fn new(settings: BackupSettings) -> Self {
        Self { settings }
    }

    /// The `b2://keyId:applicationKey@bucket` target URI.
    ///
    /// The application key is percent-encoded: it may contain `/` and `+`,
    /// which are structurally significant in a URI.
    fn storage_uri(&self) -> String {
        format!(
            "b2://{}:{}@{}",
            self.settings.key_id,
            urlencoding::encode(&self.settings.application_key),
            self.settings.bucket
        )
    }

    fn backup_command(&self) -> String {
        format!(
            "duplicity --full-if-older-than {}D --verbosity {} {} {}",
            self.settings.full_older_than_days,
            self.settings.verbosity,
            self.settings.source_dir,
            self.storage_uri()
        )
    }

    fn verify_command(&self) -> String {
        format!(
            "duplicity verify --verbosity {} {} {}",
            self.settings.verbosity,
            self.storage_uri(),
            self.settings.source_dir
        )
    }

    fn prune_command(&self) -> String {
        format!(
            "duplicity remove-older-than {}D --force {}",
            self.settings.retention_days,
            self.storage_uri()
        )
    }

    /// Redact the encoded application key from a composed command line.
    fn redact(&self, line: &str) -> String {
        let encoded = urlencoding::encode(&self.settings.application_key);
        line.replace(encoded.as_ref(), REDACTED)
    }

    /// Run the backup, then verify it. Verify never runs if backup fails.
    pub async fn backup(&self, runner: &dyn CommandRunner) -> Result<()> {
        let backup = self.backup_command();
        info!(command = %self.redact(&backup), "starting backup");
        runner.run(&backup).await?;

        let verify = self.verify_command();
        info!(command = %self.redact(&verify), "verifying backup");
        runner.run(&verify).await?;

        info!(
            source = %self.settings.source_dir,
            bucket = %self.settings.bucket,
            "backup cycle complete"
        );
        Ok(())
    }

    /// Delete backups older than the retention window. Explicit only.
    pub async fn prune(&self, runner: &dyn CommandRunner) -> Result<()> {
        let prune = self.prune_command();
        info!(command = %self.redact(&prune), "pruning old backups");
        runner.run(&prune).await?;
        Ok(())
    }

    /// The backup cycle's command lines, secrets redacted, without running.
    pub fn dry_run_backup(&self) -> Vec<String> {
        vec![
            self.redact(&self.backup_command()),
            self.redact(&self.verify_command()),
        ]
    }

    /// The prune command line, secret redacted, without running.
    pub fn dry_run_prune(&self) -> Vec<String> {
        vec![self.redact(&self.prune_command())]
    }
}
