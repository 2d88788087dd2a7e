use anyhow::Context;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Sqlite, pool::PoolConnection};

use std::path::{Path, PathBuf};

/// Owns the SQLite pool for one workspace file. The file is created on
/// first open; the schema is applied through embedded migrations.
pub(super) struct WorkspaceState {
    workspace_file: PathBuf,
    pool: SqlitePool,
}

impl std::fmt::Debug for WorkspaceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceState")
            .field("workspace_file", &self.workspace_file)
            .finish()
    }
}

impl WorkspaceState {
    pub(super) async fn new<P: AsRef<Path>>(workspace_file: P) -> anyhow::Result<Self> {
        let workspace_file = workspace_file.as_ref().to_path_buf();

        if let Some(parent) = workspace_file.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            anyhow::bail!("Workspace file parent does not exist: {:?}", workspace_file);
        }

        let connect_opts = SqliteConnectOptions::new()
            .filename(&workspace_file)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_opts)
            .await
            .with_context(|| format!("Failed to open workspace {:?}", workspace_file))?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self {
            workspace_file,
            pool,
        })
    }

    pub(super) async fn conn(&self) -> anyhow::Result<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }
}
