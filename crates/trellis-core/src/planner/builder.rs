//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{Result, TrellisError},
};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
}

impl PlannerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/trellis/trellis.db` or `~/.local/share/trellis/trellis.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured planner, creating the database file and schema
    /// if needed.
    ///
    /// # Errors
    ///
    /// * `TrellisError::XdgDirectory` - No default data directory could be
    ///   determined
    /// * `TrellisError::FileSystem` - The database directory cannot be created
    /// * `TrellisError::Database` - Database initialization fails
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TrellisError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening task database at {}", db_path.display());
        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(drop))
            .await
            .map_err(TrellisError::join)??;

        Ok(Planner::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("trellis")
            .place_data_file("trellis.db")
            .map_err(|e| TrellisError::XdgDirectory(e.to_string()))
    }
}
