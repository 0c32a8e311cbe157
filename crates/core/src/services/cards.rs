//! Card image lookup.

use std::path::{Path, PathBuf};

use feedcat_common::{AppError, AppResult};
use tracing::{info, warn};

use super::game_progress::Stage;

/// Card images stored as `<dir>/<stage>.png`.
#[derive(Debug, Clone)]
pub struct CardAssets {
    dir: PathBuf,
}

impl CardAssets {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the card directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Config(format!("cards dir {}: {e}", self.dir.display())))?;
        info!(dir = %self.dir.display(), "Card directory ready");
        Ok(())
    }

    /// Where the image for `stage` is expected.
    #[must_use]
    pub fn path_for(&self, stage: Stage) -> PathBuf {
        self.dir.join(format!("{stage}.png"))
    }

    /// The image for `stage`, if it is present on disk.
    pub async fn find(&self, stage: Stage) -> Option<PathBuf> {
        let path = self.path_for(stage);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => Some(path),
            Ok(false) => {
                warn!(stage = stage.get(), path = %path.display(), "Card image missing");
                None
            }
            Err(e) => {
                warn!(stage = stage.get(), path = %path.display(), error = %e, "Card image unreadable");
                None
            }
        }
    }
}
