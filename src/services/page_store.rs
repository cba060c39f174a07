use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::WikiError;

const PAGE_EXTENSION: &str = "txt";

/// Flat-file storage, one `<title>.txt` per page
#[derive(Clone, Debug)]
pub struct PageStore {
    data_dir: PathBuf,
}

impl PageStore {
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Creating PageStore with data directory: {:?}", data_dir);
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Titles are alphanumeric by the time they get here, so no escaping is done.
    pub fn page_path(&self, title: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", title, PAGE_EXTENSION))
    }

    /// Create the data directory (0755) if it is missing
    pub async fn ensure_dir(&self) -> Result<(), WikiError> {
        if fs::try_exists(&self.data_dir).await? {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        builder.mode(0o755);
        builder.create(&self.data_dir).await.map_err(|e| {
            error!("Failed to create data directory {:?}: {}", self.data_dir, e);
            WikiError::Io(e)
        })?;

        info!("Created data directory {:?}", self.data_dir);
        Ok(())
    }

    /// Read the full body of a page
    pub async fn load(&self, title: &str) -> Result<Vec<u8>, WikiError> {
        let path = self.page_path(title);
        debug!("Loading page '{}' from {:?}", title, path);

        match fs::read(&path).await {
            Ok(body) => {
                debug!("Loaded page '{}', {} bytes", title, body.len());
                Ok(body)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(WikiError::NotFound),
            Err(e) => Err(WikiError::Io(e)),
        }
    }

    /// Create or fully overwrite a page. New files are owner read/write only.
    pub async fn save(&self, title: &str, body: &[u8]) -> Result<(), WikiError> {
        let path = self.page_path(title);

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let write = async {
            let mut file = options.open(&path).await?;
            file.write_all(body).await?;
            file.flush().await
        };
        write.await.map_err(|e| {
            error!("Failed to write page {:?}: {}", path, e);
            WikiError::Io(e)
        })?;

        info!("Saved page '{}', {} bytes", title, body.len());
        Ok(())
    }
}
