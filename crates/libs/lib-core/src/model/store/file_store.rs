//! # JSON-Lines File Store
//!
//! Appends one JSON object per line to a local file. Writes hold the write half
//! of an `RwLock` and are fsynced before `append` returns; reads hold the read
//! half so a listing never observes a half-written line.
//!
//! A record is committed once its terminating newline is on disk. A final line
//! without one is a torn write from an interrupted process: reads skip it whether
//! or not it parses, and the next append truncates it. A failed append rolls the
//! file back to its previous length. Any other unparsable line is reported as
//! [`StoreError::Corrupt`].

use super::{newest_first, StoreError, SubmissionStore};
use crate::model::page::{slice_for, Page, PageRequest};
use crate::model::submission::{NewSubmission, Submission};
use async_trait::async_trait;
use lib_utils::now_utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

pub struct FileSubmissionStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileSubmissionStore {
    /// Open (or prepare to create) the store file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
                info!("[STORE] Created store directory: {:?}", parent);
            }
        }

        let store = Self {
            path,
            lock: RwLock::new(()),
        };

        // Fail at startup rather than on the first request if the file is unreadable.
        let existing = store.read_all().await?;
        info!(
            "[STORE] File store at {:?} holds {} submission(s)",
            store.path,
            existing.len()
        );

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Submission>, StoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        // Only newline-terminated lines are committed.
        let committed = match contents.rfind('\n') {
            Some(pos) => &contents[..=pos],
            None => "",
        };
        if committed.len() < contents.len() {
            warn!(
                "[STORE] Skipping {} uncommitted byte(s) at end of {:?}",
                contents.len() - committed.len(),
                self.path
            );
        }

        let mut records = Vec::new();

        for (index, line) in committed.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Submission>(line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(StoreError::Corrupt(format!(
                        "{}:{}: {}",
                        self.path.display(),
                        index + 1,
                        e
                    )));
                }
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl SubmissionStore for FileSubmissionStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn append(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let record = Submission::create(submission, Uuid::new_v4().to_string(), now_utc());

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let _guard = self.lock.write().await;

        // A torn line from an earlier crash must not swallow this record.
        truncate_torn_tail(&self.path).await?;

        let created = !fs::try_exists(&self.path).await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        let committed_len = file.metadata().await?.len();

        if let Err(e) = write_synced(&mut file, line.as_bytes()).await {
            warn!("[STORE] Append to {:?} failed, rolling back: {}", self.path, e);
            if let Err(rollback) = file.set_len(committed_len).await {
                warn!("[STORE] Rollback of {:?} failed: {}", self.path, rollback);
            }
            return Err(e.into());
        }

        if created {
            sync_parent_dir(&self.path).await?;
        }

        Ok(record)
    }

    async fn list_page(&self, request: PageRequest) -> Result<Page<Submission>, StoreError> {
        let _guard = self.lock.read().await;
        let records = self.read_all().await?;
        let total = records.len() as u64;

        let mut ordered: Vec<(u64, Submission)> = records
            .into_iter()
            .enumerate()
            .map(|(seq, record)| (seq as u64, record))
            .collect();
        ordered.sort_by(newest_first);

        let items = slice_for(&ordered, request)
            .into_iter()
            .map(|(_, record)| record)
            .collect();

        Ok(Page::new(items, request, total))
    }
}

async fn write_synced(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.sync_data().await
}

/// Persist the directory entry of a newly created store file.
#[cfg(unix)]
async fn sync_parent_dir(path: &Path) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::File::open(parent).await?.sync_all().await?;
    Ok(())
}

#[cfg(not(unix))]
async fn sync_parent_dir(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

/// Drop any bytes after the last newline, left behind by an interrupted write.
async fn truncate_torn_tail(path: &Path) -> Result<(), StoreError> {
    let contents = match fs::read(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    if contents.is_empty() || contents.ends_with(b"\n") {
        return Ok(());
    }

    let keep = contents
        .iter()
        .rposition(|b| *b == b'\n')
        .map(|pos| pos + 1)
        .unwrap_or(0);

    warn!(
        "[STORE] Truncating {} torn byte(s) at end of {:?}",
        contents.len() - keep,
        path
    );

    let file = OpenOptions::new().write(true).open(path).await?;
    file.set_len(keep as u64).await?;
    file.sync_data().await?;
    Ok(())
}
