use crate::error::{Result, ScanError};
use crate::scanner::scan_sheet;
use phonesift_core::{dedup_preserving_order, CanonicalPhone, RowFilter};
use phonesift_sheet::SheetReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::debug;

/// Phones matched across a whole directory, in arrival order and with
/// repeats.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub files: usize,
    pub rows: usize,
    pub phones: Vec<CanonicalPhone>,
}

impl Aggregation {
    pub fn matched(&self) -> usize {
        self.phones.len()
    }

    /// Distinct phones in first-seen order.
    pub fn unique(&self) -> Vec<CanonicalPhone> {
        dedup_preserving_order(self.phones.iter().cloned())
    }
}

/// Scans every file of a directory concurrently and merges the matches into
/// one collection.
pub struct CorpusAggregator {
    reader: Arc<dyn SheetReader>,
    filter: Arc<RowFilter>,
    collected: Arc<Mutex<Vec<CanonicalPhone>>>,
}

impl CorpusAggregator {
    pub fn new(reader: Arc<dyn SheetReader>, filter: RowFilter) -> Self {
        Self {
            reader,
            filter: Arc::new(filter),
            collected: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Runs one scan task per regular file in `dir` and waits for all of
    /// them. The shared collection is locked only to append a finished
    /// file's phones.
    ///
    /// The first failing file ends the run: the remaining scans are aborted
    /// and nothing collected so far is returned.
    pub async fn aggregate(self, dir: &Path) -> Result<Aggregation> {
        let files = list_files(dir).await?;
        debug!(path = %dir.display(), files = files.len(), "source directory listed");

        let file_count = files.len();
        let mut tasks = JoinSet::new();
        for path in files {
            let reader = Arc::clone(&self.reader);
            let filter = Arc::clone(&self.filter);
            let collected = Arc::clone(&self.collected);
            tasks.spawn(async move {
                let scan = scan_sheet(reader, path, filter).await?;
                collected.lock().await.extend(scan.phones);
                Ok::<_, ScanError>(scan.rows)
            });
        }

        let mut rows = 0;
        while let Some(joined) = tasks.join_next().await {
            // Returning early drops the set, which aborts the other scans.
            rows += joined??;
        }

        let phones = std::mem::take(&mut *self.collected.lock().await);
        debug!(files = file_count, rows, matched = phones.len(), "aggregation finished");
        Ok(Aggregation {
            files: file_count,
            rows,
            phones,
        })
    }
}

async fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir_error = |source: std::io::Error| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(read_dir_error)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
        let file_type = entry.file_type().await.map_err(read_dir_error)?;
        if file_type.is_dir() {
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}
