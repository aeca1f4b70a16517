use crate::error::Result;
use phonesift_core::{CanonicalPhone, RowFilter};
use phonesift_sheet::SheetReader;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::{self, JoinSet};
use tracing::debug;

/// Result of scanning one source file.
#[derive(Debug, Clone)]
pub struct SheetScan {
    pub path: PathBuf,
    pub rows: usize,
    pub phones: Vec<CanonicalPhone>,
}

/// Reads one source file and filters every row in its own task.
///
/// Accepted phones are collected under a lock owned by this scan alone.
/// Returns only after every row task has finished; the order of `phones`
/// follows task completion, not row order.
pub async fn scan_sheet(
    reader: Arc<dyn SheetReader>,
    path: PathBuf,
    filter: Arc<RowFilter>,
) -> Result<SheetScan> {
    let rows = {
        let path = path.clone();
        task::spawn_blocking(move || reader.read_rows(&path)).await??
    };
    let row_count = rows.len();

    let accepted = Arc::new(Mutex::new(Vec::new()));
    let mut tasks = JoinSet::new();
    for row in rows {
        let filter = Arc::clone(&filter);
        let accepted = Arc::clone(&accepted);
        tasks.spawn(async move {
            if let Some(phone) = filter.evaluate(&row) {
                accepted.lock().await.push(phone);
            }
        });
    }
    while let Some(joined) = tasks.join_next().await {
        joined?;
    }

    let phones = std::mem::take(&mut *accepted.lock().await);
    debug!(
        path = %path.display(),
        rows = row_count,
        accepted = phones.len(),
        "sheet scanned"
    );
    Ok(SheetScan {
        path,
        rows: row_count,
        phones,
    })
}
