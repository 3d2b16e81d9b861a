//! Non-blocking CSV writer using a dedicated thread and mpsc channel.
//!
//! The scan sends qualifying rows as it finds them; the writer thread owns
//! the file handle so the async fan-out never blocks on disk IO. Rows are
//! appended, with a header written only when the file starts empty.

use std::fs::OpenOptions;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{error, info, warn};

use crate::types::MilestoneHit;

/// Messages sent to the export writer thread.
pub enum ExportMessage {
    /// Append one report row
    Hit(MilestoneHit),
    /// Flush and stop
    Shutdown,
}

/// Channel handle for sending export messages (non-blocking).
#[derive(Clone)]
pub struct ExportChannel {
    tx: Sender<ExportMessage>,
}

impl ExportChannel {
    /// Queue one row for the CSV file.
    pub fn record_hit(&self, hit: MilestoneHit) {
        let _ = self.tx.send(ExportMessage::Hit(hit));
    }

    /// Request a flush and shutdown.
    pub fn shutdown(&self) {
        let _ = self.tx.send(ExportMessage::Shutdown);
    }
}

/// Create an export channel and spawn the writer thread.
///
/// The returned handle should be joined after `shutdown()` so the final
/// flush lands before the process exits.
pub fn create_export_channel(csv_path: &str) -> (ExportChannel, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel();
    let path = csv_path.to_string();

    let handle = thread::spawn(move || {
        export_writer_loop(rx, &path);
    });

    (ExportChannel { tx }, handle)
}

/// Main writer loop running in a dedicated thread.
fn export_writer_loop(rx: Receiver<ExportMessage>, csv_path: &str) {
    let file = match OpenOptions::new().create(true).append(true).open(csv_path) {
        Ok(f) => f,
        Err(e) => {
            error!("[EXPORT] Failed to open {}: {}", csv_path, e);
            return;
        }
    };

    let needs_header = file.metadata().map(|m| m.len() == 0).unwrap_or(true);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if needs_header {
        if let Err(e) = writer.write_record([
            "timestamp",
            "player_id",
            "player",
            "role",
            "scope",
            "stat",
            "value",
            "next_milestone",
        ]) {
            error!("[EXPORT] Failed to write header: {}", e);
            return;
        }
    }

    info!("[EXPORT] CSV export enabled: {}", csv_path);
    let run_timestamp = chrono::Utc::now().to_rfc3339();
    let mut written = 0usize;

    loop {
        match rx.recv() {
            Ok(ExportMessage::Hit(hit)) => {
                let record = [
                    run_timestamp.clone(),
                    hit.player_id.to_string(),
                    hit.player_name,
                    hit.role.to_string(),
                    hit.scope.to_string(),
                    hit.stat.to_string(),
                    hit.value.to_string(),
                    hit.next_milestone.to_string(),
                ];
                match writer.write_record(&record) {
                    Ok(()) => written += 1,
                    Err(e) => warn!("[EXPORT] Failed to write row: {}", e),
                }
            }
            Ok(ExportMessage::Shutdown) => {
                if let Err(e) = writer.flush() {
                    error!("[EXPORT] Flush failed: {}", e);
                }
                info!("[EXPORT] Wrote {} rows to {}", written, csv_path);
                break;
            }
            Err(mpsc::RecvError) => {
                // Channel closed without an explicit shutdown
                if let Err(e) = writer.flush() {
                    error!("[EXPORT] Flush failed: {}", e);
                }
                info!("[EXPORT] Channel closed, wrote {} rows to {}", written, csv_path);
                break;
            }
        }
    }
}
