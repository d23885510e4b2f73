use crate::models::snapshot::Snapshot;
use crate::util::human::{fmt_mibps, fmt_ms_per_op};
use chrono::{DateTime, Local};
use std::collections::BTreeSet;
use tracing::warn;

const MIB: f64 = 1_048_576.0;

/// Per-interval activity of one NFS mount — one output row.
#[derive(Debug, Clone)]
pub struct Activity {
    pub start: DateTime<Local>,
    pub end:   DateTime<Local>,
    pub read_mibps:     f64,
    pub read_ms_per_op:  f64,
    pub write_mibps:    f64,
    pub write_ms_per_op: f64,
    pub mountpoints:    BTreeSet<String>,
}

impl Activity {
    pub const HEADER: [&'static str; 7] = [
        "Start", "End",
        "ReadMiBpS", "ReadOpsTime",
        "WriteMiBpS", "WriteOpsTime",
        "MountPoints",
    ];

    pub fn header_row() -> Vec<String> {
        Self::HEADER.iter().map(|s| s.to_string()).collect()
    }

    /// The seven display fields, in header order.
    pub fn fields(&self) -> Vec<String> {
        vec![
            self.start.format("%H:%M:%S").to_string(),
            self.end.format("%H:%M:%S").to_string(),
            fmt_mibps(self.read_mibps),
            fmt_ms_per_op(self.read_ms_per_op),
            fmt_mibps(self.write_mibps),
            fmt_ms_per_op(self.write_ms_per_op),
            self.mount_label(),
        ]
    }

    /// Sorted, semicolon-joined alias set.
    pub fn mount_label(&self) -> String {
        self.mountpoints.iter().cloned().collect::<Vec<_>>().join(";")
    }
}

/// Difference the current snapshot set against the previous poll's.
///
/// Matching is by alias-set overlap, first match wins. A current snapshot
/// with no previous match — or whose age went backwards, meaning the mount
/// was torn down and recreated — is differenced against a zero baseline,
/// yielding a correct "since mount" delta. Mounts with no read or write ops
/// this interval produce no row.
pub fn diff_snapshots(
    previous: &[Snapshot],
    current:  &[Snapshot],
    dt:       f64,
    start:    DateTime<Local>,
    end:      DateTime<Local>,
    min_op_time_ms: Option<f64>,
) -> Vec<Activity> {
    let dt = dt.max(0.001);
    let zero = Snapshot::default();
    let mut rows = Vec::new();

    for curr in current {
        let baseline = match previous.iter().find(|p| p.overlaps(curr)) {
            // age going backwards invalidates the old totals as a baseline
            Some(prev) if prev.age_secs <= curr.age_secs => prev,
            _ => &zero,
        };

        let d_read_bytes  = curr.read_bytes    as i64 - baseline.read_bytes    as i64;
        let d_read_ops    = curr.read_ops      as i64 - baseline.read_ops      as i64;
        let d_read_time   = curr.read_time_ms  as i64 - baseline.read_time_ms  as i64;
        let d_write_bytes = curr.write_bytes   as i64 - baseline.write_bytes   as i64;
        let d_write_ops   = curr.write_ops     as i64 - baseline.write_ops     as i64;
        let d_write_time  = curr.write_time_ms as i64 - baseline.write_time_ms as i64;

        // A negative time delta means the alias overlap matched two distinct
        // mounts; the sample is unusable but the polling loop keeps going.
        if d_read_time < 0 || d_write_time < 0 {
            warn!(
                mounts = %curr.mount_label(),
                "op time went backwards, dropping mismatched sample"
            );
            continue;
        }

        if d_read_ops == 0 && d_write_ops == 0 {
            continue;
        }

        let read_ms_per_op  = d_read_time  as f64 / d_read_ops.max(1)  as f64;
        let write_ms_per_op = d_write_time as f64 / d_write_ops.max(1) as f64;

        if let Some(min_ms) = min_op_time_ms {
            if read_ms_per_op.max(write_ms_per_op) < min_ms {
                continue;
            }
        }

        rows.push(Activity {
            start,
            end,
            read_mibps:      d_read_bytes as f64 / MIB / dt,
            read_ms_per_op,
            write_mibps:     d_write_bytes as f64 / MIB / dt,
            write_ms_per_op,
            mountpoints:     curr.mountpoints.clone(),
        });
    }
    rows
}
