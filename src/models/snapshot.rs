use crate::models::mount::MountRecord;
use std::collections::BTreeSet;

/// Index of the cumulative op count in a per-op counter sequence.
pub const OP_COUNT: usize = 0;
/// Index of the cumulative op time (milliseconds) in a per-op counter sequence.
pub const OP_TIME_MS: usize = 7;

/// Minimal per-mount aggregate needed for interval rate computation.
///
/// All counters are cumulative since mount time. One snapshot set per poll
/// is kept as the baseline for the next poll; nothing older survives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Local path aliases. The only correlation key across polls — the
    /// kernel exposes no stable per-mount identifier.
    pub mountpoints:   BTreeSet<String>,
    pub age_secs:      u64,
    pub read_bytes:    u64,
    pub read_ops:      u64,
    pub read_time_ms:  u64,
    pub write_bytes:   u64,
    pub write_ops:     u64,
    pub write_time_ms: u64,
}

impl Snapshot {
    /// Project a merged mount record down to the six counters the
    /// differencer needs. A record without a READ or WRITE entry counts
    /// as zero activity for that direction.
    pub fn from_record(rec: &MountRecord) -> Self {
        let op = |name: &str, idx: usize| -> u64 {
            rec.ops.get(name).and_then(|c| c.get(idx)).copied().unwrap_or(0)
        };
        Snapshot {
            mountpoints:   rec.mountpoints.keys().cloned().collect(),
            age_secs:      rec.age_secs.unwrap_or(0),
            read_bytes:    rec.bytes.get("serverreadbytes").copied().unwrap_or(0),
            read_ops:      op("READ", OP_COUNT),
            read_time_ms:  op("READ", OP_TIME_MS),
            write_bytes:   rec.bytes.get("serverwritebytes").copied().unwrap_or(0),
            write_ops:     op("WRITE", OP_COUNT),
            write_time_ms: op("WRITE", OP_TIME_MS),
        }
    }

    /// Two snapshots describe the same mount instance when their alias sets
    /// intersect — aliases come and go between polls as bind mounts change,
    /// so equality is too strict.
    pub fn overlaps(&self, other: &Snapshot) -> bool {
        self.mountpoints.intersection(&other.mountpoints).next().is_some()
    }

    /// Sorted, semicolon-joined alias set — the display form and the key
    /// carried forward in warnings.
    pub fn mount_label(&self) -> String {
        self.mountpoints.iter().cloned().collect::<Vec<_>>().join(";")
    }
}

/// Build the poll's snapshot set from merged records, skipping blocks that
/// carried no usable counters.
pub fn build_snapshots(records: &[MountRecord]) -> Vec<Snapshot> {
    records.iter()
        .filter(|r| !r.is_incomplete())
        .map(Snapshot::from_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mount::MountRecord;

    fn full_record() -> MountRecord {
        let mut rec = MountRecord {
            fstype:   "nfs".to_string(),
            age_secs: Some(1234),
            ..Default::default()
        };
        rec.mountpoints.insert("/data".to_string(), "srv:/export".to_string());
        rec.bytes.insert("serverreadbytes".to_string(), 1000);
        rec.bytes.insert("serverwritebytes".to_string(), 2000);
        rec.ops.insert("READ".to_string(),  vec![10, 10, 0, 0, 0, 0, 0, 50]);
        rec.ops.insert("WRITE".to_string(), vec![20, 20, 0, 0, 0, 0, 0, 80]);
        rec
    }

    #[test]
    fn projects_the_documented_counter_positions() {
        let snap = Snapshot::from_record(&full_record());
        assert_eq!(snap.age_secs, 1234);
        assert_eq!(snap.read_bytes, 1000);
        assert_eq!(snap.read_ops, 10);
        assert_eq!(snap.read_time_ms, 50);
        assert_eq!(snap.write_bytes, 2000);
        assert_eq!(snap.write_ops, 20);
        assert_eq!(snap.write_time_ms, 80);
    }

    #[test]
    fn missing_ops_default_to_zero() {
        let mut rec = full_record();
        rec.ops.remove("WRITE");
        let snap = Snapshot::from_record(&rec);
        assert_eq!(snap.write_ops, 0);
        assert_eq!(snap.write_time_ms, 0);
    }

    #[test]
    fn incomplete_records_are_excluded() {
        let empty = MountRecord { fstype: "nfs".to_string(), ..Default::default() };
        let snaps = build_snapshots(&[empty, full_record()]);
        assert_eq!(snaps.len(), 1);
    }

    #[test]
    fn overlap_is_any_shared_alias() {
        let a = Snapshot {
            mountpoints: ["/a", "/b"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        let b = Snapshot {
            mountpoints: ["/b", "/c"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        let c = Snapshot {
            mountpoints: ["/d"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn mount_label_is_sorted_and_semicolon_joined() {
        let snap = Snapshot {
            mountpoints: ["/z", "/a"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        assert_eq!(snap.mount_label(), "/a;/z");
    }
}
