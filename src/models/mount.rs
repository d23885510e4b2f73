use std::collections::{BTreeMap, HashMap};

/// The 8 cumulative byte counters of a `bytes:` line, in kernel order.
pub const BYTE_COUNTERS: [&str; 8] = [
    "normalreadbytes", "normalwritebytes",
    "directreadbytes", "directwritebytes",
    "serverreadbytes", "serverwritebytes",
    "readpages",       "writepages",
];

/// One parsed block of /proc/self/mountstats.
///
/// Counters are cumulative since the mount was established. An export can be
/// mounted at several local paths at once (bind mounts), so the mount points
/// form a map of local path → remote device path rather than a single pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MountRecord {
    /// local mount path → device path ("server:/export")
    pub mountpoints: BTreeMap<String, String>,
    /// "nfs", "nfs4", "autofs", …
    pub fstype:      String,
    /// seconds since the mount was established; resets on remount
    pub age_secs:    Option<u64>,
    /// byte counter name (see BYTE_COUNTERS) → cumulative count
    pub bytes:       BTreeMap<String, u64>,
    /// RPC operation name ("READ", "WRITE", …) → raw counter sequence
    pub ops:         BTreeMap<String, Vec<u64>>,
}

impl MountRecord {
    pub fn is_nfs(&self) -> bool {
        matches!(self.fstype.as_str(), "nfs" | "nfs4")
    }

    /// A block that carried neither an `age:` nor a `bytes:` line has nothing
    /// to seed rate computation with and is skipped by the snapshot builder.
    pub fn is_incomplete(&self) -> bool {
        self.age_secs.is_none() && self.bytes.is_empty()
    }

    /// Bind mounts of one export share one kernel-side counter set, so full
    /// equality of the statistics maps is the identity proxy for "same device".
    pub fn same_stats(&self, other: &Self) -> bool {
        self.bytes == other.bytes && self.ops == other.ops
    }
}

/// Collapse records that are bind mounts of the same underlying export into
/// one record with the union of their local paths.
///
/// Only records sharing the same age are compared; the first record seen in
/// an age bucket anchors all later matches against it.
pub fn merge_mounts(records: Vec<MountRecord>) -> Vec<MountRecord> {
    let mut merged: Vec<MountRecord> = Vec::new();
    let mut by_age: HashMap<Option<u64>, Vec<usize>> = HashMap::new();

    for rec in records {
        let bucket = by_age.entry(rec.age_secs).or_default();
        match bucket.iter().find(|&&i| merged[i].same_stats(&rec)) {
            Some(&i) => {
                merged[i].mountpoints.extend(rec.mountpoints);
            }
            None => {
                bucket.push(merged.len());
                merged.push(rec);
            }
        }
    }
    merged
}
