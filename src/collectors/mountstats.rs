use crate::models::mount::{MountRecord, BYTE_COUNTERS};
use anyhow::Result;
use std::path::Path;

pub const MOUNTSTATS_PATH: &str = "/proc/self/mountstats";

/// Read /proc/self/mountstats and return the parsed NFS/NFS4 mounts.
/// An unreadable file (no NFS client, restricted /proc) yields no mounts.
pub fn read_mountstats() -> Vec<MountRecord> {
    match std::fs::read_to_string(MOUNTSTATS_PATH) {
        Ok(text) => parse_mountstats(&text),
        Err(_)   => Vec::new(),
    }
}

/// Same as read_mountstats but from an explicit path.
pub fn read_mountstats_from(path: &Path) -> Result<Vec<MountRecord>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_mountstats(&text))
}

/// Parse the full mountstats text: split into per-device blocks, parse each
/// block, and keep only the NFS variants.
pub fn parse_mountstats(text: &str) -> Vec<MountRecord> {
    split_blocks(text.lines())
        .iter()
        .map(|block| parse_block(block))
        .filter(MountRecord::is_nfs)
        .collect()
}

/// A line opens a new device block when it leads with the `device` token or
/// carries `nfs`/`nfs4` as a bare token anywhere.
fn is_block_start(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("device") => true,
        Some(first)    => first == "nfs" || first == "nfs4"
            || tokens.any(|t| t == "nfs" || t == "nfs4"),
        None => false,
    }
}

/// Group a flat line stream into per-device blocks. Blank lines are skipped
/// and anything before the first block marker is dropped.
pub fn split_blocks<'a, I>(lines: I) -> Vec<Vec<&'a str>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if is_block_start(line) {
            blocks.push(vec![line]);
        } else if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }
    blocks
}

/// Parse one block into a MountRecord. Parsing is permissive: unknown lines
/// are skipped, missing fields stay at their defaults, and the caller
/// decides whether the record is usable (fstype filter, completeness).
pub fn parse_block(lines: &[&str]) -> MountRecord {
    let mut rec = MountRecord::default();
    let mut in_rpc = false;

    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&first) = tokens.first() else { continue };

        // "device filer:/vol mounted on /mnt with fstype nfs4 statvers=1.1"
        if is_block_start(line) {
            if tokens.len() > 4 {
                rec.mountpoints.insert(tokens[4].to_string(), tokens[1].to_string());
            }
            // the nfs/nfs4 variant has one fewer leading token
            let fs_idx = if first == "device" { 7 } else { 6 };
            if let Some(fs) = tokens.get(fs_idx) {
                rec.fstype = fs.to_string();
            }
            continue;
        }

        if in_rpc {
            if is_rpc_marker(first) {
                continue;
            }
            // "READ: 12 12 0 1824 4097024 1 52 54"
            let name = first.trim_end_matches(':');
            let counters = tokens[1..].iter().map(|t| parse(t)).collect();
            rec.ops.insert(name.to_string(), counters);
            continue;
        }

        match first {
            "age:" => {
                rec.age_secs = tokens.get(1).map(|t| parse(t));
            }
            "bytes:" => {
                for (name, value) in BYTE_COUNTERS.iter().zip(&tokens[1..]) {
                    rec.bytes.insert(name.to_string(), parse(value));
                }
            }
            _ if is_rpc_marker(first) => in_rpc = true,
            // opts:, caps:, events:, … — ignored
            _ => {}
        }
    }
    rec
}

fn is_rpc_marker(token: &str) -> bool {
    matches!(token, "RPC" | "xprt:" | "per-op")
}

fn parse(s: &str) -> u64 {
    s.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
device rootfs mounted on / with fstype rootfs
device proc mounted on /proc with fstype proc
device auto.home mounted on /home with fstype autofs indirect
device filer1:/vol/home mounted on /home/alice with fstype nfs4 statvers=1.1
\topts:\trw,vers=4.1,rsize=1048576,wsize=1048576
\tage:\t86139
\tcaps:\tcaps=0xfbffdf,wtmult=512,dtsize=1048576
\tevents:\t58 1572 0 0 1 13 2061 0 0 0
\tbytes:\t326953 61920 0 0 4096000 2048000 1124 845
\tRPC iostats version: 1.1  p/v: 100003/4 (nfs)
\txprt:\ttcp 756 0 1 0 0 1432 1424 0 5635 0 16 1 3
\tper-op statistics
\t        NULL: 0 0 0 0 0 0 0 0
\t     GETATTR: 30 30 0 3772 3440 2 27 30
\t        READ: 12 12 0 1824 4097024 1 52 54
\t       WRITE: 7 7 0 2050048 1232 4 96 101
";

    #[test]
    fn splits_blocks_on_device_markers() {
        let blocks = split_blocks(FIXTURE.lines());
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[3].len(), 13);
    }

    #[test]
    fn leading_unmarked_lines_are_dropped() {
        let blocks = split_blocks(["stray line", "device x mounted on /y with fstype ext4"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0], vec!["device x mounted on /y with fstype ext4"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let blocks = split_blocks(["device x mounted on /y with fstype ext4", "", "  ", "age: 5"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].len(), 2);
    }

    #[test]
    fn bare_nfs_token_opens_a_block() {
        assert!(is_block_start("filer:/vol mounted on /mnt with fstype nfs4 statvers=1.1"));
        assert!(is_block_start("filer:/vol mounted on /mnt with fstype nfs statvers=1.0"));
        // "nfsd" is not a bare nfs token
        assert!(!is_block_start("nfsd mounted on /proc/fs/nfsd with fstype nfsd"));
    }

    #[test]
    fn parses_the_full_nfs_block() {
        let blocks = split_blocks(FIXTURE.lines());
        let rec = parse_block(&blocks[3]);

        assert_eq!(rec.fstype, "nfs4");
        assert_eq!(rec.age_secs, Some(86139));
        assert_eq!(rec.mountpoints.get("/home/alice").map(String::as_str),
                   Some("filer1:/vol/home"));

        assert_eq!(rec.bytes.get("normalreadbytes"),  Some(&326953));
        assert_eq!(rec.bytes.get("serverreadbytes"),  Some(&4096000));
        assert_eq!(rec.bytes.get("serverwritebytes"), Some(&2048000));
        assert_eq!(rec.bytes.get("writepages"),       Some(&845));

        assert_eq!(rec.ops.get("READ").unwrap()[0], 12);
        assert_eq!(rec.ops.get("READ").unwrap()[7], 54);
        assert_eq!(rec.ops.get("WRITE").unwrap()[0], 7);
        assert_eq!(rec.ops.get("WRITE").unwrap()[7], 101);
        assert_eq!(rec.ops.get("GETATTR").unwrap()[0], 30);
        // xprt/per-op marker lines never become operations
        assert!(!rec.ops.contains_key("xprt"));
        assert!(!rec.ops.contains_key("per-op"));
    }

    #[test]
    fn non_nfs_blocks_are_filtered_out() {
        let mounts = parse_mountstats(FIXTURE);
        assert_eq!(mounts.len(), 1);
        assert!(mounts[0].is_nfs());
    }

    #[test]
    fn fstype_offset_shifts_without_the_device_token() {
        let rec = parse_block(&["filer2:/vol/scratch mounted on /scratch with fstype nfs statvers=1.0"]);
        assert_eq!(rec.fstype, "nfs");
    }

    #[test]
    fn reads_mountstats_from_a_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let mounts = read_mountstats_from(file.path()).unwrap();
        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts[0].fstype, "nfs4");
    }

    #[test]
    fn missing_file_is_an_error_for_explicit_paths() {
        assert!(read_mountstats_from(Path::new("/nonexistent/mountstats")).is_err());
    }

    #[test]
    fn block_without_age_or_bytes_is_incomplete_but_returned() {
        let rec = parse_block(&[
            "device filer:/v mounted on /m with fstype nfs statvers=1.0",
            "\topts:\trw",
        ]);
        assert!(rec.is_nfs());
        assert!(rec.is_incomplete());
    }
}
