//! Idempotent fstab registration.
//!
//! The table is rewritten in full: blank lines are dropped, every other line
//! (comments included) is kept verbatim, and the new entry is appended only
//! when no existing line already has exactly the same six fields.

use ebsctl_error::{EbsError, EbsResult};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

const FSTAB_MODE: u32 = 0o600;

/// One fstab line: `<source> <mountpoint> <fstype> <options> <dump> <pass>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FstabEntry {
    pub source: String,
    pub mountpoint: String,
    pub fs_type: String,
    pub options: String,
    pub dump: String,
    pub pass: String,
}

impl FstabEntry {
    pub fn new(
        source: impl Into<String>,
        mountpoint: impl Into<String>,
        fs_type: impl Into<String>,
        options: impl Into<String>,
        dump: impl Into<String>,
        pass: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            mountpoint: mountpoint.into(),
            fs_type: fs_type.into(),
            options: options.into(),
            dump: dump.into(),
            pass: pass.into(),
        }
    }

    /// Parse a table line. Comments, blank or indented lines and lines
    /// without exactly six fields give `None`.
    pub fn parse(line: &str) -> Option<Self> {
        if is_comment_or_blank(line) {
            return None;
        }
        let mut fields = line.split_whitespace();
        let entry = Self::new(
            fields.next()?,
            fields.next()?,
            fields.next()?,
            fields.next()?,
            fields.next()?,
            fields.next()?,
        );
        if fields.next().is_some() {
            return None;
        }
        Some(entry)
    }
}

impl fmt::Display for FstabEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.source, self.mountpoint, self.fs_type, self.options, self.dump, self.pass
        )
    }
}

/// Lines starting with `#` or whitespace, and empty lines, are never
/// compared against an entry.
fn is_comment_or_blank(line: &str) -> bool {
    match line.chars().next() {
        None => true,
        Some(c) => c == '#' || c.is_whitespace(),
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Result of merging an entry into table content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FstabEdit {
    pub lines: Vec<String>,
    pub already_exists: bool,
}

impl FstabEdit {
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }
}

pub fn merge_entry(content: &str, entry: &FstabEntry) -> FstabEdit {
    let mut already_exists = false;
    let mut lines = Vec::new();

    for line in content.split('\n') {
        if FstabEntry::parse(line).as_ref() == Some(entry) {
            already_exists = true;
        }
        if !is_blank(line) {
            lines.push(line.to_string());
        }
    }

    if !already_exists {
        lines.push(entry.to_string());
    }

    FstabEdit {
        lines,
        already_exists,
    }
}

pub fn read_fstab(path: &Path) -> EbsResult<String> {
    let mut file = File::open(path).map_err(|source| EbsError::FstabOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let metadata = file.metadata().map_err(|source| EbsError::FstabStat {
        path: path.to_path_buf(),
        source,
    })?;

    let mut content = String::with_capacity(metadata.len() as usize);
    file.read_to_string(&mut content).map_err(|source| EbsError::FstabRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content)
}

/// Overwrite `path` with `content`, leaving it readable by the owner only.
pub fn write_fstab(path: &Path, content: &str) -> EbsResult<()> {
    let write_err = |source: std::io::Error| EbsError::FstabWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(FSTAB_MODE)
        .open(path)
        .map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;
    fs::set_permissions(path, fs::Permissions::from_mode(FSTAB_MODE)).map_err(write_err)?;
    Ok(())
}

/// Register `entry` in the table at `path`.
///
/// Returns true when the entry was missing (and appended, or reported in
/// dry-run mode). Dry runs never write.
pub fn write_entry(
    path: &Path,
    entry: &FstabEntry,
    dry_run: bool,
    out: &mut dyn Write,
) -> EbsResult<bool> {
    let content = read_fstab(path)?;
    let edit = merge_entry(&content, entry);

    if dry_run {
        if !edit.already_exists {
            writeln!(out, "writing to {} entry: '{}'", path.display(), entry)?;
        }
        return Ok(!edit.already_exists);
    }

    if edit.already_exists {
        log::info!("{} already contains '{}'", path.display(), entry);
    } else {
        log::info!("Adding '{}' to {}", entry, path.display());
    }
    write_fstab(path, &edit.content())?;
    Ok(!edit.already_exists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry() -> FstabEntry {
        FstabEntry::new("LABEL=data1", "/mnt/data1", "ext4", "defaults", "0", "0")
    }

    const TABLE: &str = "# /etc/fstab\n\
        UUID=1111 / ext4 defaults,noatime 0 1\n\
        \n\
        # data volumes\n\
        LABEL=logs /mnt/logs xfs defaults 0 0\n";

    #[test]
    fn parse_requires_six_fields() {
        assert_eq!(
            FstabEntry::parse("LABEL=data1 /mnt/data1 ext4 defaults 0 0"),
            Some(entry())
        );
        assert_eq!(
            FstabEntry::parse("LABEL=data1\t/mnt/data1   ext4 defaults 0 0"),
            Some(entry())
        );
        assert_eq!(FstabEntry::parse("LABEL=data1 /mnt/data1 ext4 defaults 0"), None);
        assert_eq!(
            FstabEntry::parse("LABEL=data1 /mnt/data1 ext4 defaults 0 0 extra"),
            None
        );
    }

    #[test]
    fn parse_skips_comments_and_indented_lines() {
        assert_eq!(FstabEntry::parse("#LABEL=data1 /mnt/data1 ext4 defaults 0 0"), None);
        assert_eq!(FstabEntry::parse(" LABEL=data1 /mnt/data1 ext4 defaults 0 0"), None);
        assert_eq!(FstabEntry::parse(""), None);
    }

    #[test]
    fn appends_missing_entry_and_drops_blanks() {
        let edit = merge_entry(TABLE, &entry());
        assert!(!edit.already_exists);
        assert_eq!(
            edit.lines,
            vec![
                "# /etc/fstab",
                "UUID=1111 / ext4 defaults,noatime 0 1",
                "# data volumes",
                "LABEL=logs /mnt/logs xfs defaults 0 0",
                "LABEL=data1 /mnt/data1 ext4 defaults 0 0",
            ]
        );
    }

    #[test]
    fn existing_entry_is_not_duplicated() {
        let table = "LABEL=data1   /mnt/data1\text4 defaults 0 0\n\n\n# tail\n";
        let edit = merge_entry(table, &entry());
        assert!(edit.already_exists);
        assert_eq!(edit.content(), "LABEL=data1   /mnt/data1\text4 defaults 0 0\n# tail");
    }

    #[test]
    fn commented_out_entry_does_not_count() {
        let edit = merge_entry("#LABEL=data1 /mnt/data1 ext4 defaults 0 0\n", &entry());
        assert!(!edit.already_exists);
        assert_eq!(edit.lines.len(), 2);
    }

    #[test]
    fn differing_field_does_not_count() {
        let edit = merge_entry("LABEL=data1 /mnt/data1 ext4 defaults,noatime 0 0\n", &entry());
        assert!(!edit.already_exists);
    }

    #[test]
    fn trailing_whitespace_still_matches() {
        let edit = merge_entry("LABEL=data1\t/mnt/data1  ext4 defaults 0 0  \n", &entry());
        assert!(edit.already_exists);
        assert_eq!(edit.lines, vec!["LABEL=data1\t/mnt/data1  ext4 defaults 0 0  "]);
    }

    #[test]
    fn whitespace_only_lines_are_dropped() {
        let edit = merge_entry(" \t \n# keep\n   \n", &entry());
        assert_eq!(
            edit.lines,
            vec!["# keep", "LABEL=data1 /mnt/data1 ext4 defaults 0 0"]
        );
    }

    #[test]
    fn empty_table_gets_single_entry() {
        let edit = merge_entry("", &entry());
        assert_eq!(edit.content(), "LABEL=data1 /mnt/data1 ext4 defaults 0 0");
    }

    #[test]
    fn merge_is_idempotent() {
        let first = merge_entry(TABLE, &entry()).content();
        let second = merge_entry(&first, &entry());
        assert!(second.already_exists);
        assert_eq!(second.content(), first);
    }

    #[test]
    fn write_entry_rewrites_file_owner_only() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("fstab");
        fs::write(&path, TABLE).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut out = Vec::new();
        let added = write_entry(&path, &entry(), false, &mut out).unwrap();

        assert!(added);
        assert!(out.is_empty());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("LABEL=data1 /mnt/data1 ext4 defaults 0 0"));
        assert!(!content.contains("\n\n"));
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn second_run_leaves_file_identical() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("fstab");
        fs::write(&path, TABLE).unwrap();
        let mut out = Vec::new();

        assert!(write_entry(&path, &entry(), false, &mut out).unwrap());
        let first = fs::read_to_string(&path).unwrap();
        assert!(!write_entry(&path, &entry(), false, &mut out).unwrap());
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn dry_run_reports_and_does_not_write() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("fstab");
        fs::write(&path, TABLE).unwrap();
        let mut out = Vec::new();

        let added = write_entry(&path, &entry(), true, &mut out).unwrap();

        assert!(added);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "writing to {} entry: 'LABEL=data1 /mnt/data1 ext4 defaults 0 0'\n",
                path.display()
            )
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), TABLE);
    }

    #[test]
    fn dry_run_is_silent_when_entry_exists() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("fstab");
        fs::write(&path, "LABEL=data1 /mnt/data1 ext4 defaults 0 0\n\n").unwrap();
        let mut out = Vec::new();

        let added = write_entry(&path, &entry(), true, &mut out).unwrap();

        assert!(!added);
        assert!(out.is_empty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "LABEL=data1 /mnt/data1 ext4 defaults 0 0\n\n"
        );
    }

    #[test]
    fn missing_table_is_open_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("absent");
        let mut out = Vec::new();
        let err = write_entry(&path, &entry(), true, &mut out).unwrap_err();
        assert!(matches!(err, EbsError::FstabOpen { .. }));
    }

    #[test]
    fn non_utf8_table_is_read_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("fstab");
        fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();
        let err = read_fstab(&path).unwrap_err();
        assert!(matches!(err, EbsError::FstabRead { .. }));
    }

    #[test]
    fn unwritable_target_is_write_error() {
        let tmp = tempdir().unwrap();
        let err = write_fstab(tmp.path(), "x").unwrap_err();
        assert!(matches!(err, EbsError::FstabWrite { .. }));
    }
}
