//! Exports: JSON file of the current list, PDF link in the browser

use crate::model::CauseList;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A file written under a temporary name
///
/// Removed on drop unless `persist` moved it into place.
struct StagedFile {
    path: PathBuf,
    persisted: bool,
}

impl StagedFile {
    fn write(path: PathBuf, contents: &[u8]) -> Result<Self> {
        let staged = Self {
            path,
            persisted: false,
        };
        fs::write(&staged.path, contents)
            .with_context(|| format!("Failed to write {}", staged.path.display()))?;
        Ok(staged)
    }

    fn persist(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target)
            .with_context(|| format!("Failed to move export to {}", target.display()))?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.persisted {
            debug!(path = %self.path.display(), "Removing staged export");
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Write `list` as pretty JSON to `dir/file_name`
pub fn write_json_export(list: &CauseList, dir: &Path, file_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Could not create export directory {}", dir.display()))?;

    let json = list.to_pretty_json()?;
    let staged = StagedFile::write(dir.join(format!(".{}.part", file_name)), json.as_bytes())?;

    let target = dir.join(file_name);
    staged.persist(&target)?;

    info!(path = %target.display(), cases = list.total_cases, "Exported cause list");
    Ok(target)
}

/// Opens URLs outside the terminal
pub trait UrlOpener {
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the system's default handler
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        open::that_detached(url).with_context(|| format!("Could not open {}", url))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CaseEntry;

    #[test]
    fn test_write_json_export_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let list = CauseList::from_cases(vec![CaseEntry {
            serial_number: "1".to_string(),
            case_number: "CS/12/2024".to_string(),
            ..Default::default()
        }]);

        let path = write_json_export(&list, dir.path(), "cause_list_2024-03-07.json").unwrap();

        assert_eq!(path, dir.path().join("cause_list_2024-03-07.json"));
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("{\n  \"total_cases\": 1,"));
        let parsed: CauseList = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, list);
    }

    #[test]
    fn test_write_json_export_leaves_no_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        write_json_export(&CauseList::default(), dir.path(), "out.json").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["out.json".to_string()]);
    }

    #[test]
    fn test_staged_file_removed_when_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".x.part");
        {
            let _staged = StagedFile::write(path.clone(), b"{}").unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_export_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("2024");
        let path = write_json_export(&CauseList::default(), &nested, "a.json").unwrap();
        assert!(path.exists());
    }
}
