//! Storage slots persisted as files inside one capability directory.
//!
//! Key `k` lives in `k.json`. Writes go to a hidden temporary file that is
//! synced and then renamed over the target, so readers never observe a
//! partially written slot.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use super::{KeyValueStore, StorageError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Slots stored as JSON files in a directory.
#[derive(Debug)]
pub struct DirectoryKeyValueStore {
    dir: Dir,
}

impl DirectoryKeyValueStore {
    /// Open `path`, creating it and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        debug!(path = %path.display(), "opened storage directory");
        Ok(Self { dir })
    }
}

impl KeyValueStore for DirectoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let file_name = slot_file_name(key)?;
        match self.dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Read {
                key: key.to_owned(),
                message: err.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let file_name = slot_file_name(key)?;
        write_atomic(&self.dir, &file_name, value).map_err(|err| StorageError::Write {
            key: key.to_owned(),
            message: err.to_string(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let file_name = slot_file_name(key)?;
        match self.dir.remove_file(&file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Write {
                key: key.to_owned(),
                message: err.to_string(),
            }),
        }
    }
}

fn slot_file_name(key: &str) -> Result<String, StorageError> {
    let invalid = |reason| StorageError::InvalidKey {
        key: key.to_owned(),
        reason,
    };
    if key.is_empty() {
        return Err(invalid("key must not be empty"));
    }
    if key.starts_with('.') {
        return Err(invalid("key must not start with a dot"));
    }
    if key.contains(['/', '\\']) {
        return Err(invalid("key must not contain path separators"));
    }
    Ok(format!("{key}.json"))
}

fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    if let Err(err) = write_to_temp_file(dir, &tmp_name, contents) {
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    if let Err(err) = rename_into_place(dir, &tmp_name, file_name) {
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    sync_directory(dir);
    Ok(())
}

fn write_to_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_into_place(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows refuses to rename over an existing file.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_into_place(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_directory(dir: &Dir) {
    // Best effort: the rename already happened.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> (TempDir, DirectoryKeyValueStore) {
        let temp = TempDir::new().expect("temp dir");
        let store = DirectoryKeyValueStore::open(temp.path()).expect("open store");
        (temp, store)
    }

    #[rstest]
    fn writes_slot_as_json_file(workspace: (TempDir, DirectoryKeyValueStore)) {
        let (temp, store) = workspace;
        store.set("taskboard.tasks", "[]").expect("write slot");

        let on_disk =
            std::fs::read_to_string(temp.path().join("taskboard.tasks.json")).expect("read file");
        assert_eq!(on_disk, "[]");
        assert_eq!(store.get("taskboard.tasks"), Ok(Some("[]".to_owned())));
    }

    #[rstest]
    fn leaves_no_temporary_files_behind(workspace: (TempDir, DirectoryKeyValueStore)) {
        let (temp, store) = workspace;
        store.set("slot", "one").expect("first write");
        store.set("slot", "two").expect("overwrite");

        let names: Vec<_> = std::fs::read_dir(temp.path())
            .expect("list dir")
            .map(|entry| entry.expect("entry").file_name())
            .collect();
        assert_eq!(names, ["slot.json"]);
        assert_eq!(store.get("slot"), Ok(Some("two".to_owned())));
    }

    #[rstest]
    fn missing_slot_reads_as_none_and_removes_cleanly(
        workspace: (TempDir, DirectoryKeyValueStore),
    ) {
        let (_temp, store) = workspace;
        assert_eq!(store.get("absent"), Ok(None));
        assert_eq!(store.remove("absent"), Ok(()));
    }

    #[rstest]
    #[case("")]
    #[case(".hidden")]
    #[case("../escape")]
    #[case("nested\\slot")]
    fn rejects_keys_that_are_not_plain_file_names(
        workspace: (TempDir, DirectoryKeyValueStore),
        #[case] key: &str,
    ) {
        let (_temp, store) = workspace;
        let err = store.set(key, "x").expect_err("key must be rejected");
        assert!(matches!(err, StorageError::InvalidKey { .. }));
    }

    #[rstest]
    fn reopening_sees_previous_writes(workspace: (TempDir, DirectoryKeyValueStore)) {
        let (temp, store) = workspace;
        store.set("taskboard.users", "[1]").expect("write");
        drop(store);

        let reopened = DirectoryKeyValueStore::open(temp.path()).expect("reopen");
        assert_eq!(reopened.get("taskboard.users"), Ok(Some("[1]".to_owned())));
    }
}
