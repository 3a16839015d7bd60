//! Process-wide settings registry and its `key=value` file format
use super::error::SettingsError;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

static GLOBAL: OnceLock<SettingsStore> = OnceLock::new();

/// String keyed settings guarded by a single mutex.
///
/// The process-wide store is reached through [`SettingsStore::instance`]. Stores
/// built with [`SettingsStore::new`] are independent of it and are mostly useful
/// as scratch targets for loading a file.
#[derive(Debug, Default)]
pub struct SettingsStore {
    settings: Mutex<HashMap<String, String>>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared store, creating it on first use.
    ///
    /// Callers racing on the first access block until the store is fully
    /// constructed and then all receive the same reference. The store lives
    /// until the process exits.
    pub fn instance() -> &'static SettingsStore {
        GLOBAL.get_or_init(|| {
            debug!("initialising global settings store");
            SettingsStore::new()
        })
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        trace!(key = %key, "set setting");
        self.settings.lock().insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Result<String, SettingsError> {
        self.settings
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| SettingsError::NotFound(key.to_owned()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.settings.lock().contains_key(key)
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.settings.lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.settings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.lock().is_empty()
    }

    pub fn clear(&self) {
        self.settings.lock().clear();
    }

    /// Copy of every entry, ordered by key
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.settings
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Writes every entry to `path` as `key=value` lines, truncating the file.
    /// Returns the number of entries written.
    ///
    /// Fails with [`SettingsError::Unrepresentable`] before the file is touched if
    /// any key or value contains a line break.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<usize, SettingsError> {
        let path = path.as_ref();
        let snapshot = self.savable_snapshot()?;
        let mut writer = BufWriter::new(File::create(path)?);
        let entries = write_entries(&mut writer, &snapshot)?;
        writer.flush()?;

        debug!(path = %path.display(), entries, "saved settings");
        Ok(entries)
    }

    /// Merges the entries stored at `path` into this store, overwriting keys that
    /// already exist. Returns the number of entries read.
    ///
    /// The whole file is parsed before anything is inserted, so a malformed line
    /// leaves the store untouched.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<usize, SettingsError> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(SettingsError::FileNotFound(path.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        };
        let entries = self.read_from(BufReader::new(file))?;

        debug!(path = %path.display(), entries, "loaded settings");
        Ok(entries)
    }

    /// Nothing is written if any entry is unrepresentable, see [`Self::save_to_file`].
    pub fn write_to<W: Write>(&self, writer: W) -> Result<usize, SettingsError> {
        let snapshot = self.savable_snapshot()?;
        write_entries(writer, &snapshot)
    }

    fn savable_snapshot(&self) -> Result<BTreeMap<String, String>, SettingsError> {
        let snapshot = self.snapshot();
        let has_line_break = |s: &str| s.contains(['\n', '\r']);
        if let Some(key) = snapshot
            .iter()
            .find(|(k, v)| has_line_break(k.as_str()) || has_line_break(v.as_str()))
            .map(|(k, _)| k.clone())
        {
            warn!(key = ?key, "setting contains a line break");
            return Err(SettingsError::Unrepresentable { key });
        }
        Ok(snapshot)
    }

    pub fn read_from<R: BufRead>(&self, reader: R) -> Result<usize, SettingsError> {
        let mut parsed = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            parsed.push(parse_line(index + 1, &line)?);
        }

        let entries = parsed.len();
        self.settings.lock().extend(parsed);
        Ok(entries)
    }
}

fn write_entries<W: Write>(
    mut writer: W,
    entries: &BTreeMap<String, String>,
) -> Result<usize, SettingsError> {
    for (key, value) in entries {
        writeln!(writer, "{key}={value}")?;
    }
    Ok(entries.len())
}

// Splits on the first `=` only, a key containing `=` cannot be represented.
fn parse_line(line_number: usize, line: &str) -> Result<(String, String), SettingsError> {
    match line.split_once('=') {
        Some((key, value)) => Ok((key.to_owned(), value.to_owned())),
        None => {
            warn!(line = line_number, "settings line has no `=` separator");
            Err(SettingsError::Parse {
                line: line_number,
                content: line.to_owned(),
            })
        }
    }
}
