//! Isolated test environment with temp directory.

use super::{MdexportCommand, TestRecord};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment: a record source, a working directory, and an
/// empty config home, all inside one temp directory removed on drop.
pub struct TestEnv {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        std::fs::create_dir_all(root.join("config")).expect("Failed to create config home");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Directory exports are written to.
    pub fn working_dir(&self) -> PathBuf {
        self.root.join("exports")
    }

    pub fn source_path(&self) -> PathBuf {
        self.root.join("records.json")
    }

    pub fn config_home(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Writes `records` as the JSON record source and returns its path.
    pub fn write_records(&self, records: &[TestRecord]) -> PathBuf {
        let records: Vec<_> = records.iter().map(TestRecord::to_record).collect();
        let json = serde_json::to_string_pretty(&records).expect("Failed to serialize records");
        let path = self.source_path();
        std::fs::write(&path, json).expect("Failed to write records");
        path
    }

    /// Writes `contents` as `mdexport/config.toml` under the config home.
    pub fn write_config(&self, contents: &str) {
        for dir in [
            self.config_home().join("mdexport"),
            self.config_home().join(".config").join("mdexport"),
        ] {
            std::fs::create_dir_all(&dir).expect("Failed to create config dir");
            std::fs::write(dir.join("config.toml"), contents).expect("Failed to write config");
        }
    }

    /// Writes a file to the environment root and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Names of the files currently in the working directory, sorted.
    pub fn exported_files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.working_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.expect("readable entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn read_export(&self, name: &str) -> String {
        std::fs::read_to_string(self.working_dir().join(name))
            .unwrap_or_else(|e| panic!("Failed to read export {}: {}", name, e))
    }

    /// Creates a command configured for this environment.
    pub fn cmd(&self) -> MdexportCommand {
        MdexportCommand::new()
            .dir(&self.working_dir())
            .config_home(&self.config_home())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
