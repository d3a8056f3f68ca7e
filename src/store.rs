// src/store.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::debug;

use crate::model::FileRecord;

const STORE_VERSION: u32 = 1;

/// On-disk envelope, one JSON file per dataset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatasetFile {
    pub version: u32,
    pub name: String,
    pub repo_path: String,
    pub saved_at: String,
    pub files: Vec<FileRecord>,
}

/// Summary row for listings.
#[derive(Clone, Debug)]
pub struct DatasetInfo {
    pub name: String,
    pub saved_at: String,
    pub file_count: usize,
}

/// Directory of saved datasets. Opened once per process and shared by
/// reference; the engine modules never touch it.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Resolve the dataset directory: REPOHEAT_DATA_DIR wins, otherwise
    /// the platform data dir.
    pub fn open_default() -> Result<Self> {
        if let Ok(dir) = std::env::var("REPOHEAT_DATA_DIR") {
            return Self::open(PathBuf::from(dir));
        }
        let pd = ProjectDirs::from("com", "RepoHeat", "repoheat")
            .context("failed to resolve platform data directory")?;
        Self::open(pd.data_dir().join("datasets"))
    }

    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_name(name)))
    }

    pub fn save(&self, name: &str, repo: &Path, files: &[FileRecord]) -> Result<PathBuf> {
        let saved_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("failed to format timestamp")?;
        let data = DatasetFile {
            version: STORE_VERSION,
            name: name.to_string(),
            repo_path: repo.display().to_string(),
            saved_at,
            files: files.to_vec(),
        };

        let path = self.path_for(name);
        let json = serde_json::to_string_pretty(&data)?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        debug!(dataset = name, path = %path.display(), "saved dataset");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<DatasetFile> {
        let path = self.path_for(name);
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("no saved dataset '{}' at {}", name, path.display()))?;
        let data: DatasetFile = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        if data.version != STORE_VERSION {
            bail!(
                "dataset '{}' has unsupported store version {}",
                name,
                data.version
            );
        }
        Ok(data)
    }

    pub fn list(&self) -> Result<Vec<DatasetInfo>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read {}", self.dir.display()))?;

        let mut out = Vec::new();
        for ent in entries {
            let ent = match ent {
                Ok(e) => e,
                Err(_) => continue,
            };
            let path = ent.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .ok()
                .and_then(|raw| serde_json::from_str::<DatasetFile>(&raw).ok());
            match parsed {
                Some(d) => out.push(DatasetInfo {
                    name: d.name,
                    saved_at: d.saved_at,
                    file_count: d.files.len(),
                }),
                None => debug!(path = %path.display(), "skipping unreadable dataset file"),
            }
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}

/// Filename-safe dataset key.
fn sanitize_name(name: &str) -> String {
    let trimmed = name.trim();
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        "dataset".to_string()
    } else {
        out
    }
}
