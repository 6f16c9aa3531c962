use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::{normalize_domain, CookieRecord, SiteDataStore, StorageAssociation};

pub const COOKIES_FILE: &str = "cookies.json";
pub const LOCAL_STORAGE_FILE: &str = "localstorage.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Site data kept in a profile directory as two JSON index files plus the
/// storage files the local-storage index points at.
#[derive(Debug)]
pub struct ProfileStore {
    root: PathBuf,
    allowlist: Vec<String>,
    dry_run: bool,
    cookies: Vec<CookieRecord>,
    /// Storage file path (as written in the index) -> domain.
    storage: BTreeMap<String, String>,
}

impl ProfileStore {
    pub fn open(root: &Path, allowlist: &[String], dry_run: bool) -> Self {
        let cookies = read_or_default(&root.join(COOKIES_FILE));
        let storage = read_or_default(&root.join(LOCAL_STORAGE_FILE));

        let allowlist = allowlist
            .iter()
            .map(|d| normalize_domain(d.trim()).to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();

        Self {
            root: root.to_path_buf(),
            allowlist,
            dry_run,
            cookies,
            storage,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_allowlisted(&self, domain: &str) -> bool {
        let domain = normalize_domain(domain);
        self.allowlist.iter().any(|a| a.eq_ignore_ascii_case(domain))
    }

    fn resolve(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Cookie domains reach `doomed` normalized, storage domains as written in
    /// the index, matching how `aggregate` keys each mode.
    fn purge_where(&mut self, doomed: impl Fn(&str) -> bool) {
        let cookies_before = self.cookies.len();
        self.cookies.retain(|c| !doomed(normalize_domain(&c.domain)));
        let cookies_removed = cookies_before - self.cookies.len();

        let doomed_files: Vec<String> = self
            .storage
            .iter()
            .filter(|(_, domain)| doomed(domain))
            .map(|(path, _)| path.clone())
            .collect();

        for raw in &doomed_files {
            self.storage.remove(raw);
            if self.dry_run {
                continue;
            }
            let path = self.resolve(raw);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove storage file");
                }
            }
        }

        tracing::info!(
            cookies = cookies_removed,
            storage_files = doomed_files.len(),
            dry_run = self.dry_run,
            "purged site data"
        );

        if !self.dry_run {
            if let Err(e) = self.persist(cookies_removed > 0, !doomed_files.is_empty()) {
                tracing::warn!(error = %e, "failed to rewrite profile index");
            }
        }
    }

    /// Rewrite only the index files a purge changed. An index that failed to
    /// load is held empty, never changes, and so is never overwritten.
    fn persist(&self, cookies_changed: bool, storage_changed: bool) -> Result<(), StoreError> {
        if cookies_changed {
            write_json(&self.root.join(COOKIES_FILE), &self.cookies)?;
        }
        if storage_changed {
            write_json(&self.root.join(LOCAL_STORAGE_FILE), &self.storage)?;
        }
        Ok(())
    }
}

impl SiteDataStore for ProfileStore {
    fn cookies(&self) -> Vec<CookieRecord> {
        self.cookies.clone()
    }

    fn local_storage_files(&self) -> Vec<StorageAssociation> {
        self.storage
            .iter()
            .map(|(raw, domain)| StorageAssociation {
                path: self.resolve(raw),
                domain: domain.clone(),
            })
            .collect()
    }

    fn purge_domain(&mut self, domain: &str) {
        tracing::debug!(domain, "purging domain");
        self.purge_where(|d| d == domain);
    }

    fn purge_all_except_allowlisted(&mut self) {
        tracing::debug!(allowlist = ?self.allowlist, "purging all non-allowlisted domains");
        let allowlist = self.allowlist.clone();
        self.purge_where(|d| {
            let d = normalize_domain(d);
            !allowlist.iter().any(|a| a.eq_ignore_ascii_case(d))
        });
    }
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match read_json(path) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "treating profile file as empty");
            T::default()
        }
    }
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&text).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let text = serde_json::to_string_pretty(value).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, text).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
