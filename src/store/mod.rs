mod profile;

pub use profile::ProfileStore;

use serde::{Deserialize, Serialize};

/// A single cookie as the profile stores it. Only `domain` matters for usage
/// counting; the rest is carried so purges can rewrite the file faithfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    pub domain: String,
    #[serde(default = "default_cookie_path")]
    pub path: String,
}

fn default_cookie_path() -> String {
    "/".to_string()
}

/// A local-storage file and the domain it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageAssociation {
    pub path: std::path::PathBuf,
    pub domain: String,
}

/// Source and sink of per-site browser data.
///
/// Reads never fail: an unavailable store looks empty. Purges are assumed to
/// succeed and report nothing back.
pub trait SiteDataStore {
    fn cookies(&self) -> Vec<CookieRecord>;

    fn local_storage_files(&self) -> Vec<StorageAssociation>;

    /// Remove every cookie and storage file belonging to `domain`.
    fn purge_domain(&mut self, domain: &str);

    /// Remove data for every domain the store does not protect.
    fn purge_all_except_allowlisted(&mut self);
}

/// Strip a single leading "." from a cookie domain.
pub fn normalize_domain(domain: &str) -> &str {
    domain.strip_prefix('.').unwrap_or(domain)
}
