use clap::Parser;
use std::path::PathBuf;

use crate::usage::DisplayMode;

#[derive(Parser, Debug, Clone)]
#[command(name = "site-sweep")]
#[command(about = "Review and clear per-site cookies and local storage in a browser profile")]
#[command(version)]
pub struct Args {
    /// What to list per site
    #[arg(short = 'm', long, value_enum, default_value_t = DisplayMode::Cookies)]
    pub mode: DisplayMode,

    /// Profile directory holding cookies.json and localstorage.json
    #[arg(short = 'd', long)]
    pub profile: Option<PathBuf>,

    /// Domains kept by "remove all" (comma-separated)
    #[arg(short = 'a', long, value_delimiter = ',')]
    pub allow: Option<Vec<String>>,

    /// Start with this search filter applied
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// JSON file with translated display strings
    #[arg(long)]
    pub strings: Option<PathBuf>,

    /// Print the list as JSON and exit (non-interactive)
    #[arg(long)]
    pub json: bool,

    /// Remove all non-allowlisted site data before printing
    #[arg(long, requires = "json")]
    pub remove_all: bool,

    /// Never modify the profile on disk
    #[arg(long)]
    pub dry_run: bool,

    /// Log file (default: site-sweep.log in the temp directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn effective_profile(&self) -> PathBuf {
        self.profile.clone().unwrap_or_else(|| {
            dirs::data_dir().map_or_else(
                || PathBuf::from("."),
                |dir| dir.join("site-sweep").join("profile"),
            )
        })
    }

    pub fn effective_allowlist(&self) -> Vec<String> {
        self.allow.clone().unwrap_or_default()
    }

    pub fn effective_log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("site-sweep.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("site-sweep").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.mode, DisplayMode::Cookies);
        assert!(!args.json);
        assert!(!args.dry_run);
        assert!(args.effective_allowlist().is_empty());
    }

    #[test]
    fn test_mode_storage_and_alias() {
        assert_eq!(parse(&["-m", "storage"]).mode, DisplayMode::LocalStorage);
        assert_eq!(
            parse(&["--mode", "local-storage"]).mode,
            DisplayMode::LocalStorage
        );
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert!(Args::try_parse_from(["site-sweep", "--mode", "history"]).is_err());
    }

    #[test]
    fn test_allowlist_is_comma_separated() {
        let args = parse(&["--allow", "a.com,b.org"]);
        assert_eq!(args.effective_allowlist(), vec!["a.com", "b.org"]);
    }

    #[test]
    fn test_effective_profile_custom() {
        let args = parse(&["-d", "/custom/profile"]);
        assert_eq!(args.effective_profile(), PathBuf::from("/custom/profile"));
    }

    #[test]
    fn test_effective_profile_default() {
        let args = parse(&[]);
        let profile = args.effective_profile();
        assert!(profile.ends_with("site-sweep/profile") || profile == PathBuf::from("."));
    }

    #[test]
    fn test_effective_log_file() {
        assert!(parse(&[]).effective_log_file().ends_with("site-sweep.log"));
        assert_eq!(
            parse(&["--log-file", "/tmp/x.log"]).effective_log_file(),
            PathBuf::from("/tmp/x.log")
        );
    }

    #[test]
    fn test_remove_all_requires_json() {
        assert!(Args::try_parse_from(["site-sweep", "--remove-all"]).is_err());
        assert!(parse(&["--json", "--remove-all"]).remove_all);
    }
}
