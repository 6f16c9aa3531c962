use std::path::Path;

/// Size in bytes of the file at `path`, or `None` when it is missing,
/// unreadable, or not a regular file.
pub fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path)
        .ok()
        .filter(std::fs::Metadata::is_file)
        .map(|m| m.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_file_size_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty");
        File::create(&path).unwrap();
        assert_eq!(file_size(&path), Some(0));
    }

    #[test]
    fn test_file_size_with_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.sqlite");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"hello world").unwrap();
        assert_eq!(file_size(&path), Some(11));
    }

    #[test]
    fn test_file_size_directory_is_unknown() {
        let dir = tempdir().unwrap();
        assert_eq!(file_size(dir.path()), None);
    }

    #[test]
    fn test_file_size_nonexistent() {
        assert_eq!(file_size(Path::new("/nonexistent/path/12345")), None);
    }
}
