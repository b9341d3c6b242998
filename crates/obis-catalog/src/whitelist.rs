//! DOI whitelist: one identifier per line, `#` comments and blank lines ignored.

use std::path::Path;

use crate::types::{CatalogError, CatalogResult};

/// Parse whitelist text into identifiers, preserving file order.
pub fn parse_whitelist(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Load the whitelist file. A missing whitelist is an error: there is
/// nothing to harvest without it.
pub fn load_whitelist(path: &Path) -> CatalogResult<Vec<String>> {
    if !path.exists() {
        return Err(CatalogError::MissingFile(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(parse_whitelist(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_blank_and_one_id() {
        let ids = parse_whitelist("# curated products\n\n10.5281/zenodo.1234\n");
        assert_eq!(ids, vec!["10.5281/zenodo.1234".to_string()]);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let ids = parse_whitelist("  10.1/a  \r\n\t\n   # indented comment\n10.1/b");
        assert_eq!(ids, vec!["10.1/a".to_string(), "10.1/b".to_string()]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_whitelist(&dir.path().join("whitelist.txt")).unwrap_err();
        assert!(matches!(err, CatalogError::MissingFile(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whitelist.txt");
        std::fs::write(&path, "10.1/a\n#10.1/skipped\n10.1/b\n").unwrap();
        assert_eq!(load_whitelist(&path).unwrap().len(), 2);
    }
}
