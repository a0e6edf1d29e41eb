//! Optional ASCII-art banner shown above the title.

use std::path::Path;

/// Banner lines, right-trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub lines: Vec<String>,
}

impl Banner {
    /// Load the banner if the file exists. Never fails: a missing or
    /// unreadable file means no banner.
    #[must_use]
    pub fn load_optional(path: &Path) -> Option<Self> {
        if !path.exists() {
            tracing::info!("No banner found at {:?}, skipping display", path);
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => {
                let lines: Vec<String> = content.lines().map(|l| l.trim_end().to_string()).collect();
                if lines.iter().all(|l| l.is_empty()) {
                    tracing::info!("Banner at {:?} is empty, skipping display", path);
                    return None;
                }
                tracing::info!("Banner loaded successfully ({} lines)", lines.len());
                Some(Self { lines })
            }
            Err(e) => {
                tracing::warn!("Failed to read banner {:?}: {}, skipping display", path, e);
                None
            }
        }
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_banner_is_none() {
        let dir = tempdir().expect("tempdir");
        assert!(Banner::load_optional(&dir.path().join("flood_banner.txt")).is_none());
    }

    #[test]
    fn test_banner_loads_lines() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("flood_banner.txt");
        std::fs::write(&path, "  ~~~~  \n ~~~~~~\n").expect("write");

        let banner = Banner::load_optional(&path).expect("banner");
        assert_eq!(banner.lines, vec!["  ~~~~".to_string(), " ~~~~~~".to_string()]);
        assert_eq!(banner.height(), 2);
    }

    #[test]
    fn test_unreadable_banner_is_none() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("flood_banner.txt");
        std::fs::write(&path, [0xffu8, 0xfe, 0x00]).expect("write");
        assert!(Banner::load_optional(&path).is_none());

        // A directory in place of the file cannot be read either.
        let as_dir = dir.path().join("banner_dir");
        std::fs::create_dir(&as_dir).expect("mkdir");
        assert!(Banner::load_optional(&as_dir).is_none());
    }
}
