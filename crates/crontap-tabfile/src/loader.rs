//! File loading with format dispatch on extension.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::entry::JobEntry;
use crate::error::TabError;
use crate::{crontab, yaml};

/// Load job entries from a file.
///
/// `.yaml` and `.yml` files are parsed as a YAML list; anything else
/// as classic crontab text.
pub fn load_path(path: &Path) -> Result<Vec<JobEntry>, TabError> {
    let content = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let entries = if is_yaml {
        yaml::parse(&content)?
    } else {
        crontab::parse(&content)?
    };

    debug!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write as _;

    #[test]
    fn plain_file_is_parsed_as_crontab() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "@daily echo hi").unwrap();

        let entries = load_path(file.path()).unwrap();
        assert_eq!(entries[0].spec, "@daily");
        assert_eq!(entries[0].cmd, "echo hi");
    }

    #[test]
    fn yaml_extension_switches_format() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        writeln!(file, "- spec: \"@daily\"\n  cmd: echo hi").unwrap();

        let entries = load_path(file.path()).unwrap();
        assert_eq!(
            entries,
            vec![JobEntry {
                spec: "@daily".into(),
                cmd: "echo hi".into(),
            }]
        );
    }

    #[test]
    fn yml_extension_counts_too() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "- spec: \"@hourly\"\n  cmd: /opt/rotate.sh").unwrap();

        let entries = load_path(file.path()).unwrap();
        assert_eq!(entries[0].spec, "@hourly");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_path(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, TabError::Io(_)));
    }
}
