//! YAML job list parsing.

use crate::entry::JobEntry;
use crate::error::TabError;

/// Parse a YAML list of `{spec, cmd}` mappings into job entries.
pub fn parse(content: &str) -> Result<Vec<JobEntry>, TabError> {
    Ok(serde_yml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_of_mappings() {
        let content = r#"
- spec: "*/10 * * * *"
  cmd: echo ten
- spec: "@hourly"
  cmd: /opt/rotate.sh
"#;
        let entries = parse(content).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].spec, "*/10 * * * *");
        assert_eq!(entries[1].cmd, "/opt/rotate.sh");
    }

    #[test]
    fn extra_keys_are_ignored() {
        let content = "- spec: \"@daily\"\n  cmd: echo hi\n  comment: nightly\n";
        let entries = parse(content).unwrap();
        assert_eq!(entries[0].cmd, "echo hi");
    }

    #[test]
    fn missing_cmd_is_an_error() {
        let err = parse("- spec: \"@daily\"\n").unwrap_err();
        assert!(matches!(err, TabError::Yaml(_)));
    }

    #[test]
    fn empty_list_is_fine() {
        assert!(parse("[]").unwrap().is_empty());
    }
}
