use super::*;

#[test]
fn five_field_line() {
    let entries = parse("*/5 * * * * /usr/bin/uptime >> /tmp/up.log").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].spec, "*/5 * * * *");
    assert_eq!(entries[0].cmd, "/usr/bin/uptime >> /tmp/up.log");
}

#[test]
fn six_field_line() {
    let entries = parse("0 30 9 * * Mon /opt/report.sh").unwrap();
    assert_eq!(entries[0].spec, "0 30 9 * * Mon");
    assert_eq!(entries[0].cmd, "/opt/report.sh");
}

#[test]
fn shorthand_line() {
    let entries = parse("@daily /usr/local/bin/backup --full").unwrap();
    assert_eq!(entries[0].spec, "@daily");
    assert_eq!(entries[0].cmd, "/usr/local/bin/backup --full");
}

#[test]
fn comments_and_blanks_skipped() {
    let content = "# morning batch\n\n   \n@hourly echo hi\n# trailing note\n";
    let entries = parse(content).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].cmd, "echo hi");
}

#[test]
fn five_fields_when_sixth_token_is_the_command() {
    let entries = parse("* * * * * reboot-check").unwrap();
    assert_eq!(entries[0].spec, "* * * * *");
    assert_eq!(entries[0].cmd, "reboot-check");
}

#[test]
fn six_fields_preferred_when_they_parse() {
    let entries = parse("* * * * * * echo every-second").unwrap();
    assert_eq!(entries[0].spec, "* * * * * *");
    assert_eq!(entries[0].cmd, "echo every-second");
}

#[test]
fn unparsable_sixth_token_falls_back_to_five_fields() {
    let entries = parse("* * * * * echo hi").unwrap();
    assert_eq!(entries[0].spec, "* * * * *");
    assert_eq!(entries[0].cmd, "echo hi");
}

#[test]
fn command_whitespace_preserved() {
    let entries = parse("@daily echo 'a  b'").unwrap();
    assert_eq!(entries[0].cmd, "echo 'a  b'");
}

#[test]
fn missing_command_is_malformed() {
    let err = parse("* * * * *").unwrap_err();
    assert!(matches!(err, TabError::Malformed { line: 1, .. }));
}

#[test]
fn short_line_is_malformed() {
    assert!(matches!(
        parse("* * *"),
        Err(TabError::Malformed { line: 1, .. })
    ));
}

#[test]
fn line_numbers_count_raw_lines() {
    let err = parse("# header\n\n* *\n").unwrap_err();
    assert!(matches!(err, TabError::Malformed { line: 3, .. }));
}

#[test]
fn spec_grammar_is_not_validated_here() {
    // "99" is no valid minute; shape-wise the line is still fine.
    let entries = parse("99 * * * * echo out-of-range").unwrap();
    assert_eq!(entries[0].spec, "99 * * * *");
}

#[test]
fn multiple_lines_keep_order() {
    let content = "@hourly echo one\n*/2 * * * * echo two\n";
    let entries = parse(content).unwrap();
    let cmds: Vec<_> = entries.iter().map(|e| e.cmd.as_str()).collect();
    assert_eq!(cmds, ["echo one", "echo two"]);
}
