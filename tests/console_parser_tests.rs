//! Argument vector tests

use device_console::console::parser::{Args, MAX_TOKENS};

#[test]
fn test_parse_simple_command() {
    let args = Args::parse("status");
    assert_eq!(args.command(), "status");
    assert_eq!(args.argc(), 1);
    assert_eq!(args.argv(1), None);
}

#[test]
fn test_parse_command_with_args() {
    let args = Args::parse("settings set wifi_ssid shack");
    assert_eq!(args.command(), "settings");
    assert_eq!(args.argc(), 4);
    assert_eq!(args.argv(1), Some("set"));
    assert_eq!(args.argv(2), Some("wifi_ssid"));
    assert_eq!(args.argv(3), Some("shack"));
    assert_eq!(args.argv(4), None);
}

#[test]
fn test_parse_trims_whitespace() {
    let args = Args::parse("  log   level\t*  e  ");
    assert_eq!(args.iter().collect::<Vec<_>>(), ["log", "level", "*", "e"]);
}

#[test]
fn test_parse_empty_line() {
    let args = Args::parse("   ");
    assert!(args.is_empty());
    assert_eq!(args.command(), "");
    assert_eq!(args.argc(), 0);
}

#[test]
fn test_overflow_is_counted_not_stored() {
    let line = "a b c d e f g h i j";
    let args = Args::parse(line);

    assert_eq!(args.argc(), 10);
    assert_eq!(args.iter().count(), MAX_TOKENS);
    assert_eq!(args.argv(MAX_TOKENS - 1), Some("h"));
    assert_eq!(args.argv(MAX_TOKENS), None);
}

#[test]
fn test_from_tokens_matches_parse() {
    let args = Args::from_tokens(&["log", "level", "wifi", "debug"]);
    assert_eq!(args.argc(), 4);
    assert_eq!(args.command(), "log");
    assert_eq!(args.argv(3), Some("debug"));
}
