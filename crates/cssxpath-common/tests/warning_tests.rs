//! Integration tests for the warning system.

use cssxpath_common::warning::{has_warned, warn_once};

#[test]
fn test_warn_once_records_message() {
    warn_once("test", "recorded message");
    assert!(has_warned("test", "recorded message"));
}

#[test]
fn test_warning_keys_are_component_scoped() {
    warn_once("alpha", "scoped message");
    assert!(has_warned("alpha", "scoped message"));
    assert!(!has_warned("beta", "scoped message"));
}

#[test]
fn test_unrecorded_message() {
    assert!(!has_warned("test", "never emitted"));
}
