//! Integration tests for deduplicated diagnostics.

use triage_common::warning::{clear_warnings, warn_once};

#[test]
fn test_warn_once_deduplicates_and_clears() {
    assert!(warn_once("CSS", "not yet categorized: @counter-style"));
    assert!(!warn_once("CSS", "not yet categorized: @counter-style"));

    // Same message from another component is a different key
    assert!(warn_once("Picker", "not yet categorized: @counter-style"));

    clear_warnings();
    assert!(warn_once("CSS", "not yet categorized: @counter-style"));
}
