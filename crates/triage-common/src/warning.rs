//! Deduplicated analyzer diagnostics.
//!
//! Stylesheets in a large tree repeat the same uncategorized constructs over and
//! over. Each unique message is logged once per run through the `log` facade.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of messages already logged.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Log a warning about an uncategorized construct, once per unique message.
///
/// Returns `true` when the message was logged, `false` when it had already been
/// seen since the last [`clear_warnings`].
///
/// # Example
/// ```ignore
/// warn_once("CSS", "not yet categorized: @counter-style");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first_time {
        log::warn!("[{component}] {message}");
    }
    first_time
}

/// Forget every recorded warning, so they are logged again.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
