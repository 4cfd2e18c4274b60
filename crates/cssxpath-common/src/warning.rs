//! Compiler warnings with colored terminal output.
//!
//! Each `(component, message)` pair is printed at most once until
//! [`clear_warnings`] is called, so a selector list that repeats the same
//! bad member produces one line on stderr.

use std::collections::HashSet;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

type Seen = HashSet<(String, String)>;

/// Warnings already printed, keyed by component and message.
static SEEN: LazyLock<Mutex<Seen>> = LazyLock::new(|| Mutex::new(HashSet::new()));

/// A poisoned lock only means another thread panicked mid-insert; the set
/// itself is still usable.
fn seen() -> MutexGuard<'static, Seen> {
    SEEN.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Print `message` for `component` to stderr, unless the same pair was
/// already reported.
///
/// # Example
/// ```
/// use cssxpath_common::warning::{has_warned, warn_once};
///
/// warn_once("selector", "skipped `a:hover`: unsupported pseudo-class");
/// assert!(has_warned("selector", "skipped `a:hover`: unsupported pseudo-class"));
/// ```
pub fn warn_once(component: &str, message: &str) {
    let first_time = seen().insert((component.to_string(), message.to_string()));
    if first_time {
        eprintln!("{}", format!("[cssxpath {component}] ⚠ {message}").yellow());
    }
}

/// Whether [`warn_once`] has reported this exact pair since the last
/// [`clear_warnings`].
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    seen().contains(&(component.to_string(), message.to_string()))
}

/// Forget every recorded warning. The CLI calls this between inputs so each
/// selector gets its own diagnostics.
pub fn clear_warnings() {
    seen().clear();
}
