//! Panic-free helpers for the desktop.
//!
//! Chat titles are cut from arbitrary user text, so truncation counts
//! characters, never bytes. A panic inside one window's content should not
//! take the whole desktop down either.

/// Keep the first `max_chars` characters, appending `...` when anything was cut.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_pos, _)) => format!("{}...", &s[..byte_pos]),
        None => s.to_string(),
    }
}

/// Run a closure, catching any panic. Returns the closure result on success,
/// or `fallback` on panic.
pub fn catch_or<T>(label: &str, fallback: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(val) => val,
        Err(_) => {
            log::error!("caught panic while drawing {}, recovered", label);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_chars("hello", 30), "hello");
        assert_eq!(truncate_chars("", 30), "");
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        assert_eq!(truncate_chars(text, 30), "abcdefghijklmnopqrstuvwxyz0123...");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "中文中文中文";
        assert_eq!(truncate_chars(text, 4), "中文中文...");
        assert_eq!(truncate_chars(text, 6), text);
    }

    #[test]
    fn test_catch_or() {
        assert_eq!(catch_or("ok", 0, || 7), 7);
        assert_eq!(catch_or("boom", 1, || -> i32 { panic!("boom") }), 1);
    }
}
