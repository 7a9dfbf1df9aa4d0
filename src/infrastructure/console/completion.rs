//! Command completion detection.
//!
//! The console API is fire-and-forget: input goes in, an append-only text
//! buffer comes out, and nothing tells us when a command finished or how it
//! exited. Every submitted command therefore gets a trailing
//! `echo <sentinel> $?` and completion is detected by scanning the output
//! tail for the sentinel plus the status the shell interpolated.

use std::sync::atomic::{AtomicU64, Ordering};

// The submitted echo splits the token into two adjacent shell strings
// ("__pawgit""_done_..."), so the console's echo of the typed input line
// never contains the contiguous token. Only the executed echo prints it.
const MARKER_HEAD: &str = "__pawgit";

static MARKER_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique per-invocation completion marker.
///
/// Uniqueness matters: a stale sentinel left in the buffer by an earlier
/// command must never satisfy a later wait.
#[derive(Debug, Clone)]
pub struct CompletionMarker {
    token: String,
    tail: String,
}

impl CompletionMarker {
    /// Create a marker with a fresh nonce.
    pub fn new() -> Self {
        let sequence = MARKER_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Utc::now().timestamp_millis();
        let tail = format!("_done_{millis:x}_{sequence:x}");
        Self {
            token: format!("{MARKER_HEAD}{tail}"),
            tail,
        }
    }

    /// The exact string searched for in console output.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Wrap a command line so its completion and exit status become
    /// observable in the output stream.
    pub fn wrap(&self, command: &str) -> String {
        format!("{command} ; echo \"{MARKER_HEAD}\"\"{} $?\"", self.tail)
    }
}

impl Default for CompletionMarker {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of scanning an output suffix for a completion marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionSignal<'a> {
    /// The sentinel has not (fully) appeared yet; poll again.
    Pending,
    /// The command finished. `output` is the text that accumulated before
    /// the sentinel line.
    Finished { exit_code: i32, output: &'a str },
}

/// Scan an output suffix for the completion marker.
///
/// Returns [`CompletionSignal::Pending`] unless the marker, one space and a
/// fully terminated digit run are all present. A digit run touching the end
/// of the buffer stays pending, because the rest of a multi-digit status may
/// still be in flight.
pub fn detect_completion<'a>(
    suffix: &'a str,
    marker: &CompletionMarker,
) -> CompletionSignal<'a> {
    let Some(position) = suffix.find(marker.token()) else {
        return CompletionSignal::Pending;
    };

    let after = &suffix[position + marker.token().len()..];
    let Some(after) = after.strip_prefix(' ') else {
        return CompletionSignal::Pending;
    };

    let bytes = after.as_bytes();
    let mut digit_count = 0;
    while digit_count < bytes.len() && bytes[digit_count].is_ascii_digit() {
        digit_count += 1;
    }

    if digit_count == 0 || digit_count == bytes.len() {
        return CompletionSignal::Pending;
    }

    match after[..digit_count].parse::<i32>() {
        Ok(exit_code) => CompletionSignal::Finished {
            exit_code,
            output: &suffix[..position],
        },
        Err(_) => CompletionSignal::Pending,
    }
}

/// Slice `output` from a byte offset, backing up to the nearest character
/// boundary when the recorded baseline no longer falls on one.
pub fn suffix_from(output: &str, baseline: usize) -> &str {
    if baseline >= output.len() {
        return "";
    }
    let mut start = baseline;
    while start > 0 && !output.is_char_boundary(start) {
        start -= 1;
    }
    &output[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_unique() {
        let first = CompletionMarker::new();
        let second = CompletionMarker::new();
        assert_ne!(first.token(), second.token());
    }

    #[test]
    fn test_wrapped_command_shape() {
        let marker = CompletionMarker::new();
        let wrapped = marker.wrap("git pull origin main");
        assert!(wrapped.starts_with("git pull origin main ; echo \"__pawgit\"\""));
        assert!(wrapped.ends_with(" $?\""));
    }

    #[test]
    fn test_echoed_input_never_contains_the_token() {
        let marker = CompletionMarker::new();
        let wrapped = marker.wrap("git pull origin main");
        // The console echoes the typed line back verbatim; the split string
        // trick keeps the contiguous token out of it.
        assert!(!wrapped.contains(marker.token()));
    }

    #[test]
    fn test_detect_pending_without_marker() {
        let marker = CompletionMarker::new();
        assert_eq!(
            detect_completion("some ordinary output\r\n", &marker),
            CompletionSignal::Pending
        );
        assert_eq!(detect_completion("", &marker), CompletionSignal::Pending);
    }

    #[test]
    fn test_detect_finished_with_zero_status() {
        let marker = CompletionMarker::new();
        let transcript = format!(
            "remote: Counting objects done.\r\nAlready up to date.\r\n{} 0\r\n$ ",
            marker.token()
        );

        match detect_completion(&transcript, &marker) {
            CompletionSignal::Finished { exit_code, output } => {
                assert_eq!(exit_code, 0);
                assert!(output.contains("Already up to date."));
                assert!(!output.contains(marker.token()));
            }
            CompletionSignal::Pending => panic!("expected Finished"),
        }
    }

    #[test]
    fn test_detect_finished_with_nonzero_status() {
        let marker = CompletionMarker::new();
        let transcript = format!("fatal: not a git repository\r\n{} 128\r\n", marker.token());

        match detect_completion(&transcript, &marker) {
            CompletionSignal::Finished { exit_code, .. } => assert_eq!(exit_code, 128),
            CompletionSignal::Pending => panic!("expected Finished"),
        }
    }

    #[test]
    fn test_partial_sentinel_stays_pending() {
        let marker = CompletionMarker::new();

        // Marker present but nothing after it yet.
        let transcript = marker.token().to_string();
        assert_eq!(detect_completion(&transcript, &marker), CompletionSignal::Pending);

        // Space but no digits yet.
        let transcript = format!("{} ", marker.token());
        assert_eq!(detect_completion(&transcript, &marker), CompletionSignal::Pending);

        // Digits touching the end of the buffer: the status may be cut in
        // half between polls, so this must not resolve yet.
        let transcript = format!("{} 12", marker.token());
        assert_eq!(detect_completion(&transcript, &marker), CompletionSignal::Pending);

        // Next poll delivers the rest of the line.
        let transcript = format!("{} 127\r\n", marker.token());
        match detect_completion(&transcript, &marker) {
            CompletionSignal::Finished { exit_code, .. } => assert_eq!(exit_code, 127),
            CompletionSignal::Pending => panic!("expected Finished"),
        }
    }

    #[test]
    fn test_stale_marker_from_previous_command_is_ignored() {
        let previous = CompletionMarker::new();
        let current = CompletionMarker::new();
        let transcript = format!("old output\r\n{} 0\r\n", previous.token());

        assert_eq!(detect_completion(&transcript, &current), CompletionSignal::Pending);
    }

    #[test]
    fn test_suffix_from_clamps_and_respects_char_boundaries() {
        assert_eq!(suffix_from("abcdef", 2), "cdef");
        assert_eq!(suffix_from("abc", 10), "");

        // Baseline landing inside a multi-byte character backs up to its
        // start instead of panicking.
        let text = "aあb";
        let inside = 2; // middle of あ (3 bytes starting at 1)
        assert_eq!(suffix_from(text, inside), "あb");
    }
}
