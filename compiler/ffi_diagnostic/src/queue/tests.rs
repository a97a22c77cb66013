use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

fn warning(msg: &str) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E2001).with_message(msg)
}

fn note(msg: &str) -> Diagnostic {
    Diagnostic::note(ErrorCode::E2008).with_message(msg)
}

#[test]
fn counts_by_severity() {
    let mut queue = DiagnosticQueue::new();
    queue.push(warning("w"));
    queue.push(note("n"));
    queue.push(Diagnostic::error(ErrorCode::E3001).with_message("e"));

    assert_eq!(queue.warning_count(), 1);
    assert_eq!(queue.error_count(), 1);
    assert!(queue.has_errors());
}

#[test]
fn keeps_report_order() {
    let mut queue = DiagnosticQueue::new();
    queue.extend([warning("b"), note("in b"), warning("a"), note("in a")]);
    let messages: Vec<_> = queue.flush().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, ["b", "in b", "a", "in a"]);
}

#[test]
fn duplicates_are_dropped_with_their_notes() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        limit: 0,
        deduplicate: true,
    });
    assert!(queue.push(warning("same")));
    assert!(queue.push(note("first context")));
    assert!(!queue.push(warning("same")));
    assert!(!queue.push(note("second context")));

    assert_eq!(queue.warning_count(), 1);
    assert_eq!(queue.peek().count(), 2);
}

#[test]
fn limit_stops_collection() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        limit: 2,
        deduplicate: false,
    });
    queue.push(warning("1"));
    queue.push(warning("2"));
    assert!(!queue.push(warning("3")));
    assert_eq!(queue.warning_count(), 2);
}

#[test]
fn duplicates_are_kept_by_default() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.push(warning("same")));
    assert!(queue.push(warning("same")));
    assert_eq!(queue.warning_count(), 2);
}

#[test]
fn flush_resets_state() {
    let mut queue = DiagnosticQueue::new();
    queue.push(warning("w"));
    assert_eq!(queue.flush().len(), 1);
    assert!(queue.is_empty());
    assert_eq!(queue.warning_count(), 0);
    assert!(queue.push(warning("w")));
}
