//! Session lifecycle: debounced re-runs, list swapping and change ranges.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use brace_outline::{
    CSharpClassifier, OutlineConfig, OutlineSession, RegionKind, SnapshotVersion, TextEdit,
    TextRange, TextSnapshot, Token, classify_text,
};

const QUIET: Duration = Duration::from_millis(100);

fn config() -> OutlineConfig {
    OutlineConfig::default().with_debounce(QUIET)
}

fn snapshot(version: u32, text: &str) -> TextSnapshot {
    TextSnapshot::new(SnapshotVersion(version), text)
}

#[test]
fn test_first_refresh_reports_all_regions() {
    let v0 = snapshot(0, "class A\n{\n    // a\n    // b\n}\n");
    let session = OutlineSession::new(CSharpClassifier, config(), v0.clone());

    let changed = session.refresh(&v0).expect("regions appeared");
    let list = session.regions();
    assert_eq!(list.len(), 2);
    assert_eq!(changed.version, SnapshotVersion(0));
    assert_eq!(changed.range, list.regions()[0].range);
    assert_eq!(list.session(), session.id());
}

#[test]
fn test_unchanged_text_reports_nothing() {
    let v0 = snapshot(0, "void F()\n{\n}\n");
    let session = OutlineSession::new(CSharpClassifier, config(), v0.clone());
    session.refresh(&v0);

    let v1 = snapshot(1, "void F()\n{\n}\n");
    assert!(session.refresh(&v1).is_none());
    assert_eq!(session.regions().version(), SnapshotVersion(1));
}

#[test]
fn test_edit_shifting_regions_reports_only_new_region() {
    let before = "void F()\n{\n}\n";
    let inserted = "// x\n// y\n";
    let after = format!("{inserted}{before}");

    let v0 = snapshot(0, before);
    let session = OutlineSession::new(CSharpClassifier, config(), v0.clone());
    session.refresh(&v0);

    let now = Instant::now();
    session.edit(
        TextEdit::insert(0.into(), (inserted.len() as u32).into()),
        now,
    );
    let v1 = snapshot(1, &after);
    let changed = session.refresh(&v1).expect("comment appeared");

    // the block only moved; the comment is the change
    let binding = session.regions();
    let comment = &binding.regions()[0];
    assert_eq!(comment.kind, RegionKind::Comment);
    assert_eq!(changed.range, comment.range);
}

#[test]
fn test_poll_waits_for_quiet_period() {
    let v0 = snapshot(0, "");
    let session = OutlineSession::new(CSharpClassifier, config(), v0);

    let start = Instant::now();
    let v1 = snapshot(1, "// a\n// b\n");
    session.edit(TextEdit::insert(0.into(), 10.into()), start);
    session.edit(TextEdit::insert(0.into(), 0.into()), start + QUIET / 2);

    assert!(session.poll(&v1, start + QUIET).is_none());
    assert!(session.regions().is_empty());

    let changed = session.poll(&v1, start + QUIET * 2);
    assert!(changed.is_some());
    assert_eq!(session.regions().len(), 1);

    // consumed; a later poll does nothing
    assert!(session.poll(&v1, start + QUIET * 10).is_none());
}

#[test]
fn test_regions_in_lines() {
    let text = "class A\n{\n    void F()\n    {\n    }\n\n    void G()\n    {\n    }\n}\n";
    let v0 = snapshot(0, text);
    let session = OutlineSession::new(CSharpClassifier, config(), v0.clone());
    session.refresh(&v0);

    let hits: Vec<_> = session
        .regions_in_lines(6, 7)
        .iter()
        .map(|r| r.start_line)
        .collect();
    assert_eq!(hits, [0, 6]);
}

#[test]
fn test_custom_classifier_closure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let classifier = move |snapshot: &TextSnapshot| -> Vec<Token> {
        counter.fetch_add(1, Ordering::Relaxed);
        classify_text(snapshot.text())
    };

    let v0 = snapshot(0, "{\n}\n");
    let session = OutlineSession::new(classifier, config(), v0.clone());
    session.refresh(&v0);
    session.refresh(&v0);

    assert_eq!(calls.load(Ordering::Relaxed), 2);
    assert_eq!(session.regions().len(), 1);
}

#[test]
fn test_hover_falls_back_after_text_moves_on() {
    let v0 = snapshot(0, "void F()\n{\n    a();\n}\n");
    let session = OutlineSession::new(CSharpClassifier, config(), v0.clone());
    session.refresh(&v0);

    let list = session.regions();
    let block = &list.regions()[0];
    let live = session.hover(block, &v0);
    assert!(!live.fallback);
    assert_eq!(live.text, "{\n    a();\n}");

    let v1 = snapshot(1, "");
    let stale = session.hover(block, &v1);
    assert!(stale.fallback);
    assert!(stale.text.contains("a();"));
}

#[test]
fn test_change_range_covers_removed_region() {
    let v0 = snapshot(0, "// a\n// b\nint x;\n");
    let session = OutlineSession::new(CSharpClassifier, config(), v0.clone());
    session.refresh(&v0);

    session.edit(
        TextEdit::delete(TextRange::new(0.into(), 10.into())),
        Instant::now(),
    );
    let v1 = snapshot(1, "int x;\n");
    let changed = session.refresh(&v1).expect("comment disappeared");
    assert_eq!(changed.range, TextRange::empty(0.into()));
    assert!(session.regions().is_empty());
}
