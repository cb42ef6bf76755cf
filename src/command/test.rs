use proptest::prelude::*;

use super::*;
use crate::error::Rejection;
use crate::receiver::{Receiver, TextBuffer};

fn buffer(text: &str) -> TextBuffer {
    TextBuffer::with_text(text)
}

// === TextEdit tests ===

#[test]
fn test_type_apply() {
    let mut buf = buffer("Hello, ");
    let mut cmd = TextEdit::type_text("World!");

    cmd.apply(&mut buf).unwrap();
    assert_eq!(buf.text(), "Hello, World!");
}

#[test]
fn test_type_roundtrip() {
    let mut buf = buffer("Hello, ");
    let mut cmd = TextEdit::type_text("World!");

    cmd.apply(&mut buf).unwrap();
    cmd.reverse(&mut buf).unwrap();
    assert_eq!(buf.text(), "Hello, ");
}

#[test]
fn test_delete_last_rejected_leaves_buffer() {
    let mut buf = buffer("Hello, ");
    let mut cmd = TextEdit::delete_last("World!");

    let err = cmd.apply(&mut buf).unwrap_err();
    assert!(err.reason.contains("World!"));
    assert_eq!(buf.text(), "Hello, ");
}

#[test]
fn test_delete_last_roundtrip() {
    let mut buf = buffer("Hello, World!");
    let mut cmd = TextEdit::delete_last("World!");

    cmd.apply(&mut buf).unwrap();
    assert_eq!(buf.text(), "Hello, ");
    cmd.reverse(&mut buf).unwrap();
    assert_eq!(buf.text(), "Hello, World!");
}

#[test]
fn test_insert_remove_inverse() {
    let insert = TextEdit::insert(3, "abc");
    assert_eq!(insert.inverse(), TextEdit::remove(3, "abc"));
    assert_eq!(insert.inverse().inverse(), insert);
}

#[test]
fn test_positional_roundtrip() {
    let mut buf = buffer("one three");
    let mut cmd = TextEdit::insert(4, "two ");

    cmd.apply(&mut buf).unwrap();
    assert_eq!(buf.text(), "one two three");
    cmd.reverse(&mut buf).unwrap();
    assert_eq!(buf.text(), "one three");
}

#[test]
fn test_reverse_without_apply_is_rejected() {
    // reversing a Type whose text isn't at the end must not mangle the buffer
    let mut buf = buffer("abc");
    let mut cmd = TextEdit::type_text("xyz");

    assert!(cmd.reverse(&mut buf).is_err());
    assert_eq!(buf.text(), "abc");
}

#[test]
fn test_labels() {
    assert_eq!(TextEdit::type_text("hi").label(), "type \"hi\"");
    assert_eq!(TextEdit::remove(2, "x").label(), "remove \"x\" at 2");
}

// === Snapshot-based commands ===

#[test]
fn test_snapshotted_restores_prior_state() {
    let mut buf = buffer("mixed Case");
    let mut cmd: Snapshotted<TextBuffer, _> = Snapshotted::new("uppercase", |b: &mut TextBuffer| {
        let upper = b.text().to_uppercase();
        b.restore(TextBuffer::with_text(upper).snapshot());
        Ok(())
    });

    cmd.apply(&mut buf).unwrap();
    assert_eq!(buf.text(), "MIXED CASE");
    cmd.reverse(&mut buf).unwrap();
    assert_eq!(buf.text(), "mixed Case");
}

#[test]
fn test_snapshotted_rejection_undoes_partial_edit() {
    let mut buf = buffer("abc");
    let mut cmd: Snapshotted<TextBuffer, _> = Snapshotted::new("half done", |b: &mut TextBuffer| {
        b.type_text("def");
        Err(Rejection::new("gave up halfway"))
    });

    assert!(cmd.apply(&mut buf).is_err());
    assert_eq!(buf.text(), "abc");
}

#[test]
fn test_snapshotted_reverse_before_apply() {
    let mut buf = buffer("abc");
    let mut cmd: Snapshotted<TextBuffer, _> = Snapshotted::new("noop", |_: &mut TextBuffer| Ok(()));
    assert!(cmd.reverse(&mut buf).is_err());
    assert_eq!(buf.text(), "abc");
}

#[test]
fn test_snapshotted_recaptures_on_reapply() {
    let mut buf = buffer("a");
    let mut cmd: Snapshotted<TextBuffer, _> = Snapshotted::new("append b", |b: &mut TextBuffer| {
        b.type_text("b");
        Ok(())
    });

    cmd.apply(&mut buf).unwrap();
    cmd.reverse(&mut buf).unwrap();
    buf.type_text("z");
    cmd.apply(&mut buf).unwrap();
    assert_eq!(buf.text(), "azb");
    cmd.reverse(&mut buf).unwrap();
    assert_eq!(buf.text(), "az");
}

#[test]
fn test_restore_command_roundtrip() {
    let checkpoint = buffer("checkpoint").snapshot();
    let mut buf = buffer("current work");
    let mut cmd: Restore<TextBuffer> = Restore::new("revert", checkpoint);

    cmd.apply(&mut buf).unwrap();
    assert_eq!(buf.text(), "checkpoint");
    cmd.reverse(&mut buf).unwrap();
    assert_eq!(buf.text(), "current work");
    assert_eq!(cmd.target().text(), "checkpoint");
}

// === FnCommand ===

#[test]
fn test_fn_command_pair() {
    let mut buf = buffer("x");
    let mut cmd: FnCommand<TextBuffer, _, _> = FnCommand::new(
        "wrap",
        |b: &mut TextBuffer| {
            b.insert(0, "[")?;
            b.type_text("]");
            Ok(())
        },
        |b: &mut TextBuffer| {
            b.delete_last("]")?;
            b.remove(0, "[")
        },
    );

    cmd.apply(&mut buf).unwrap();
    assert_eq!(buf.text(), "[x]");
    cmd.reverse(&mut buf).unwrap();
    assert_eq!(buf.text(), "x");
    assert_eq!(cmd.label(), "wrap");
}

// === Batch ===

#[test]
fn test_batch_applies_in_order_and_reverses_backward() {
    let mut buf = TextBuffer::new();
    let mut batch = Batch::<TextBuffer>::new("greeting")
        .with(TextEdit::type_text("Hello"))
        .with(TextEdit::type_text(", World"))
        .with(TextEdit::insert(0, ">> "));
    assert_eq!(batch.len(), 3);

    batch.apply(&mut buf).unwrap();
    assert_eq!(buf.text(), ">> Hello, World");
    batch.reverse(&mut buf).unwrap();
    assert_eq!(buf.text(), "");
}

#[test]
fn test_batch_apply_is_all_or_nothing() {
    let mut buf = buffer("start");
    let mut batch = Batch::<TextBuffer>::new("broken")
        .with(TextEdit::type_text(" one"))
        .with(TextEdit::type_text(" two"))
        .with(TextEdit::delete_last("missing"));

    assert!(batch.apply(&mut buf).is_err());
    assert_eq!(buf.text(), "start");
}

#[test]
fn test_batch_reverse_failure_reapplies_undone_members() {
    let mut buf = TextBuffer::new();
    let mut batch = Batch::<TextBuffer>::new("mixed")
        .with(TextEdit::type_text("a"))
        .with(FnCommand::<TextBuffer, _, _>::new(
            "stubborn",
            |_: &mut TextBuffer| Ok(()),
            |_: &mut TextBuffer| Err(Rejection::new("cannot go back")),
        ))
        .with(TextEdit::type_text("b"));

    batch.apply(&mut buf).unwrap();
    assert_eq!(buf.text(), "ab");

    let err = batch.reverse(&mut buf).unwrap_err();
    assert_eq!(err.reason, "cannot go back");
    assert_eq!(buf.text(), "ab");
}

#[test]
fn test_batch_failed_rollback_restores_snapshot() {
    let mut buf = TextBuffer::new();
    let mut batch = Batch::<TextBuffer>::new("cannot unwind")
        .with(TextEdit::type_text("a"))
        .with(FnCommand::<TextBuffer, _, _>::new(
            "one way",
            |b: &mut TextBuffer| {
                b.type_text("b");
                Ok(())
            },
            |_: &mut TextBuffer| Err(Rejection::new("no way back")),
        ))
        .with(TextEdit::delete_last("zzz"));

    let err = batch.apply(&mut buf).unwrap_err();
    assert!(err.reason.contains("zzz"));
    assert_eq!(buf.text(), "");
}

#[test]
fn test_batch_failed_reapply_restores_snapshot() {
    let mut applied = false;
    let mut buf = TextBuffer::new();
    let mut batch = Batch::<TextBuffer>::new("fragile")
        .with(TextEdit::type_text("a"))
        .with(FnCommand::<TextBuffer, _, _>::new(
            "stubborn",
            |_: &mut TextBuffer| Ok(()),
            |_: &mut TextBuffer| Err(Rejection::new("cannot go back")),
        ))
        .with(FnCommand::<TextBuffer, _, _>::new(
            "only once",
            move |b: &mut TextBuffer| {
                if applied {
                    return Err(Rejection::new("already used"));
                }
                applied = true;
                b.type_text("c");
                Ok(())
            },
            |b: &mut TextBuffer| b.delete_last("c"),
        ));

    batch.apply(&mut buf).unwrap();
    assert_eq!(buf.text(), "ac");

    let err = batch.reverse(&mut buf).unwrap_err();
    assert_eq!(err.reason, "cannot go back");
    assert_eq!(buf.text(), "ac");
}

#[test]
fn test_empty_batch() {
    let mut buf = buffer("same");
    let mut batch = Batch::<TextBuffer>::new("nothing");
    assert!(batch.is_empty());
    batch.apply(&mut buf).unwrap();
    batch.reverse(&mut buf).unwrap();
    assert_eq!(buf.text(), "same");
}

// === Round-trip law ===

fn text_edit_strategy() -> impl Strategy<Value = (String, TextEdit)> {
    ("[a-zé ]{0,12}", "[a-zé ]{0,6}", 0usize..16).prop_flat_map(|(start, words, idx)| {
        let len = start.chars().count();
        let idx = idx.min(len);
        let existing: String = start.chars().skip(idx).take(3).collect();
        let suffix: String = {
            let n = start.chars().count().min(4);
            start.chars().skip(len - n).collect()
        };
        prop_oneof![
            Just((start.clone(), TextEdit::type_text(words.clone()))),
            Just((start.clone(), TextEdit::delete_last(suffix))),
            Just((start.clone(), TextEdit::insert(idx, words))),
            Just((start, TextEdit::remove(idx, existing))),
        ]
    })
}

proptest! {
    #[test]
    fn prop_apply_then_reverse_is_neutral((start, mut cmd) in text_edit_strategy()) {
        let mut buf = TextBuffer::with_text(start.clone());
        cmd.apply(&mut buf).unwrap();
        cmd.reverse(&mut buf).unwrap();
        prop_assert_eq!(buf.text(), start.as_str());
    }

    #[test]
    fn prop_snapshotted_round_trip(start in "[a-z]{0,12}", extra in "[a-z]{1,6}") {
        let mut buf = TextBuffer::with_text(start.clone());
        let mut cmd: Snapshotted<TextBuffer, _> = Snapshotted::new("replace", move |b: &mut TextBuffer| {
            b.restore(TextBuffer::with_text(extra.clone()).snapshot());
            Ok(())
        });
        cmd.apply(&mut buf).unwrap();
        cmd.reverse(&mut buf).unwrap();
        prop_assert_eq!(buf.text(), start.as_str());
    }
}
