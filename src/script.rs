use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use crate::command::TextEdit;
use crate::document::Document;
use crate::receiver::TextBuffer;

/// One line of an edit script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Edit(TextEdit),
    Undo,
    Redo,
    Clear,
    Print,
    Status,
    Unknown(String),
}

impl Step {
    /// Parse one script line. Blank lines and `#` comments give `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        if let Some(rest) = trimmed.strip_prefix("type ") {
            return Some(Step::Edit(TextEdit::type_text(unquote(rest))));
        }
        if let Some(rest) = trimmed.strip_prefix("delete ") {
            return Some(Step::Edit(TextEdit::delete_last(unquote(rest))));
        }
        if let Some(rest) = trimmed.strip_prefix("insert ") {
            return Some(match split_position(rest) {
                Some((idx, text)) => Step::Edit(TextEdit::insert(idx, text)),
                None => Step::Unknown(trimmed.to_string()),
            });
        }
        if let Some(rest) = trimmed.strip_prefix("remove ") {
            return Some(match split_position(rest) {
                Some((idx, text)) => Step::Edit(TextEdit::remove(idx, text)),
                None => Step::Unknown(trimmed.to_string()),
            });
        }

        match trimmed {
            "undo" | "u" => Some(Step::Undo),
            "redo" | "r" => Some(Step::Redo),
            "clear" => Some(Step::Clear),
            "print" | "p" => Some(Step::Print),
            "status" => Some(Step::Status),
            _ => Some(Step::Unknown(trimmed.to_string())),
        }
    }
}

/// Strip one pair of surrounding double quotes, keeping inner whitespace
fn unquote(arg: &str) -> String {
    let arg = arg.trim();
    arg.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(arg)
        .to_string()
}

/// Split `<idx> <text>`
fn split_position(args: &str) -> Option<(usize, String)> {
    let (idx, text) = args.trim().split_once(' ')?;
    let idx = idx.parse::<usize>().ok()?;
    Some((idx, unquote(text)))
}

/// Run every line of `input` against `doc`, writing buffer dumps and problems to `out`.
///
/// Rejected edits and unknown lines are reported and skipped; only I/O errors stop the run.
pub fn run<I: BufRead, W: Write>(
    doc: &mut Document<TextBuffer>,
    input: I,
    out: &mut W,
) -> io::Result<()> {
    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        let Some(step) = Step::parse(&line) else {
            continue;
        };

        let result = match step {
            Step::Edit(edit) => doc.execute(edit),
            Step::Undo => doc.undo().map(|_| ()),
            Step::Redo => doc.redo().map(|_| ()),
            Step::Clear => {
                doc.clear();
                Ok(())
            }
            Step::Print => {
                writeln!(out, "{}", doc.receiver().text())?;
                Ok(())
            }
            Step::Status => {
                writeln!(
                    out,
                    "undo: {} redo: {}",
                    doc.history_depth(),
                    doc.future_depth()
                )?;
                Ok(())
            }
            Step::Unknown(text) => {
                warn!(line = lineno + 1, text = %text, "unknown script line");
                writeln!(out, "line {}: unknown command: {}", lineno + 1, text)?;
                Ok(())
            }
        };

        if let Err(err) = result {
            writeln!(out, "line {}: {}", lineno + 1, err)?;
        }
    }

    info!(
        undo = doc.history_depth(),
        redo = doc.future_depth(),
        "script finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_steps() {
        assert_eq!(Step::parse("undo"), Some(Step::Undo));
        assert_eq!(Step::parse("u"), Some(Step::Undo));
        assert_eq!(Step::parse("redo"), Some(Step::Redo));
        assert_eq!(Step::parse("clear"), Some(Step::Clear));
        assert_eq!(Step::parse("print"), Some(Step::Print));
        assert_eq!(Step::parse("status"), Some(Step::Status));
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(Step::parse(""), None);
        assert_eq!(Step::parse("   "), None);
        assert_eq!(Step::parse("# a comment"), None);
    }

    #[test]
    fn test_parse_quoted_text_keeps_spaces() {
        assert_eq!(
            Step::parse("type \"Hello, \""),
            Some(Step::Edit(TextEdit::type_text("Hello, ")))
        );
        assert_eq!(
            Step::parse("delete World!"),
            Some(Step::Edit(TextEdit::delete_last("World!")))
        );
    }

    #[test]
    fn test_parse_positional() {
        assert_eq!(
            Step::parse("insert 3 \" x\""),
            Some(Step::Edit(TextEdit::insert(3, " x")))
        );
        assert_eq!(
            Step::parse("remove 0 abc"),
            Some(Step::Edit(TextEdit::remove(0, "abc")))
        );
        assert_eq!(
            Step::parse("insert x abc"),
            Some(Step::Unknown("insert x abc".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Step::parse("foobar"), Some(Step::Unknown("foobar".to_string())));
    }

    #[test]
    fn test_run_script() {
        let script = "\
type \"Hello, \"
type World!
print
undo
print
redo
delete World!
print
undo
print
status
";
        let mut doc = Document::new(TextBuffer::new());
        let mut out = Vec::new();
        run(&mut doc, script.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "Hello, World!\nHello, \nHello, \nHello, World!\nundo: 2 redo: 1\n"
        );
    }

    #[test]
    fn test_run_reports_rejections_and_continues() {
        let script = "type abc\ndelete xyz\nbogus\nprint\n";
        let mut doc = Document::new(TextBuffer::new());
        let mut out = Vec::new();
        run(&mut doc, script.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("line 2: command 'delete \"xyz\"' was rejected"));
        assert_eq!(lines[1], "line 3: unknown command: bogus");
        assert_eq!(lines[2], "abc");
    }
}
