//! Line-level diff generation for edit props
//!
//! Wraps `similar`'s LCS diff and expands it into one [`DiffLine`] per
//! physical line, with independent old/new line counters that only advance
//! for their own side. Never fails; empty inputs yield an empty or
//! all-added/all-removed script.

use crate::types::{DiffLine, DiffLineType};
use similar::{ChangeTag, TextDiff};

/// Split text on line boundaries, discarding the trailing empty segment a
/// final newline produces.
fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Compute a minimal line-level edit script between two text blobs.
pub fn diff_lines(old_text: &str, new_text: &str) -> Vec<DiffLine> {
    let old_lines = split_lines(old_text);
    let new_lines = split_lines(new_text);

    let diff = TextDiff::from_slices(&old_lines, &new_lines);

    let mut script = Vec::new();
    let mut old_no = 1usize;
    let mut new_no = 1usize;

    for change in diff.iter_all_changes() {
        let content = change.value().to_string();
        match change.tag() {
            ChangeTag::Equal => {
                script.push(DiffLine {
                    line_type: DiffLineType::Unchanged,
                    content,
                    old_line_number: Some(old_no),
                    new_line_number: Some(new_no),
                });
                old_no += 1;
                new_no += 1;
            }
            ChangeTag::Delete => {
                script.push(DiffLine {
                    line_type: DiffLineType::Removed,
                    content,
                    old_line_number: Some(old_no),
                    new_line_number: None,
                });
                old_no += 1;
            }
            ChangeTag::Insert => {
                script.push(DiffLine {
                    line_type: DiffLineType::Added,
                    content,
                    old_line_number: None,
                    new_line_number: Some(new_no),
                });
                new_no += 1;
            }
        }
    }

    script
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(script: &[DiffLine], side: DiffLineType) -> String {
        let keep = |line: &&DiffLine| match side {
            DiffLineType::Added => line.new_line_number.is_some(),
            DiffLineType::Removed => line.old_line_number.is_some(),
            DiffLineType::Unchanged => unreachable!(),
        };
        script
            .iter()
            .filter(keep)
            .map(|line| line.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_identical_texts_all_unchanged() {
        let script = diff_lines("a\nb\n", "a\nb\n");
        assert_eq!(script.len(), 2);
        assert!(script
            .iter()
            .all(|line| line.line_type == DiffLineType::Unchanged));
        assert_eq!(script[1].old_line_number, Some(2));
        assert_eq!(script[1].new_line_number, Some(2));
    }

    #[test]
    fn test_single_line_replacement() {
        let script = diff_lines("a\nb\nc\n", "a\nB\nc\n");

        let removed: Vec<_> = script
            .iter()
            .filter(|l| l.line_type == DiffLineType::Removed)
            .collect();
        let added: Vec<_> = script
            .iter()
            .filter(|l| l.line_type == DiffLineType::Added)
            .collect();

        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].content, "b");
        assert_eq!(removed[0].old_line_number, Some(2));
        assert_eq!(removed[0].new_line_number, None);

        assert_eq!(added.len(), 1);
        assert_eq!(added[0].content, "B");
        assert_eq!(added[0].new_line_number, Some(2));
        assert_eq!(added[0].old_line_number, None);
    }

    #[test]
    fn test_counters_advance_independently() {
        let script = diff_lines("a\nb\n", "a\nx\ny\nb\n");

        let added: Vec<_> = script
            .iter()
            .filter(|l| l.line_type == DiffLineType::Added)
            .collect();
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].new_line_number, Some(2));
        assert_eq!(added[1].new_line_number, Some(3));

        // "b" is unchanged: old side stays at 2, new side jumps to 4
        let last = script.last().unwrap();
        assert_eq!(last.line_type, DiffLineType::Unchanged);
        assert_eq!(last.old_line_number, Some(2));
        assert_eq!(last.new_line_number, Some(4));
    }

    #[test]
    fn test_empty_old_is_all_added() {
        let script = diff_lines("", "a\nb\n");
        assert_eq!(script.len(), 2);
        assert!(script
            .iter()
            .all(|line| line.line_type == DiffLineType::Added));
    }

    #[test]
    fn test_empty_new_is_all_removed() {
        let script = diff_lines("a\nb\n", "");
        assert_eq!(script.len(), 2);
        assert!(script
            .iter()
            .all(|line| line.line_type == DiffLineType::Removed));
    }

    #[test]
    fn test_both_empty_is_empty_script() {
        assert!(diff_lines("", "").is_empty());
    }

    #[test]
    fn test_round_trip_reconstruction() {
        let old_text = "fn main() {\n    println!(\"old\");\n}\n";
        let new_text = "fn main() {\n    let x = 1;\n    println!(\"new\");\n}\n";
        let script = diff_lines(old_text, new_text);

        assert_eq!(
            reconstruct(&script, DiffLineType::Added),
            new_text.trim_end_matches('\n')
        );
        assert_eq!(
            reconstruct(&script, DiffLineType::Removed),
            old_text.trim_end_matches('\n')
        );
    }

    #[test]
    fn test_no_trailing_newline_still_diffs() {
        let script = diff_lines("a", "a\nb");
        assert_eq!(script.len(), 2);
        assert_eq!(script[0].line_type, DiffLineType::Unchanged);
        assert_eq!(script[1].line_type, DiffLineType::Added);
    }
}
