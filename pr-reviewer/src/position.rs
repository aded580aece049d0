//! Diff position mapping.
//!
//! Review APIs that address comments by *position* expect the 1-based count
//! of diff lines since a hunk header, not a file line number. This module
//! walks a file's unified-diff patch and converts a new-file line number into
//! that offset.
//!
//! Model-suggested line numbers are occasionally off by a small amount
//! relative to the final diff representation, so when no exact match exists
//! the mapper falls back to the closest added/context line within
//! [`LINE_TOLERANCE`] lines. The fallback is a best-effort approximation,
//! not exact semantics; a hard failure would silently drop legitimate
//! feedback.

/// Maximum absolute distance (in new-file lines) for the nearest-line
/// fallback. Heuristic; targets further away are reported unmappable.
pub const LINE_TOLERANCE: u32 = 5;

/// Maps a new-file line number to its position within `patch`.
///
/// Position semantics: the counter resets to 0 at every `@@` hunk header and
/// increments for each subsequent diff line (deletions and `\ No newline`
/// markers included). Added (`+`) and context lines each consume one
/// new-file line number, seeded from the hunk header's new-start value;
/// deletions consume none and are therefore never mappable.
///
/// Returns the earliest exact match across hunks, then the nearest
/// added/context line within [`LINE_TOLERANCE`], then `None`.
pub fn map_line_to_position(patch: &str, target_line: u32) -> Option<u32> {
    let mut position: u32 = 0;
    let mut new_line: u32 = 0;
    let mut in_hunk = false;
    // Nearest fallback candidate: (distance, position), earliest wins ties.
    let mut closest: Option<(u32, u32)> = None;

    for line in patch.lines() {
        if line.starts_with("@@") {
            in_hunk = true;
            position = 0;
            if let Some(start) = parse_new_start(line) {
                new_line = start.saturating_sub(1);
            }
            continue;
        }

        if !in_hunk {
            // Skip any prelude (file headers) before the first '@@'.
            continue;
        }

        position += 1;

        // Deletions exist only in the old file; marker lines
        // ("\ No newline at end of file") are not content at all.
        if line.starts_with('-') || line.starts_with('\\') {
            continue;
        }

        // '+' and context lines both consume a new-file line number.
        new_line += 1;

        if new_line == target_line {
            return Some(position);
        }

        let distance = new_line.abs_diff(target_line);
        if closest.map_or(true, |(d, _)| distance < d) {
            closest = Some((distance, position));
        }
    }

    closest.and_then(|(distance, pos)| (distance <= LINE_TOLERANCE).then_some(pos))
}

/// Extracts the new-file start line from a hunk header like
/// `@@ -10,4 +10,7 @@` (the length part may be absent: `@@ -3 +3 @@`).
fn parse_new_start(header: &str) -> Option<u32> {
    let after_plus = header.split_once('+')?.1;
    let digits: String = after_plus
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = "@@ -10,4 +10,7 @@\n unchanged\n+first added\n+second added\n unchanged tail";

    #[test]
    fn exact_match_on_added_line() {
        // New-file numbering starts at 10: context=10, +=11, +=12, context=13.
        // Positions count every line after the header.
        assert_eq!(map_line_to_position(BASIC, 12), Some(3));
        assert_eq!(map_line_to_position(BASIC, 11), Some(2));
    }

    #[test]
    fn exact_match_on_context_line() {
        assert_eq!(map_line_to_position(BASIC, 10), Some(1));
        assert_eq!(map_line_to_position(BASIC, 13), Some(4));
    }

    #[test]
    fn deletions_do_not_consume_new_lines() {
        let patch = "@@ -1,3 +1,2 @@\n keep\n-dropped\n keep too";
        // New lines: keep=1 (pos 1), keep too=2 (pos 3). The deletion holds
        // position 2 but no new-file line.
        assert_eq!(map_line_to_position(patch, 1), Some(1));
        assert_eq!(map_line_to_position(patch, 2), Some(3));
    }

    #[test]
    fn deletion_only_patch_is_unmappable() {
        let patch = "@@ -1,2 +1,0 @@\n-gone\n-also gone";
        // No added/context lines at all: no fallback, not even at distance 0.
        assert_eq!(map_line_to_position(patch, 1), None);
        assert_eq!(map_line_to_position(patch, 2), None);
    }

    #[test]
    fn nearest_line_fallback_within_tolerance() {
        // Lines 10..=13 are present; 15 is 2 away from 13 → fallback to 13's
        // position. 20 is 7 away → unmappable.
        assert_eq!(map_line_to_position(BASIC, 15), Some(4));
        assert_eq!(map_line_to_position(BASIC, 20), None);
    }

    #[test]
    fn fallback_prefers_earliest_on_ties() {
        // Target 3 sits between lines 2 and 4, both at distance 1; the
        // earlier candidate (line 2, position 2 in the first hunk) wins over
        // line 4 (position 1 in the second hunk).
        let patch = "@@ -1,2 +1,2 @@\n one\n two\n@@ -4,1 +4,1 @@\n four";
        assert_eq!(map_line_to_position(patch, 3), Some(2));
    }

    #[test]
    fn position_resets_per_hunk() {
        let patch = "@@ -1,2 +1,2 @@\n a\n+b\n@@ -10,2 +10,2 @@\n c\n+d";
        // Second hunk: c=10 (pos 1), d=11 (pos 2).
        assert_eq!(map_line_to_position(patch, 11), Some(2));
    }

    #[test]
    fn earliest_exact_match_across_hunks_wins() {
        // Both hunks claim new-file line 5; the first hunk's match returns
        // immediately.
        let patch = "@@ -5,1 +5,1 @@\n+five\n@@ -5,1 +5,1 @@\n+five again";
        assert_eq!(map_line_to_position(patch, 5), Some(1));
    }

    #[test]
    fn marker_lines_count_position_but_not_content() {
        let patch = "@@ -1,1 +1,2 @@\n old\n+new last\n\\ No newline at end of file";
        assert_eq!(map_line_to_position(patch, 2), Some(2));
        // The marker occupies position 3 but consumes no line number, so
        // target 3 resolves via the nearest-line fallback to line 2.
        assert_eq!(map_line_to_position(patch, 3), Some(2));
    }

    #[test]
    fn empty_patch_is_unmappable() {
        assert_eq!(map_line_to_position("", 1), None);
    }

    #[test]
    fn file_header_prelude_is_ignored() {
        let patch = "--- a/f.rs\n+++ b/f.rs\n@@ -1,1 +1,1 @@\n+only";
        assert_eq!(map_line_to_position(patch, 1), Some(1));
    }

    #[test]
    fn hunk_header_without_lengths() {
        let patch = "@@ -3 +3 @@\n+third";
        assert_eq!(map_line_to_position(patch, 3), Some(1));
    }
}
