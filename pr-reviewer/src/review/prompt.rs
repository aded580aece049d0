//! Evaluation prompt builder.
//!
//! Deterministic, pure: identical input produces identical prompt text.
//! Keep the rubric and the line-number rules here — the publisher can only
//! attach comments to lines that exist on the new side of the diff, so the
//! prompt has to steer the model away from deleted lines up front.

use std::fmt::Write as _;

use crate::errors::EvaluationError;
use crate::git_providers::types::FileDiff;

/// Marker rendered in place of a missing patch (binary/oversized files).
const NO_PATCH_MARKER: &str = "No patch available";

/// Renders the full evaluation request for the given file diffs.
///
/// # Errors
/// [`EvaluationError::NoFilesToEvaluate`] when `files` is empty — evaluation
/// must not be attempted against no content.
pub fn build_evaluation_prompt(files: &[FileDiff]) -> Result<String, EvaluationError> {
    if files.is_empty() {
        return Err(EvaluationError::NoFilesToEvaluate);
    }

    let mut files_text = String::new();
    for file in files {
        let patch = if file.patch.is_empty() {
            NO_PATCH_MARKER
        } else {
            file.patch.as_str()
        };
        let _ = write!(
            files_text,
            "\nFile: {}\nStatus: {}\nChanges:\n{}\n---\n",
            file.filename, file.status, patch
        );
    }

    let mut s = String::new();
    s.push_str(
        "You are an expert code reviewer. Analyze the following Pull Request changes and provide a detailed evaluation.\n",
    );
    s.push_str("\nPR Files and Changes:\n");
    s.push_str(&files_text);
    s.push_str(
        "\nEvaluate this PR based on the following criteria and provide your response in valid JSON format:\n\n",
    );
    s.push_str(
        "1. **Summary**: Provide a comprehensive summary of what this PR does, the approach taken, and overall quality assessment (2-4 sentences)\n\n",
    );
    s.push_str(
        "2. **Creativity Score (0-10)**: Rate the creativity and innovation in the solution\n\
         \x20  - 0-3: Basic/mundane implementation, no creative problem-solving\n\
         \x20  - 4-6: Standard approach with some thoughtful decisions\n\
         \x20  - 7-8: Creative solution with innovative patterns or techniques\n\
         \x20  - 9-10: Exceptional creativity, novel approach that elegantly solves complex problems\n\n",
    );
    s.push_str(
        "3. **Efficiency Score (0-10)**: Rate the code efficiency and performance considerations\n\
         \x20  - 0-3: Inefficient code, performance issues, poor algorithm choices\n\
         \x20  - 4-6: Acceptable efficiency, standard implementations\n\
         \x20  - 7-8: Well-optimized code, good algorithm choices, considers performance\n\
         \x20  - 9-10: Highly optimized, excellent performance considerations, minimal resource usage\n\n",
    );
    s.push_str(
        "4. **Edge Case Handling Score (0-10)**: Rate how well edge cases and error scenarios are handled\n\
         \x20  - 0-3: No edge case handling, likely to break with unexpected input\n\
         \x20  - 4-6: Basic error handling, covers common cases\n\
         \x20  - 7-8: Good coverage of edge cases, proper validation and error handling\n\
         \x20  - 9-10: Comprehensive edge case handling, defensive programming, handles all scenarios\n\n",
    );
    s.push_str(
        "5. **Review Comments**: **CRITICAL INSTRUCTIONS FOR LINE NUMBERS**\n\n\
         \x20  You must ONLY comment on lines that are in the diff (marked with '+' at the start).\n\n\
         \x20  For each issue, look at the patch and find a line that starts with '+' that contains the problematic code.\n\
         \x20  Use that EXACT line's number.\n\n\
         \x20  Example patch:\n\
         \x20  ```\n\
         \x20  @@ -10,4 +10,7 @@\n\
         \x20   const greeting = \"hello\";\n\
         \x20  -const x = 1;\n\
         \x20  +const count = 0;\n\
         \x20  +const isActive = true;\n\
         \x20   return greeting;\n\
         \x20  ```\n\n\
         \x20  In this example:\n\
         \x20  - Line 11 in new file: `const count = 0;` (this is a + line, you CAN comment on this)\n\
         \x20  - Line 12 in new file: `const isActive = true;` (this is a + line, you CAN comment on this)\n\
         \x20  - Line 10: `const greeting = \"hello\";` (this is a context line with space, SKIP THIS)\n\
         \x20  - Line 13: `return greeting;` (this is a context line, SKIP THIS)\n\n\
         \x20  Each comment must include:\n\
         \x20  - path: The file path exactly as shown\n\
         \x20  - line: The line number of a '+' line from the patch (NEW file line number)\n\
         \x20  - body: The constructive comment text\n\n\
         \x20  **DO NOT comment on:**\n\
         \x20  - Lines that start with ' ' (space) - these are unchanged context lines\n\
         \x20  - Lines that start with '-' - these are deleted lines\n\
         \x20  - Lines that are not in the patch at all\n\n\
         \x20  If the code is excellent with no issues, return an empty array.\n\n",
    );
    s.push_str(
        "**IMPORTANT**: Return ONLY valid JSON in exactly this format, no additional text:\n\
         {\n\
         \x20 \"summary\": \"your detailed summary here\",\n\
         \x20 \"creativity_score\": 7,\n\
         \x20 \"efficiency_score\": 8,\n\
         \x20 \"edge_case_handling_score\": 6,\n\
         \x20 \"review_comments\": [\n\
         \x20   {\n\
         \x20     \"path\": \"src/example.rs\",\n\
         \x20     \"line\": 11,\n\
         \x20     \"body\": \"Consider adding validation for count to ensure it's non-negative\"\n\
         \x20   }\n\
         \x20 ]\n\
         }\n\n",
    );
    s.push_str(
        "FINAL WARNING: Each line number MUST be from a line that starts with '+' in the patch. Verify each line number before including it.",
    );

    Ok(s)
}
