//! Content limits and validation for questions, answers, and comments.
//!
//! The edge service validates in its own request layer; these checks run
//! again at the core boundary so no caller can persist malformed content.

use crate::error::CoreError;
use crate::search::normalize_tag_name;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum question title length in characters.
pub const MAX_TITLE_LENGTH: usize = 150;

/// Maximum number of tags on a question.
pub const MAX_TAGS_PER_QUESTION: usize = 5;

/// Maximum tag name length in characters, after normalization.
pub const MAX_TAG_NAME_LENGTH: usize = 35;

/// Maximum comment length in characters.
pub const MAX_COMMENT_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a question title: non-blank, at most [`MAX_TITLE_LENGTH`] characters.
pub fn validate_question_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(
            "question title must not be empty".to_string(),
        ));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "question title must be <= {MAX_TITLE_LENGTH} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate a question body: non-blank.
pub fn validate_question_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation(
            "question body must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate a question's tag list.
///
/// A question carries between 1 and [`MAX_TAGS_PER_QUESTION`] tags. Each
/// name must be non-blank and at most [`MAX_TAG_NAME_LENGTH`] characters
/// once normalized (trimmed, lowercased). Duplicate names are allowed here;
/// the tag store collapses them on resolution.
pub fn validate_question_tags(tags: &[String]) -> Result<(), CoreError> {
    if tags.is_empty() || tags.len() > MAX_TAGS_PER_QUESTION {
        return Err(CoreError::Validation(format!(
            "a question must have between 1 and {MAX_TAGS_PER_QUESTION} tags, got {}",
            tags.len()
        )));
    }
    for raw in tags {
        let name = normalize_tag_name(raw);
        if name.is_empty() {
            return Err(CoreError::Validation(
                "tag names must not be blank".to_string(),
            ));
        }
        let len = name.chars().count();
        if len > MAX_TAG_NAME_LENGTH {
            return Err(CoreError::Validation(format!(
                "tag name '{name}' must be <= {MAX_TAG_NAME_LENGTH} characters, got {len}"
            )));
        }
    }
    Ok(())
}

/// Validate an answer body: non-blank.
pub fn validate_answer_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation(
            "answer body must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate a comment body: non-blank, at most [`MAX_COMMENT_LENGTH`] characters.
pub fn validate_comment_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation(
            "comment body must not be empty".to_string(),
        ));
    }
    let len = body.chars().count();
    if len > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "comment body must be <= {MAX_COMMENT_LENGTH} characters, got {len}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
