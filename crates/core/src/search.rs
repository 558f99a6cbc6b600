//! Search query parsing and matching for question listings.
//!
//! A query mixes bracketed tag tokens (`[react]`) with free-text words
//! (`async await`). Parsing and matching are pure; the service layer applies
//! [`SearchQuery::matches`] over an already-ordered question list, so
//! filtering never reorders results.

use std::sync::LazyLock;

use regex::Regex;

/// Regex pattern matching one bracketed tag token, e.g. `[react]`.
///
/// The capture group is the token body; an empty pair `[]` captures the
/// empty string, which can match no tag.
pub const TAG_TOKEN_PATTERN: &str = r"\[([^\]]*)\]";

/// Compiled tag-token regex. Compiled once, reused forever.
static TAG_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TAG_TOKEN_PATTERN).expect("valid regex"));

/// Normalize a tag name: trim whitespace and lowercase.
///
/// Shared by the tag store (names are persisted in this form) and by query
/// parsing, so tag matching is case-insensitive everywhere by construction.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A parsed search query: tag tokens and word tokens, both normalized to
/// lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    tag_tokens: Vec<String>,
    word_tokens: Vec<String>,
}

impl SearchQuery {
    /// Parse a raw query string.
    ///
    /// Tag tokens are the bracketed fragments (`[React]` → `react`); word
    /// tokens are what remains once bracket expressions are removed, split
    /// on whitespace with empty tokens discarded.
    pub fn parse(raw: &str) -> Self {
        let tag_tokens = TAG_TOKEN_RE
            .captures_iter(raw)
            .map(|caps| normalize_tag_name(&caps[1]))
            .collect();

        let word_tokens = TAG_TOKEN_RE
            .replace_all(raw, " ")
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        Self {
            tag_tokens,
            word_tokens,
        }
    }

    /// True when the query holds neither tag nor word tokens
    /// (empty or whitespace-only input).
    pub fn is_empty(&self) -> bool {
        self.tag_tokens.is_empty() && self.word_tokens.is_empty()
    }

    /// Extracted tag tokens, in query order.
    pub fn tag_tokens(&self) -> &[String] {
        &self.tag_tokens
    }

    /// Extracted word tokens, in query order.
    pub fn word_tokens(&self) -> &[String] {
        &self.word_tokens
    }

    /// Tag filter: the question has at least one tag AND every tag token
    /// matches one of its tags. Matching is a full-name, case-insensitive
    /// comparison — never a substring match.
    pub fn matches_tags(&self, tag_names: &[&str]) -> bool {
        if tag_names.is_empty() {
            return false;
        }
        self.tag_tokens.iter().all(|token| {
            tag_names
                .iter()
                .any(|name| name.to_lowercase() == *token)
        })
    }

    /// Word filter: any word token appears as a case-insensitive substring
    /// of the title or the body.
    pub fn matches_words(&self, title: &str, body: &str) -> bool {
        let title = title.to_lowercase();
        let body = body.to_lowercase();
        self.word_tokens
            .iter()
            .any(|word| title.contains(word.as_str()) || body.contains(word.as_str()))
    }

    /// Combined filter:
    /// - both token kinds present → tag filter OR word filter (union);
    /// - only tag tokens → tag filter;
    /// - only word tokens → word filter;
    /// - neither → everything passes.
    pub fn matches(&self, tag_names: &[&str], title: &str, body: &str) -> bool {
        match (self.tag_tokens.is_empty(), self.word_tokens.is_empty()) {
            (true, true) => true,
            (false, true) => self.matches_tags(tag_names),
            (true, false) => self.matches_words(title, body),
            (false, false) => self.matches_tags(tag_names) || self.matches_words(title, body),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // -- parse ---------------------------------------------------------------

    #[test]
    fn parse_single_tag_token() {
        let q = SearchQuery::parse("[react]");
        assert_eq!(q.tag_tokens(), tokens(&["react"]));
        assert!(q.word_tokens().is_empty());
    }

    #[test]
    fn parse_multiple_tag_tokens() {
        let q = SearchQuery::parse("[react] [typescript]");
        assert_eq!(q.tag_tokens(), tokens(&["react", "typescript"]));
        assert!(q.word_tokens().is_empty());
    }

    #[test]
    fn parse_words_only() {
        let q = SearchQuery::parse("async await");
        assert!(q.tag_tokens().is_empty());
        assert_eq!(q.word_tokens(), tokens(&["async", "await"]));
    }

    #[test]
    fn parse_mixed_tags_and_words() {
        let q = SearchQuery::parse("shared [javascript] state");
        assert_eq!(q.tag_tokens(), tokens(&["javascript"]));
        assert_eq!(q.word_tokens(), tokens(&["shared", "state"]));
    }

    #[test]
    fn parse_lowercases_tokens() {
        let q = SearchQuery::parse("[React] Async");
        assert_eq!(q.tag_tokens(), tokens(&["react"]));
        assert_eq!(q.word_tokens(), tokens(&["async"]));
    }

    #[test]
    fn parse_trims_tag_token_whitespace() {
        let q = SearchQuery::parse("[ react ]");
        assert_eq!(q.tag_tokens(), tokens(&["react"]));
    }

    #[test]
    fn parse_empty_brackets_keep_empty_token() {
        let q = SearchQuery::parse("[]");
        assert_eq!(q.tag_tokens(), tokens(&[""]));
        assert!(q.word_tokens().is_empty());
    }

    #[test]
    fn parse_empty_query() {
        assert!(SearchQuery::parse("").is_empty());
    }

    #[test]
    fn parse_whitespace_only_query() {
        assert!(SearchQuery::parse("   ").is_empty());
    }

    #[test]
    fn parse_brackets_do_not_leak_into_words() {
        let q = SearchQuery::parse("wide[react]gap");
        assert_eq!(q.tag_tokens(), tokens(&["react"]));
        assert_eq!(q.word_tokens(), tokens(&["wide", "gap"]));
    }

    // -- tag filter ----------------------------------------------------------

    #[test]
    fn tag_filter_requires_every_token() {
        let q = SearchQuery::parse("[react] [typescript]");
        assert!(!q.matches_tags(&["react"]));
        assert!(q.matches_tags(&["react", "typescript"]));
    }

    #[test]
    fn tag_filter_allows_extra_tags_on_question() {
        let q = SearchQuery::parse("[react]");
        assert!(q.matches_tags(&["react", "redux", "hooks"]));
    }

    #[test]
    fn tag_filter_fails_questions_without_tags() {
        let q = SearchQuery::parse("[react]");
        assert!(!q.matches_tags(&[]));
    }

    #[test]
    fn tag_filter_is_case_insensitive() {
        let q = SearchQuery::parse("[REACT]");
        assert!(q.matches_tags(&["react"]));
    }

    #[test]
    fn tag_filter_matches_full_names_not_substrings() {
        let q = SearchQuery::parse("[java]");
        assert!(!q.matches_tags(&["javascript"]));
        assert!(q.matches_tags(&["java"]));
    }

    #[test]
    fn tag_filter_unknown_token_matches_nothing() {
        let q = SearchQuery::parse("[react] [emberjs]");
        assert!(!q.matches_tags(&["react", "typescript"]));
    }

    // -- word filter ---------------------------------------------------------

    #[test]
    fn word_filter_any_token_suffices() {
        let q = SearchQuery::parse("borrow checker");
        assert!(q.matches_words("Fighting the borrow rules", ""));
        assert!(q.matches_words("", "my checker complains"));
    }

    #[test]
    fn word_filter_substring_match() {
        let q = SearchQuery::parse("async");
        assert!(q.matches_words("Asynchronous runtimes compared", ""));
    }

    #[test]
    fn word_filter_case_insensitive_in_title_and_body() {
        let q = SearchQuery::parse("TOKIO");
        assert!(q.matches_words("tokio tasks", ""));
        assert!(q.matches_words("", "Scheduling in Tokio"));
    }

    #[test]
    fn word_filter_no_match() {
        let q = SearchQuery::parse("python");
        assert!(!q.matches_words("Rust lifetimes", "struct ownership"));
    }

    // -- combined matching ---------------------------------------------------

    #[test]
    fn empty_query_matches_everything() {
        let q = SearchQuery::parse("  ");
        assert!(q.matches(&[], "anything", "at all"));
    }

    #[test]
    fn tags_only_uses_tag_filter() {
        let q = SearchQuery::parse("[react]");
        assert!(q.matches(&["react"], "unrelated", "unrelated"));
        assert!(!q.matches(&["vue"], "react is in the title", ""));
    }

    #[test]
    fn words_only_uses_word_filter() {
        let q = SearchQuery::parse("reducer");
        assert!(q.matches(&[], "My reducer misbehaves", ""));
        assert!(!q.matches(&["reducer"], "state update", "no match here"));
    }

    #[test]
    fn tags_and_words_combine_as_union() {
        // Tag filter matches the first question only; word filter matches
        // the second only. Both must be kept.
        let q = SearchQuery::parse("[javascript] async");
        assert!(q.matches(&["javascript"], "Promise chains", "no keyword"));
        assert!(q.matches(&["rust"], "Why is my loop async?", ""));
        assert!(!q.matches(&["rust"], "Blocking loop", "plain body"));
    }

    #[test]
    fn empty_bracket_pair_defeats_tag_filter() {
        let q = SearchQuery::parse("[]");
        assert!(!q.matches(&["react"], "title", "body"));
    }
}
