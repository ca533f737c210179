/*!
 * Override blocks at the start of event text.
 *
 * An override block is the `{\tag\tag...}` prefix that carries rendering
 * directives for a single event. Only a block at the very start of the text
 * is treated as one; braces elsewhere are left to the renderer.
 */

use std::fmt;

/// Leading override block of an event text, split into its tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideBlock {
    tokens: Vec<String>,
}

impl OverrideBlock {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block from tokens, dropping empty and repeated ones
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut block = Self::new();
        for token in tokens {
            block.insert(token);
        }
        block
    }

    /// Split event text into its leading block (if any) and the remaining text
    pub fn split(text: &str) -> (Option<Self>, &str) {
        if !text.starts_with('{') {
            return (None, text);
        }
        match text.find('}') {
            Some(end) => (Some(Self::parse_inner(&text[1..end])), &text[end + 1..]),
            None => (None, text),
        }
    }

    /// Tokens of every override block in the text, not only the leading one
    pub fn collect_all(text: &str) -> Self {
        let mut block = Self::new();
        let mut rest = text;
        while let Some(start) = rest.find('{') {
            let inner = &rest[start + 1..];
            let Some(end) = inner.find('}') else {
                break;
            };
            for token in inner[..end].split('\\') {
                block.insert(token.trim());
            }
            rest = &inner[end + 1..];
        }
        block
    }

    fn parse_inner(inner: &str) -> Self {
        Self::from_tokens(inner.split('\\').map(str::trim))
    }

    /// Add a token (without its leading backslash) unless it is already present.
    /// Returns whether the block changed.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        let token = token.trim_start_matches('\\').trim();
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Whether an identical token is present
    pub fn contains(&self, token: &str) -> bool {
        let token = token.trim_start_matches('\\');
        self.tokens.iter().any(|t| t == token)
    }

    /// Keep only the tokens for which `keep` returns true
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&String) -> bool,
    {
        self.tokens.retain(keep);
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Render the block in front of `text`; an empty block renders as nothing
    pub fn prepend_to(&self, text: &str) -> String {
        if self.is_empty() {
            text.to_string()
        } else {
            format!("{}{}", self, text)
        }
    }

    /// Merge `tokens` into the leading block of `text`, creating one if needed.
    /// Tokens already present are skipped, so repeated calls are idempotent.
    pub fn merge_into_text<I, S>(text: &str, tokens: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (block, rest) = Self::split(text);
        let mut block = block.unwrap_or_default();
        for token in tokens {
            block.insert(token);
        }
        block.prepend_to(rest)
    }
}

impl fmt::Display for OverrideBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for token in &self.tokens {
            write!(f, "\\{}", token)?;
        }
        write!(f, "}}")
    }
}
