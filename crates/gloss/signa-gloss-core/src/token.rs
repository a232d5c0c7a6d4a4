//! Gloss tokens and token sequences.
//!
//! A token is either a lexical gloss (an upper-case dictionary word, optionally
//! marked `WORD++` for plurality or `WORD-WORD` for compounds) or a spelling
//! token `LETTER_<X>` standing for one finger-spelled letter.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Prefix carried by every spelling (dactylology) token.
pub const LETTER_PREFIX: &str = "LETTER_";

/// Suffix marking a plural gloss.
pub const PLURAL_MARK: &str = "++";

/// Separator joining the parts of a compound gloss.
pub const COMPOUND_SEPARATOR: char = '-';

/// Classification of a token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Whole-word sign looked up in the dictionary.
    Gloss,
    /// One finger-spelled letter.
    Spelling(char),
}

/// Opaque, immutable, never-blank gloss token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Build a token from an arbitrary string. Fails on blank input.
    pub fn new(raw: impl Into<String>) -> Result<Self, TokenError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(TokenError::Blank);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(TokenError::Whitespace { token: raw });
        }
        Ok(Self(raw))
    }

    /// Spelling token for a single letter (`LETTER_<X>`).
    pub fn letter(ch: char) -> Self {
        let mut s = String::with_capacity(LETTER_PREFIX.len() + ch.len_utf8());
        s.push_str(LETTER_PREFIX);
        s.push(ch);
        Self(s)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> TokenKind {
        match self.spelled_letter() {
            Some(ch) => TokenKind::Spelling(ch),
            None => TokenKind::Gloss,
        }
    }

    /// The letter a spelling token stands for.
    pub fn spelled_letter(&self) -> Option<char> {
        let rest = self.0.strip_prefix(LETTER_PREFIX)?;
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }

    #[inline]
    pub fn is_spelling(&self) -> bool {
        self.spelled_letter().is_some()
    }

    pub fn is_plural(&self) -> bool {
        self.0.len() > PLURAL_MARK.len() && self.0.ends_with(PLURAL_MARK)
    }

    /// Parts of a compound gloss (`NOCHE-COMER` → `["NOCHE", "COMER"]`), plural mark removed.
    pub fn compound_parts(&self) -> Vec<&str> {
        let base = self.0.strip_suffix(PLURAL_MARK).unwrap_or(&self.0);
        base.split(COMPOUND_SEPARATOR)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Token {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Token::new(value)
    }
}

impl TryFrom<&str> for Token {
    type Error = TokenError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Token::new(value)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

/// Format a word according to gloss conventions: upper-case, and for compound
/// signs whitespace runs collapse to a single `-`.
pub fn format_gloss(word: &str, compound: bool) -> String {
    let upper = word.trim().to_uppercase();
    if compound {
        upper
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(&COMPOUND_SEPARATOR.to_string())
    } else {
        upper
    }
}

/// Append the plural mark (`++`) when `plural` is set.
pub fn mark_plural(word: &str, plural: bool) -> String {
    if plural {
        format!("{word}{PLURAL_MARK}")
    } else {
        word.to_string()
    }
}

/// Ordered, immutable sequence of tokens. Order is playback order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<Token>);

impl TokenSequence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Token strings in order; handy for assertions and display.
    pub fn as_strs(&self) -> Vec<&str> {
        self.0.iter().map(Token::as_str).collect()
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.0
    }
}

impl Deref for TokenSequence {
    type Target = [Token];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TokenSequence {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(t.as_str())?;
        }
        Ok(())
    }
}
