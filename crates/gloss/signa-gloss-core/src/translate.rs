//! Spanish text → gloss token sequence.
//!
//! Pipeline: guard → tokenize → drop stop words → upper-case → reorder →
//! resolve each word to a dictionary gloss or a run of spelling tokens.
//! Every step is total; the worst case is an empty sequence.

use crate::dictionary::Dictionary;
use crate::error::TranslateError;
use crate::stopwords::is_stop_word;
use crate::token::{Token, TokenSequence};

/// Word-order transform applied to the cleaned, upper-cased words.
pub trait Reorder {
    fn reorder(&self, words: Vec<String>) -> Vec<String>;
}

/// Keeps the input order. Placeholder for a subject-object-verb transform.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdentityOrder;

impl Reorder for IdentityOrder {
    #[inline]
    fn reorder(&self, words: Vec<String>) -> Vec<String> {
        words
    }
}

impl<F> Reorder for F
where
    F: Fn(Vec<String>) -> Vec<String>,
{
    fn reorder(&self, words: Vec<String>) -> Vec<String> {
        self(words)
    }
}

/// Translator with a swappable reordering step.
#[derive(Clone, Debug, Default)]
pub struct Translator<R = IdentityOrder> {
    reorder: R,
}

impl Translator<IdentityOrder> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: Reorder> Translator<R> {
    pub fn with_reorder(reorder: R) -> Self {
        Self { reorder }
    }

    pub fn translate(&self, text: &str, dictionary: &Dictionary) -> TokenSequence {
        if text.trim().is_empty() {
            return TokenSequence::empty();
        }
        let words = self.reorder.reorder(clean_text(text));
        let mut out = Vec::with_capacity(words.len());
        for word in &words {
            if dictionary.contains(word) {
                if let Ok(tok) = Token::new(word.as_str()) {
                    out.push(tok);
                }
            } else {
                out.extend(split_to_dactylology(word));
            }
        }
        TokenSequence::new(out)
    }

    /// Like [`Translator::translate`] but reports blank input and empty
    /// results as distinct advisories.
    pub fn translate_checked(
        &self,
        text: &str,
        dictionary: &Dictionary,
    ) -> Result<TokenSequence, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::InputEmpty);
        }
        let seq = self.translate(text, dictionary);
        if seq.is_empty() {
            return Err(TranslateError::NoTranslatableContent);
        }
        Ok(seq)
    }
}

/// Lower-case, split on whitespace runs, drop stop words, upper-case survivors.
pub fn clean_text(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|w| !is_stop_word(w))
        .map(str::to_uppercase)
        .collect()
}

/// One spelling token per letter of `word`; non-letters are stripped.
pub fn split_to_dactylology(word: &str) -> Vec<Token> {
    word.chars()
        .flat_map(char::to_uppercase)
        .map(fold_accent)
        .filter(|c| c.is_alphabetic())
        .map(Token::letter)
        .collect()
}

/// Accented vowels spell as their base letter (`CAFÉ` gives `LETTER_E` last).
/// They neither get a `LETTER_É` token of their own nor vanish with the
/// punctuation. `Ñ` is left alone and spells as `LETTER_Ñ`.
fn fold_accent(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        other => other,
    }
}

/// Translate with the default (identity) word order.
pub fn translate(text: &str, dictionary: &Dictionary) -> TokenSequence {
    Translator::new().translate(text, dictionary)
}

/// Checked translation with the default (identity) word order.
pub fn translate_checked(
    text: &str,
    dictionary: &Dictionary,
) -> Result<TokenSequence, TranslateError> {
    Translator::new().translate_checked(text, dictionary)
}
