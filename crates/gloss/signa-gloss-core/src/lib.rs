//! Signa gloss core
//!
//! Turns short Spanish sentences into sign-language gloss tokens: whole-word
//! glosses when the dictionary has a sign, finger-spelling tokens otherwise.
//! Pure and I/O free apart from the optional dictionary file loader.

pub mod dictionary;
pub mod error;
pub mod stopwords;
pub mod token;
pub mod translate;

pub use dictionary::Dictionary;
pub use error::{DictionaryError, TokenError, TranslateError};
pub use stopwords::{classify, is_stop_word, StopWordClass};
pub use token::{format_gloss, mark_plural, Token, TokenKind, TokenSequence, LETTER_PREFIX};
pub use translate::{
    clean_text, split_to_dactylology, translate, translate_checked, IdentityOrder, Reorder,
    Translator,
};
