mod lexicon;
mod pipeline;
mod sanitize;

pub use lexicon::{Lexicon, LexiconFile, StopwordVariant, DEFAULT_PUNCTUATION};
pub use pipeline::TextNormalizer;
pub use sanitize::{is_garbage_text, is_garbage_text_with, sanitize_text};
