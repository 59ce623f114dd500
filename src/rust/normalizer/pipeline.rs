use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::lexicon::Lexicon;
use super::sanitize::{is_garbage_text_with, sanitize_text};
use crate::classifier::ClassifierError;
use crate::config::GatingConfig;

lazy_static! {
    static ref URL_PATTERN: Regex =
        Regex::new(r"\b(?:https?|ftp|www|bit\s?ly|tinyurl|goo\s?gl)\b\S*").unwrap();
    static ref SINGLE_CHAR_TOKEN: Regex = Regex::new(r"\b\w\b").unwrap();
}

/// Lowercases and strips diacritics (NFD, drop combining marks, NFC).
pub(crate) fn fold_case_and_accents(text: &str) -> String {
    strip_diacritics(&text.to_lowercase())
}

fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|&c| !is_combining_mark(c)).nfc().collect()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turns a list of normalized phrases into one alternation that tolerates any whitespace run
/// between words.
fn phrase_alternation(phrases: &[String], follow_with_token: bool) -> Option<String> {
    if phrases.is_empty() {
        return None;
    }
    let alternatives: Vec<String> = phrases
        .iter()
        .map(|p| {
            p.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    let tail = if follow_with_token { r"\s+\S+" } else { "" };
    Some(format!(r"\b(?:{})\b{}", alternatives.join("|"), tail))
}

/// Text cleaning, quality gating and normalization for classification.
///
/// Holds the compiled patterns for one [`Lexicon`]; it keeps no per-request state and can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    lexicon: Lexicon,
    address_pattern: Option<Regex>,
    boilerplate_pattern: Option<Regex>,
}

impl TextNormalizer {
    /// Compiles the lexicon's address markers and boilerplate phrases.
    ///
    /// # Errors
    /// - `BuildError` if the lexicon tables are too large to compile into a pattern
    pub fn new(lexicon: Lexicon) -> Result<Self, ClassifierError> {
        let compile = |pattern: Option<String>, what: &str| -> Result<Option<Regex>, ClassifierError> {
            pattern
                .map(|p| Regex::new(&p))
                .transpose()
                .map_err(|e| ClassifierError::BuildError(format!("Failed to compile {} pattern: {}", what, e)))
        };

        let address_pattern = compile(phrase_alternation(lexicon.address_markers(), true), "address")?;
        let boilerplate_pattern =
            compile(phrase_alternation(lexicon.boilerplate_phrases(), false), "boilerplate")?;

        log::info!(
            "Text normalizer ready (lexicon '{}', {} address markers, {} phrases, {} stopwords)",
            lexicon.version(),
            lexicon.address_markers().len(),
            lexicon.boilerplate_phrases().len(),
            lexicon.stopword_count()
        );

        Ok(Self {
            lexicon,
            address_pattern,
            boilerplate_pattern,
        })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// See [`sanitize_text`].
    pub fn sanitize(&self, raw: &str) -> String {
        sanitize_text(raw)
    }

    /// See [`is_garbage_text`](super::is_garbage_text).
    pub fn is_garbage(&self, sanitized: &str, gating: &GatingConfig) -> bool {
        is_garbage_text_with(sanitized, gating)
    }

    /// Normalizes sanitized text into the token stream the vocabularies were built from.
    ///
    /// The steps run in a fixed order and each consumes the previous step's output:
    /// 1. lowercase
    /// 2. strip diacritics
    /// 3. replace punctuation with spaces
    /// 4. remove URL-like fragments
    /// 5. remove address markers together with the token that follows them
    /// 6. remove legal boilerplate phrases
    /// 7. remove single-character tokens
    /// 8. remove stopwords
    /// 9. collapse whitespace
    ///
    /// Total over any input: empty or blank text yields an empty string.
    pub fn preprocess(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let folded = fold_case_and_accents(text);

        let depunctuated: String = folded
            .chars()
            .map(|c| if self.lexicon.is_punctuation(c) { ' ' } else { c })
            .collect();

        let without_urls = URL_PATTERN.replace_all(&depunctuated, " ");

        let without_addresses = match &self.address_pattern {
            Some(pattern) => pattern.replace_all(&without_urls, " ").into_owned(),
            None => without_urls.into_owned(),
        };

        let without_boilerplate = match &self.boilerplate_pattern {
            Some(pattern) => pattern.replace_all(&without_addresses, " ").into_owned(),
            None => without_addresses,
        };

        let without_single_chars = SINGLE_CHAR_TOKEN.replace_all(&without_boilerplate, " ");

        let kept: Vec<&str> = without_single_chars
            .split_whitespace()
            .filter(|token| !self.lexicon.is_stopword(token))
            .collect();

        normalize_whitespace(&kept.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::lexicon::StopwordVariant;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new(Lexicon::builtin(StopwordVariant::Core)).unwrap()
    }

    #[test]
    fn test_fold_case_and_accents() {
        assert_eq!(fold_case_and_accents("MANIFESTAÇÃO"), "manifestacao");
        assert_eq!(fold_case_and_accents("Ação Civil Pública"), "acao civil publica");
    }

    #[test]
    fn test_empty_input() {
        let n = normalizer();
        assert_eq!(n.preprocess(""), "");
        assert_eq!(n.preprocess("   "), "");
    }

    #[test]
    fn test_removes_accents_punctuation_and_stopwords() {
        let n = normalizer();
        let out = n.preprocess("A Requerente, por meio desta, apresenta CONTESTAÇÃO à ação!");
        assert_eq!(out, "requerente meio desta apresenta contestacao acao");
    }

    #[test]
    fn test_removes_urls() {
        let n = normalizer();
        // punctuation is gone by now, so only the scheme and prefix tokens match
        let out = n.preprocess("consulte https://www.tjsp.jus.br/processos para detalhes");
        assert_eq!(out, "consulte tjsp jus br processos detalhes");

        let out = n.preprocess("veja bit.ly/3xYz ou tinyurl.com/abc");
        assert_eq!(out, "veja 3xyz com abc");
    }

    #[test]
    fn test_removes_address_marker_and_next_token() {
        let n = normalizer();
        let out = n.preprocess("residente na Rua Paraíba número 100, bairro Centro, cidade Natal");
        assert_eq!(out, "residente numero 100 cidade natal");
    }

    #[test]
    fn test_address_marker_requires_word_boundary() {
        let n = normalizer();
        // "ruas" and "salario" must survive although they start with markers
        let out = n.preprocess("ruas salario");
        assert_eq!(out, "ruas salario");
    }

    #[test]
    fn test_removes_boilerplate_phrases() {
        let n = normalizer();
        let out = n.preprocess(
            "EXCELENTÍSSIMO SENHOR DOUTOR JUIZ DE DIREITO. Requer a citação do réu. \
             Nestes termos, pede deferimento.",
        );
        assert_eq!(out, "requer citacao reu");
    }

    #[test]
    fn test_boilerplate_with_mangled_spacing() {
        let n = normalizer();
        let out = n.preprocess("assinado conforme MP nº 2.200-2/2001 pelo juízo");
        assert_eq!(out, "assinado juizo");
    }

    #[test]
    fn test_removes_single_character_tokens() {
        let n = normalizer();
        let out = n.preprocess("item b do artigo 5 x");
        assert_eq!(out, "item artigo");
    }

    #[test]
    fn test_output_has_no_stopwords_punctuation_or_accents() {
        let n = normalizer();
        let text = "Trata-se de manifestação da parte autora acerca do laudo pericial juntado \
                    às fls. 120/135, na qual requer a complementação da perícia; além disso, \
                    informa que não concorda com os cálculos apresentados pelo réu (ID 4521).";
        let out = n.preprocess(text);

        for token in out.split(' ') {
            assert!(!n.lexicon().is_stopword(token), "stopword left: {}", token);
        }
        for c in out.chars() {
            assert!(!n.lexicon().is_punctuation(c), "punctuation left: {}", c);
            assert!(c.is_ascii(), "accented character left: {}", c);
        }
        assert!(!out.contains("  "));
    }

    #[test]
    fn test_preprocess_is_stable_on_its_output() {
        let n = normalizer();
        let once = n.preprocess("Petição inicial de ação de cobrança contra empresa de telefonia");
        assert_eq!(n.preprocess(&once), once);
    }
}
