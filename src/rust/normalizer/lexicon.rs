//! Versioned word and phrase tables driving text normalization.
//!
//! The tables are data, not code: a [`Lexicon`] can be loaded from a JSON file shipped next to
//! the model artifacts, or taken from the built-in defaults below. Entries are normalized
//! (lowercased, accents stripped) on construction so they match the pipeline's intermediate text.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::pipeline::fold_case_and_accents;
use crate::artifact_store::ArtifactError;

/// Characters replaced by a space during preprocessing.
pub const DEFAULT_PUNCTUATION: &str =
    ".,;:!?()[]{}<>\"'`´“”‘’«»/\\|-–—_*#@&%$+=~^§ºª°…•";

const ADDRESS_MARKERS: &[&str] = &[
    "rua", "avenida", "av", "travessa", "alameda", "rodovia", "estrada", "praça", "largo",
    "quadra", "qd", "lote", "lt", "bloco", "bl", "bairro", "conjunto", "cj", "setor",
    "apartamento", "apto", "ap", "sala", "edifício", "ed", "cep", "km", "loteamento",
    "condomínio", "residencial",
];

const BOILERPLATE_PHRASES: &[&str] = &[
    "excelentíssimo senhor doutor juiz de direito",
    "excelentíssimo senhor doutor juiz federal",
    "excelentíssimo senhor doutor juiz",
    "excelentíssimo senhor",
    "excelentíssima senhora",
    "meritíssimo juiz",
    "vem respeitosamente à presença de vossa excelência",
    "vem respeitosamente perante vossa excelência",
    "respeitosamente",
    "vossa excelência",
    "nestes termos pede deferimento",
    "nestes termos",
    "termos em que pede deferimento",
    "termos em que",
    "pede e espera deferimento",
    "pede deferimento",
    "poder judiciário",
    "tribunal de justiça do estado",
    "documento assinado digitalmente",
    "documento assinado eletronicamente",
    "assinado eletronicamente",
    "assinado digitalmente",
    "conforme MP nº 2.200-2/2001",
    "Lei nº 11.419/2006",
    "para conferir o original acesse o site",
    "este documento foi assinado",
    "por seu advogado que esta subscreve",
    "por seu advogado infra assinado",
    "por intermédio de seu advogado",
    "processo judicial eletrônico",
];

const CORE_STOPWORDS: &[&str] = &[
    "a", "à", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as", "às",
    "até", "com", "como", "da", "das", "de", "dela", "delas", "dele", "deles", "depois", "do",
    "dos", "e", "é", "ela", "elas", "ele", "eles", "em", "entre", "era", "eram", "essa",
    "essas", "esse", "esses", "esta", "está", "estão", "estas", "estava", "estavam", "este",
    "estes", "eu", "foi", "foram", "há", "isso", "isto", "já", "lhe", "lhes", "mais", "mas",
    "me", "mesmo", "meu", "meus", "minha", "minhas", "muito", "na", "nas", "nem", "no", "nos",
    "nós", "nossa", "nossas", "nosso", "nossos", "num", "numa", "o", "os", "ou", "para",
    "pela", "pelas", "pelo", "pelos", "por", "qual", "quando", "que", "quem", "são", "se",
    "seja", "sem", "ser", "seu", "seus", "só", "sua", "suas", "também", "tem", "têm", "ter",
    "um", "uma", "umas", "uns", "sobre", "sido", "será", "serão", "tinha", "tinham", "houve",
    "pois", "onde", "cujo", "cuja", "cujos", "cujas",
];

/// Additions of the extended variant: digits and second-person forms.
const EXTENDED_STOPWORDS: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "tu", "te", "ti", "contigo", "teu",
    "teus", "tua", "tuas", "vos", "vós", "vosso", "vossos", "vossa", "vossas", "convosco",
    "você", "vocês",
];

/// Which of the two stopword tables to use.
///
/// `Core` is canonical: it is the table the shipped vocabularies are expected to be built with.
/// `Extended` is a strict superset that also drops digits and second-person forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwordVariant {
    #[default]
    Core,
    Extended,
}

impl StopwordVariant {
    /// Version tag of the built-in table for this variant.
    pub fn version(&self) -> &'static str {
        match self {
            Self::Core => "pt-br-core-1",
            Self::Extended => "pt-br-extended-1",
        }
    }

    fn words(&self) -> Vec<&'static str> {
        match self {
            Self::Core => CORE_STOPWORDS.to_vec(),
            Self::Extended => CORE_STOPWORDS.iter().chain(EXTENDED_STOPWORDS).copied().collect(),
        }
    }
}

impl std::str::FromStr for StopwordVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "core" => Ok(Self::Core),
            "extended" => Ok(Self::Extended),
            other => Err(format!("unknown stopword variant '{}' (expected core or extended)", other)),
        }
    }
}

/// On-disk form of a lexicon (`lexicon.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconFile {
    pub version: String,
    #[serde(default)]
    pub punctuation: Option<String>,
    pub address_markers: Vec<String>,
    pub boilerplate_phrases: Vec<String>,
    pub stopwords: Vec<String>,
}

/// Normalized word and phrase tables used by [`TextNormalizer`](crate::TextNormalizer).
#[derive(Debug, Clone)]
pub struct Lexicon {
    version: String,
    punctuation: HashSet<char>,
    address_markers: Vec<String>,
    boilerplate_phrases: Vec<String>,
    stopwords: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin(StopwordVariant::default())
    }
}

impl Lexicon {
    /// Builds a lexicon from raw entries, normalizing and de-duplicating them.
    pub fn new(
        version: impl Into<String>,
        punctuation: &str,
        address_markers: impl IntoIterator<Item = impl AsRef<str>>,
        boilerplate_phrases: impl IntoIterator<Item = impl AsRef<str>>,
        stopwords: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        let punctuation: HashSet<char> = punctuation.chars().filter(|c| !c.is_whitespace()).collect();

        let mut address_markers = normalize_entries(address_markers, &punctuation);
        address_markers.sort();
        address_markers.dedup();

        // Longest first, so a phrase wins over any phrase it contains.
        let mut boilerplate_phrases = normalize_entries(boilerplate_phrases, &punctuation);
        boilerplate_phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        boilerplate_phrases.dedup();

        let stopwords = normalize_entries(stopwords, &punctuation).into_iter().collect();

        Self {
            version: version.into(),
            punctuation,
            address_markers,
            boilerplate_phrases,
            stopwords,
        }
    }

    /// The built-in tables with the given stopword variant.
    pub fn builtin(variant: StopwordVariant) -> Self {
        Self::new(
            variant.version(),
            DEFAULT_PUNCTUATION,
            ADDRESS_MARKERS,
            BOILERPLATE_PHRASES,
            variant.words(),
        )
    }

    pub fn from_file_contents(file: LexiconFile) -> Self {
        let punctuation = file.punctuation.as_deref().unwrap_or(DEFAULT_PUNCTUATION).to_string();
        Self::new(
            file.version,
            &punctuation,
            file.address_markers,
            file.boilerplate_phrases,
            file.stopwords,
        )
    }

    /// Loads a lexicon from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.display().to_string()));
        }
        let file: LexiconFile = serde_json::from_slice(&fs::read(path)?)?;
        log::info!("Loaded lexicon '{}' from {:?}", file.version, path);
        Ok(Self::from_file_contents(file))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_punctuation(&self, c: char) -> bool {
        self.punctuation.contains(&c)
    }

    pub fn address_markers(&self) -> &[String] {
        &self.address_markers
    }

    pub fn boilerplate_phrases(&self) -> &[String] {
        &self.boilerplate_phrases
    }

    /// Case-insensitive stopword membership.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token) || self.stopwords.contains(&fold_case_and_accents(token))
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}

fn normalize_entries(
    entries: impl IntoIterator<Item = impl AsRef<str>>,
    punctuation: &HashSet<char>,
) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| {
            fold_case_and_accents(e.as_ref())
                .chars()
                .map(|c| if punctuation.contains(&c) { ' ' } else { c })
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entries_are_normalized() {
        let lexicon = Lexicon::builtin(StopwordVariant::Core);
        assert!(lexicon.address_markers().iter().any(|m| m == "praca"));
        assert!(lexicon.address_markers().iter().any(|m| m == "edificio"));
        assert!(lexicon
            .boilerplate_phrases()
            .iter()
            .any(|p| p == "vossa excelencia"));
        assert!(lexicon
            .boilerplate_phrases()
            .iter()
            .any(|p| p == "lei n 11 419 2006"));
        assert!(lexicon.is_stopword("estao"));
        assert!(lexicon.is_stopword("Está"));
    }

    #[test]
    fn test_phrases_sorted_longest_first() {
        let lexicon = Lexicon::builtin(StopwordVariant::Core);
        let phrases = lexicon.boilerplate_phrases();
        assert!(phrases.windows(2).all(|w| w[0].len() >= w[1].len()));
    }

    #[test]
    fn test_extended_is_superset_of_core() {
        let core = Lexicon::builtin(StopwordVariant::Core);
        let extended = Lexicon::builtin(StopwordVariant::Extended);
        assert!(extended.stopword_count() > core.stopword_count());
        assert!(extended.is_stopword("voce"));
        assert!(extended.is_stopword("7"));
        assert!(!core.is_stopword("voce"));
        assert!(!core.is_stopword("7"));
        assert_ne!(core.version(), extended.version());
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!("core".parse::<StopwordVariant>(), Ok(StopwordVariant::Core));
        assert_eq!("Extended".parse::<StopwordVariant>(), Ok(StopwordVariant::Extended));
        assert!("full".parse::<StopwordVariant>().is_err());
    }

    #[test]
    fn test_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("lexicon.json");
        fs::write(
            &path,
            r#"{
                "version": "test-1",
                "address_markers": ["Rua"],
                "boilerplate_phrases": ["Nestes Termos"],
                "stopwords": ["ÀS", "de"]
            }"#,
        )?;

        let lexicon = Lexicon::from_file(&path)?;
        assert_eq!(lexicon.version(), "test-1");
        assert_eq!(lexicon.address_markers(), ["rua".to_string()]);
        assert_eq!(lexicon.boilerplate_phrases(), ["nestes termos".to_string()]);
        assert!(lexicon.is_stopword("as"));
        assert!(lexicon.is_punctuation('.'));
        Ok(())
    }

    #[test]
    fn test_from_missing_file() {
        let result = Lexicon::from_file("/nonexistent/lexicon.json");
        assert!(matches!(result, Err(ArtifactError::NotFound(_))));
    }
}
