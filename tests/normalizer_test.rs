use lexclass::{
    is_garbage_text, is_garbage_text_with, sanitize_text, GatingConfig, Lexicon, StopwordVariant,
    TextNormalizer,
};

fn normalizer(variant: StopwordVariant) -> TextNormalizer {
    TextNormalizer::new(Lexicon::builtin(variant)).expect("Failed to compile lexicon")
}

const PETITION: &str = "EXCELENTÍSSIMO SENHOR DOUTOR JUIZ DE DIREITO DA 2ª VARA CÍVEL.\n\n\
    Maria da Silva, residente na Avenida Paulista, 1000, vem respeitosamente à presença de \
    Vossa Excelência, por seu advogado que esta subscreve, propor AÇÃO DE COBRANÇA em face de \
    Empresa X Ltda, conforme documentos em https://bit.ly/abc123.\n\nNestes termos, pede deferimento.";

#[test]
fn test_sanitize_is_idempotent() {
    for raw in [PETITION, "  a\tb  ", "\u{2028}linha\u{2029}", "", "texto   com    espaços"] {
        let once = sanitize_text(raw);
        assert_eq!(sanitize_text(&once), once);
        assert!(!once.contains("  "));
        assert!(!once.contains('\t'));
        assert!(!once.contains('\n'));
    }
}

#[test]
fn test_sanitize_joins_lines_without_space() {
    assert_eq!(sanitize_text("contes\ntação"), "contestação");
    assert_eq!(sanitize_text("fim.\r\nInício"), "fim.Início");
}

#[test]
fn test_garbage_detection() {
    assert!(is_garbage_text(""));
    assert!(is_garbage_text("a b c d e f g h i j k"));
    assert!(!is_garbage_text(&sanitize_text(PETITION)));
}

#[test]
fn test_garbage_thresholds_are_configurable() {
    let text = "o réu e a mãe de um do em no sol lar";
    assert!(is_garbage_text(text));

    let lenient = GatingConfig {
        max_short_token_ratio: 0.95,
        max_space_ratio: 0.6,
        ..GatingConfig::default()
    };
    assert!(!is_garbage_text_with(text, &lenient));
}

#[test]
fn test_preprocess_petition() {
    let n = normalizer(StopwordVariant::Core);
    let out = n.preprocess(&sanitize_text(PETITION));

    assert!(out.contains("acao cobranca"));
    assert!(out.contains("maria silva"));
    // boilerplate and the address token are gone
    assert!(!out.contains("excelentissimo"));
    assert!(!out.contains("deferimento"));
    assert!(!out.contains("paulista"));
    assert!(!out.contains("bit"));
    assert!(!out.contains("https"));
    // single characters are gone
    assert!(out.split(' ').all(|t| t.chars().count() > 1));
}

#[test]
fn test_preprocess_output_is_clean() {
    let n = normalizer(StopwordVariant::Core);
    let out = n.preprocess(PETITION);

    assert_eq!(out, out.trim());
    assert!(!out.contains("  "));
    for token in out.split(' ') {
        assert!(!n.lexicon().is_stopword(token));
        assert!(token.chars().all(|c| !c.is_uppercase()));
        assert!(token.chars().all(|c| !n.lexicon().is_punctuation(c)));
    }
}

#[test]
fn test_preprocess_is_total() {
    let n = normalizer(StopwordVariant::Core);
    for text in ["", " ", "!!!", "https://example.com", "a e o", "\u{0301}\u{0301}"] {
        let out = n.preprocess(text);
        assert!(!out.starts_with(' '));
        assert!(!out.contains("  "));
    }
    assert_eq!(n.preprocess("!!! ... ???"), "");
}

#[test]
fn test_stopword_variants() {
    let core = normalizer(StopwordVariant::Core);
    let extended = normalizer(StopwordVariant::Extended);
    let text = "prazo de 15 dias para você";

    assert_eq!(core.preprocess(text), "prazo 15 dias voce");
    assert_eq!(extended.preprocess(text), "prazo 15 dias");
    assert_eq!(core.lexicon().version(), "pt-br-core-1");
    assert_eq!(extended.lexicon().version(), "pt-br-extended-1");
}
