use crate::config::GatingConfig;

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Cleans raw input text before any gating or normalization.
///
/// Tabs are dropped, line breaks are removed without substitution (so the surrounding lines join
/// directly), runs of spaces collapse to a single space and the result is trimmed.
/// Applying it twice gives the same result as applying it once.
///
/// # Example
/// ```
/// use lexclass::sanitize_text;
///
/// assert_eq!(sanitize_text("  Excelentíssimo\n   Senhor\t "), "Excelentíssimo Senhor");
/// ```
pub fn sanitize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_was_space = false;

    for c in raw.chars() {
        if c == '\t' || is_line_break(c) {
            continue;
        }
        if c == ' ' {
            if !prev_was_space {
                out.push(' ');
            }
            prev_was_space = true;
        } else {
            out.push(c);
            prev_was_space = false;
        }
    }

    out.trim().to_string()
}

/// Heuristic detector for corrupted text (OCR debris, binary leftovers, scattered symbols).
///
/// Uses the default [`GatingConfig`] thresholds.
pub fn is_garbage_text(sanitized: &str) -> bool {
    is_garbage_text_with(sanitized, &GatingConfig::default())
}

/// Same as [`is_garbage_text`] with explicit thresholds.
pub fn is_garbage_text_with(sanitized: &str, config: &GatingConfig) -> bool {
    let collapsed = sanitized.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return true;
    }

    let total = collapsed.chars().count();
    let spaces = collapsed.chars().filter(|&c| c == ' ').count();
    let space_ratio = spaces as f64 / total as f64;
    if space_ratio > config.max_space_ratio {
        return true;
    }

    let tokens: Vec<&str> = collapsed.split(' ').filter(|t| !t.is_empty()).collect();
    if tokens.len() < config.min_tokens_for_ratio {
        return false;
    }

    let short = tokens
        .iter()
        .filter(|t| t.chars().count() <= config.short_token_max_len)
        .count();
    let short_ratio = short as f64 / tokens.len() as f64;

    short_ratio > config.max_short_token_ratio
}
