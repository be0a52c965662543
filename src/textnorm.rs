/// Text normalization shared by every comparison site.
///
/// Locality names, header lookups, and the merge exclusion set all
/// compare case- and accent-insensitively. The folding lives here, once,
/// rather than being re-derived ad hoc at each call site: "Belo
/// Horizonte", "BELO HORIZONTE" and "Belo Horizónte" must all be the
/// same string after folding, everywhere.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

// ---------------------------------------------------------------------------
// Folding
// ---------------------------------------------------------------------------

/// Trim, lowercase, and strip diacritics.
///
/// Decomposes to NFD and drops combining marks, so accented and
/// unaccented spellings fold to the same value.
pub fn fold(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// `fold` with all whitespace removed as well. Used for the merge
/// exclusion set, where "risco de fogo" and "risco_fogo" name the same
/// column in different exports.
pub fn fold_compact(s: &str) -> String {
    fold(s).chars().filter(|c| !c.is_whitespace()).collect()
}

// ---------------------------------------------------------------------------
// Column-name sanitization
// ---------------------------------------------------------------------------

/// Reduce an arbitrary category value to a safe ASCII column name:
/// strip diacritics, collapse every run of non-alphanumerics to a single
/// underscore, trim leading/trailing underscores. Falls back to
/// `fallback` when nothing survives (e.g. a value of pure punctuation).
pub fn sanitize_column_name(s: &str, fallback: &str) -> String {
    let ascii: String = s
        .trim()
        .nfkd()
        .filter(|c| c.is_ascii())
        .collect();
    let mut out = String::with_capacity(ascii.len());
    let mut last_was_sep = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_is_case_insensitive() {
        assert_eq!(fold("Belo Horizonte"), fold("belo horizonte"));
        assert_eq!(fold("BELO HORIZONTE"), fold("belo horizonte"));
    }

    #[test]
    fn test_fold_strips_accents() {
        // Accented and plain spellings must be equivalent matches.
        assert_eq!(fold("Belo Horizónte"), fold("Belo Horizonte"));
        assert_eq!(fold("São Paulo"), "sao paulo");
        assert_eq!(fold("Município"), "municipio");
    }

    #[test]
    fn test_fold_trims_whitespace() {
        assert_eq!(fold("  Belo Horizonte  "), "belo horizonte");
    }

    #[test]
    fn test_fold_compact_removes_inner_spaces() {
        assert_eq!(fold_compact("risco de fogo"), "riscodefogo");
        assert_eq!(fold_compact("Risco De Fogo"), "riscodefogo");
    }

    #[test]
    fn test_sanitize_replaces_punctuation_runs_with_one_underscore() {
        assert_eq!(sanitize_column_name("Mata Atlântica", "x"), "Mata_Atlantica");
        assert_eq!(sanitize_column_name("a - b / c", "x"), "a_b_c");
    }

    #[test]
    fn test_sanitize_trims_edge_underscores() {
        assert_eq!(sanitize_column_name("  (Cerrado)  ", "x"), "Cerrado");
    }

    #[test]
    fn test_sanitize_falls_back_when_nothing_survives() {
        assert_eq!(sanitize_column_name("???", "bioma"), "bioma");
        assert_eq!(sanitize_column_name("", "bioma"), "bioma");
    }
}
