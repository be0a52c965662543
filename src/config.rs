/// Tool configuration, loaded from an optional `prep.toml`.
///
/// Every field has a default matching the canonical Belo Horizonte
/// pipeline, so the tools run with no configuration file at all. A
/// `prep.toml` next to the invocation (or a path given with `--config`)
/// overrides individual sections:
///
/// ```toml
/// [merge]
/// locality = "Belo Horizonte"
/// excluded_columns = ["risco_fogo", "risco"]
/// report_skipped_rows = true
///
/// [sentinel]
/// value = -999.0
/// ```

use std::path::Path;

use serde::Deserialize;

use crate::model::PrepError;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Settings for the temporal joiner.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Locality the detection side is filtered to, compared after
    /// case/accent folding.
    pub locality: String,
    /// Detection columns excluded from the join output. Matched on the
    /// folded, whitespace-stripped name so the common spellings of the
    /// fire-risk column all hit.
    pub excluded_columns: Vec<String>,
    /// Prefix applied to detection columns in the output header.
    pub prefix: String,
    /// When true, every skipped row is logged with its line number at
    /// debug level. Aggregate counts appear in the summary either way.
    pub report_skipped_rows: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            locality: "Belo Horizonte".to_string(),
            excluded_columns: vec![
                "risco_fogo".to_string(),
                "risco de fogo".to_string(),
                "riscofogo".to_string(),
                "risco".to_string(),
            ],
            prefix: "f_".to_string(),
            report_skipped_rows: false,
        }
    }
}

/// Settings for the column pruner.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// Column names to drop, matched after folding.
    pub columns: Vec<String>,
    /// Combined-timestamp column replaced by a (data, hora_utc) pair.
    pub timestamp_column: String,
}

impl Default for PruneConfig {
    fn default() -> Self {
        PruneConfig {
            columns: vec![
                "pais".to_string(),
                "satelite".to_string(),
                "id_area_industrial".to_string(),
            ],
            timestamp_column: "data_pas".to_string(),
        }
    }
}

/// Settings for the sentinel replacer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    /// Numeric value treated as "missing" and blanked.
    pub value: f64,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        SentinelConfig { value: -999.0 }
    }
}

/// Settings for the categorical encoder.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OneHotConfig {
    /// Column whose category set becomes the one-hot schema.
    pub column: String,
}

impl Default for OneHotConfig {
    fn default() -> Self {
        OneHotConfig { column: "f_bioma".to_string() }
    }
}

/// Settings for the temporal feature expander.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CyclicalConfig {
    /// Date column expanded to day/month/year components.
    pub date_column: String,
    /// Time column expanded to a (sin, cos) pair.
    pub time_column: String,
}

impl Default for CyclicalConfig {
    fn default() -> Self {
        CyclicalConfig {
            date_column: "f_data".to_string(),
            time_column: "f_hora_utc".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Top level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    pub merge: MergeConfig,
    pub prune: PruneConfig,
    pub sentinel: SentinelConfig,
    pub onehot: OneHotConfig,
    pub cyclical: CyclicalConfig,
}

/// Default configuration file name, probed in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "prep.toml";

impl PrepConfig {
    /// Parse a configuration file. Missing sections and fields fall back
    /// to their defaults; a file that exists but does not parse is a
    /// structural error.
    pub fn load(path: &Path) -> Result<Self, PrepError> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| PrepError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load `prep.toml` from the working directory if present, otherwise
    /// the built-in defaults.
    pub fn load_or_default() -> Result<Self, PrepError> {
        let probe = Path::new(DEFAULT_CONFIG_FILE);
        if probe.exists() {
            Self::load(probe)
        } else {
            Ok(Self::default())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_the_canonical_pipeline() {
        let cfg = PrepConfig::default();
        assert_eq!(cfg.merge.locality, "Belo Horizonte");
        assert_eq!(cfg.merge.prefix, "f_");
        assert!(cfg.merge.excluded_columns.contains(&"risco_fogo".to_string()));
        assert!(!cfg.merge.report_skipped_rows);
        assert_eq!(cfg.prune.timestamp_column, "data_pas");
        assert_eq!(cfg.sentinel.value, -999.0);
        assert_eq!(cfg.onehot.column, "f_bioma");
        assert_eq!(cfg.cyclical.date_column, "f_data");
        assert_eq!(cfg.cyclical.time_column, "f_hora_utc");
    }

    #[test]
    fn test_partial_file_overrides_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prep.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[merge]\nlocality = \"Contagem\"").unwrap();
        drop(f);

        let cfg = PrepConfig::load(&path).unwrap();
        assert_eq!(cfg.merge.locality, "Contagem");
        // Untouched fields keep their defaults.
        assert_eq!(cfg.merge.prefix, "f_");
        assert_eq!(cfg.sentinel.value, -999.0);
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prep.toml");
        std::fs::write(&path, "not [valid toml").unwrap();
        match PrepConfig::load(&path) {
            Err(PrepError::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }
}
