//! Session configuration.

use std::time::Duration;

use crate::ide::PreviewOptions;
use crate::outline::ParseOptions;
use crate::session::DEFAULT_QUIET;

/// Everything an [`OutlineSession`](crate::session::OutlineSession) can be
/// tuned with.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OutlineConfig {
    pub parse: ParseOptions,
    pub preview: PreviewOptions,
    /// Quiet period between the last edit and a re-run
    pub debounce: Duration,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            preview: PreviewOptions::default(),
            debounce: DEFAULT_QUIET,
        }
    }
}

impl OutlineConfig {
    pub fn with_parse(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    pub fn with_preview(mut self, preview: PreviewOptions) -> Self {
        self.preview = preview;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = OutlineConfig::default()
            .with_parse(ParseOptions::default().with_import_keyword("import"))
            .with_debounce(Duration::from_millis(10));

        assert_eq!(config.parse.import_keyword, "import");
        assert_eq!(config.debounce, Duration::from_millis(10));
        assert_eq!(config.preview, PreviewOptions::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_uses_defaults() {
        let config: OutlineConfig =
            serde_json::from_str(r#"{ "parse": { "group_switch_cases": false } }"#).unwrap();
        assert!(!config.parse.group_switch_cases);
        assert!(config.parse.honor_region_directives);
        assert_eq!(config.debounce, DEFAULT_QUIET);
    }
}
