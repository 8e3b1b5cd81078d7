//! Classify command handler

use crate::cli::{ClassifyArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use safeval_core::{classify, coerce, Scalar};
use serde::Serialize;

/// How one value falls into each classification family
#[derive(Debug, PartialEq, Serialize)]
pub struct Classification {
    pub value: Scalar,
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub is_null: bool,
    pub is_missing: bool,
    pub is_blank: bool,
    pub is_zero: bool,
    pub is_empty: bool,
    pub is_numeric: bool,
    /// Numeric coercion under the configured null policy
    pub coerced: Option<f64>,
}

impl Classification {
    pub fn of(value: Scalar, null_as_zero: bool) -> Self {
        Self {
            type_name: value.type_name(),
            is_null: classify::is_null(&value),
            is_missing: classify::is_missing(&value),
            is_blank: classify::is_blank(&value),
            is_zero: classify::is_zero(&value),
            is_empty: classify::is_empty(&value),
            is_numeric: classify::is_numeric(&value),
            coerced: coerce(&value, null_as_zero),
            value,
        }
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let coerced = match self.coerced {
            Some(number) => number.to_string(),
            None => "-".to_string(),
        };
        vec![
            vec!["type".to_string(), self.type_name.to_string()],
            vec!["is_null".to_string(), self.is_null.to_string()],
            vec!["is_missing".to_string(), self.is_missing.to_string()],
            vec!["is_blank".to_string(), self.is_blank.to_string()],
            vec!["is_zero".to_string(), self.is_zero.to_string()],
            vec!["is_empty".to_string(), self.is_empty.to_string()],
            vec!["is_numeric".to_string(), self.is_numeric.to_string()],
            vec!["coerced".to_string(), coerced],
        ]
    }
}

/// Handle the classify command
pub fn handle_classify(
    args: ClassifyArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let report = Classification::of(args.input(), config.settings.null_as_zero);

    if output.format() != OutputFormat::Human {
        return output.data(&report);
    }

    output.debug(&format!("value: {}", report.value.to_json()))?;
    output.table(&["check", "result"], report.rows())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::capture;

    #[test]
    fn test_zero_is_not_missing() {
        let report = Classification::of(Scalar::Int(0), false);
        assert!(!report.is_missing);
        assert!(!report.is_blank);
        assert!(report.is_zero);
        assert!(report.is_empty);
        assert_eq!(report.coerced, Some(0.0));
    }

    #[test]
    fn test_empty_string_row() {
        let report = Classification::of(Scalar::from(""), false);
        assert!(report.is_missing && report.is_blank && !report.is_zero && report.is_empty);
        assert_eq!(report.coerced, None);
    }

    #[test]
    fn test_null_policy_changes_coercion() {
        assert_eq!(Classification::of(Scalar::Null, false).coerced, None);
        assert_eq!(Classification::of(Scalar::Null, true).coerced, Some(0.0));
    }

    #[test]
    fn test_json_output_uses_type_key() {
        let (mut out, buffer) = capture(OutputFormat::Json, false, 0);
        let args = ClassifyArgs {
            value: Some("0.00".to_string()),
            null: false,
            string: true,
        };
        handle_classify(args, &Config::default(), &mut out).unwrap();

        let report: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(report["type"], "string");
        assert_eq!(report["is_zero"], true);
        assert_eq!(report["is_empty"], false);
    }

    #[test]
    fn test_human_output_is_a_table() {
        let (mut out, buffer) = capture(OutputFormat::Human, false, 0);
        let args = ClassifyArgs {
            value: None,
            null: true,
            string: false,
        };
        handle_classify(args, &Config::default(), &mut out).unwrap();

        let contents = buffer.contents();
        assert!(contents.starts_with("check"));
        assert!(contents.contains("is_null    │ true"));
        assert!(contents.contains("coerced    │ -"));
    }
}
