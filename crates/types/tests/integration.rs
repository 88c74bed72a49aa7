//! Integration tests for types

#[cfg(test)]
mod tests {
    use gsoc2_types::*;

    #[test]
    fn test_option_values_from_json() {
        let values: OptionValues = serde_json::from_str(
            r#"{"paths": ["a", "b"], "rewrite": false, "started": 42, "dist": null, "ratio": 0.5}"#,
        )
        .unwrap();

        assert_eq!(
            values.get("paths"),
            Some(&OptionValue::Array(vec!["a".into(), "b".into()]))
        );
        assert_eq!(values.get("rewrite"), Some(&OptionValue::Bool(false)));
        assert_eq!(values.get("started"), Some(&OptionValue::Integer(42)));
        assert_eq!(values.get("ratio"), Some(&OptionValue::Float(0.5)));
        assert!(values.get("dist").is_none());
    }

    #[test]
    fn test_option_spec_accepts_param_aliases() {
        let spec: OptionSpec = serde_json::from_str(
            r#"{"param": "--rewrite", "invertedParam": "--no-rewrite", "type": "boolean"}"#,
        )
        .unwrap();
        assert_eq!(
            spec,
            OptionSpec::boolean("--rewrite").with_inverted_flag("--no-rewrite")
        );

        let spec: OptionSpec = toml::from_str(
            r#"
type = "inverted-boolean"
flag = "--no-validate"
"#,
        )
        .unwrap();
        assert_eq!(spec.option_type, OptionType::InvertedBoolean);
        assert_eq!(spec.flag.as_deref(), Some("--no-validate"));
    }

    #[test]
    fn test_exec_mode_serialization() {
        let json = serde_json::to_string(&ExecMode::Live { silent: true }).unwrap();
        assert_eq!(json, r#"{"mode":"live","silent":true}"#);
        assert_eq!(ExecMode::Buffered.to_string(), "buffered");
    }
}
