//! Integration tests for argument serialization

#[cfg(test)]
mod tests {
    use gsoc2_command::*;
    use gsoc2_types::{OptionSchema, OptionSpec, OptionType, OptionValues};

    fn upload_schema() -> OptionSchema {
        OptionSchema::new()
            .option("ignore", OptionSpec::array("--ignore"))
            .option("rewrite", OptionSpec::boolean("--rewrite").with_inverted_flag("--no-rewrite"))
            .option("dist", OptionSpec::string("--dist"))
            .option("ext", OptionSpec::array("--ext"))
    }

    #[test]
    fn test_json_values_follow_schema_order() {
        let values: OptionValues = serde_json::from_str(
            r#"{
                "ext": ["js", "map"],
                "dist": "web",
                "rewrite": false,
                "ignore": ["node_modules"]
            }"#,
        )
        .unwrap();

        let tokens = prepare_command(
            vec!["sourcemaps", "upload"],
            &upload_schema(),
            &values,
        )
        .unwrap();

        assert_eq!(
            tokens,
            [
                "sourcemaps",
                "upload",
                "--ignore",
                "node_modules",
                "--no-rewrite",
                "--dist",
                "web",
                "--ext",
                "js",
                "--ext",
                "map",
            ]
        );
    }

    #[test]
    fn test_json_null_is_skipped() {
        let values: OptionValues = serde_json::from_str(r#"{"dist": null}"#).unwrap();
        let tokens = serialize_options(&upload_schema(), &values).unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let values = OptionValues::new()
            .with("ignore", vec!["a", "b"])
            .with("rewrite", true);
        let first = serialize_options(&upload_schema(), &values).unwrap();
        let second = serialize_options(&upload_schema(), &values).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_invalid_option_fails_the_whole_call() {
        let schema = OptionSchema::new()
            .option("dist", OptionSpec::string("--dist"))
            .option("validate", OptionSpec::new(OptionType::Boolean).with_flag("--validate"));
        let values = OptionValues::new().with("dist", "x").with("validate", 1);

        let err = prepare_command("releases", &schema, &values).unwrap_err();
        assert_eq!(err.option(), "validate");
    }
}
