//! Option schemas for the subcommands that accept free-form options

use gsoc2_types::{OptionSchema, OptionSpec, OptionType};

/// Default for `ignore` when neither `ignore` nor `ignoreFile` is given
pub const DEFAULT_IGNORE: &[&str] = &["node_modules"];

/// Options of `sourcemaps upload`
#[must_use]
pub fn source_maps() -> OptionSchema {
    OptionSchema::new()
        .option("ignore", OptionSpec::array("--ignore"))
        .option("ignoreFile", OptionSpec::string("--ignore-file"))
        .option(
            "rewrite",
            OptionSpec::boolean("--rewrite").with_inverted_flag("--no-rewrite"),
        )
        .option(
            "sourceMapReference",
            OptionSpec::new(OptionType::Boolean).with_inverted_flag("--no-sourcemap-reference"),
        )
        .option("dist", OptionSpec::string("--dist"))
        .option("stripPrefix", OptionSpec::array("--strip-prefix"))
        .option(
            "stripCommonPrefix",
            OptionSpec::boolean("--strip-common-prefix"),
        )
        .option("validate", OptionSpec::boolean("--validate"))
        .option("urlPrefix", OptionSpec::string("--url-prefix"))
        .option("urlSuffix", OptionSpec::string("--url-suffix"))
        .option("ext", OptionSpec::array("--ext"))
        .option(
            "useArtifactBundle",
            OptionSpec::boolean("--use-artifact-bundle"),
        )
}

/// Options of `releases deploys <release> new`
#[must_use]
pub fn deploys() -> OptionSchema {
    OptionSchema::new()
        .option("env", OptionSpec::string("--env"))
        .option("started", OptionSpec::number("--started"))
        .option("finished", OptionSpec::number("--finished"))
        .option("time", OptionSpec::number("--time"))
        .option("name", OptionSpec::string("--name"))
        .option("url", OptionSpec::string("--url"))
}
