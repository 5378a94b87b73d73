use getset::Getters;
use serde::*;

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix, e.g. `SDC__TELEMETRY__MAX_LEVEL=Info`.
pub const ENV_PREFIX: &str = "SDC";

#[derive(Default, Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct CommonConfig {
    #[serde(default)]
    telemetry: TelemetryConfig,
}

/// Builds the layered configuration: `config.yaml` in the working directory,
/// every `*.yaml`/`*.yml` passed on the command line, then `SDC__` variables.
pub fn build_config() -> anyhow::Result<config::Config> {
    build_config_from_args(std::env::args())
}

pub fn build_config_from_args(
    args: impl IntoIterator<Item = String>,
) -> anyhow::Result<config::Config> {
    let mut config = config::Config::builder().add_source(
        config::File::with_name("config")
            .required(false)
            .format(config::FileFormat::Yaml),
    );
    for arg in args {
        if arg.ends_with("yaml") || arg.ends_with("yml") {
            config = config.add_source(
                config::File::from(std::path::Path::new(arg.as_str()))
                    .format(config::FileFormat::Yaml)
                    .required(false),
            );
        }
    }
    config = config.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(";")
            .with_list_parse_key("import.categories"),
    );
    Ok(config.build()?)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::telemetry::LoggingLevel;

    #[test]
    fn test_common_config_from_yaml() {
        let yaml = indoc! {r#"
            telemetry:
              enable: true
              max_level: Info
              file:
                enable: true
                prefix: catalog.log
        "#};
        let config = config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap();
        let common: CommonConfig = config.try_deserialize().unwrap();
        assert!(common.telemetry().enable);
        assert!(matches!(common.telemetry().max_level, LoggingLevel::Info));
        assert!(common.telemetry().file.enable);
        assert_eq!(common.telemetry().file.prefix, "catalog.log");
        assert_eq!(common.telemetry().file.path, "./logs");
        assert!(common.telemetry().console.enable);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config = build_config_from_args(vec!["catalog-init".to_string()]).unwrap();
        let common: CommonConfig = config.try_deserialize().unwrap();
        assert!(common.telemetry().enable);
        assert!(!common.telemetry().file.enable);
    }
}
