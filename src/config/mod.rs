pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::config::settings::EtlSettings;
    use crate::config::toml_config::TomlConfig;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::Parser;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "woo-order-etl")]
    #[command(about = "Split a WooCommerce order export into customer, order and report tables")]
    pub struct CliConfig {
        /// Order export to process [default: woocommerce_export.csv]
        pub input: Option<String>,

        /// Directory the output tables are written to [default: .]
        #[arg(short, long)]
        pub output_dir: Option<String>,

        /// Path to TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Encodings to try, in order (e.g. utf-8,windows-1252)
        #[arg(long, value_delimiter = ',')]
        pub encodings: Vec<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log memory and CPU usage after each phase")]
        pub monitor: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(long, help = "Print the run summary as JSON")]
        pub json_summary: bool,
    }

    impl CliConfig {
        /// 合併設定：預設值 < TOML 檔案 < 命令列參數
        pub fn settings(&self) -> Result<EtlSettings> {
            let mut settings = match &self.config {
                Some(path) => {
                    tracing::info!("📁 Loading configuration from: {}", path);
                    let file = TomlConfig::from_file(path)?;
                    file.validate()?;
                    EtlSettings::from_toml(&file)
                }
                None => EtlSettings::default(),
            };

            if let Some(input) = &self.input {
                settings.input_path = input.clone();
            }
            if let Some(dir) = &self.output_dir {
                settings.output_dir = dir.clone();
            }
            if !self.encodings.is_empty() {
                settings.encodings = self.encodings.clone();
            }

            settings.validate()?;
            Ok(settings)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::io::Write;
        use tempfile::NamedTempFile;

        #[test]
        fn test_parse_defaults() {
            let cli = CliConfig::parse_from(["woo-order-etl"]);
            assert!(cli.input.is_none());
            let settings = cli.settings().unwrap();
            assert_eq!(settings, EtlSettings::default());
        }

        #[test]
        fn test_command_line_overrides_config_file() {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(
                b"[input]\npath = \"from_file.csv\"\n\n[output]\ndirectory = \"file_out\"\n",
            )
            .unwrap();
            let config_path = file.path().display().to_string();

            let cli = CliConfig::parse_from([
                "woo-order-etl",
                "from_cli.csv",
                "--config",
                config_path.as_str(),
                "--encodings",
                "utf-8,latin1",
            ]);
            let settings = cli.settings().unwrap();

            assert_eq!(settings.input_path, "from_cli.csv");
            assert_eq!(settings.output_dir, "file_out");
            assert_eq!(settings.encodings, vec!["utf-8", "latin1"]);
        }

        #[test]
        fn test_missing_config_file_fails() {
            let cli = CliConfig::parse_from(["woo-order-etl", "--config", "/no/such/config.toml"]);
            assert!(cli.settings().is_err());
        }
    }
}
