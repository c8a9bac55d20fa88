use crate::config::toml_config::TomlConfig;
use crate::core::encoding::{EncodingProber, DEFAULT_ENCODINGS};
use crate::core::ConfigProvider;
use crate::domain::ports::OutputFiles;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct_names, validate_non_empty_string, validate_path, Validate,
};

pub const DEFAULT_INPUT: &str = "woocommerce_export.csv";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Effective settings after merging defaults, the config file and the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlSettings {
    pub input_path: String,
    pub output_dir: String,
    pub output_files: OutputFiles,
    pub encodings: Vec<String>,
}

impl Default for EtlSettings {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            output_files: OutputFiles::default(),
            encodings: DEFAULT_ENCODINGS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl EtlSettings {
    /// Values present in the file replace the defaults.
    pub fn from_toml(config: &TomlConfig) -> Self {
        let mut settings = Self::default();
        if let Some(path) = &config.input.path {
            settings.input_path = path.clone();
        }
        if let Some(encodings) = &config.input.encodings {
            settings.encodings = encodings.clone();
        }
        if let Some(dir) = &config.output.directory {
            settings.output_dir = dir.clone();
        }

        let names = &config.output.files;
        let files = &mut settings.output_files;
        let overrides = [
            (&mut files.customers, &names.customers),
            (&mut files.orders, &names.orders),
            (&mut files.email_only, &names.email_only),
            (&mut files.duplicates, &names.duplicates),
            (&mut files.order_counts, &names.order_counts),
            (&mut files.quarantine, &names.quarantine),
        ];
        for (slot, value) in overrides {
            if let Some(name) = value {
                *slot = name.clone();
            }
        }
        settings
    }
}

impl ConfigProvider for EtlSettings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn output_files(&self) -> &OutputFiles {
        &self.output_files
    }

    fn encodings(&self) -> &[String] {
        &self.encodings
    }
}

impl Validate for EtlSettings {
    fn validate(&self) -> Result<()> {
        validate_path("input.path", &self.input_path)?;
        validate_path("output.directory", &self.output_dir)?;

        let files = self.output_files.all();
        for (table, name) in files {
            validate_path(&format!("output.files.{}", table), name)?;
        }
        validate_distinct_names("output.files", files.iter().map(|(_, name)| *name))?;

        for label in &self.encodings {
            validate_non_empty_string("input.encodings", label)?;
        }
        EncodingProber::from_labels(&self.encodings)?;
        Ok(())
    }
}
