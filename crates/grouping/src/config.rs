use serde::Deserialize;

use crate::error::GroupError;

/// Grouping run settings. Every field is optional in the TOML form.
///
/// ```toml
/// delimiter = ";"
/// output_suffix = "-out"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupConfig {
    /// Field separator.
    pub delimiter: char,
    /// Inserted before the input file's extension to name the output file.
    pub output_suffix: String,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            output_suffix: "-out".to_string(),
        }
    }
}

impl GroupConfig {
    pub fn from_toml(input: &str) -> Result<Self, GroupError> {
        let config: GroupConfig =
            toml::from_str(input).map_err(|e| GroupError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GroupError> {
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(GroupError::ConfigValidation(format!(
                "delimiter {:?} cannot separate fields",
                self.delimiter
            )));
        }

        if self.output_suffix.is_empty() {
            return Err(GroupError::ConfigValidation(
                "output_suffix must not be empty".into(),
            ));
        }

        if self.output_suffix.contains(['/', '\\']) {
            return Err(GroupError::ConfigValidation(format!(
                "output_suffix {:?} must not contain a path separator",
                self.output_suffix
            )));
        }

        Ok(())
    }
}
