use crate::core::ConfigProvider;
use crate::utils::error::{PbmError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Batch of rotation jobs loaded from a TOML file.
///
/// ```toml
/// [settings]
/// default_degree = 90
///
/// [[jobs]]
/// path = "${IMAGES}/in.pbm"
/// export_path = "out/in_90.pbm"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsConfig {
    pub verbose: Option<bool>,
    pub monitor: Option<bool>,
    /// Keep going after a failed job instead of stopping the batch.
    pub continue_on_error: Option<bool>,
    /// Used by jobs that don't set `degree`.
    pub default_degree: Option<i32>,
    /// Relative job paths resolve against this directory.
    pub base_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub path: String,
    pub export_path: String,
    pub degree: Option<i32>,
}

/// A job with its degree resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationJob {
    pub path: String,
    pub export_path: String,
    pub degree: i32,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            PbmError::file_access(path.as_ref().display().to_string(), e)
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PbmError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PbmError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn resolved_jobs(&self) -> Result<Vec<RotationJob>> {
        self.jobs
            .iter()
            .enumerate()
            .map(|(index, job)| {
                let field = format!("jobs[{}].degree", index);
                let degree = job.degree.or(self.settings.default_degree);
                let degree = *validation::validate_required_field(&field, &degree)?;
                Ok(RotationJob {
                    path: job.path.clone(),
                    export_path: job.export_path.clone(),
                    degree,
                })
            })
            .collect()
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.jobs.is_empty() {
            return Err(PbmError::MissingConfigError {
                field: "jobs".to_string(),
            });
        }

        if let Some(base_path) = &self.settings.base_path {
            validation::validate_path("settings.base_path", base_path)?;
        }

        for (index, job) in self.resolved_jobs()?.iter().enumerate() {
            validation::validate_job(
                &format!("jobs[{}].path", index),
                &format!("jobs[{}].export_path", index),
                &format!("jobs[{}].degree", index),
                job,
            )?;
        }

        Ok(())
    }

    pub fn base_path(&self) -> &str {
        self.settings.base_path.as_deref().unwrap_or("")
    }

    pub fn verbose(&self) -> bool {
        self.settings.verbose.unwrap_or(false)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.settings.monitor.unwrap_or(false)
    }

    pub fn continue_on_error(&self) -> bool {
        self.settings.continue_on_error.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl ConfigProvider for RotationJob {
    fn input_path(&self) -> &str {
        &self.path
    }

    fn export_path(&self) -> &str {
        &self.export_path
    }

    fn degrees(&self) -> i32 {
        self.degree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_jobs_with_default_degree() {
        let toml_content = r#"
[settings]
default_degree = -90
monitor = true

[[jobs]]
path = "a.pbm"
export_path = "a_rotated.pbm"

[[jobs]]
path = "b.pbm"
export_path = "b_rotated.pbm"
degree = 180
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.monitoring_enabled());
        assert!(!config.continue_on_error());

        let jobs = config.resolved_jobs().unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].degrees(), -90);
        assert_eq!(jobs[1].degrees(), 180);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_degree_is_reported() {
        let toml_content = r#"
[[jobs]]
path = "a.pbm"
export_path = "b.pbm"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        match config.validate() {
            Err(PbmError::MissingConfigError { field }) => assert_eq!(field, "jobs[0].degree"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_no_jobs_is_invalid() {
        let config = TomlConfig::from_toml_str("[settings]\nverbose = true\n").unwrap();
        assert!(config.verbose());
        assert!(matches!(
            config.validate(),
            Err(PbmError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_bad_degree_and_extension_rejected() {
        let bad_degree = TomlConfig::from_toml_str(
            "[[jobs]]\npath = \"a.pbm\"\nexport_path = \"b.pbm\"\ndegree = 45\n",
        )
        .unwrap();
        assert!(bad_degree.validate().is_err());

        let bad_extension = TomlConfig::from_toml_str(
            "[[jobs]]\npath = \"a.pgm\"\nexport_path = \"b.pbm\"\ndegree = 90\n",
        )
        .unwrap();
        assert!(bad_extension.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PBM_ROTATE_TEST_DIR", "/data/images");

        let toml_content = r#"
[[jobs]]
path = "${PBM_ROTATE_TEST_DIR}/in.pbm"
export_path = "${PBM_ROTATE_UNSET_VAR}/out.pbm"
degree = 90
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.jobs[0].path, "/data/images/in.pbm");
        assert_eq!(config.jobs[0].export_path, "${PBM_ROTATE_UNSET_VAR}/out.pbm");

        std::env::remove_var("PBM_ROTATE_TEST_DIR");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[[jobs]\npath ="),
            Err(PbmError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[[jobs]]\npath = \"in.pbm\"\nexport_path = \"out.pbm\"\ndegree = 270\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.resolved_jobs().unwrap()[0].degree, 270);
    }
}
