use crate::errors::CoreError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the per-project configuration
pub const CONFIG_FILE_NAME: &str = ".springwell.yml";

/// Directory holding project-local springwell state (templates, etc.)
pub const CONFIG_DIR_NAME: &str = ".springwell";

/// Environment variable overriding `project.package`
pub const PACKAGE_ENV: &str = "SPRINGWELL_PACKAGE";

/// Environment variable overriding `templates.directory`
pub const TEMPLATES_DIR_ENV: &str = "SPRINGWELL_TEMPLATES_DIR";

const DEFAULT_TEMPLATES_DIR: &str = ".springwell/templates";

/// Project configuration stored in `.springwell.yml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    pub project: ProjectSection,
    pub code: CodeSection,
    pub templates: TemplatesSection,
    pub aws: AwsSection,
    pub plugins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectSection {
    pub package: String,
    pub defaults_directory: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            package: "com.example.service".to_string(),
            defaults_directory: DEFAULT_TEMPLATES_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeSection {
    pub style: StyleSection,
    pub lombok: bool,
    pub standardize_fields: bool,
}

impl Default for CodeSection {
    fn default() -> Self {
        Self {
            style: StyleSection::default(),
            lombok: true,
            standardize_fields: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleSection {
    pub indentation: u32,
    pub line_width: u32,
}

impl Default for StyleSection {
    fn default() -> Self {
        Self {
            indentation: 4,
            line_width: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplatesSection {
    /// Override-template directory, relative to the project root
    pub directory: String,
}

impl Default for TemplatesSection {
    fn default() -> Self {
        Self {
            directory: DEFAULT_TEMPLATES_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AwsSection {
    pub region: String,
    pub default_services: Vec<String>,
}

impl Default for AwsSection {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            default_services: vec!["s3".to_string(), "secretsManager".to_string()],
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project: ProjectSection::default(),
            code: CodeSection::default(),
            templates: TemplatesSection::default(),
            aws: AwsSection::default(),
            plugins: Vec::new(),
        }
    }
}

impl ProjectConfig {
    /// Default configuration for a project rooted at the given package
    pub fn with_package(package: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.project.package = package.into();
        config
    }

    /// Load `.springwell.yml` from `project_dir`, falling back to defaults when
    /// the file does not exist. Environment overrides are applied last.
    pub fn load(project_dir: &Path) -> Result<Self, CoreError> {
        let path = Self::path(project_dir);
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            tracing::debug!(path = %path.display(), "loading project configuration");
            Self::from_yaml(&content)?
        } else {
            tracing::debug!(path = %path.display(), "no project configuration, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML; missing keys take their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, CoreError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String, CoreError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write `.springwell.yml` and create the `.springwell/` state directory
    pub fn save(&self, project_dir: &Path) -> Result<PathBuf, CoreError> {
        self.validate()?;
        fs::create_dir_all(project_dir.join(CONFIG_DIR_NAME))?;

        let path = Self::path(project_dir);
        fs::write(&path, self.to_yaml()?)?;
        tracing::debug!(path = %path.display(), "saved project configuration");
        Ok(path)
    }

    pub fn path(project_dir: &Path) -> PathBuf {
        project_dir.join(CONFIG_FILE_NAME)
    }

    /// Absolute location of the override-template directory for a project
    pub fn templates_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.templates.directory)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(package) = env::var(PACKAGE_ENV) {
            if !package.trim().is_empty() {
                self.project.package = package.trim().to_string();
            }
        }
        if let Ok(dir) = env::var(TEMPLATES_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.templates.directory = dir.trim().to_string();
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_package_name(&self.project.package)?;

        if self.templates.directory.trim().is_empty() {
            return Err(CoreError::configuration(
                "templates.directory must not be empty",
            ));
        }

        if self.code.style.indentation == 0 {
            return Err(CoreError::configuration(
                "code.style.indentation must be greater than zero",
            ));
        }

        Ok(())
    }
}

/// A package must be a dotted path of Java identifiers, e.g. `com.example.shop`
pub fn validate_package_name(package: &str) -> Result<(), CoreError> {
    let pattern = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .map_err(|e| CoreError::system_error(format!("Regex error: {}", e)))?;

    if pattern.is_match(package) {
        Ok(())
    } else {
        Err(CoreError::configuration(format!(
            "invalid package name '{}', expected a dotted Java package such as com.example.service",
            package
        )))
    }
}
