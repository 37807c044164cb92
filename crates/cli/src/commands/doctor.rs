use crate::build_tool::{require_project, PROJECT_MARKERS};
use crate::error::CliError;
use crate::output::OutputSink;
use springwell_core::config::CONFIG_FILE_NAME;
use std::path::Path;

const ESSENTIAL_PATHS: [&str; 3] = ["src/main/java", "src/main/resources", "src/test"];

const PROPERTIES_FILES: [&str; 3] = [
    "src/main/resources/application.properties",
    "src/main/resources/application.yml",
    "src/main/resources/application.yaml",
];

/// Findings of a health check
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HealthReport {
    pub missing: Vec<String>,
    pub warnings: Vec<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.missing.is_empty() && self.warnings.is_empty()
    }
}

/// Inspect a project directory without modifying it
pub fn diagnose(project_dir: &Path) -> HealthReport {
    let mut report = HealthReport::default();

    if !PROJECT_MARKERS.iter().any(|m| project_dir.join(m).exists()) {
        report.missing.push(PROJECT_MARKERS.join(" or "));
    }

    report.missing.extend(
        ESSENTIAL_PATHS
            .iter()
            .filter(|path| !project_dir.join(path).exists())
            .map(|path| path.to_string()),
    );

    if !PROPERTIES_FILES.iter().any(|f| project_dir.join(f).exists()) {
        report
            .warnings
            .push("No application properties file found".to_string());
    }

    if !project_dir.join(CONFIG_FILE_NAME).exists() {
        report.warnings.push(format!(
            "No {} found, springwell defaults will be used",
            CONFIG_FILE_NAME
        ));
    }

    report
}

pub fn run(project_dir: &Path, out: &dyn OutputSink) -> Result<(), CliError> {
    require_project(project_dir)?;

    out.heading("Project Health Check");
    let report = diagnose(project_dir);

    if !report.missing.is_empty() {
        out.warning("Missing files/directories:");
        for path in &report.missing {
            out.warning(&format!("  - {}", path));
        }
    }
    for warning in &report.warnings {
        out.warning(warning);
    }

    if report.is_healthy() {
        out.success("Project looks healthy!");
    } else {
        out.success("Project health check completed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::testing::RecordingOutput;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_diagnose_empty_maven_project() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("pom.xml"), "<project/>").unwrap();

        let report = diagnose(temp_dir.path());
        assert_eq!(
            report.missing,
            vec!["src/main/java", "src/main/resources", "src/test"]
        );
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_diagnose_healthy_project() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("build.gradle"), "").unwrap();
        fs::write(root.join(CONFIG_FILE_NAME), "").unwrap();
        for dir in ESSENTIAL_PATHS {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        fs::write(root.join("src/main/resources/application.yml"), "").unwrap();

        assert!(diagnose(root).is_healthy());

        let out = RecordingOutput::default();
        run(root, &out).unwrap();
        assert_eq!(out.messages("success"), vec!["Project looks healthy!"]);
    }

    #[test]
    fn test_run_outside_project_fails() {
        let temp_dir = TempDir::new().unwrap();
        let out = RecordingOutput::default();
        assert!(run(temp_dir.path(), &out).is_err());
    }
}
