//! Maven/Gradle detection and child-process execution.

use springwell_core::CoreError;
use std::fmt;
use std::path::Path;
use std::process::Command;

/// Files whose presence marks a Spring Boot project root
pub const PROJECT_MARKERS: [&str; 2] = ["pom.xml", "build.gradle"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTool {
    Maven,
    Gradle,
}

impl BuildTool {
    /// Gradle when `build.gradle` exists, Maven otherwise
    pub fn detect(project_dir: &Path) -> Self {
        if project_dir.join("build.gradle").exists() {
            BuildTool::Gradle
        } else {
            BuildTool::Maven
        }
    }

    /// Wrapper script invoked for this tool
    pub fn program(&self) -> &'static str {
        match self {
            BuildTool::Maven => "./mvnw",
            BuildTool::Gradle => "./gradlew",
        }
    }

    pub fn dev_args(&self, profile: &str, port: u16) -> Vec<String> {
        match self {
            BuildTool::Maven => vec![
                "spring-boot:run".to_string(),
                format!("-Dspring-boot.run.profiles={}", profile),
                format!("-Dserver.port={}", port),
            ],
            BuildTool::Gradle => vec![
                "bootRun".to_string(),
                format!("-Dspring.profiles.active={}", profile),
                format!("-Dserver.port={}", port),
            ],
        }
    }

    pub fn build_args(&self) -> Vec<String> {
        let args: &[&str] = match self {
            BuildTool::Maven => &["clean", "package", "-DskipTests"],
            BuildTool::Gradle => &["clean", "build", "-x", "test"],
        };
        args.iter().map(|arg| arg.to_string()).collect()
    }

    pub fn test_args(&self, test: Option<&str>) -> Vec<String> {
        let mut args = vec!["test".to_string()];
        if let Some(test) = test.map(str::trim).filter(|t| !t.is_empty()) {
            match self {
                BuildTool::Maven => args.push(format!("-Dtest={}", test)),
                BuildTool::Gradle => {
                    args.push("--tests".to_string());
                    args.push(test.to_string());
                }
            }
        }
        args
    }
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildTool::Maven => f.write_str("Maven"),
            BuildTool::Gradle => f.write_str("Gradle"),
        }
    }
}

pub fn is_spring_boot_project(dir: &Path) -> bool {
    PROJECT_MARKERS.iter().any(|marker| dir.join(marker).exists())
}

/// Fail unless `dir` looks like a Spring Boot project
pub fn require_project(dir: &Path) -> Result<(), CoreError> {
    if is_spring_boot_project(dir) {
        Ok(())
    } else {
        Err(CoreError::validation(
            "current directory is not a Spring Boot project (no pom.xml or build.gradle)",
        ))
    }
}

/// Run a child process with inherited stdio and wait for it.
///
/// A non-zero exit becomes [`CoreError::ProcessFailed`] carrying the child's status.
pub fn run_streaming(
    program: &str,
    args: &[String],
    working_dir: &Path,
    envs: &[(&str, &str)],
) -> Result<(), CoreError> {
    tracing::debug!(program, ?args, dir = %working_dir.display(), "spawning process");

    let status = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .envs(envs.iter().copied())
        .status()
        .map_err(|e| {
            CoreError::system_error_with_source(format!("failed to start {}", program), Box::new(e))
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(CoreError::ProcessFailed {
            program: program.to_string(),
            code: status.code(),
        })
    }
}
