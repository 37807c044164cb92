use crate::build_tool::run_streaming;
use crate::error::CliError;
use crate::output::OutputSink;
use springwell_codegen::{
    CodeWriter, Database, ProjectScaffold, ProjectTemplate, ScaffoldBindings,
};
use springwell_core::naming::to_package_name;
use springwell_core::{CoreError, ProjectConfig};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const INITIALIZR_URL: &str = "https://start.spring.io/starter.zip";

const BASE_DEPENDENCIES: [&str; 4] = ["web", "data-jpa", "validation", "lombok"];

/// Feature names that map directly onto Spring Initializr dependency ids
const INITIALIZR_FEATURES: [&str; 9] = [
    "actuator",
    "webflux",
    "security",
    "data-jpa",
    "lombok",
    "validation",
    "cache",
    "devtools",
    "docker-compose",
];

const AWS_TEMPORAL_AUTH0_FEATURES: &str = "swagger,actuator,webflux,security,lombok,data-jpa";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectArgs {
    pub name: String,
    pub package: Option<String>,
    pub database: Database,
    pub auth: String,
    pub features: String,
    pub template: ProjectTemplate,
}

impl NewProjectArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: None,
            database: Database::Postgres,
            auth: "jwt".to_string(),
            features: "swagger,actuator".to_string(),
            template: ProjectTemplate::Basic,
        }
    }

    /// Explicit package, or `com.<name as package>`
    pub fn resolved_package(&self) -> String {
        self.package
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("com.{}", to_package_name(&self.name)))
    }

    /// The aws-temporal-auth0 layout pins its own auth and feature set
    fn effective_auth_and_features(&self) -> (&str, &str) {
        match self.template {
            ProjectTemplate::Basic => (self.auth.as_str(), self.features.as_str()),
            ProjectTemplate::AwsTemporalAuth0 => ("auth0", AWS_TEMPORAL_AUTH0_FEATURES),
        }
    }
}

/// Spring Initializr dependency ids for a project
pub fn initializr_dependencies(database: Database, auth: &str, features: &str) -> Vec<String> {
    let mut deps: Vec<String> = BASE_DEPENDENCIES.iter().map(|d| d.to_string()).collect();
    deps.push(database.initializr_dependency().to_string());

    let auth_deps: &[&str] = match auth.trim() {
        "jwt" => &["security", "oauth2-resource-server"],
        "oauth2" => &["security", "oauth2-client"],
        "basic" => &["security"],
        _ => &[],
    };

    let feature_deps = features
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .filter(|feature| {
            let known = INITIALIZR_FEATURES.contains(feature);
            if !known {
                tracing::debug!(feature, "not an Initializr dependency, skipping");
            }
            known
        });

    for dep in auth_deps.iter().copied().chain(feature_deps) {
        if !deps.iter().any(|d| d == dep) {
            deps.push(dep.to_string());
        }
    }
    deps
}

/// Download URL for a Maven project zip
pub fn initializr_url(args: &NewProjectArgs, package: &str) -> Result<Url, CoreError> {
    let (auth, features) = args.effective_auth_and_features();
    let dependencies = initializr_dependencies(args.database, auth, features);

    let mut params: Vec<(&str, &str)> = vec![
        ("name", args.name.as_str()),
        ("groupId", package),
        ("artifactId", args.name.as_str()),
        ("packageName", package),
        ("language", "java"),
        ("javaVersion", "17"),
        ("type", "maven-project"),
    ];
    params.extend(dependencies.iter().map(|dep| ("dependencies", dep.as_str())));

    Url::parse_with_params(INITIALIZR_URL, &params)
        .map_err(|e| CoreError::system_error_with_source("invalid Initializr URL", Box::new(e)))
}

/// Create `<parent>/<name>`, write its configuration and prepare the layout.
///
/// Returns the project directory.
pub fn run(
    parent_dir: &Path,
    args: &NewProjectArgs,
    out: &dyn OutputSink,
) -> Result<PathBuf, CliError> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CoreError::validation("project name is required").into());
    }

    let package = args.resolved_package();
    let config = ProjectConfig::with_package(&package);
    config.validate()?;

    let project_dir = parent_dir.join(name);
    fs::create_dir_all(&project_dir)?;
    config.save(&project_dir)?;

    out.info(&format!(
        "Creating project {} ({}) with template {}...",
        name, package, args.template
    ));
    download_initializr_project(&project_dir, args, &package, out)?;

    if args.template == ProjectTemplate::AwsTemporalAuth0 {
        out.info(
            "Enhancing project with AWS, Temporal, Auth0, Helm, DB migrations, and OpenAPI...",
        );
        let bindings = ScaffoldBindings::new(name, &package, args.database, &config.aws.region);
        let written = ProjectScaffold::new(&project_dir, bindings).apply(&CodeWriter::new())?;
        tracing::debug!(files = written.len(), "scaffold applied");
    }

    out.success(&format!("Created {} at {}", name, project_dir.display()));
    Ok(project_dir)
}

fn download_initializr_project(
    project_dir: &Path,
    args: &NewProjectArgs,
    package: &str,
    out: &dyn OutputSink,
) -> Result<(), CliError> {
    let url = initializr_url(args, package)?;
    let zip_file = project_dir.join("temp.zip");
    let zip_arg = zip_file.display().to_string();

    out.info("Downloading Spring Boot template...");
    run_streaming(
        "curl",
        &["-fL".to_string(), url.to_string(), "-o".to_string(), zip_arg.clone()],
        project_dir,
        &[],
    )?;

    out.info("Extracting template...");
    run_streaming(
        "unzip",
        &[
            "-o".to_string(),
            zip_arg,
            "-d".to_string(),
            project_dir.display().to_string(),
        ],
        project_dir,
        &[],
    )?;
    fs::remove_file(&zip_file)?;

    make_executable(&project_dir.join("mvnw"))?;
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), CliError> {
    use std::os::unix::fs::PermissionsExt;

    if path.exists() {
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), CliError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::testing::RecordingOutput;
    use tempfile::TempDir;

    fn query(url: &Url, key: &str) -> Vec<String> {
        url.query_pairs()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    #[test]
    fn test_default_package_from_name() {
        assert_eq!(NewProjectArgs::new("my-shop").resolved_package(), "com.my.shop");

        let mut args = NewProjectArgs::new("my-shop");
        args.package = Some("io.acme.shop".to_string());
        assert_eq!(args.resolved_package(), "io.acme.shop");
    }

    #[test]
    fn test_dependencies_for_database_and_auth() {
        assert_eq!(
            initializr_dependencies(Database::Postgres, "jwt", "swagger,actuator"),
            vec![
                "web",
                "data-jpa",
                "validation",
                "lombok",
                "postgresql",
                "security",
                "oauth2-resource-server",
                "actuator"
            ]
        );
        assert_eq!(
            initializr_dependencies(Database::H2, "auth0", ""),
            vec!["web", "data-jpa", "validation", "lombok", "h2"]
        );
        let basic = initializr_dependencies(Database::Mysql, "basic", "security");
        assert_eq!(basic.iter().filter(|d| *d == "security").count(), 1);
    }

    #[test]
    fn test_initializr_url() {
        let args = NewProjectArgs::new("shop");
        let url = initializr_url(&args, "com.shop").unwrap();

        assert_eq!(url.host_str(), Some("start.spring.io"));
        assert_eq!(url.path(), "/starter.zip");
        assert_eq!(query(&url, "groupId"), vec!["com.shop"]);
        assert_eq!(query(&url, "type"), vec!["maven-project"]);
        assert_eq!(query(&url, "javaVersion"), vec!["17"]);
        assert!(query(&url, "dependencies").contains(&"postgresql".to_string()));
    }

    #[test]
    fn test_aws_template_pins_features() {
        let mut args = NewProjectArgs::new("shop");
        args.template = ProjectTemplate::AwsTemporalAuth0;
        args.auth = "basic".to_string();
        let deps = query(&initializr_url(&args, "com.shop").unwrap(), "dependencies");

        assert!(deps.contains(&"webflux".to_string()));
        assert!(!deps.contains(&"oauth2-resource-server".to_string()));
    }

    #[test]
    fn test_invalid_package_fails_before_creating_anything() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = NewProjectArgs::new("shop");
        args.package = Some("not a package".to_string());

        let out = RecordingOutput::default();
        assert!(run(temp_dir.path(), &args, &out).is_err());
        assert!(!temp_dir.path().join("shop").exists());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let out = RecordingOutput::default();
        let err = run(temp_dir.path(), &NewProjectArgs::new("  "), &out).unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::Validation { .. })));
    }
}
