use crate::error::CodegenError;
use crate::generator::package_dir;
use crate::templates::TemplateRenderer;
use crate::writer::CodeWriter;
use serde::Serialize;
use springwell_core::CoreError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Database engines a new project can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Database {
    #[default]
    Postgres,
    Mysql,
    H2,
}

impl Database {
    pub const ALL: [Database; 3] = [Database::Postgres, Database::Mysql, Database::H2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Postgres => "postgres",
            Database::Mysql => "mysql",
            Database::H2 => "h2",
        }
    }

    /// Spring Initializr dependency id for the JDBC driver
    pub fn initializr_dependency(&self) -> &'static str {
        match self {
            Database::Postgres => "postgresql",
            Database::Mysql => "mysql",
            Database::H2 => "h2",
        }
    }

    pub fn datasource_url(&self, name: &str) -> String {
        match self {
            Database::Postgres => format!("jdbc:postgresql://localhost:5432/{}", name),
            Database::Mysql => format!("jdbc:mysql://localhost:3306/{}", name),
            Database::H2 => format!("jdbc:h2:mem:{}", name),
        }
    }

    pub fn hibernate_dialect(&self) -> &'static str {
        match self {
            Database::Postgres => "org.hibernate.dialect.PostgreSQLDialect",
            Database::Mysql => "org.hibernate.dialect.MySQLDialect",
            Database::H2 => "org.hibernate.dialect.H2Dialect",
        }
    }

    fn credentials(&self) -> (&'static str, &'static str) {
        match self {
            Database::Postgres => ("postgres", "postgres"),
            Database::Mysql => ("root", "root"),
            Database::H2 => ("sa", ""),
        }
    }
}

impl FromStr for Database {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Anything unrecognised falls back to an in-memory database
        Ok(match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Database::Postgres,
            "mysql" => Database::Mysql,
            "h2" => Database::H2,
            other => {
                tracing::warn!(database = other, "unknown database, using h2");
                Database::H2
            }
        })
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Starting layouts offered by `springwell new`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectTemplate {
    #[default]
    Basic,
    AwsTemporalAuth0,
}

impl ProjectTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectTemplate::Basic => "basic",
            ProjectTemplate::AwsTemporalAuth0 => "aws-temporal-auth0",
        }
    }
}

impl FromStr for ProjectTemplate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "basic" => Ok(ProjectTemplate::Basic),
            "aws-temporal-auth0" => Ok(ProjectTemplate::AwsTemporalAuth0),
            other => Err(CoreError::validation(format!(
                "unknown project template '{}', expected basic or aws-temporal-auth0",
                other
            ))),
        }
    }
}

impl fmt::Display for ProjectTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bindings shared by every scaffold template
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldBindings {
    pub name: String,
    pub package: String,
    pub package_path: String,
    pub database: String,
    pub datasource_url: String,
    pub datasource_username: String,
    pub datasource_password: String,
    pub hibernate_dialect: String,
    pub aws_region: String,
}

impl ScaffoldBindings {
    pub fn new(name: &str, package: &str, database: Database, aws_region: &str) -> Self {
        let (username, password) = database.credentials();
        Self {
            name: name.to_string(),
            package: package.to_string(),
            package_path: package.replace('.', "/"),
            database: database.to_string(),
            datasource_url: database.datasource_url(name),
            datasource_username: username.to_string(),
            datasource_password: password.to_string(),
            hibernate_dialect: database.hibernate_dialect().to_string(),
            aws_region: aws_region.to_string(),
        }
    }
}

/// A rendered scaffold file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    pub path: PathBuf,
    pub content: String,
}

const JAVA_PACKAGE_DIRS: &[&str] = &[
    "config",
    "controller",
    "domain/audit",
    "domain/dto",
    "domain/entity",
    "exception",
    "messaging/consumer",
    "middleware",
    "repository",
    "security",
    "service",
    "temporal/activity",
    "temporal/workflow",
    "temporal/worker",
    "util",
    "util/mapper",
    "util/validation",
    "util/logging",
];

const PROJECT_DIRS: &[&str] = &[
    "src/main/resources/datadog",
    "src/main/resources/db/migration",
    "src/main/resources/templates/email",
    "src/main/resources/openapi",
    "aws/cloudformation",
    "aws/codebuild",
    ".github/workflows",
    "scripts",
    "docker/datadog-agent",
];

/// Layers the AWS + Temporal + Auth0 structure on top of an Initializr project
pub struct ProjectScaffold {
    project_dir: PathBuf,
    bindings: ScaffoldBindings,
    renderer: TemplateRenderer,
}

impl ProjectScaffold {
    pub fn new(project_dir: impl Into<PathBuf>, bindings: ScaffoldBindings) -> Self {
        Self {
            project_dir: project_dir.into(),
            bindings,
            renderer: TemplateRenderer::builtin_only(),
        }
    }

    /// Every directory the layout expects, including empty ones
    pub fn directories(&self) -> Vec<PathBuf> {
        let java_root = package_dir(&self.project_dir, &self.bindings.package);
        let helm_root = self.helm_dir();

        JAVA_PACKAGE_DIRS
            .iter()
            .map(|dir| java_root.join(dir))
            .chain(PROJECT_DIRS.iter().map(|dir| self.project_dir.join(dir)))
            .chain([helm_root.join("templates"), helm_root.join("charts")])
            .collect()
    }

    /// Render all scaffold files without touching the filesystem
    pub fn render(&self) -> Result<Vec<ScaffoldFile>, CodegenError> {
        let helm = self.helm_dir();
        let java_root = package_dir(&self.project_dir, &self.bindings.package);
        let resources = self.project_dir.join("src/main/resources");

        let targets: Vec<(&str, PathBuf)> = vec![
            ("readme", self.project_dir.join("README.md")),
            ("application_yml", resources.join("application.yml")),
            ("dockerfile", self.project_dir.join("docker/Dockerfile")),
            ("compose", self.project_dir.join("compose.yaml")),
            ("ci_workflow", self.project_dir.join(".github/workflows/ci.yml")),
            ("helm_chart", helm.join("Chart.yaml")),
            ("helm_values", helm.join("values.yaml")),
            ("helm_deployment", helm.join("templates/deployment.yaml")),
            ("helm_service", helm.join("templates/service.yaml")),
            ("helm_helpers", helm.join("templates/_helpers.tpl")),
            ("migration_initial", resources.join("db/migration/V1__initial_schema.sql")),
            ("migration_temporal", resources.join("db/migration/V2__temporal_tables.sql")),
            ("openapi_spec", resources.join("openapi/api.yaml")),
            ("openapi_generator", self.project_dir.join("openapi-generator.yaml")),
            ("entity_mapper", java_root.join("util/mapper/EntityMapper.java")),
        ];

        targets
            .into_iter()
            .map(|(template, path)| {
                let content = self.renderer.render_bindings(template, &self.bindings)?;
                Ok(ScaffoldFile { path, content })
            })
            .collect()
    }

    /// Create the directory tree and write every rendered file
    pub fn apply(&self, writer: &CodeWriter) -> Result<Vec<PathBuf>, CodegenError> {
        let files = self.render()?;
        writer.create_directories(self.directories())?;

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            writer.write_if_changed(&file.path, &file.content)?;
            written.push(file.path);
        }
        Ok(written)
    }

    fn helm_dir(&self) -> PathBuf {
        self.project_dir.join("helm").join(&self.bindings.name)
    }
}
