use crate::error::CodegenError;
use crate::templates::TemplateRenderer;
use serde::Serialize;
use springwell_core::naming::{to_camel_case, to_pascal_case, to_snake_case, NameVariants};
use springwell_core::{
    parse_fields, parse_relationships, CoreError, FieldDefinition, ProjectConfig,
    RelationshipDefinition,
};
use std::path::{Path, PathBuf};

/// Root of generated Java sources inside a project
pub const JAVA_SOURCE_ROOT: &str = "src/main/java";

/// Kinds of files the generator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Entity,
    Repository,
    Service,
    ServiceImpl,
    Controller,
    Dto,
    Workflow,
    WorkflowImpl,
    Activity,
    ActivityImpl,
}

impl ArtifactKind {
    pub fn template_name(&self) -> &'static str {
        match self {
            ArtifactKind::Entity => "entity",
            ArtifactKind::Repository => "repository",
            ArtifactKind::Service => "service",
            ArtifactKind::ServiceImpl => "service_impl",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Dto => "dto",
            ArtifactKind::Workflow => "workflow",
            ArtifactKind::WorkflowImpl => "workflow_impl",
            ArtifactKind::Activity => "activity",
            ArtifactKind::ActivityImpl => "activity_impl",
        }
    }

    /// Package-relative directory the artifact lives in
    pub fn subdirectory(&self) -> &'static str {
        match self {
            ArtifactKind::Entity => "domain/entity",
            ArtifactKind::Repository => "repository",
            ArtifactKind::Service => "service",
            ArtifactKind::ServiceImpl => "service/impl",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Dto => "domain/dto",
            ArtifactKind::Workflow => "temporal/workflow",
            ArtifactKind::WorkflowImpl => "temporal/workflow/impl",
            ArtifactKind::Activity => "temporal/activity",
            ArtifactKind::ActivityImpl => "temporal/activity/impl",
        }
    }

    pub fn file_name(&self, class_name: &str) -> String {
        let suffix = match self {
            ArtifactKind::Entity => "",
            ArtifactKind::Repository => "Repository",
            ArtifactKind::Service => "Service",
            ArtifactKind::ServiceImpl => "ServiceImpl",
            ArtifactKind::Controller => "Controller",
            ArtifactKind::Dto => "DTO",
            ArtifactKind::Workflow => "Workflow",
            ArtifactKind::WorkflowImpl => "WorkflowImpl",
            ArtifactKind::Activity => "Activity",
            ArtifactKind::ActivityImpl => "ActivityImpl",
        };
        format!("{}{}.java", class_name, suffix)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Entity => "entity",
            ArtifactKind::Repository => "repository",
            ArtifactKind::Service => "service interface",
            ArtifactKind::ServiceImpl => "service implementation",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Dto => "DTO",
            ArtifactKind::Workflow => "workflow interface",
            ArtifactKind::WorkflowImpl => "workflow implementation",
            ArtifactKind::Activity => "activity interface",
            ArtifactKind::ActivityImpl => "activity implementation",
        }
    }
}

/// Standalone components that can be generated without a field list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Entity,
    Controller,
    Service,
    Repository,
    Dto,
    Workflow,
    Activity,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 7] = [
        ComponentKind::Entity,
        ComponentKind::Controller,
        ComponentKind::Service,
        ComponentKind::Repository,
        ComponentKind::Dto,
        ComponentKind::Workflow,
        ComponentKind::Activity,
    ];

    pub fn artifacts(&self) -> &'static [ArtifactKind] {
        match self {
            ComponentKind::Entity => &[ArtifactKind::Entity],
            ComponentKind::Controller => &[ArtifactKind::Controller],
            ComponentKind::Service => &[ArtifactKind::Service, ArtifactKind::ServiceImpl],
            ComponentKind::Repository => &[ArtifactKind::Repository],
            ComponentKind::Dto => &[ArtifactKind::Dto],
            // A workflow always comes with the activity it drives
            ComponentKind::Workflow => &[
                ArtifactKind::Workflow,
                ArtifactKind::WorkflowImpl,
                ArtifactKind::Activity,
                ArtifactKind::ActivityImpl,
            ],
            ComponentKind::Activity => &[ArtifactKind::Activity, ArtifactKind::ActivityImpl],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Entity => "Entity",
            ComponentKind::Controller => "Controller",
            ComponentKind::Service => "Service",
            ComponentKind::Repository => "Repository",
            ComponentKind::Dto => "DTO",
            ComponentKind::Workflow => "Temporal Workflow",
            ComponentKind::Activity => "Temporal Activity",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Switches selecting which artifacts accompany an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub audit: bool,
    pub lombok: bool,
    pub dto: bool,
    pub repository: bool,
    pub service: bool,
    pub controller: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            audit: true,
            lombok: true,
            dto: true,
            repository: true,
            service: true,
            controller: true,
        }
    }
}

impl GenerationOptions {
    /// Only the entity class itself
    pub fn entity_only() -> Self {
        Self {
            dto: false,
            repository: false,
            service: false,
            controller: false,
            ..Self::default()
        }
    }
}

/// Everything needed to generate one entity and its companions
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub entity_name: String,
    pub fields: Vec<FieldDefinition>,
    pub relationships: Vec<RelationshipDefinition>,
    pub table_name: Option<String>,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    /// Build a request from the raw strings collected by the CLI
    pub fn parse(
        entity_name: &str,
        fields_spec: &str,
        relationships_spec: &str,
        table_name: Option<&str>,
        options: GenerationOptions,
    ) -> Result<Self, CoreError> {
        let entity_name = entity_name.trim();
        if to_pascal_case(entity_name).is_empty() {
            return Err(CoreError::validation("entity name is required"));
        }

        Ok(Self {
            entity_name: entity_name.to_string(),
            fields: parse_fields(fields_spec)?,
            relationships: parse_relationships(relationships_spec)?,
            table_name: table_name
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            options,
        })
    }

    /// Explicit table name, or the pluralised snake_case entity name
    pub fn resolved_table_name(&self) -> String {
        self.table_name
            .clone()
            .unwrap_or_else(|| NameVariants::new(&self.entity_name).plural_snake())
    }

    fn artifacts(&self) -> Vec<ArtifactKind> {
        let mut artifacts = vec![ArtifactKind::Entity];
        if self.options.repository {
            artifacts.push(ArtifactKind::Repository);
        }
        if self.options.service {
            artifacts.push(ArtifactKind::Service);
            artifacts.push(ArtifactKind::ServiceImpl);
        }
        if self.options.controller {
            artifacts.push(ArtifactKind::Controller);
        }
        if self.options.dto {
            artifacts.push(ArtifactKind::Dto);
        }
        artifacts
    }
}

/// Field as exposed to templates
#[derive(Debug, Clone, Serialize)]
pub struct FieldBinding {
    pub name: String,
    pub property: String,
    pub accessor: String,
    pub type_name: String,
    pub nullable: bool,
    pub column_name: String,
}

impl From<&FieldDefinition> for FieldBinding {
    fn from(field: &FieldDefinition) -> Self {
        Self {
            name: field.name.clone(),
            property: to_camel_case(&field.name),
            accessor: to_pascal_case(&field.name),
            type_name: field.type_name.clone(),
            nullable: field.nullable,
            column_name: field.column_name.clone(),
        }
    }
}

/// Relationship as exposed to templates
#[derive(Debug, Clone, Serialize)]
pub struct RelationshipBinding {
    pub kind: String,
    pub annotation: String,
    pub field_name: String,
    pub accessor: String,
    pub target_entity: String,
    pub collection: bool,
    pub join_column: String,
    pub join_table: String,
}

impl RelationshipBinding {
    fn new(relationship: &RelationshipDefinition, owner: &NameVariants) -> Self {
        let field_snake = to_snake_case(&relationship.field_name);
        Self {
            kind: relationship.kind.to_string(),
            annotation: relationship.kind.annotation().to_string(),
            field_name: to_camel_case(&relationship.field_name),
            accessor: to_pascal_case(&relationship.field_name),
            target_entity: to_pascal_case(&relationship.target_entity),
            collection: relationship.kind.is_collection(),
            join_column: format!("{}_id", field_snake),
            join_table: format!("{}_{}", owner.snake, field_snake),
        }
    }
}

/// Typed template bindings for entity-centred artifacts
#[derive(Debug, Clone, Serialize)]
pub struct EntityBindings {
    pub name: String,
    pub class_name: String,
    pub variable_name: String,
    pub snake_name: String,
    pub kebab_name: String,
    pub plural_variable_name: String,
    pub resource_path: String,
    pub package: String,
    pub table_name: String,
    pub fields: Vec<FieldBinding>,
    pub relationships: Vec<RelationshipBinding>,
    pub has_collections: bool,
    pub audit: bool,
    pub lombok: bool,
    pub dto: bool,
    pub repository: bool,
    pub service: bool,
    pub controller: bool,
}

impl EntityBindings {
    pub fn new(request: &GenerationRequest, package: &str) -> Self {
        let names = NameVariants::new(&request.entity_name);
        let relationships: Vec<RelationshipBinding> = request
            .relationships
            .iter()
            .map(|rel| RelationshipBinding::new(rel, &names))
            .collect();

        Self {
            name: names.raw.clone(),
            class_name: names.pascal.clone(),
            variable_name: names.camel.clone(),
            snake_name: names.snake.clone(),
            kebab_name: names.kebab.clone(),
            plural_variable_name: names.plural_camel(),
            resource_path: names.plural_kebab(),
            package: package.to_string(),
            table_name: request.resolved_table_name(),
            fields: request.fields.iter().map(FieldBinding::from).collect(),
            has_collections: relationships.iter().any(|r| r.collection),
            relationships,
            audit: request.options.audit,
            lombok: request.options.lombok,
            dto: request.options.dto,
            repository: request.options.repository,
            service: request.options.service,
            controller: request.options.controller,
        }
    }
}

/// One rendered artifact and where it belongs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
    pub kind: ArtifactKind,
}

/// Renders entities and standalone components into Java source files
pub struct EntityGenerator {
    project_dir: PathBuf,
    package: String,
    renderer: TemplateRenderer,
}

impl EntityGenerator {
    /// Generator for a project, honouring its override-template directory
    pub fn new(project_dir: impl Into<PathBuf>, config: &ProjectConfig) -> Self {
        let project_dir = project_dir.into();
        let renderer = TemplateRenderer::new(Some(config.templates_dir(&project_dir)));
        Self {
            project_dir,
            package: config.project.package.clone(),
            renderer,
        }
    }

    pub fn with_renderer(
        project_dir: impl Into<PathBuf>,
        package: impl Into<String>,
        renderer: TemplateRenderer,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            package: package.into(),
            renderer,
        }
    }

    /// Render the entity and every companion the request asks for.
    ///
    /// Nothing is written here; a failure in any template fails the whole call.
    pub fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedFile>, CodegenError> {
        let bindings = EntityBindings::new(request, &self.package);
        tracing::debug!(
            entity = %bindings.class_name,
            table = %bindings.table_name,
            fields = bindings.fields.len(),
            relationships = bindings.relationships.len(),
            "generating entity"
        );

        request
            .artifacts()
            .into_iter()
            .map(|kind| self.render_artifact(kind, &bindings))
            .collect()
    }

    /// Parse the raw definition strings and generate in one step
    pub fn generate_from_specs(
        &self,
        entity_name: &str,
        fields_spec: &str,
        relationships_spec: &str,
        table_name: Option<&str>,
        options: GenerationOptions,
    ) -> Result<Vec<GeneratedFile>, CodegenError> {
        let request = GenerationRequest::parse(
            entity_name,
            fields_spec,
            relationships_spec,
            table_name,
            options,
        )?;
        self.generate(&request)
    }

    /// Generate a standalone component with no declared fields
    pub fn generate_component(
        &self,
        component: ComponentKind,
        name: &str,
    ) -> Result<Vec<GeneratedFile>, CodegenError> {
        let request =
            GenerationRequest::parse(name, "", "", None, GenerationOptions::default())?;
        let bindings = EntityBindings::new(&request, &self.package);

        component
            .artifacts()
            .iter()
            .map(|kind| self.render_artifact(*kind, &bindings))
            .collect()
    }

    /// Destination of an artifact for a given class name
    pub fn artifact_path(&self, kind: ArtifactKind, class_name: &str) -> PathBuf {
        package_dir(&self.project_dir, &self.package)
            .join(kind.subdirectory())
            .join(kind.file_name(class_name))
    }

    fn render_artifact(
        &self,
        kind: ArtifactKind,
        bindings: &EntityBindings,
    ) -> Result<GeneratedFile, CodegenError> {
        let content = self.renderer.render_bindings(kind.template_name(), bindings)?;
        Ok(GeneratedFile {
            path: self.artifact_path(kind, &bindings.class_name),
            content,
            kind,
        })
    }
}

/// `<project>/src/main/java/com/example/service`
pub fn package_dir(project_dir: &Path, package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .fold(project_dir.join(JAVA_SOURCE_ROOT), |dir, segment| dir.join(segment))
}
