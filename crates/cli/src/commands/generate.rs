use crate::build_tool::require_project;
use crate::error::CliError;
use crate::output::OutputSink;
use springwell_codegen::{
    CodeWriter, ComponentKind, EntityGenerator, GeneratedFile, GenerationOptions, WriteOutcome,
};
use springwell_core::ProjectConfig;
use std::path::Path;

/// Raw entity definition as collected from flags or prompts
#[derive(Debug, Clone, Default)]
pub struct EntityArgs {
    pub name: String,
    pub fields: String,
    pub relations: String,
    pub table: Option<String>,
    pub options: GenerationOptions,
}

/// Generate an entity plus the companions its options request.
///
/// Every artifact is rendered before anything is written, so a template or
/// definition error leaves the project untouched.
pub fn entity(
    project_dir: &Path,
    args: &EntityArgs,
    out: &dyn OutputSink,
) -> Result<(), CliError> {
    require_project(project_dir)?;
    let config = ProjectConfig::load(project_dir)?;

    let generator = EntityGenerator::new(project_dir, &config);
    let files = generator.generate_from_specs(
        &args.name,
        &args.fields,
        &args.relations,
        args.table.as_deref(),
        args.options.clone(),
    )?;

    write_files(project_dir, &files, out)?;
    out.success(&format!(
        "Successfully generated {} entity and related components",
        args.name.trim()
    ));
    Ok(())
}

/// Generate one standalone component without a field list
pub fn component(
    project_dir: &Path,
    kind: ComponentKind,
    name: &str,
    out: &dyn OutputSink,
) -> Result<(), CliError> {
    require_project(project_dir)?;
    let config = ProjectConfig::load(project_dir)?;

    let files = EntityGenerator::new(project_dir, &config).generate_component(kind, name)?;
    write_files(project_dir, &files, out)?;
    out.success(&format!("Successfully generated {} {}", name.trim(), kind));
    Ok(())
}

fn write_files(
    project_dir: &Path,
    files: &[GeneratedFile],
    out: &dyn OutputSink,
) -> Result<(), CliError> {
    let written = CodeWriter::new().write_all(files)?;

    for (file, (path, outcome)) in files.iter().zip(&written) {
        let shown = path.strip_prefix(project_dir).unwrap_or(path);
        let verb = match outcome {
            WriteOutcome::Created => "Generated",
            WriteOutcome::Overwritten => "Regenerated",
            WriteOutcome::Unchanged => "Unchanged",
        };
        out.info(&format!("{} {}: {}", verb, file.kind.label(), shown.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::testing::RecordingOutput;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn maven_project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("pom.xml"), "<project/>").unwrap();
        ProjectConfig::with_package("com.acme.blog")
            .save(temp_dir.path())
            .unwrap();
        temp_dir
    }

    #[test]
    #[serial]
    fn test_entity_writes_all_artifacts() {
        let project = maven_project();
        let out = RecordingOutput::default();
        let args = EntityArgs {
            name: "BlogPost".to_string(),
            fields: "title:String content:String:nullable".to_string(),
            ..EntityArgs::default()
        };

        entity(project.path(), &args, &out).unwrap();

        let base = project.path().join("src/main/java/com/acme/blog");
        for path in [
            "domain/entity/BlogPost.java",
            "repository/BlogPostRepository.java",
            "service/BlogPostService.java",
            "service/impl/BlogPostServiceImpl.java",
            "controller/BlogPostController.java",
            "domain/dto/BlogPostDTO.java",
        ] {
            assert!(base.join(path).is_file(), "missing {path}");
        }
        assert_eq!(out.messages("info").len(), 6);
        assert_eq!(
            out.messages("success"),
            vec!["Successfully generated BlogPost entity and related components"]
        );
    }

    #[test]
    #[serial]
    fn test_bad_field_spec_writes_nothing() {
        let project = maven_project();
        let out = RecordingOutput::default();
        let args = EntityArgs {
            name: "BlogPost".to_string(),
            fields: "title".to_string(),
            ..EntityArgs::default()
        };

        let err = entity(project.path(), &args, &out).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(!project.path().join("src").exists());
    }

    #[test]
    #[serial]
    fn test_component_requires_project() {
        let temp_dir = TempDir::new().unwrap();
        let out = RecordingOutput::default();
        assert!(component(temp_dir.path(), ComponentKind::Dto, "Order", &out).is_err());
    }

    #[test]
    #[serial]
    fn test_activity_component() {
        let project = maven_project();
        let out = RecordingOutput::default();
        component(project.path(), ComponentKind::Activity, "send-email", &out).unwrap();

        let activity = project
            .path()
            .join("src/main/java/com/acme/blog/temporal/activity/impl/SendEmailActivityImpl.java");
        assert!(fs::read_to_string(activity)
            .unwrap()
            .contains("public class SendEmailActivityImpl implements SendEmailActivity"));
    }
}
