use springwell_codegen::{
    ArtifactKind, CodeWriter, CodegenError, EntityGenerator, GenerationOptions, WriteOutcome,
};
use springwell_core::ProjectConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn generator(project_dir: &Path) -> EntityGenerator {
    EntityGenerator::new(project_dir, &ProjectConfig::with_package("com.acme.blog"))
}

#[test]
fn blog_post_generates_consistent_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let files = generator(temp_dir.path())
        .generate_from_specs(
            "BlogPost",
            "title:String content:String:nullable",
            "",
            None,
            GenerationOptions::default(),
        )
        .unwrap();

    let kinds: Vec<_> = files.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ArtifactKind::Entity,
            ArtifactKind::Repository,
            ArtifactKind::Service,
            ArtifactKind::ServiceImpl,
            ArtifactKind::Controller,
            ArtifactKind::Dto,
        ]
    );

    let base = temp_dir.path().join("src/main/java/com/acme/blog");
    let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            base.join("domain/entity/BlogPost.java"),
            base.join("repository/BlogPostRepository.java"),
            base.join("service/BlogPostService.java"),
            base.join("service/impl/BlogPostServiceImpl.java"),
            base.join("controller/BlogPostController.java"),
            base.join("domain/dto/BlogPostDTO.java"),
        ]
    );

    let entity = &files[0].content;
    assert!(entity.starts_with("package com.acme.blog.domain.entity;"));
    assert!(entity.contains("@Table(name = \"blog_posts\")"));
    assert!(entity.contains("public class BlogPost {"));
    assert!(entity
        .contains("@Column(name = \"title\", nullable = false)\n    private String title;"));
    assert!(entity
        .contains("@Column(name = \"content\", nullable = true)\n    private String content;"));
    assert!(entity.find("private String title;") < entity.find("private String content;"));

    let controller = &files[4].content;
    assert!(controller.contains("@RequestMapping(\"/api/v1/blog-posts\")"));
    assert!(controller.contains("private final BlogPostService blogPostService;"));
    assert!(controller.contains("List<BlogPost> blogPosts = blogPostService.findAll();"));

    let dto = &files[5].content;
    assert!(dto.contains("private String title;"));
    assert!(dto.contains("private String content;"));
}

#[test]
fn switches_limit_companion_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let options = GenerationOptions {
        dto: false,
        service: false,
        ..GenerationOptions::default()
    };
    let files = generator(temp_dir.path())
        .generate_from_specs(
            "Comment",
            "body:String",
            "manyToOne:post:BlogPost",
            Some("post_comments"),
            options,
        )
        .unwrap();

    let kinds: Vec<_> = files.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![ArtifactKind::Entity, ArtifactKind::Repository, ArtifactKind::Controller]
    );
    assert!(files[0].content.contains("@Table(name = \"post_comments\")"));
    assert!(files[0].content.contains("private BlogPost post;"));
}

#[test]
fn project_override_template_wins() {
    let temp_dir = TempDir::new().unwrap();
    let templates = temp_dir.path().join(".springwell/templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("repository.tera"),
        "// custom\npackage {{ package }}.repository;\ninterface {{ class_name }}Repository {}\n",
    )
    .unwrap();

    let files = generator(temp_dir.path())
        .generate_from_specs("Tag", "label:String", "", None, GenerationOptions::default())
        .unwrap();

    let repository = files
        .iter()
        .find(|f| f.kind == ArtifactKind::Repository)
        .unwrap();
    assert_eq!(
        repository.content,
        "// custom\npackage com.acme.blog.repository;\ninterface TagRepository {}\n"
    );

    let entity = files.iter().find(|f| f.kind == ArtifactKind::Entity).unwrap();
    assert!(entity.content.contains("@Entity"));
}

#[test]
fn broken_override_fails_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let templates = temp_dir.path().join(".springwell/templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("controller.tera"), "class {{ class_name }}Controller {{ nope }}")
        .unwrap();

    let err = generator(temp_dir.path())
        .generate_from_specs("Tag", "label:String", "", None, GenerationOptions::default())
        .unwrap_err();

    assert!(matches!(
        err,
        CodegenError::UnboundPlaceholder { ref template, ref placeholder }
            if template == "controller" && placeholder == "nope"
    ));
    assert!(!temp_dir.path().join("src").exists());
}

#[test]
fn misspelled_condition_in_override_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let templates = temp_dir.path().join(".springwell/templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("entity.tera"),
        "{% if use_lombok %}@Data\n{% endif %}public class {{ class_name }} {}\n",
    )
    .unwrap();

    let err = generator(temp_dir.path())
        .generate_from_specs("Tag", "label:String", "", None, GenerationOptions::default())
        .unwrap_err();

    assert!(matches!(
        err,
        CodegenError::UnboundPlaceholder { ref template, ref placeholder }
            if template == "entity" && placeholder == "use_lombok"
    ));
    assert!(!temp_dir.path().join("src").exists());
}

#[test]
fn generated_files_are_written_to_disk() {
    let temp_dir = TempDir::new().unwrap();
    let files = generator(temp_dir.path())
        .generate_from_specs("Author", "name:String", "", None, GenerationOptions::default())
        .unwrap();

    let written = CodeWriter::new().write_all(&files).unwrap();
    assert_eq!(written.len(), files.len());
    assert!(written.iter().all(|(_, outcome)| *outcome == WriteOutcome::Created));

    let entity = temp_dir
        .path()
        .join("src/main/java/com/acme/blog/domain/entity/Author.java");
    assert!(fs::read_to_string(entity).unwrap().contains("private String name;"));

    // Regenerating identical output leaves files untouched
    let again = CodeWriter::new().write_all(&files).unwrap();
    assert!(again.iter().all(|(_, outcome)| *outcome == WriteOutcome::Unchanged));
}
