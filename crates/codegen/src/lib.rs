//! Template-driven source generation for Spring Boot projects.
//!
//! [`EntityGenerator`] turns a parsed entity definition into rendered Java
//! artifacts, [`ProjectScaffold`] lays out a new project, and [`CodeWriter`]
//! persists whatever was rendered.

pub mod error;
pub mod generator;
pub mod scaffold;
pub mod templates;
pub mod writer;

pub use error::CodegenError;
pub use generator::*;
pub use scaffold::{Database, ProjectScaffold, ProjectTemplate, ScaffoldBindings, ScaffoldFile};
pub use templates::{TemplateRenderer, TemplateSource};
pub use writer::{CodeWriter, WriteOutcome};
