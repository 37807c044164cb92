use springwell_core::CoreError;
use thiserror::Error;

/// Errors raised while resolving, compiling or rendering templates
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Template not found: '{name}' (no override and no built-in default)")]
    TemplateNotFound { name: String },

    #[error("Template syntax error in '{name}': {message}")]
    TemplateSyntax { name: String, message: String },

    #[error("Template '{template}' references unbound placeholder '{placeholder}'")]
    UnboundPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("Template rendering error in '{name}': {message}")]
    Render { name: String, message: String },
}

impl CodegenError {
    /// Exit code a failed child process reported, if any
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Core(core) => core.exit_code(),
            _ => None,
        }
    }
}
