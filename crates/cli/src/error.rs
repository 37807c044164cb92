use springwell_codegen::CodegenError;
use springwell_core::CoreError;
use thiserror::Error;

/// Top-level error for a CLI invocation
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error("Failed to initialise logging: {message}")]
    Logging { message: String },
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// A failed child process forwards its own status; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        let forwarded = match self {
            CliError::Core(core) => core.exit_code(),
            CliError::Codegen(codegen) => codegen.exit_code(),
            _ => None,
        };
        match forwarded {
            Some(code) if code != 0 => code,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Core(CoreError::Io(err))
    }
}
