use crate::build_tool::{require_project, run_streaming, BuildTool};
use crate::error::CliError;
use crate::output::OutputSink;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PROFILE: &str = "dev";

/// Run the application through the project's build wrapper
pub fn run(
    project_dir: &Path,
    port: u16,
    profile: &str,
    debug: bool,
    out: &dyn OutputSink,
) -> Result<(), CliError> {
    require_project(project_dir)?;

    let tool = BuildTool::detect(project_dir);
    let envs: &[(&str, &str)] = if debug { &[("DEBUG", "true")] } else { &[] };

    out.info(&format!(
        "Starting application in development mode with {} (profile {}, port {})...",
        tool, profile, port
    ));
    run_streaming(tool.program(), &tool.dev_args(profile, port), project_dir, envs)?;
    Ok(())
}
