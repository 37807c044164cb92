use crate::build_tool::{require_project, run_streaming, BuildTool};
use crate::error::CliError;
use crate::output::OutputSink;
use std::path::Path;

/// Package the application, skipping tests
pub fn run(project_dir: &Path, out: &dyn OutputSink) -> Result<(), CliError> {
    require_project(project_dir)?;

    let tool = BuildTool::detect(project_dir);
    out.info(&format!("Building application with {}...", tool));
    run_streaming(tool.program(), &tool.build_args(), project_dir, &[])?;
    out.success("Build completed");
    Ok(())
}
