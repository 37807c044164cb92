use crate::build_tool::{require_project, run_streaming, BuildTool};
use crate::error::CliError;
use crate::output::OutputSink;
use std::path::Path;

/// Run the whole suite, or a single test class when `test` is given
pub fn run(
    project_dir: &Path,
    test: Option<&str>,
    out: &dyn OutputSink,
) -> Result<(), CliError> {
    require_project(project_dir)?;

    let tool = BuildTool::detect(project_dir);
    match test {
        Some(name) if !name.trim().is_empty() => {
            out.info(&format!("Running test {}...", name.trim()))
        }
        _ => out.info("Running tests..."),
    }
    run_streaming(tool.program(), &tool.test_args(test), project_dir, &[])?;
    out.success("Tests passed");
    Ok(())
}
