//! Application runner logic
//!
//! Handles the different ways to run snapscene and how a failed start is
//! reported on each target.

use crate::core::config::{CliArgs, ConfigFile, SceneSettings};
use crate::logging;
use crate::scenes::SceneKind;
use anyhow::{Context, Result};

/// Parse CLI arguments. Browsers have no command line, so wasm builds start
/// the default scene.
pub fn cli_args() -> CliArgs {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use clap::Parser;
        CliArgs::parse()
    }
    #[cfg(target_arch = "wasm32")]
    {
        CliArgs::default_for_web()
    }
}

/// Route wasm panics to the browser console
pub fn init_panic_handling() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Create and run the application with the given CLI arguments.
/// Handles special CLI flags before building the app.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    // Handle --new-config flag specially
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    if cli_args.log_to_file {
        logging::initialize_logs_directory().context("Failed to create logs directory")?;
        println!("Logging to {:?}", logging::current_log_file());
    }

    let mut app = crate::core::app::create_app(cli_args)?;
    app.run();
    Ok(())
}

/// Scene a failed run was trying to open, for error reports
pub fn intended_scene(cli_args: &CliArgs) -> SceneKind {
    let config = ConfigFile::load().ok().flatten();
    SceneSettings::resolve(cli_args, config.as_ref()).scene
}

/// Text shown when snapscene fails to start
pub fn failure_report(error: &anyhow::Error, scene: SceneKind) -> String {
    let mut report = format!("Error starting the {} scene:\n{error:#}\n", scene.as_str());

    let touched_disk = error
        .chain()
        .any(|cause| cause.is::<std::io::Error>() || cause.is::<serde_json::Error>());
    if touched_disk {
        report.push_str(&format!(
            "\nCould not use the config directory {}.\nCheck {} or rebuild both with --new-config.",
            ConfigFile::config_dir().display(),
            ConfigFile::config_path().display(),
        ));
    } else {
        report.push_str("\nTry running with --help for usage information.");
    }
    report
}

/// Print the failure and exit(1) natively, log it to the console on wasm
pub fn report_failure(error: &anyhow::Error, scene: SceneKind) {
    let report = failure_report(error, scene);

    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("\n{report}\n");
        std::process::exit(1);
    }
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::error_1(&report.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_failures_point_at_config() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = anyhow::Error::new(io_error).context("Failed to create logs directory");

        let report = failure_report(&error, SceneKind::Snap);

        assert!(report.starts_with("Error starting the snap scene:"));
        assert!(report.contains("Failed to create logs directory: denied"));
        assert!(report.contains("--new-config"));
        assert!(report.contains(&ConfigFile::config_path().display().to_string()));
    }

    #[test]
    fn test_argument_failures_point_at_help() {
        let error = anyhow::anyhow!("CLI validation failed: Invalid object count: 0");

        let report = failure_report(&error, SceneKind::Cube);

        assert!(report.starts_with("Error starting the cube scene:"));
        assert!(report.contains("--help"));
        assert!(!report.contains("--new-config"));
    }
}
