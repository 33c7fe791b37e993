//! Interactive 3D scene demos built with Rust and the Bevy game engine.
//!
//! Hold Shift and click boxes to group them, then drag the group around.

use snapscene::core::runner;

fn main() {
    runner::init_panic_handling();
    let cli_args = runner::cli_args();
    let scene = runner::intended_scene(&cli_args);
    if let Err(error) = runner::run_app(cli_args) {
        runner::report_failure(&error, scene);
    }
}
