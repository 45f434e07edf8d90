// tkwire-cli/src/main.rs
//! Dry run of a window layout: builds it against a recording interpreter
//! and prints the toolkit script the layout produces.

use std::path::PathBuf;
use std::rc::Rc;

use tkwire_core::{ConfigFile, Recorder, Tk};
use tkwire_widgets::build_window;
use tracing_subscriber::EnvFilter;

/// Value of a `--name=value` argument
fn arg_value(name: &str) -> Option<String> {
    let prefix = format!("--{}=", name);
    std::env::args()
        .skip(1)
        .find_map(|arg| arg.strip_prefix(&prefix).map(String::from))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only the script
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match arg_value("layout") {
        Some(path) => ConfigFile::from_path(&PathBuf::from(path))?,
        None => ConfigFile::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load layout, using default");
            ConfigFile::default()
        }),
    };

    let recorder = Rc::new(Recorder::new());
    let tk = Tk::new(recorder.clone());
    let root = build_window(&tk, &config)?;
    root.main_loop();

    let script = recorder.script();
    match arg_value("out") {
        Some(path) => {
            std::fs::write(&path, &script)?;
            tracing::info!(%path, commands = recorder.commands().len(), "script written");
        }
        None => print!("{}", script),
    }

    Ok(())
}
