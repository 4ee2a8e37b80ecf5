//! Headless driver for the deckmerge pipeline.
//!
//! Stands in for the presentation layer: loads the two input files, drives
//! the core update loop against the engine, and saves the generated report.

mod effects;
mod logging;

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use deckmerge_core::{update, AppState, Msg, SessionState};
use deckmerge_engine::{InputFile, ReportDownload, ReportSink};
use engine_logging::{engine_error, engine_info};

use crate::effects::EffectRunner;

#[derive(Debug)]
struct CliArgs {
    document: PathBuf,
    archive: PathBuf,
    output_dir: PathBuf,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    match args {
        [document, archive] => Ok(CliArgs {
            document: PathBuf::from(document),
            archive: PathBuf::from(archive),
            output_dir: PathBuf::from("output"),
        }),
        [document, archive, output_dir] => Ok(CliArgs {
            document: PathBuf::from(document),
            archive: PathBuf::from(archive),
            output_dir: PathBuf::from(output_dir),
        }),
        _ => Err("usage: deckmerge_app <deck.pptx> <images.zip> [output-dir]".to_string()),
    }
}

fn load_input(path: &Path) -> Result<InputFile, String> {
    let name = path
        .file_name()
        .ok_or_else(|| format!("not a file path: {}", path.display()))?
        .to_string_lossy()
        .to_string();
    let content =
        std::fs::read(path).map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    Ok(InputFile::new(name, content))
}

fn main() {
    logging::initialize_from_env();

    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw_args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(message) => {
            engine_error!("{message}");
            std::process::exit(1);
        }
    }
}

fn run(args: CliArgs) -> Result<(), String> {
    let document = load_input(&args.document)?;
    let archive = load_input(&args.archive)?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(msg_tx, document.clone(), archive.clone());

    let mut state = AppState::new();
    for msg in [
        Msg::DocumentSelected(document.name.clone()),
        Msg::ArchiveSelected(archive.name.clone()),
        Msg::ProcessClicked,
    ] {
        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.run(effects);
    }
    if state.session() != SessionState::Running {
        return Err("submission was rejected".to_string());
    }

    // Drain engine messages until the run reaches a terminal result.
    loop {
        let msg = msg_rx
            .recv_timeout(Duration::from_secs(120))
            .map_err(|_| "engine stopped responding".to_string())?;
        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.run(effects);

        let view = state.view();
        if let Some(step) = view.steps.get(view.current_step) {
            engine_info!(
                "step {}/{}: {} ({}%{})",
                view.current_step + 1,
                view.steps.len(),
                step.label,
                step.progress,
                if step.completed { ", done" } else { "" }
            );
        }
        if view.folders_total > 0 {
            engine_info!(
                "folders: {}/{} processed",
                view.folders_processed,
                view.folders_total
            );
        }
        if view.session == SessionState::Finished {
            break;
        }
    }

    let result = state.view().result.expect("finished run has a result");
    if !result.success {
        return Err(format!("processing failed: {}", result.message));
    }

    let download = result
        .download
        .ok_or_else(|| "successful run without a download reference".to_string())?;
    let sink = ReportSink::new(args.output_dir);
    let path = sink
        .save_download(
            &runner.engine().blob_store(),
            &ReportDownload {
                url: download.url,
                filename: download.filename,
            },
        )
        .map_err(|err| format!("cannot save report: {err}"))?;

    engine_info!("{}", result.message);
    engine_info!("report saved to {}", path.display());
    Ok(())
}
