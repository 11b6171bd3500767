//! `svgpng export` command.
//!
//! Pipeline:
//! - **Ingest** - Read files (or stdin for `-`), skipping rejected inputs
//! - **Target** - Seed the size from the first document, then apply config
//! - **Export** - Single or batch run with a live status line
//! - **Report** - Final status and exit code

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};

use crate::{
    cli::ExportArgs,
    config::{AppConfig, ExportConfig},
    debug,
    export::{
        DirSink, ExportRun, ExportTarget, Exporter, SourceDocument, find_preset, ingest, report,
    },
    log,
    logger::{StatusLine, set_verbose},
    svg::{Rasterizer, ResolvedDimensions, ResvgEngine, resolve},
    utils::plural_count,
};

/// Path argument that means "read markup from stdin".
const STDIN_PATH: &str = "-";

/// Run the export command. Fails the process when nothing was exported.
pub fn export(args: &ExportArgs, config: &AppConfig) -> Result<ExitCode> {
    set_verbose(args.verbose);

    let max_size = config.input.max_size_bytes();
    let documents = collect_documents(&args.paths, max_size, io::stdin().lock());
    if documents.is_empty() {
        bail!("no SVG documents to export");
    }

    let dims = resolve(&documents[0].markup);
    debug!(
        "export";
        "{} resolves to {}x{}",
        documents[0].name, dims.width, dims.height
    );
    let target = build_target(&dims, &config.export)?;

    let batch = args.batch || documents.len() > 1;
    log!(
        "export";
        "{} at {}x{} -> {}",
        plural_count(documents.len(), "document"),
        target.width(),
        target.height(),
        config.export.output_dir.display()
    );

    let rasterizer = Rasterizer::new(ResvgEngine).with_timeout(config.render.timeout());
    let mut exporter = Exporter::new(rasterizer, DirSink::new(&config.export.output_dir));

    let run = block_on(run_with_status(&mut exporter, documents, &target, batch))??;

    Ok(if run_succeeded(&run, batch) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Read every path in argument order, logging the ones that are skipped.
///
/// `-` reads pasted markup from `stdin` where it appears, once.
fn collect_documents(paths: &[PathBuf], max_size: u64, stdin: impl Read) -> Vec<SourceDocument> {
    let mut stdin = Some(stdin);
    let mut documents = Vec::with_capacity(paths.len());

    for path in paths {
        let result = if path.as_path() == Path::new(STDIN_PATH) {
            match stdin.take() {
                Some(reader) => ingest::read_text(reader, max_size),
                None => {
                    log!("warning"; "skipped: stdin is read only once");
                    continue;
                }
            }
        } else {
            ingest::read_file(path, max_size)
        };

        match result {
            Ok(doc) => documents.push(doc),
            Err(err) => log!("warning"; "skipped: {:#}", anyhow!(err)),
        }
    }

    documents
}

/// Run `future` to completion on a current-thread runtime.
///
/// The runtime is shut down without waiting on blocking tasks, so a render
/// abandoned after a timeout cannot keep the process alive.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start async runtime")?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

/// Derive the export target from the document size and configuration.
///
/// Order: style and lock first, then the preset, then explicit sides.
pub fn build_target(dims: &ResolvedDimensions, export: &ExportConfig) -> Result<ExportTarget> {
    let mut target = ExportTarget::from_dimensions(dims);
    target.set_preserve_style(export.preserve_style);
    target.set_lock_aspect_ratio(export.lock_aspect_ratio);

    if let Some(name) = &export.preset {
        let preset = find_preset(name).ok_or_else(|| anyhow!("unknown preset `{name}`"))?;
        target.apply_preset(preset);
    }

    match (export.width, export.height) {
        (Some(width), Some(height)) => target.resize(width, height),
        (Some(width), None) => target.set_width(width),
        (None, Some(height)) => target.set_height(height),
        (None, None) => {}
    }

    Ok(target)
}

/// Drive the exporter while redrawing the status line on every state change.
async fn run_with_status(
    exporter: &mut Exporter<DirSink>,
    documents: Vec<SourceDocument>,
    target: &ExportTarget,
    batch: bool,
) -> Result<ExportRun> {
    let mut status = StatusLine::new();
    let mut progress = exporter.subscribe();

    let result = {
        let work = async {
            if batch {
                exporter.export_batch(documents, target).await.map(|_| ())
            } else {
                let doc = documents.into_iter().next();
                match doc {
                    Some(doc) => exporter.export_single(doc, target).await.map(|_| ()),
                    None => Ok(()),
                }
            }
        };
        tokio::pin!(work);

        loop {
            tokio::select! {
                result = &mut work => break result,
                Ok(()) = progress.changed() => {
                    let message = report(&progress.borrow_and_update());
                    if let Some(message) = message {
                        status.show(&message);
                    }
                }
            }
        }
    };

    let run = exporter.run();
    if let Some(message) = report(&run) {
        status.show(&message);
    }

    if let Err(err) = result {
        debug!("export"; "{:#}", anyhow!(err));
    }
    for outcome in &run.outcomes {
        debug!("export"; "{:?}", outcome);
    }

    Ok(run)
}

/// Single mode fails on any error; batch mode only when nothing succeeded.
fn run_succeeded(run: &ExportRun, batch: bool) -> bool {
    if batch {
        run.succeeded() > 0
    } else {
        run.all_succeeded() && run.succeeded() == 1
    }
}
