use std::{
    fs,
    path::{Path, PathBuf},
    process,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use corvin::{compile_source, display_error, errors::errors::Error, CompiledUnit};
use rayon::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

const EXTENSION: &str = "cor";

/// Type-checking front end for the Corvin language.
#[derive(Parser, Debug)]
#[command(name = "corvin", version, about = "Corvin front end: tokenize, parse and infer types")]
struct Args {
    /// Files to compile. A missing extension gets `.cor` appended.
    /// Defaults to every `.cor` file in the current directory.
    #[arg(short, long, num_args = 1..)]
    file: Vec<PathBuf>,

    /// Where the annotated trees are written
    #[arg(short, long)]
    output: PathBuf,

    /// Log every stage of the pipeline
    #[arg(short, long)]
    verbose: bool,

    /// Log warnings, such as constructs without an inference rule
    #[arg(short, long)]
    warnings: bool,
}

impl Args {
    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::DEBUG
        } else if self.warnings {
            LevelFilter::WARN
        } else {
            LevelFilter::ERROR
        }
    }
}

fn init_logger(level: LevelFilter) {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_level(true)
        .compact()
        .with_filter(level);

    Registry::default().with(layer).init();
}

fn with_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(EXTENSION)
    }
}

fn source_files(requested: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = if requested.is_empty() {
        let mut found = vec![];
        for entry in fs::read_dir(".").context("failed to read the current directory")? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION) {
                found.push(path);
            }
        }
        found.sort();
        found
    } else {
        requested.into_iter().map(with_extension).collect()
    };

    if files.is_empty() {
        bail!("no .{} files to compile", EXTENSION);
    }
    if let Some(missing) = files.iter().find(|path| !path.exists()) {
        bail!("file {} does not exist", missing.display());
    }

    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.level());

    let files = source_files(args.file)?;
    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let source = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        sources.push((file_name(&path), source));
    }

    let start = Instant::now();
    let units: Vec<(String, Result<CompiledUnit, Error>)> = sources
        .into_par_iter()
        .map(|(name, source)| {
            let unit = compile_source(&source, Some(name.clone()));
            (name, unit)
        })
        .collect();
    debug!(files = units.len(), elapsed = ?start.elapsed(), "compiled sources");

    let mut output = String::new();
    for (name, unit) in units {
        match unit {
            Ok(unit) => {
                output.push_str(&format!("// {}\n{}\n", name, unit.program));
            }
            Err(err) => {
                display_error(&err.to_diagnostic());
                process::exit(1);
            }
        }
    }

    fs::write(&args.output, output).with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(output = %args.output.display(), "wrote annotated trees");

    Ok(())
}
