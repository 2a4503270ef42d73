use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use project_context_snapshot::{SnapshotGenerator, OUTPUT_PATH};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "project-context")]
#[command(about = "Snapshot the project's text files into a JSON context file", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root to scan
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Output file (relative paths resolve against the project root)
    #[arg(long, default_value = OUTPUT_PATH)]
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    run_generate(&cli.root, &cli.output)
}

fn run_generate(root: &Path, output: &Path) -> Result<()> {
    let root = root.canonicalize().context("Invalid project path")?;
    let output = resolve_output(&root, output);

    let stats = SnapshotGenerator::new(&root)
        .generate(&output)
        .with_context(|| format!("Failed to generate project context for {}", root.display()))?;

    print_stdout(&format!("Wrote {} files to {}", stats.files, output.display()))
}

fn resolve_output(root: &Path, output: &Path) -> PathBuf {
    if output.is_relative() {
        root.join(output)
    } else {
        output.to_path_buf()
    }
}
