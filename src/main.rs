use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use frontend::{
    compile, display_error,
    type_checker::context::{CompilerContext, StaticImportResolver},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frontend")]
#[command(about = "Parses and type-checks a source file", long_about = None)]
#[command(version)]
struct Cli {
    /// Source file to check
    file: PathBuf,
    /// Log every compilation stage
    #[arg(short, long)]
    verbose: bool,
    /// Make the bundled standard library importable
    #[arg(long)]
    import_std: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let source = read_to_string(&cli.file).with_context(|| format!("failed to read {}", cli.file.display()))?;
    let file_name = cli
        .file
        .file_name()
        .map_or_else(|| cli.file.to_string_lossy(), |name| name.to_string_lossy())
        .to_string();

    let context = if cli.import_std {
        CompilerContext::new(StaticImportResolver::standard())
    } else {
        CompilerContext::default()
    };

    let start = Instant::now();
    let result = compile(&source, &file_name, &context);
    tracing::info!(elapsed = ?start.elapsed(), "checked {}", file_name);

    match result {
        Ok(unit) => {
            println!(
                "{}: {} imports, {} declarations, no errors",
                file_name,
                unit.imports.len(),
                unit.entries.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            for error in &errors {
                display_error(error, &source);
            }
            println!("{}: {} errors", file_name, errors.len());
            Ok(ExitCode::FAILURE)
        }
    }
}
