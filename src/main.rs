use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};
use keel::{format_source, run_source};
use walkdir::WalkDir;

/// keel is an easy to read scripting language with first-class functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs a .k program.
    Run {
        /// Path of the program's entry file.
        path: PathBuf,
    },
    /// Rewrites .k source in canonical formatting. Accepts a single file,
    /// or a directory to walk recursively.
    Format {
        /// Path of the file or directory to format.
        path: PathBuf,
    },
}

fn main() {
    let args = Args::parse();
    match args.command {
        Command::Run { path } => run(&path),
        Command::Format { path } => format(&path),
    }
}

fn run(path: &Path) {
    let source = read_script(path);
    if let Err(e) = run_source(&source) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn format(path: &Path) {
    if path.is_dir() {
        for entry in WalkDir::new(path).into_iter().filter_map(Result::ok) {
            let is_script = entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "k");
            if is_script {
                format_file(entry.path());
            }
        }
    } else {
        format_file(path);
    }
}

/// Formats one file in place. A malformed file is reported and skipped so
/// a directory walk still reaches the remaining files.
fn format_file(path: &Path) {
    let source = read_script(path);
    match format_source(&source) {
        Ok(formatted) => {
            if let Err(e) = fs::write(path, formatted) {
                eprintln!("Failed to write '{}': {e}", path.display());
            }
        },
        Err(e) => eprintln!("'{}': {e}", path.display()),
    }
}

fn read_script(path: &Path) -> String {
    if path.extension().map_or(true, |ext| ext != "k") {
        eprintln!("The file extension must be .k: '{}'.", path.display());
        process::exit(1);
    }
    fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!(
            "Failed to read '{}'. Perhaps this file does not exist?",
            path.display()
        );
        process::exit(1);
    })
}
