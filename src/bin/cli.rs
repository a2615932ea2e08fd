// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Pointframe CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use pointframe::{codegen::EndMode, config::EmitOptions, Document, KindTag};
use std::path::Path;

#[derive(Parser)]
#[command(name = "pointframe")]
#[command(about = "Pointframe - parametric point-cloud engine and PointsBuilder code generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input tree JSON file
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a tree file to a point cloud
    Points {
        /// Input tree JSON file
        input: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (json, csv)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Generate PointsBuilder source text from a tree file
    Emit {
        /// Input tree JSON file
        input: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// End mode (list, clone, builder)
        #[arg(long)]
        end_mode: Option<String>,
    },

    /// List supported node kinds
    Kinds,

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Points {
            input,
            output,
            format,
        }) => {
            points_command(input, output.as_deref(), format, cli.verbose)?;
        }
        Some(Commands::Emit {
            input,
            output,
            end_mode,
        }) => {
            emit_command(input, output.as_deref(), end_mode.as_deref(), cli.verbose)?;
        }
        Some(Commands::Kinds) => {
            kinds_command();
        }
        Some(Commands::Version) => {
            println!("Pointframe v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            // Default behavior: emit input to output
            if let (Some(input), Some(output)) = (&cli.input, &cli.output) {
                emit_command(input, Some(output), None, cli.verbose)?;
            } else {
                eprintln!("Error: Input and output files required");
                eprintln!("Usage: pointframe <INPUT> --output <OUTPUT>");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn points_command(input: &str, output: Option<&str>, format: &str, verbose: bool) -> Result<()> {
    if !Path::new(input).exists() {
        eprintln!("Error: Input file not found: {}", input);
        std::process::exit(1);
    }

    let document = Document::from_file(input)?;

    let start = std::time::Instant::now();
    let evaluation = pointframe::preview(&document.children);
    let elapsed = start.elapsed();

    if verbose {
        println!("Evaluated in {:.2?}", elapsed);
        println!("Points: {}", evaluation.points.len());
        println!("Segments: {}", evaluation.segments.len());
    }

    let text = match format.to_lowercase().as_str() {
        "json" => serde_json::to_string_pretty(&evaluation)?,
        "csv" => {
            let mut lines = Vec::with_capacity(evaluation.points.len());
            for p in &evaluation.points {
                lines.push(format!("{},{},{}", p.x, p.y, p.z));
            }
            lines.join("\n")
        }
        _ => {
            eprintln!("Error: Unsupported format: {}", format);
            eprintln!("Supported formats: json, csv");
            std::process::exit(1);
        }
    };

    write_output(&text, output, verbose)
}

fn emit_command(
    input: &str,
    output: Option<&str>,
    end_mode: Option<&str>,
    verbose: bool,
) -> Result<()> {
    if !Path::new(input).exists() {
        eprintln!("Error: Input file not found: {}", input);
        std::process::exit(1);
    }

    let mut options = EmitOptions::load()?;
    if let Some(mode) = end_mode {
        match EndMode::parse(mode) {
            Some(mode) => options.end_mode = mode,
            None => {
                eprintln!("Error: Unsupported end mode: {}", mode);
                eprintln!("Supported end modes: list, clone, builder");
                std::process::exit(1);
            }
        }
    }

    let document = Document::from_file(input)?;

    let start = std::time::Instant::now();
    let source = pointframe::emit(&document.children, &options);
    let elapsed = start.elapsed();

    if verbose {
        println!("Emitted in {:.2?}", elapsed);
        println!("Nodes: {}", document.children.len());
        println!("Lines: {}", source.lines().count());
    }

    write_output(&source, output, verbose)
}

fn write_output(text: &str, output: Option<&str>, verbose: bool) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, text)?;
        if verbose {
            println!("Output: {}", path);
        } else {
            println!("{} {}", "Wrote".green(), path);
        }
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn kinds_command() {
    println!("{}", "Supported node kinds".bold());
    for tag in KindTag::ALL {
        println!("  {}", tag.as_str().cyan());
    }
    println!("{} kinds total", KindTag::ALL.len());
}
