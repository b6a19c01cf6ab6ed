//! `tortuga`: derives an L-System from a JSON document and reports the
//! turtle geometry it produces.
//!
//! **Usage:**
//! ```text
//! tortuga [--input <path>] [--iterations <n>] [--segments] [--quiet]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tortuga::{LSystemDocument, SegmentBounds, TurtleConfig, TurtleInterpreter};
use tracing_subscriber::EnvFilter;

/// Derive an L-System and interpret it as 3D line segments.
#[derive(Parser)]
#[command(name = "tortuga", about = "Derive an L-System and interpret it as 3D line segments")]
struct Args {
    /// L-System document to load.
    #[arg(long, short, default_value = "input.json")]
    input: PathBuf,

    /// Override the document's iteration count.
    #[arg(long, short = 'n')]
    iterations: Option<usize>,

    /// Print the segments as JSON on stdout.
    #[arg(long)]
    segments: bool,

    /// Only print the final summary, not every derivation step.
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tortuga=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let document = LSystemDocument::from_path(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let mut system = document.build().context("building grammar")?;
    if let Some(n) = args.iterations {
        system.iterations = n;
    }

    tracing::info!(
        iterations = system.iterations,
        resolution = system.resolution,
        "tortuga will do {} applications",
        system.iterations
    );

    let grammar = &system.grammar;
    let mut sentence = system.axiom.clone();
    if !args.quiet {
        println!("axiom:    {}", grammar.to_display_string(&sentence));
    }
    for i in 1..=system.iterations {
        grammar
            .apply(&mut sentence)
            .with_context(|| format!("application {i}"))?;
        if !args.quiet {
            println!("(i = {i}) = {}", grammar.to_display_string(&sentence));
        }
    }

    let interpreter = TurtleInterpreter::standard(TurtleConfig::default(), &grammar.registry);
    let segments = interpreter
        .interpret(&sentence)
        .context("interpreting sentence")?;

    match SegmentBounds::from_segments(&segments) {
        Some(bounds) => tracing::info!(
            segments = segments.len(),
            scale = bounds.half_extent(),
            min = %bounds.min,
            max = %bounds.max,
            "interpreted geometry"
        ),
        None => tracing::warn!("sentence drew no segments"),
    }

    if args.segments {
        println!("{}", serde_json::to_string_pretty(&segments)?);
    }

    Ok(())
}
