//! ccmgen CLI — command-line interface for the CCM search.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use ccmgen::{Optimizer, SearchConfig, SearchReport, SpectralData};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ccmgen")]
#[command(
    about = "Search for a color correction matrix maximizing uniform output scale under a spectral ceiling"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for the best CCM on a spectral dataset.
    Search(CliSearchArgs),

    /// Print statistics for a spectral dataset.
    DatasetInfo {
        /// Path to the dataset CSV.
        #[arg(long)]
        data: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct CliSearchArgs {
    /// Path to the spectral dataset CSV (`wavelength,r0,r1,r2` rows).
    #[arg(long)]
    data: PathBuf,

    /// Path to write the search report (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Iteration budget; always consumed in full.
    #[arg(long, default_value = "10000")]
    iters: usize,

    /// RNG seed for reproducible runs.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Reject candidates with |determinant| below this value.
    #[arg(long, default_value = "1e-10")]
    det_epsilon: f64,

    /// Reject candidates whose axis projection onto the spectral weight is
    /// below this value in magnitude.
    #[arg(long, default_value = "1e-10")]
    projection_epsilon: f64,

    /// Optional path for a plain-text rendering of the report.
    #[arg(long)]
    text: Option<PathBuf>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => run_search(&args),
        Commands::DatasetInfo { data } => run_dataset_info(&data),
    }
}

// ── search ─────────────────────────────────────────────────────────────────

fn run_search(args: &CliSearchArgs) -> CliResult<()> {
    tracing::info!("Loading dataset: {}", args.data.display());

    let data = SpectralData::from_csv_file(&args.data).map_err(|e| -> CliError {
        format!("failed to load dataset {}: {}", args.data.display(), e).into()
    })?;

    tracing::info!(
        "Dataset: {} samples, {:.1}–{:.1} nm",
        data.len(),
        data.wavelengths().first().copied().unwrap_or(0.0),
        data.wavelengths().last().copied().unwrap_or(0.0),
    );

    let config = SearchConfig {
        max_iters: args.iters,
        seed: args.seed,
        det_epsilon: args.det_epsilon,
        projection_epsilon: args.projection_epsilon,
    };
    let report = Optimizer::with_config(config).run(&data);

    match &report.solution {
        Some(sol) => tracing::info!(
            "Best scale {:.6} (constraints met: {}, gray balanced: {})",
            sol.scale,
            sol.constraints_met,
            sol.rgb_equal,
        ),
        None => tracing::warn!(
            "No valid CCM found within {} iterations",
            report.stats.iterations
        ),
    }

    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Report written to {}", args.out.display());

    if let Some(text_path) = &args.text {
        std::fs::write(text_path, format_report(&report))?;
        tracing::info!("Text report written to {}", text_path.display());
    }

    Ok(())
}

/// Render a report in the persisted plain-text form.
fn format_report(report: &SearchReport) -> String {
    let Some(sol) = &report.solution else {
        return "Failed to generate valid CCM matrix\n".to_string();
    };

    let yes_no = |b: bool| if b { "Yes" } else { "No" };
    let mut out = String::from("CCM Matrix:\n");
    for row in &sol.matrix {
        out.push_str(&format!("{:.6},{:.6},{:.6}\n", row[0], row[1], row[2]));
    }
    out.push_str("\nValidation Results:\n");
    out.push_str(&format!("Determinant: {:.6}\n", sol.determinant));
    out.push_str(&format!(
        "Constraints Met: {}\n",
        yes_no(sol.constraints_met)
    ));
    out.push_str(&format!(
        "RGB Values: {:.6}, {:.6}, {:.6}\n",
        sol.rgb[0], sol.rgb[1], sol.rgb[2]
    ));
    out.push_str(&format!("RGB Equal: {}\n", yes_no(sol.rgb_equal)));
    out.push_str(&format!("CCM Invertible: {}\n", yes_no(sol.invertible)));
    out
}

// ── dataset-info ───────────────────────────────────────────────────────────

fn run_dataset_info(path: &Path) -> CliResult<()> {
    let data = SpectralData::from_csv_file(path).map_err(|e| -> CliError {
        format!("failed to load dataset {}: {}", path.display(), e).into()
    })?;

    let w = data.wavelengths();
    let v = data.spectral_weight();

    println!("ccmgen spectral dataset");
    println!("  samples:          {}", data.len());
    println!(
        "  wavelengths:      {:.1}–{:.1} nm",
        w.first().copied().unwrap_or(0.0),
        w.last().copied().unwrap_or(0.0),
    );
    if w.len() > 1 {
        println!("  grid step:        {:.3} nm", w[1] - w[0]);
    }
    println!(
        "  spectral weight:  [{:.4}, {:.4}, {:.4}]",
        v[0], v[1], v[2]
    );
    println!(
        "  ceiling range:    {:.4}–{:.4}",
        data.ceiling().iter().cloned().fold(f64::INFINITY, f64::min),
        data.ceiling()
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max),
    );

    Ok(())
}
