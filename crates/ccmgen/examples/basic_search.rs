use ccmgen::{Optimizer, SearchConfig, SpectralData};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <dataset.csv> [iters] [out.json]", args[0]);
        std::process::exit(2);
    }

    let data = SpectralData::from_csv_file(Path::new(&args[1]))?;
    let iters: usize = args
        .get(2)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(10_000);

    let optimizer = Optimizer::with_config(SearchConfig {
        max_iters: iters,
        ..Default::default()
    });
    let report = optimizer.run(&data);

    match &report.solution {
        Some(sol) => println!(
            "Best scale {:.6} over {} samples (constraints met: {}).",
            sol.scale,
            data.len(),
            sol.constraints_met
        ),
        None => println!(
            "No valid CCM found within {} iterations.",
            report.stats.iterations
        ),
    }

    if let Some(out_path) = args.get(3) {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(out_path, json)?;
        println!("Wrote {out_path}");
    }
    Ok(())
}
