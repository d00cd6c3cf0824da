use clap::Parser;
use confetti::{BrandToken, BurstGenerator};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(name = "confetti", version, about = "Print one celebratory burst as JSON", long_about = None)]
struct Cli {
    /// Generate the smaller burst used when reduced motion is requested
    #[arg(short = 'r', long)]
    reduced_motion: bool,

    /// Seed for a reproducible burst
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Word spelled by the glyph particles
    #[arg(short = 'b', long)]
    brand: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let generator = match cli.brand {
        Some(brand) => BurstGenerator::new(BrandToken::new(brand)?),
        None => BurstGenerator::default(),
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let burst = generator.generate(true, cli.reduced_motion, &mut rng);
    log::info!("Generated {} particles", burst.len());

    let json = if cli.pretty {
        serde_json::to_string_pretty(&burst)?
    } else {
        serde_json::to_string(&burst)?
    };
    println!("{}", json);

    Ok(())
}
