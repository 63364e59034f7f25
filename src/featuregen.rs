use anyhow::{Context, Result};
use rlayertable::{FeatureCollectionWriter, FeatureGenerator};
use std::env;

const DEFAULT_COUNT: usize = 1000;
const DEFAULT_SEED: u64 = 42;

struct Config {
    num_features: usize,
    seed: u64,
    output_file: Option<String>,
    use_brotli: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_features: DEFAULT_COUNT,
            seed: DEFAULT_SEED,
            output_file: None,
            use_brotli: false,
        }
    }
}

impl Config {
    fn output_path(&self) -> String {
        match &self.output_file {
            Some(path) if self.use_brotli && !path.ends_with(".br") => format!("{path}.br"),
            Some(path) => path.clone(),
            None if self.use_brotli => "features.geojson.br".to_string(),
            None => "features.geojson".to_string(),
        }
    }
}

fn parse_args(args: &[String]) -> Result<Config> {
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-n requires an argument");
                }
                config.num_features = args[i].parse()?;
            }
            "-seed" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-seed requires an argument");
                }
                config.seed = args[i].parse()?;
            }
            "-out" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-out requires a file path argument");
                }
                config.output_file = Some(args[i].clone());
            }
            "-brotli" => {
                config.use_brotli = true;
            }
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                log::warn!("unknown argument: {other}");
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Synthetic GeoJSON Layer Generator");
    println!("Usage: featuregen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -n <N>                 Number of point features (default: {DEFAULT_COUNT})");
    println!("  -seed <S>              Random seed (default: {DEFAULT_SEED})");
    println!("  -out <FILE>            Output file path (default: features.geojson)");
    println!("  -brotli                Write compressed output using Brotli (output: *.geojson.br)");
    println!("  -h, -help, --help      Show this help message");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args)?;
    let output_path = config.output_path();

    let mut generator = FeatureGenerator::with_seed(config.seed);
    let mut writer = FeatureCollectionWriter::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    for _ in 0..config.num_features {
        writer.write_feature(&generator.next_feature())?;
    }
    let written = writer.finish().with_context(|| format!("finishing {output_path}"))?;

    log::info!("wrote {written} features to {output_path}");
    Ok(())
}
