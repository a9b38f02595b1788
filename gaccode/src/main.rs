/*!
# gaccode

Generates infrared commands for air conditioners and prints them as raw
frames, LIRC timings or Broadlink packets.

## Usage

### Encode a command
```bash
gaccode encode --brand daikin --mode cool --temp 22 --fan low
gaccode encode --brand lg --model "inverter v" --set powerful=on --format broadlink
```

### List supported remotes
```bash
gaccode list --brand sharp
gaccode list --json
```

### Generate a defaults file
```bash
gaccode config -o gaccode.toml
```

Logging goes to stderr so stdout only carries the generated codes.
*/

use anyhow::{bail, Context, Result};
use base64::Engine as _;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn, Level};

use hvacir::{Brand, Device, Feature, ProtocolDescriptor, Render, TimingProfile, BRANDS};

mod config;

use config::{AppConfig, EncodeConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "gaccode")]
#[command(about = "Air-conditioner IR code generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "gaccode.toml")]
    config: PathBuf,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode one command
    Encode(EncodeArgs),

    /// List brands and models
    List {
        /// Only this brand
        #[arg(short, long)]
        brand: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate configuration file
    Config {
        /// Output path for configuration file
        #[arg(short, long, default_value = "gaccode.toml")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct EncodeArgs {
    #[arg(short, long)]
    brand: Option<String>,

    #[arg(long)]
    model: Option<String>,

    /// Target temperature, clamped to the model's range
    #[arg(short, long)]
    temp: Option<i32>,

    #[arg(short, long)]
    mode: Option<String>,

    #[arg(short, long)]
    fan: Option<String>,

    #[arg(long)]
    swing: Option<String>,

    #[arg(long)]
    hswing: Option<String>,

    #[arg(long)]
    powerful: Option<String>,

    #[arg(long)]
    purifier: Option<String>,

    #[arg(long)]
    cleaning: Option<String>,

    #[arg(long)]
    economy: Option<String>,

    #[arg(long)]
    quiet: Option<String>,

    #[arg(long)]
    light: Option<String>,

    #[arg(long)]
    sleep: Option<String>,

    /// Any other feature, as `feature=value` (repeatable)
    #[arg(long = "set", value_name = "FEATURE=VALUE")]
    set: Vec<String>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Log the resulting status as JSON
    #[arg(long)]
    status: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    match cli.command {
        Commands::Encode(args) => {
            let config = AppConfig::load_or_default(&cli.config)?;
            let output = run_encode(&args, &config.encode)?;
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }

        Commands::List { brand, json } => {
            let output = list_models(brand.as_deref(), json)?;
            println!("{}", output);
            Ok(())
        }

        Commands::Config { output } => generate_config_file(output),
    }
}

/// Build the device and apply every requested setting
fn build_device(args: &EncodeArgs, defaults: &EncodeConfig) -> Result<Device> {
    let brand_name = args.brand.as_deref().unwrap_or(&defaults.brand);
    let brand = hvacir::brand(brand_name)?;
    let model = args.model.as_deref().unwrap_or(&defaults.model);
    let descriptor = brand.descriptor(model);
    debug!("Using {}", descriptor.name());

    let mut device = Device::new(descriptor);
    device.set(Feature::Mode, args.mode.as_deref().unwrap_or(&defaults.mode));
    device.set_temperature(args.temp.unwrap_or(defaults.temperature));
    device.set(Feature::Fan, args.fan.as_deref().unwrap_or(&defaults.fan));

    let flags = [
        (Feature::Swing, &args.swing),
        (Feature::HSwing, &args.hswing),
        (Feature::Powerful, &args.powerful),
        (Feature::Purifier, &args.purifier),
        (Feature::Cleaning, &args.cleaning),
        (Feature::Economy, &args.economy),
        (Feature::Quiet, &args.quiet),
        (Feature::Light, &args.light),
        (Feature::Sleep, &args.sleep),
    ];
    for (feature, value) in flags {
        if let Some(value) = value {
            device.set(feature, value);
        }
    }

    for pair in &args.set {
        let (name, value) = pair
            .split_once('=')
            .with_context(|| format!("Expected feature=value, got '{}'", pair))?;
        let name = name.trim();
        if Feature::from_name(name).is_none() {
            bail!("Unknown feature '{}'", name);
        }
        device.set_named(name, value.trim());
    }

    for feature in device.pending().keys() {
        debug!("Requested {}", feature);
    }
    Ok(device)
}

fn run_encode(args: &EncodeArgs, defaults: &EncodeConfig) -> Result<String> {
    let mut device = build_device(args, defaults)?;
    let name = device.descriptor().name();

    let render = device
        .render(None)
        .with_context(|| format!("Failed to render command for {}", name))?;
    if render.is_empty() {
        warn!("Nothing to send for {}", name);
    }
    if args.status {
        info!("Status: {}", device.status_json()?);
    }

    Ok(format_render(&render, args.format.unwrap_or(defaults.format)))
}

fn format_render(render: &Render, format: OutputFormat) -> String {
    match format {
        OutputFormat::Frames => render
            .frames
            .iter()
            .map(|frame| frame.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Lirc => render.lirc().to_string(),
        OutputFormat::Broadlink => hex::encode(render.compact_packet()),
        OutputFormat::Base64 => {
            base64::engine::general_purpose::STANDARD.encode(render.compact_packet())
        }
    }
}

/// One row of `list --json`
#[derive(Debug, Serialize)]
struct ModelSummary {
    brand: &'static str,
    model: &'static str,
    remote: String,
    delegated: bool,
    capabilities: BTreeMap<&'static str, String>,
    timing: TimingProfile,
}

impl ModelSummary {
    fn new(brand: &Brand, model: &'static str, descriptor: &ProtocolDescriptor) -> Self {
        Self {
            brand: brand.name,
            model,
            remote: descriptor.name(),
            delegated: descriptor.encoding.is_delegated(),
            capabilities: descriptor
                .capabilities
                .iter()
                .map(|(feature, domain)| (feature.as_str(), domain.to_string()))
                .collect(),
            timing: descriptor.timing,
        }
    }
}

fn list_models(brand: Option<&str>, json: bool) -> Result<String> {
    let brands: Vec<&Brand> = match brand {
        Some(name) => vec![hvacir::brand(name)?],
        None => BRANDS.to_vec(),
    };

    let summaries: Vec<ModelSummary> = brands
        .iter()
        .flat_map(|brand| {
            brand
                .models
                .iter()
                .map(move |(model, descriptor)| ModelSummary::new(brand, *model, descriptor))
        })
        .collect();

    if json {
        return serde_json::to_string_pretty(&summaries).context("Failed to serialize model list");
    }

    let lines: Vec<String> = summaries
        .iter()
        .map(|s| {
            let kind = if s.delegated { "delegated" } else { "composed" };
            format!("{}\t{}\t{}", s.brand, s.model, kind)
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Generate a default configuration file
fn generate_config_file(output_path: PathBuf) -> Result<()> {
    let config = AppConfig::new();
    config.save_to_file(&output_path)?;

    info!("Generated configuration file: {}", output_path.display());
    info!("Edit the file to change the encode defaults, then run:");
    info!("   gaccode --config {} encode", output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hvacir::HvacError;

    fn encode_args(argv: &[&str]) -> EncodeArgs {
        let mut full = vec!["gaccode", "encode"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Encode(args) => args,
            _ => panic!("not an encode command"),
        }
    }

    #[test]
    fn test_frames_output() {
        let args = encode_args(&["--brand", "daikin", "--temp", "22", "--format", "frames"]);
        let output = run_encode(&args, &EncodeConfig::default()).unwrap();
        assert!(!output.is_empty());
        for line in output.lines() {
            assert!(line.starts_with("88 5b e4"), "{}", line);
        }
    }

    #[test]
    fn test_broadlink_outputs() {
        let args = encode_args(&["--brand", "panasonic", "--format", "broadlink"]);
        let output = run_encode(&args, &EncodeConfig::default()).unwrap();
        assert!(output.starts_with("2600"));
        assert_eq!((output.len() / 2 + 4) % 16, 0);

        let args = encode_args(&["--brand", "panasonic", "--format", "base64"]);
        let output = run_encode(&args, &EncodeConfig::default()).unwrap();
        assert!(output.starts_with("Jg"));
    }

    #[test]
    fn test_lirc_is_default_format() {
        let args = encode_args(&["--brand", "lg", "--mode", "dry"]);
        let output = run_encode(&args, &EncodeConfig::default()).unwrap();
        let values: Vec<u32> = output
            .split_whitespace()
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(values.len() % 2, 0);
        assert!(!values.is_empty());
    }

    #[test]
    fn test_set_pairs() {
        let args = encode_args(&["--brand", "lg", "--model", "inverter v", "--set", "powerful=on"]);
        let device = build_device(&args, &EncodeConfig::default()).unwrap();
        assert!(device.pending().contains_key(&Feature::Powerful));

        let args = encode_args(&["--set", "powerful"]);
        assert!(build_device(&args, &EncodeConfig::default()).is_err());

        let args = encode_args(&["--set", "turbo=on"]);
        assert!(build_device(&args, &EncodeConfig::default()).is_err());
    }

    #[test]
    fn test_delegated_model_needs_engine() {
        let args = encode_args(&["--brand", "mitsubishi"]);
        let err = run_encode(&args, &EncodeConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HvacError>(),
            Some(HvacError::EngineUnavailable(_))
        ));
    }

    #[test]
    fn test_unknown_brand() {
        let args = encode_args(&["--brand", "fujitsu"]);
        assert!(run_encode(&args, &EncodeConfig::default()).is_err());
    }

    #[test]
    fn test_list_models() {
        let text = list_models(Some("sharp"), false).unwrap();
        assert!(text.lines().all(|line| line.starts_with("sharp\t")));
        assert!(text.contains("j-tech\tcomposed"));

        let json: serde_json::Value =
            serde_json::from_str(&list_models(None, true).unwrap()).unwrap();
        let rows = json.as_array().unwrap();
        let total: usize = BRANDS.iter().map(|b| b.models.len()).sum();
        assert_eq!(rows.len(), total);
        assert!(rows[0]["capabilities"].get("mode").is_some());

        let mitsubishi = rows
            .iter()
            .find(|row| row["brand"] == "mitsubishi")
            .unwrap();
        assert_eq!(mitsubishi["delegated"], true);
        assert!(mitsubishi["timing"]["mark"].as_array().is_some_and(|m| !m.is_empty()));
    }
}
