use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use superbench_core::config::{input_dir_from_env_value, output_dir_from_env_value, CoreConfig};
use superbench_core::constants::{INPUT_DIR_ENV, OUTPUT_DIR_ENV};
use superbench_core::datasets::Empire;
use superbench_core::validation::verify_input_directory;
use superbench_core::{BenchmarkEvaluator, CaseNumber, CommandDriver, Dataset};

#[derive(Parser)]
#[command(name = "superbench")]
#[command(about = "EMPIRE lung CT registration benchmark")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum Format {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registration cases of the dataset
    List {
        /// Dataset root containing `scans/` (defaults to SUPERBENCH_INPUT_DIR)
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// Check that every scan of the dataset is present
    Check {
        /// Dataset root containing `scans/` (defaults to SUPERBENCH_INPUT_DIR)
        #[arg(long)]
        input_dir: Option<PathBuf>,
    },
    /// Register one case with an external program and print its record
    Evaluate {
        /// Case number (1-based)
        case: CaseNumber,
        /// Registration program to run once per direction
        #[arg(long)]
        program: String,
        /// Program argument; `{fixed}`, `{moving}` and `{output}` are substituted
        #[arg(long = "arg", allow_hyphen_values = true)]
        args: Vec<String>,
        /// Dataset root containing `scans/` (defaults to SUPERBENCH_INPUT_DIR)
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Where deformation fields are written (defaults to SUPERBENCH_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
}

fn resolve_input_dir(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match flag {
        Some(dir) => Ok(dir),
        None => Ok(input_dir_from_env_value(std::env::var(INPUT_DIR_ENV).ok())?),
    }
}

fn resolve_output_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| output_dir_from_env_value(std::env::var(OUTPUT_DIR_ENV).ok()))
}

fn render<T: serde::Serialize>(value: &T, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Yaml => serde_yaml::to_string(value)?,
        Format::Text => anyhow::bail!("text output is rendered by each command"),
    })
}

fn list(input_dir: PathBuf, format: Format) -> anyhow::Result<()> {
    let dataset = Empire::new(input_dir);

    if let Format::Text = format {
        println!(
            "{} ({}): {} cases",
            dataset.name(),
            dataset.category(),
            dataset.len()
        );
        for case in dataset.generator() {
            println!(
                "{}  {}  {}  -> {}, {}",
                case.case_number,
                case.image_file_names.fixed.display(),
                case.image_file_names.moving.display(),
                case.deformation_field_file_names.fixed_to_moving,
                case.deformation_field_file_names.moving_to_fixed
            );
        }
        return Ok(());
    }

    let cases: Vec<_> = dataset.generator().collect();
    println!("{}", render(&cases, format)?);
    Ok(())
}

fn check(input_dir: PathBuf) -> anyhow::Result<bool> {
    verify_input_directory(&input_dir)?;
    let dataset = Empire::new(input_dir);

    for resource in dataset.unused_resources() {
        tracing::info!("ignoring {}", resource.display());
    }

    let missing = dataset.missing_inputs();
    if missing.is_empty() {
        println!("All {} cases of {} are present.", dataset.len(), dataset.name());
        return Ok(true);
    }

    println!("{} scan files are missing:", missing.len());
    for path in missing {
        println!("  {}", path.display());
    }
    Ok(false)
}

fn evaluate(
    case: CaseNumber,
    driver: CommandDriver,
    config: CoreConfig,
    format: Format,
) -> anyhow::Result<()> {
    let dataset = Empire::new(config.input_dir());
    let descriptor = dataset
        .case(case)
        .ok_or_else(|| anyhow::anyhow!("{} has no case {}", dataset.name(), case))?;
    let evaluator = BenchmarkEvaluator::new(config.output_dir());

    let record = dataset.evaluate(&evaluator, &driver, &descriptor)?;

    if let Format::Text = format {
        println!(
            "Case {}: registered in {:.2}s at {}",
            record.case_number, record.registration_seconds, record.evaluated_at
        );
        for (name, value) in record.metrics.iter() {
            println!("  {name}: {value}");
        }
        return Ok(());
    }

    println!("{}", render(&record, format)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("superbench=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List { input_dir, format }) => list(resolve_input_dir(input_dir)?, format)?,
        Some(Commands::Check { input_dir }) => {
            if !check(resolve_input_dir(input_dir)?)? {
                std::process::exit(1);
            }
        }
        Some(Commands::Evaluate {
            case,
            program,
            args,
            input_dir,
            output_dir,
            format,
        }) => {
            let config = CoreConfig::new(
                resolve_input_dir(input_dir)?,
                resolve_output_dir(output_dir),
            )?;
            let driver = CommandDriver::new(program, args)?;
            evaluate(case, driver, config, format)?;
        }
        None => {
            println!("Use 'superbench --help' for commands");
        }
    }

    Ok(())
}
