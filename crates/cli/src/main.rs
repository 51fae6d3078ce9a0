use anyhow::{Context, Result};
use clap::Parser;
use sigill_protect::{protect_file, CancelToken, ProtectConfig, RecordFields};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sigill")]
#[command(about = "Seal bank transmission files with HMAC protection records", long_about = None)]
#[command(version)]
struct Cli {
    /// Bank-assigned secret key as 32 hex characters
    #[arg(long, env = "SIGILL_SECRET_KEY", hide_env_values = true)]
    key: String,

    /// Source document (must be ISO-8859-1 with CRLF line breaks)
    #[arg(long)]
    source: PathBuf,

    /// Target path for the protected file (must not exist)
    #[arg(long)]
    target: PathBuf,

    /// Stage the digest scratch file in a separate temp directory
    #[arg(long)]
    use_temp_dir: bool,

    /// Temp directory for the digest scratch file (created if missing)
    #[arg(long, requires = "use_temp_dir")]
    temp_dir: Option<PathBuf>,

    /// JSON file with record field values; omitted fields are padded or
    /// date-defaulted
    #[arg(long)]
    fields: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let fields = match &cli.fields {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read field file {}", path.display()))?;
            serde_json::from_str::<RecordFields>(&raw)
                .with_context(|| format!("invalid field file {}", path.display()))?
        }
        None => RecordFields::default(),
    };

    let config = ProtectConfig {
        secret_key: cli.key,
        source_path: cli.source,
        target_path: cli.target,
        use_temp_dir: cli.use_temp_dir,
        temp_dir: cli.temp_dir,
    };

    let result = protect_file(&config, &fields, &CancelToken::new())?;
    log::debug!(
        "Sealed {} into {}",
        result.source_path.display(),
        result.target_path.display()
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
