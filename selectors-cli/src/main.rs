use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use selectors_client::{
    lookup, register, selector_of, ClientError, ClientResult, HelpPanel, HttpDirectory, Mode,
    Outcome, Panel, Session, SignatureDirectory, SignatureRecord, TextSignature,
    DEFAULT_DIRECTORY_URL, DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf, time::Duration};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "selectors", version, about = "Decode and add Ethereum function selectors")]
struct Cli {
    /// Base URL of the signature directory API
    #[arg(long, env = "SELECTORS_DIRECTORY_URL", global = true)]
    directory_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Interactive menu (default)
    Tui,
    /// Look up the text signatures for a 4-byte hex selector
    Decode {
        hex: String,
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a text signature to the directory
    Add {
        signature: String,
        #[arg(long)]
        json: bool,
    },
    /// Compute a selector locally without contacting the directory
    Hash { signature: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    directory_url: String,
    timeout_secs: u64,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    fs::create_dir_all(selectors_dir())?;
    let mut cfg = load_config().unwrap_or_default();
    apply_overrides(&mut cfg, &cli);
    save_config(&cfg)?;

    match cli.cmd {
        None | Some(Cmd::Tui) => run_tui(cfg),
        Some(Cmd::Decode { hex, json }) => {
            let dir = directory(&cfg)?;
            print_result(lookup(&dir, &hex), json)
        }
        Some(Cmd::Add { signature, json }) => {
            let dir = directory(&cfg)?;
            let result = register(&dir, &signature);
            if let Ok(Outcome::Created(record)) = &result {
                check_selector(record);
            }
            print_result(result, json)
        }
        Some(Cmd::Hash { signature }) => {
            let text: TextSignature = signature.parse()?;
            println!("{}", selector_of(&text));
            Ok(())
        }
    }
}

fn init_tracing(log_level: &str) {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn apply_overrides(cfg: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.directory_url {
        cfg.directory_url = url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        cfg.timeout_secs = secs;
    }
}

fn directory(cfg: &Config) -> ClientResult<HttpDirectory> {
    HttpDirectory::new(
        cfg.directory_url.clone(),
        Duration::from_secs(cfg.timeout_secs),
    )
}

fn print_result(result: ClientResult<Outcome>, json: bool) -> Result<()> {
    let outcome = result?;
    if json {
        let value = match &outcome {
            Outcome::NoMatches => serde_json::json!([]),
            Outcome::Matches { records, .. } => serde_json::to_value(records)?,
            Outcome::Created(record) => serde_json::to_value(record)?,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", Panel::outcome(&outcome));
    }
    Ok(())
}

/// Warn when the directory's selector differs from the locally computed one.
fn check_selector(record: &SignatureRecord) {
    let Ok(text) = record.text_signature.parse::<TextSignature>() else {
        return;
    };
    let local = selector_of(&text);
    if !local.same_selector(&record.hex_signature) {
        warn!(
            text_signature = %record.text_signature,
            directory = %record.hex_signature,
            local = %local,
            "directory selector differs from local keccak-256"
        );
        eprintln!(
            "warning: directory reports {} but {} hashes to {}",
            record.hex_signature, record.text_signature, local
        );
    }
}

/* ---------- Interactive menu ---------- */

fn run_tui(mut cfg: Config) -> Result<()> {
    let mut session = Session::default();
    let mut dir = directory(&cfg);
    loop {
        let mode = session.mode();
        let title = format!("Selectors  •  mode: {}  •  {}", mode, cfg.directory_url);
        let choice = Select::new(
            &title,
            vec![
                format!("{} ({})", mode.action_label(), mode.placeholder()),
                format!("Switch to {} mode", mode.toggle()),
                "Help".into(),
                "Settings".into(),
                "Quit".into(),
            ],
        )
        .prompt()?;

        match choice.as_str() {
            s if s.starts_with(mode.action_label()) => {
                tui_submit(&mut session, dir.as_ref())?;
            }
            s if s.starts_with("Switch to") => {
                session.toggle_mode()?;
            }
            "Help" => tui_help()?,
            "Settings" => {
                tui_settings(&mut cfg)?;
                dir = directory(&cfg);
            }
            "Quit" => break,
            _ => {}
        }
    }
    Ok(())
}

fn tui_submit(session: &mut Session, dir: Result<&HttpDirectory, &ClientError>) -> Result<()> {
    let mode = session.mode();
    let prompt = match mode {
        Mode::Decode => "Hex signature:",
        Mode::Add => "Function signature:",
    };
    let input = Text::new(prompt).with_placeholder(mode.placeholder()).prompt()?;

    let result = submit_with(session, dir.map(|d| d as &dyn SignatureDirectory), &input);

    println!();
    print!("{}", Panel::from_result(&result));
    if let Ok(Outcome::Created(record)) = &result {
        check_selector(record);
    }
    wait_enter()?;
    Ok(())
}

/// Run one submission; a directory that failed to build is reported like any other error.
fn submit_with(
    session: &mut Session,
    dir: Result<&dyn SignatureDirectory, &ClientError>,
    input: &str,
) -> ClientResult<Outcome> {
    let dir = dir.map_err(Clone::clone)?;
    let request = session.begin(input)?;
    println!("{}", request.mode().pending_label());
    let result = request.execute(dir);
    session.complete(result)
}

fn tui_help() -> Result<()> {
    let mut panel = HelpPanel::default();
    loop {
        let mut items = panel.labels();
        items.push("Back".into());
        let choice = Select::new("Help", items.clone()).prompt()?;
        if choice == "Back" {
            break;
        }
        let Some(index) = items.iter().position(|i| *i == choice) else {
            continue;
        };
        if let Some(entry) = panel.toggle(index) {
            println!("\n{}\n", entry.answer);
        }
    }
    Ok(())
}

fn tui_settings(cfg: &mut Config) -> Result<()> {
    loop {
        let choice = Select::new(
            "Settings",
            vec![
                format!("Set directory URL (current: {})", cfg.directory_url),
                format!("Set timeout (current: {}s)", cfg.timeout_secs),
                "Back".into(),
            ],
        )
        .prompt()?;
        match choice.as_str() {
            s if s.starts_with("Set directory URL") => {
                cfg.directory_url = Text::new("Directory URL:")
                    .with_default(&cfg.directory_url)
                    .prompt()?;
                save_config(cfg)?;
                println!("Saved.");
                wait_enter()?;
            }
            s if s.starts_with("Set timeout") => {
                cfg.timeout_secs = CustomType::new("Timeout (seconds):")
                    .with_default(cfg.timeout_secs)
                    .prompt()?;
                save_config(cfg)?;
                println!("Saved.");
                wait_enter()?;
            }
            "Back" => break,
            _ => {}
        }
    }
    Ok(())
}

/* ---------- Local storage & utils ---------- */

fn selectors_dir() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".selectors")
}
fn config_path() -> PathBuf {
    selectors_dir().join("config.json")
}

fn load_config() -> Option<Config> {
    let s = fs::read_to_string(config_path()).ok()?;
    serde_json::from_str(&s).ok()
}
fn save_config(cfg: &Config) -> Result<()> {
    fs::write(config_path(), serde_json::to_string_pretty(cfg)?)?;
    Ok(())
}
fn wait_enter() -> io::Result<()> {
    use std::io::Write;
    print!("Press ENTER to continue…");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(())
}
