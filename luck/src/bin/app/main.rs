// std
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
// crates
use chrono::Utc;
use clap::{Parser, Subcommand};
use luck::draw::{RngDraw, ScriptedDraw};
use luck::presentation::{Response, Template};
use luck::settings::LuckSettings;
use luck::trial::run_trial;
use luck::LuckHandler;

mod log;

/// Guess-your-luck app
/// Pipes together the cli arguments with the handler
#[derive(Parser)]
#[command(name = "Luck")]
pub struct LuckApp {
    /// Json file path, on `LuckSettings` format
    #[clap(long, short)]
    input_settings: Option<PathBuf>,
    #[clap(long, value_enum, default_value = "plain")]
    log_format: log::LogFormat,
    #[clap(long, default_value = "stderr")]
    log_to: log::LogOutput,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve a single invocation and print the rendered response
    Guess {
        #[arg(short, long)]
        template: Option<Template>,
        #[arg(short, long)]
        seed: Option<u64>,
        /// Use this value instead of a random draw
        #[arg(short, long)]
        draw: Option<u32>,
    },
    /// Run many independent invocations and store the outcomes as CSV
    Trial {
        #[arg(short, long)]
        invocations: usize,
        #[arg(short, long)]
        outdir: PathBuf,
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

impl LuckApp {
    pub fn run(self) -> anyhow::Result<()> {
        let Self {
            input_settings,
            log_format: _,
            log_to: _,
            command,
        } = self;
        let settings = match input_settings {
            Some(path) => LuckSettings::load(&path)?,
            None => LuckSettings::default(),
        };
        let handler = settings.handler()?;
        tracing::info!(
            range = ?handler.range(),
            reference = handler.reference(),
            "handler ready"
        );

        match command {
            Command::Guess {
                template,
                seed,
                draw,
            } => {
                let template = template.unwrap_or(settings.template);
                let response = match draw {
                    Some(value) => handler.handle(&mut ScriptedDraw::new([value]), template)?,
                    None => {
                        let seed = resolve_seed(seed.or(settings.seed))?;
                        handler.handle(&mut RngDraw::from_seed(seed), template)?
                    }
                };
                respond(&response)
            }
            Command::Trial {
                invocations,
                outdir,
                seed,
            } => {
                let seed = resolve_seed(seed.or(settings.seed))?;
                let trial = run_trial(&handler, invocations, seed)?;
                let dir = create_trial_dir(&outdir, seed)?;
                let (outcomes_path, summary_path) = trial.save(&dir)?;
                tracing::info!(
                    outcomes = %outcomes_path.display(),
                    summary = %summary_path.display(),
                    "trial saved"
                );
                Ok(())
            }
        }
    }
}

fn resolve_seed(seed: Option<u64>) -> anyhow::Result<u64> {
    match seed {
        Some(seed) => Ok(seed),
        None => Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64),
    }
}

fn respond(response: &Response) -> anyhow::Result<()> {
    tracing::info!(
        result = response.context.result,
        content_type = response.content_type(),
        "responding"
    );
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(response.body.as_bytes())?;
    if !response.body.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn create_trial_dir(outdir: &Path, seed: u64) -> anyhow::Result<PathBuf> {
    anyhow::ensure!(
        outdir.is_dir(),
        "Output directory does not exist: {}",
        outdir.display()
    );
    let dir = outdir.join(format!(
        "trial_s{seed}_{}",
        Utc::now().format("%Y%m%dT%H%M%S%.3fZ")
    ));
    std::fs::create_dir(&dir)?;
    Ok(dir)
}

fn main() -> anyhow::Result<()> {
    let app: LuckApp = LuckApp::parse();
    let guard = log::config_tracing(app.log_format, &app.log_to)?;

    if let Err(e) = app.run() {
        tracing::error!("error: {}", e);
        drop(guard);
        std::process::exit(1);
    }
    Ok(())
}
