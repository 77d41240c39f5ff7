use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;
use safemate::app::session;
use safemate::auth::MemoryAuth;
use safemate::flows::FlowSource;
use safemate::runtime::{Replay, replay};
use safemate::scoring::fatigue;
use safemate::submission::LogSink;
use safemate::terminal::PromptHost;
use safemate::{AppConfig, DataStore, FlowKind, Result, logging};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "safemate", version)]
#[command(about = "Mine-site safety forms in the terminal")]
struct Cli {
    /// YAML settings file (defaults to $SAFEMATE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in flows
    List,

    /// Fill in a flow step by step
    Run {
        /// Built-in flow id, e.g. take-control
        #[arg(required_unless_present = "document")]
        flow: Option<String>,

        /// Run a flow declared in a YAML document instead
        #[arg(long, conflicts_with = "flow")]
        document: Option<PathBuf>,

        #[arg(long, default_value = "Demo Mining")]
        company: String,

        #[arg(long, default_value = "Main Pit")]
        site: String,
    },

    /// Validate a complete answer file against a flow
    Check {
        #[arg(required_unless_present = "document")]
        flow: Option<String>,

        #[arg(long, conflicts_with = "flow")]
        document: Option<PathBuf>,

        /// YAML mapping of field id to answer
        #[arg(long)]
        answers: PathBuf,
    },

    /// Score a fatigue self-assessment answer file
    Fatigue {
        #[arg(long)]
        answers: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.log_filter);

    match cli.command {
        Command::List => {
            for kind in FlowKind::ALL {
                println!("{:<14} {}", kind.id(), kind.title());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            flow,
            document,
            company,
            site,
        } => {
            let source = FlowSource::resolve(flow.as_deref(), document.as_deref())?;
            let stdin = io::stdin();
            let interactive = stdin.is_tty();
            let mut host = PromptHost::new(stdin.lock(), io::stdout())
                .with_color(config.color)
                .with_masked_secrets(interactive);
            let submission = match source {
                FlowSource::Builtin(FlowKind::SignUp) => {
                    let mut auth = MemoryAuth::new(&config);
                    session::sign_up(&config, &mut host, &mut auth)?
                }
                source => {
                    session::fill_form(&config, &source, &mut host, &company, &site, &mut LogSink)?
                }
            };
            if let Some(submission) = submission {
                println!("{}", submission.to_json()?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check {
            flow,
            document,
            answers,
        } => {
            let source = FlowSource::resolve(flow.as_deref(), document.as_deref())?;
            let answers = read_answers(&answers)?;
            let mut wizard = source.wizard(&config)?;
            match replay(&mut wizard, answers) {
                Replay::Completed(data) => {
                    println!("{}", source.finalize(data)?.to_json()?);
                    Ok(ExitCode::SUCCESS)
                }
                Replay::Blocked { step, issues } => {
                    eprintln!("blocked at step `{step}`:");
                    for issue in issues {
                        eprintln!("  {issue}");
                    }
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Fatigue { answers } => {
            let assessment = fatigue::assess(&read_answers(&answers)?)?;
            for (field, points) in &assessment.breakdown {
                println!("{field:<16} {points}");
            }
            println!("score            {}", assessment.score);
            println!("risk             {}", assessment.level);
            println!("{}", assessment.level.recommendation());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_answers(path: &Path) -> Result<DataStore> {
    Ok(serde_yaml::from_str(&fs::read_to_string(path)?)?)
}
