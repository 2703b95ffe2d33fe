mod config;
mod exercise_cmds;
mod plan_cmds;
mod render;
#[cfg(test)]
mod test_util;
mod tui;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use fitscribe_core::Session;
use fitscribe_core::plan::{PlanFormat, load_program};

use config::FitscribeConfig;

#[derive(Parser)]
#[command(
    name = "fitscribe",
    version,
    about = "Generate and edit structured workout programs from a prompt"
)]
struct Cli {
    /// Skip the simulated generation delay
    #[arg(long, global = true)]
    no_delay: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default fitscribe config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a workout plan from a free-text prompt
    Generate {
        /// What kind of program you want, in plain words
        prompt: String,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Write the plan to this file instead of printing it
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Document format (json or toml); defaults to the file extension
        #[arg(long)]
        format: Option<PlanFormat>,
    },
    /// Print a plan week by week
    Show {
        /// Plan file (.json or .toml)
        file: PathBuf,
    },
    /// Check a plan for structural problems (advisory)
    Validate {
        /// Plan file (.json or .toml)
        file: PathBuf,
    },
    /// Show duration, workout days, exercise count, difficulty and focus
    Stats {
        /// Plan file (.json or .toml)
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit exercises in a plan file
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Browse and edit a plan interactively
    View {
        /// Plan file to open and save back to
        file: Option<PathBuf>,
        /// Generate a plan from this prompt first
        #[arg(long)]
        prompt: Option<String>,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List example prompts
    Examples,
    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Week and day of an exercise, both 1-based.
#[derive(Args, Debug, Clone, Copy)]
pub struct Position {
    /// Week number, starting at 1
    #[arg(long)]
    pub week: usize,
    /// Day number within the week, starting at 1
    #[arg(long)]
    pub day: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Subcommand)]
pub enum ExerciseCommands {
    /// Change fields of an exercise
    Update {
        /// Plan file
        file: PathBuf,
        #[command(flatten)]
        at: Position,
        /// Exercise number within the day, starting at 1
        #[arg(long)]
        exercise: usize,
        #[arg(long)]
        circuit: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        sets: Option<u32>,
        #[arg(long)]
        reps: Option<String>,
        #[arg(long)]
        rest: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove an exercise
    Delete {
        /// Plan file
        file: PathBuf,
        #[command(flatten)]
        at: Position,
        /// Exercise number within the day, starting at 1
        #[arg(long)]
        exercise: usize,
    },
    /// Move an exercise to another position in the same day
    Reorder {
        /// Plan file
        file: PathBuf,
        #[command(flatten)]
        at: Position,
        /// Current exercise number
        #[arg(long)]
        from: usize,
        /// New exercise number
        #[arg(long)]
        to: usize,
    },
    /// Append an exercise to a day
    Add {
        /// Plan file
        file: PathBuf,
        #[command(flatten)]
        at: Position,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 3)]
        sets: u32,
        #[arg(long)]
        reps: String,
        /// Circuit label; defaults to the next letter in the day
        #[arg(long)]
        circuit: Option<String>,
        #[arg(long)]
        rest: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Swap an exercise with its neighbour
    Move {
        /// Plan file
        file: PathBuf,
        #[command(flatten)]
        at: Position,
        /// Exercise number within the day, starting at 1
        #[arg(long)]
        exercise: usize,
        #[arg(value_enum)]
        direction: Direction,
    },
}

/// Execute the `fitscribe init` command: write config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile::default();
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  generator.min_delay_ms = {}", cfg.generator.min_delay_ms);
    println!("  generator.jitter_ms = {}", cfg.generator.jitter_ms);
    println!("  output.format = {}", cfg.output.format);

    Ok(())
}

/// Execute the `fitscribe view` command.
async fn cmd_view(
    config: &FitscribeConfig,
    file: Option<PathBuf>,
    prompt: Option<String>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let generator = config.generator(seed)?;
    let mut session = Session::new(Box::new(generator));

    let format = file
        .as_deref()
        .and_then(PlanFormat::from_path)
        .unwrap_or(config.format);

    // An existing file is opened unless a prompt asks for a fresh plan;
    // a missing file becomes the save target.
    if prompt.is_none() {
        if let Some(path) = file.as_deref().filter(|p| p.exists()) {
            let program = load_program(path)
                .with_context(|| format!("failed to load plan file: {}", path.display()))?;
            session.open(program);
        }
    }

    let mut app = tui::app::App::new(session, file, format);
    if let Some(prompt) = prompt {
        app.input = prompt;
        eprintln!("Generating workout plan...");
        app.submit().await;
    }

    tui::run_viewer(app).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(force)?;
        }
        Commands::Generate {
            prompt,
            seed,
            output,
            format,
        } => {
            let resolved = FitscribeConfig::resolve(cli.no_delay, None)?;
            plan_cmds::cmd_generate(
                &resolved,
                plan_cmds::GenerateOptions {
                    prompt: &prompt,
                    seed,
                    output: output.as_deref(),
                    format,
                },
            )
            .await?;
        }
        Commands::Show { file } => {
            plan_cmds::cmd_show(&file)?;
        }
        Commands::Validate { file } => {
            plan_cmds::cmd_validate(&file)?;
        }
        Commands::Stats { file, json } => {
            plan_cmds::cmd_stats(&file, json)?;
        }
        Commands::Exercise { command } => {
            exercise_cmds::run_exercise_command(command)?;
        }
        Commands::View { file, prompt, seed } => {
            let resolved = FitscribeConfig::resolve(cli.no_delay, None)?;
            cmd_view(&resolved, file, prompt, seed).await?;
        }
        Commands::Examples => {
            plan_cmds::cmd_examples();
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "fitscribe", &mut std::io::stdout());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn exercise_positions_parse() {
        let cli = Cli::try_parse_from([
            "fitscribe",
            "exercise",
            "move",
            "plan.json",
            "--week",
            "2",
            "--day",
            "3",
            "--exercise",
            "1",
            "down",
        ])
        .unwrap();
        let Commands::Exercise {
            command:
                ExerciseCommands::Move {
                    at,
                    exercise,
                    direction,
                    ..
                },
        } = cli.command
        else {
            panic!("expected exercise move");
        };
        assert_eq!((at.week, at.day, exercise), (2, 3, 1));
        assert!(matches!(direction, Direction::Down));
    }

    #[test]
    fn generate_format_flag_parses() {
        let cli = Cli::try_parse_from([
            "fitscribe",
            "--no-delay",
            "generate",
            "4-week beginner plan",
            "--format",
            "toml",
        ])
        .unwrap();
        assert!(cli.no_delay);
        let Commands::Generate { format, prompt, .. } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(format, Some(PlanFormat::Toml));
        assert_eq!(prompt, "4-week beginner plan");
    }
}
