//! CLI handlers for whole-plan commands.
//!
//! Implements:
//! - `fitscribe generate <prompt>` -- generate a plan from a prompt
//! - `fitscribe show <file>`       -- print a plan week by week
//! - `fitscribe validate <file>`   -- print validation warnings
//! - `fitscribe stats <file>`      -- print plan statistics
//! - `fitscribe examples`          -- list example prompts

use std::path::Path;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use fitscribe_core::plan::{PlanFormat, load_program, render_program, save_program, summarize};
use fitscribe_core::{EXAMPLE_PROMPTS, Session, SessionError};

use crate::config::FitscribeConfig;
use crate::render;

// -----------------------------------------------------------------------
// fitscribe generate
// -----------------------------------------------------------------------

/// Options for [`cmd_generate`].
pub struct GenerateOptions<'a> {
    pub prompt: &'a str,
    pub seed: Option<u64>,
    pub output: Option<&'a Path>,
    pub format: Option<PlanFormat>,
}

/// Generate a plan, then print it or write it to a file.
///
/// Ctrl-C while the generator is waiting cancels the request.
pub async fn cmd_generate(config: &FitscribeConfig, opts: GenerateOptions<'_>) -> Result<()> {
    let generator = config.generator(opts.seed)?;
    let mut session = Session::new(Box::new(generator));

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    eprintln!("Generating workout plan...");
    let result = session.submit_prompt(opts.prompt, &cancel).await;
    watcher.abort();

    let program = match result {
        Ok(program) => program.clone(),
        Err(e @ SessionError::Generation(_)) => {
            return Err(anyhow::Error::new(e)
                .context("Run the same command again to retry with this prompt."));
        }
        Err(e) => return Err(e.into()),
    };

    let warnings = session.warnings().to_vec();
    if !warnings.is_empty() {
        eprint!("{}", render::warnings(&warnings));
    }

    match opts.output {
        Some(path) => {
            let format = opts
                .format
                .or_else(|| PlanFormat::from_path(path))
                .unwrap_or(config.format);
            save_program(&program, path, format)
                .with_context(|| format!("failed to save plan to {}", path.display()))?;
            println!("Plan written to {} ({format}).", path.display());
            println!();
            print!("{}", render::overview(&program, &summarize(&program)));
        }
        None => match opts.format {
            Some(format) => print!("{}", render_program(&program, format)?),
            None => {
                print!("{}", render::overview(&program, &summarize(&program)));
                println!();
                print!("{}", render::program_table(&program));
            }
        },
    }

    Ok(())
}

// -----------------------------------------------------------------------
// fitscribe show / validate / stats
// -----------------------------------------------------------------------

/// Print the plan week by week, followed by its overview.
pub fn cmd_show(file: &Path) -> Result<()> {
    let program = load(file)?;
    print!("{}", render::program_table(&program));
    print!("{}", render::overview(&program, &summarize(&program)));
    Ok(())
}

/// Print validation warnings. Warnings never fail the command.
pub fn cmd_validate(file: &Path) -> Result<()> {
    let program = load(file)?;
    let messages = fitscribe_core::plan::validate_plan(&program);
    print!("{}", render::warnings(&messages));
    Ok(())
}

/// Print plan statistics, as text or JSON.
pub fn cmd_stats(file: &Path, json: bool) -> Result<()> {
    let program = load(file)?;
    let meta = summarize(&program);
    if json {
        let value = serde_json::to_string_pretty(&meta).context("failed to encode stats")?;
        println!("{value}");
    } else {
        print!("{}", render::overview(&program, &meta));
    }
    Ok(())
}

// -----------------------------------------------------------------------
// fitscribe examples
// -----------------------------------------------------------------------

pub fn cmd_examples() {
    println!("Example prompts:");
    for (i, prompt) in EXAMPLE_PROMPTS.iter().enumerate() {
        println!("  {}. {prompt}", i + 1);
    }
}

fn load(file: &Path) -> Result<fitscribe_core::plan::Program> {
    load_program(file).with_context(|| format!("failed to load plan file: {}", file.display()))
}
