mod activity;
mod cli;
mod clipboard;
mod config;
mod coordinator;
mod report;
mod sampler;
mod section;
mod source;
mod store;
mod transform;
mod ui;
mod update;
mod utilities;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, ClipAction, Command, FeaturesAction, Workspace};
use utilities::PasswordPolicy;

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt::init();
    }

    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let workspace = Workspace::from_cli(&cli);

    match cli.command {
        Some(Command::Check) => return Ok(cli::check(&workspace)),
        Some(Command::Generate) => cli::generate(&workspace),
        Some(Command::Features { action }) => match action {
            Some(FeaturesAction::Set {
                category,
                feature,
                state,
            }) => cli::features_set(&workspace, &category, &feature, state.is_on())?,
            None => cli::features(&workspace),
        },
        Some(Command::ScrollSpeed { speed }) => cli::scroll_speed(&workspace, speed)?,
        Some(Command::Update) => cli::update(&workspace).await,
        Some(Command::Password {
            length,
            no_symbols,
            copy,
        }) => cli::password(
            &workspace,
            PasswordPolicy {
                length,
                symbols: !no_symbols,
            },
            copy,
        )?,
        Some(Command::Clip { action }) => match action {
            ClipAction::Get => cli::clip_get(&workspace)?,
            ClipAction::Set { text } => cli::clip_set(&workspace, &text)?,
        },
        Some(Command::Report) => cli::report(&workspace)?,
        Some(Command::Session) | None => cli::session(&workspace)?,
    }

    Ok(ExitCode::SUCCESS)
}
