//! CLI commands.

use std::process::ExitCode;

use anyhow::{Result, bail};
use chrono::Local;
use console::style;

use super::Workspace;
use super::workspace::clipboard;
use crate::clipboard::{SystemClipboard, copy_logged};
use crate::config::{self, DAILY_REPORT, ENABLED, GENERATORS, UTILITIES};
use crate::report;
use crate::section::{SectionId, catalog};
use crate::ui::{self, Spinner, StatusLine, Table, panel};
use crate::update::UpdateProbe;
use crate::utilities::{self, PasswordPolicy};

/// Run health checks and return appropriate exit code.
pub fn check(workspace: &Workspace) -> ExitCode {
    println!();
    println!("accgen {}", env!("CARGO_PKG_VERSION"));
    println!();

    let config_root = workspace.config.root();
    if config_root.exists() {
        StatusLine::ok(format!("Config directory {}", config_root.display())).print();
    } else {
        StatusLine::skip(format!("Config directory {} (defaults)", config_root.display())).print();
    }

    let store = match workspace.try_load_store() {
        Ok(store) => {
            StatusLine::ok(format!(
                "Data file {} ({} columns)",
                workspace.source.display(),
                store.headers().len()
            ))
            .print();
            store
        }
        Err(e) => {
            StatusLine::error(e.to_string()).print();
            ui::status::hint("Put the data file next to the executable or pass --source");
            println!();
            return ExitCode::FAILURE;
        }
    };

    let gate = workspace.config.load_features();
    for spec in catalog() {
        if !gate.is_enabled(GENERATORS, spec.id.config_key()) {
            StatusLine::skip(format!("{} (disabled)", spec.title)).print();
            continue;
        }
        match store.values(&spec.source_column) {
            Ok(values) if values.is_empty() => {
                let message = format!("{}: column '{}' is empty", spec.title, spec.source_column);
                StatusLine::warn(message).print();
            }
            Ok(values) => {
                StatusLine::ok(format!("{} ({} values)", spec.title, values.len())).print();
            }
            Err(e) => StatusLine::warn(format!("{}: {e}", spec.title)).print(),
        }
    }

    match SystemClipboard::detect() {
        Ok(_) => StatusLine::ok("Clipboard tool found").print(),
        Err(e) => StatusLine::warn(format!("Clipboard: {e}")).print(),
    }

    println!();
    ExitCode::SUCCESS
}

/// Generate every enabled section once and print the panels.
pub fn generate(workspace: &Workspace) {
    let gate = workspace.config.load_features();
    let mut coordinator = workspace.coordinator(&gate);
    coordinator.generate_all();

    println!();
    for (i, section) in coordinator.sections().iter().enumerate() {
        print!("{}", panel::render_section(i + 1, section));
        println!();
    }
}

pub fn features(workspace: &Workspace) {
    let gate = workspace.config.load_features();

    println!();
    let mut table = Table::new(&["Category", "Feature", "State"]);
    for (category, switches) in gate.categories() {
        for (feature, enabled) in switches {
            table.add_row(&[category, feature.as_str(), if *enabled { "on" } else { "off" }]);
        }
    }
    table.print();
    println!();
}

pub fn features_set(workspace: &Workspace, category: &str, feature: &str, on: bool) -> Result<()> {
    if category == GENERATORS && SectionId::from_config_key(feature).is_none() {
        let known: Vec<&str> = SectionId::ALL.iter().map(|id| id.config_key()).collect();
        bail!("Unknown generator '{feature}' (known: {})", known.join(", "));
    }

    let mut gate = workspace.config.load_features();
    gate.set(category, feature, on);
    workspace.config.save_features(&gate)?;

    let state = if on { "on" } else { "off" };
    StatusLine::ok(format!("{category}.{feature} is {state}")).print();
    if category == GENERATORS {
        ui::status::hint("Takes effect on the next start");
    }
    Ok(())
}

pub fn scroll_speed(workspace: &Workspace, speed: Option<u32>) -> Result<()> {
    match speed {
        Some(speed) => {
            workspace.config.save_scroll_speed(speed)?;
            StatusLine::ok(format!("Scroll speed set to {}", speed.max(1))).print();
        }
        None => println!("{}", workspace.config.load_scroll_speed()),
    }
    Ok(())
}

pub async fn update(workspace: &Workspace) {
    let version = workspace.config.load_version();

    println!();
    println!("{} {}", style("Installed").bold(), version.version);
    if !version.last_update.is_empty() {
        ui::status::hint(&format!("Released {}", version.last_update));
    }
    if !version.changelog.is_empty() {
        ui::status::hint(&version.changelog);
    }
    println!();

    if version.manifest_url.is_none() {
        StatusLine::skip("No update manifest configured").print();
        println!();
        return;
    }

    let spinner = Spinner::new("Checking for updates...");
    let probe = UpdateProbe::new(version.version, version.manifest_url);

    match probe.probe().await {
        Some(info) if info.has_update => {
            spinner.finish();
            StatusLine::warn(format!("Version {} is available", info.remote_version)).print();
            if !info.changelog.is_empty() {
                ui::status::hint(&info.changelog);
            }
        }
        Some(_) => {
            spinner.finish();
            StatusLine::ok("Up to date").print();
        }
        None => {
            spinner.finish_error();
            ui::status::hint("Could not reach the update server");
        }
    }
    println!();
}

pub fn password(workspace: &Workspace, policy: PasswordPolicy, copy: bool) -> Result<()> {
    let gate = workspace.config.load_features();
    if !gate.is_enabled(UTILITIES, "password_generator") {
        bail!("The password generator is disabled");
    }

    let password = utilities::generate_password(&mut workspace.rng(), policy);
    println!("{password}");

    if copy {
        copy_logged(
            clipboard().as_ref(),
            &mut workspace.activity_log(),
            &password,
            "Copied generated password",
        )?;
        StatusLine::ok("Copied to clipboard").print();
    }
    Ok(())
}

pub fn clip_get(workspace: &Workspace) -> Result<()> {
    require_clipboard(workspace)?;
    let text = clipboard().get()?;
    println!("{text}");
    Ok(())
}

pub fn clip_set(workspace: &Workspace, text: &str) -> Result<()> {
    require_clipboard(workspace)?;
    copy_logged(
        clipboard().as_ref(),
        &mut workspace.activity_log(),
        text,
        &format!("Copied: {text}"),
    )?;
    StatusLine::ok("Copied to clipboard").print();
    Ok(())
}

fn require_clipboard(workspace: &Workspace) -> Result<()> {
    if !workspace.config.load_features().is_enabled(UTILITIES, "clipboard") {
        bail!("The clipboard utility is disabled");
    }
    Ok(())
}

pub fn report(workspace: &Workspace) -> Result<()> {
    if !workspace.config.load_features().is_enabled(DAILY_REPORT, ENABLED) {
        bail!("The daily report is disabled");
    }

    let report = report::load(&config::activity_log_path(), Local::now().date_naive())?;

    println!();
    ui::status::heading(&format!("Daily report {}", report.date));
    println!();

    if report.is_empty() {
        ui::status::hint("No activity recorded today");
        println!();
        return Ok(());
    }

    let mut table = Table::new(&["Section", "Items", "Sections"]);
    for row in &report.rows {
        table.add_row(&[
            row.title.clone(),
            row.item_copies.to_string(),
            row.section_copies.to_string(),
        ]);
    }
    if !table.is_empty() {
        table.print();
        println!();
    }

    StatusLine::ok(format!("{} generations", report.generations)).print();
    StatusLine::ok(format!("{} loose line copies", report.line_copies)).print();
    println!();
    Ok(())
}
