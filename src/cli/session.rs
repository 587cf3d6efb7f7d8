//! Interactive console session.
//!
//! Every panel gets a number. Commands address a panel by that number:
//!
//! ```text
//! g            generate every section
//! r <k>        regenerate panel k
//! n <k>        move the cursor of panel k
//! c <k>        copy the current item of panel k
//! a <k>        copy every item of panel k
//! l <k> <i>    copy item i of panel k
//! log          show the activity log
//! clear        clear the activity log
//! q            quit
//! ```

use anyhow::Result;
use thiserror::Error;
use tokio::sync::oneshot::{self, error::TryRecvError};

use super::Workspace;
use crate::config::UI_SECTIONS;
use crate::coordinator::Coordinator;
use crate::section::{Section, SectionId};
use crate::ui::{self, StatusLine, panel, prompt};
use crate::update::{UpdateInfo, UpdateProbe};

/// Activity lines shown per unit of scroll speed.
const LOG_PAGE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Generate,
    Regenerate(usize),
    Next(usize),
    CopyCurrent(usize),
    CopyAll(usize),
    CopyItem(usize, usize),
    Log,
    Clear,
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum ParseError {
    #[error("unknown command '{0}' (h for help)")]
    Unknown(String),

    #[error("'{0}' needs a panel number")]
    MissingPanel(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'l' needs a panel number and an item number")]
    MissingItem,
}

fn parse(line: &str) -> Result<Action, ParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Action::Nothing);
    };

    let mut number = |name: &str| -> Result<usize, ParseError> {
        let word = words
            .next()
            .ok_or_else(|| ParseError::MissingPanel(name.to_string()))?;
        word.parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ParseError::NotANumber(word.to_string()))
    };

    match command {
        "g" => Ok(Action::Generate),
        "r" => Ok(Action::Regenerate(number("r")?)),
        "n" => Ok(Action::Next(number("n")?)),
        "c" => Ok(Action::CopyCurrent(number("c")?)),
        "a" => Ok(Action::CopyAll(number("a")?)),
        "l" => {
            let panel = number("l")?;
            let item = number("l").map_err(|e| match e {
                ParseError::MissingPanel(_) => ParseError::MissingItem,
                other => other,
            })?;
            Ok(Action::CopyItem(panel, item))
        }
        "log" => Ok(Action::Log),
        "clear" => Ok(Action::Clear),
        "h" | "help" | "?" => Ok(Action::Help),
        "q" | "quit" | "exit" => Ok(Action::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

/// Run the interactive session until the operator quits.
pub fn run(workspace: &Workspace) -> Result<()> {
    let gate = workspace.config.load_features();
    let show_log = gate.is_enabled(UI_SECTIONS, "activity_log");
    let log_lines = LOG_PAGE * usize::try_from(workspace.config.load_scroll_speed()).unwrap_or(1);

    let mut coordinator = workspace.coordinator(&gate);

    let version = workspace.config.load_version();
    let mut probe = Some(UpdateProbe::new(version.version, version.manifest_url).spawn());

    println!();
    ui::status::heading(&format!("accgen {}", env!("CARGO_PKG_VERSION")));
    ui::status::hint("g to generate, h for help, q to quit");
    if let Some(path) = coordinator.log().mirror() {
        ui::status::hint(&format!("Activity is mirrored to {}", path.display()));
    }
    println!();
    print_panels(&coordinator);

    loop {
        poll_update(&mut probe, &mut coordinator);

        let line = prompt::command_line("accgen")?;
        let action = match parse(&line) {
            Ok(action) => action,
            Err(e) => {
                StatusLine::warn(e.to_string()).print();
                continue;
            }
        };

        match action {
            Action::Nothing => continue,
            Action::Quit => break,
            Action::Help => {
                print_help();
                continue;
            }
            Action::Log => {
                let log = coordinator.log();
                print!("{}", log.render());
                ui::status::hint(&format!("{} lines", log.lines().len()));
                continue;
            }
            Action::Clear => {
                if prompt::confirm("Clear the activity log?")? {
                    coordinator.log_mut().clear();
                }
                continue;
            }
            Action::Generate => {
                coordinator.generate_all();
                print_panels(&coordinator);
            }
            Action::Regenerate(key)
            | Action::Next(key)
            | Action::CopyCurrent(key)
            | Action::CopyAll(key) => {
                let id = panel_id(&coordinator, key);
                let Some(mut view) = id.and_then(|id| coordinator.view_mut(id)) else {
                    StatusLine::warn(format!("No panel {key}")).print();
                    continue;
                };
                match action {
                    Action::Regenerate(_) => view.regenerate(),
                    Action::Next(_) => view.advance_cursor(),
                    Action::CopyCurrent(_) => view.copy_current(),
                    _ => view.copy_all(),
                }
                print!("{}", panel::render_section(key, view.section()));
            }
            Action::CopyItem(key, item) => {
                let Some(id) = panel_id(&coordinator, key) else {
                    StatusLine::warn(format!("No panel {key}")).print();
                    continue;
                };
                let text = coordinator
                    .section(id)
                    .and_then(|section| section.items().get(item - 1).cloned());
                match (text, coordinator.view_mut(id)) {
                    (Some(text), Some(mut view)) => view.copy_line(&text),
                    _ => {
                        StatusLine::warn(format!("Panel {key} has no item {item}")).print();
                        continue;
                    }
                }
            }
        }

        if show_log {
            print!("{}", panel::render_log(coordinator.log().tail(log_lines)));
        }
    }

    Ok(())
}

/// Panel numbers start at 1.
fn panel_id(coordinator: &Coordinator, key: usize) -> Option<SectionId> {
    coordinator.sections().get(key.checked_sub(1)?).map(Section::id)
}

/// Announce the update probe's answer once it arrives.
fn poll_update(
    probe: &mut Option<oneshot::Receiver<Option<UpdateInfo>>>,
    coordinator: &mut Coordinator,
) {
    let Some(rx) = probe.as_mut() else {
        return;
    };

    match rx.try_recv() {
        Err(TryRecvError::Empty) => return,
        Ok(Some(info)) if info.has_update => {
            StatusLine::warn(format!("Version {} is available", info.remote_version)).print();
            if !info.changelog.is_empty() {
                ui::status::hint(&info.changelog);
            }
            coordinator.note(&format!("Update available: {}", info.remote_version));
        }
        Ok(_) | Err(TryRecvError::Closed) => {}
    }
    *probe = None;
}

fn print_panels(coordinator: &Coordinator) {
    if coordinator.sections().is_empty() {
        ui::status::hint("Every generator is disabled");
    }
    for (i, section) in coordinator.sections().iter().enumerate() {
        print!("{}", panel::render_section(i + 1, section));
    }
    println!();
}

fn print_help() {
    for (keys, what) in [
        ("g", "generate every section"),
        ("r <k>", "regenerate panel k"),
        ("n <k>", "next item in panel k"),
        ("c <k>", "copy the current item of panel k"),
        ("a <k>", "copy every item of panel k"),
        ("l <k> <i>", "copy item i of panel k"),
        ("log", "show the activity log"),
        ("clear", "clear the activity log"),
        ("q", "quit"),
    ] {
        println!("  {keys:<10} {what}");
    }
}
