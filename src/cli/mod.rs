//! Line-oriented front end for `--no-tui`. Every command goes through the
//! same controller the TUI uses, with the awaiting request variants.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::api::{ApiErrorKind, Contact, ContactDraft, ContactId};
use crate::controller::{ContactsController, ContactsError, LoadState};
use crate::tui::state::delete_prompt;

const HELP: &str = "/help                               Show help
/list                               Show contacts (filtered by /search)
/search <term>                      Filter the list; empty clears
/find <term>                        Ask the server to search
/get <id>                           Show one contact
/add <name>;<email>;<phone>         Add a contact
/update <id> <name>;<email>;<phone> Replace a contact
/delete <id>                        Delete a contact (asks first)
/retry                              Reload after a failed load
/health                             Check the service
/quit                               Quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Search(String),
    Find(String),
    Get(ContactId),
    Add(ContactDraft),
    Update(ContactId, ContactDraft),
    Delete(ContactId),
    Retry,
    Health,
    Quit,
    /// Known command with bad arguments; carries the usage line.
    Usage(&'static str),
    Unknown(String),
}

fn parse_draft(raw: &str) -> Option<ContactDraft> {
    let parts: Vec<&str> = raw.split(';').map(str::trim).collect();
    match parts.as_slice() {
        [name, email, phone] => Some(ContactDraft::new(*name, *email, *phone)),
        _ => None,
    }
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };
    let cmd = match head {
        "/help" => Command::Help,
        "/list" => Command::List,
        "/search" => Command::Search(rest.to_string()),
        "/find" if !rest.is_empty() => Command::Find(rest.to_string()),
        "/find" => Command::Usage("usage: /find <term>"),
        "/get" => match ContactId::parse(rest) {
            Some(id) => Command::Get(id),
            None => Command::Usage("usage: /get <id>"),
        },
        "/add" => match parse_draft(rest) {
            Some(draft) => Command::Add(draft),
            None => Command::Usage("usage: /add <name>;<email>;<phone>"),
        },
        "/update" => {
            let parsed = rest.split_once(char::is_whitespace).and_then(|(id, draft)| {
                Some((ContactId::parse(id)?, parse_draft(draft)?))
            });
            match parsed {
                Some((id, draft)) => Command::Update(id, draft),
                None => Command::Usage("usage: /update <id> <name>;<email>;<phone>"),
            }
        }
        "/delete" => match ContactId::parse(rest) {
            Some(id) => Command::Delete(id),
            None => Command::Usage("usage: /delete <id>"),
        },
        "/retry" => Command::Retry,
        "/health" => Command::Health,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(cmd)
}

pub fn format_contact(c: &Contact) -> String {
    format!("#{}  {}  <{}>  {}", c.id, c.name, c.email, c.phone)
}

fn print_list<W: Write>(out: &mut W, title: &str, contacts: &[Contact]) -> Result<()> {
    writeln!(out, "{title} ({})", contacts.len())?;
    for c in contacts {
        writeln!(out, "  {}", format_contact(c))?;
    }
    Ok(())
}

fn print_contacts_error<W: Write>(out: &mut W, action: &str, e: &ContactsError) -> Result<()> {
    match e {
        ContactsError::Validation(errors) => {
            writeln!(out, "Invalid contact:")?;
            for (field, msg) in errors.iter() {
                writeln!(out, "  {}: {msg}", field.label())?;
            }
        }
        ContactsError::Api(e) => writeln!(out, "Failed to {action} contact: {e}")?,
    }
    Ok(())
}

async fn load_and_report<W: Write>(ctl: &mut ContactsController, out: &mut W) -> Result<()> {
    match ctl.load().await {
        Ok(()) => writeln!(out, "Loaded {} contacts", ctl.state().contacts.len())?,
        Err(e) if e.kind() == ApiErrorKind::NetworkFailure => writeln!(
            out,
            "Error: {e} (is the contacts service running? type /retry to try again)"
        )?,
        Err(e) => writeln!(out, "Error: {e} (type /retry to try again)")?,
    }
    Ok(())
}

/// Run one command. Returns Ok(true) when the loop should stop.
async fn execute<R: BufRead, W: Write>(
    ctl: &mut ContactsController,
    cmd: Command,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    match cmd {
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(true),
        Command::Usage(usage) => writeln!(out, "{usage}")?,
        Command::Unknown(line) => writeln!(out, "Unknown command: {line} (try /help)")?,

        Command::List => {
            let state = ctl.state();
            if let LoadState::LoadFailed(e) = &state.load {
                writeln!(out, "Error: {e} (type /retry to try again)")?;
            } else if state.search_term.is_empty() {
                print_list(out, "Contacts", &state.filtered)?;
            } else {
                let title = format!("Contacts matching \"{}\"", state.search_term);
                print_list(out, &title, &state.filtered)?;
            }
        }

        Command::Search(term) => {
            ctl.set_search_term(term.as_str());
            let state = ctl.state();
            if term.trim().is_empty() {
                writeln!(out, "Search cleared")?;
                print_list(out, "Contacts", &state.filtered)?;
            } else if state.filtered.is_empty() {
                writeln!(
                    out,
                    "No contacts match \"{term}\". Try adjusting your search terms."
                )?;
            } else {
                let title = format!("Contacts matching \"{term}\"");
                print_list(out, &title, &state.filtered)?;
            }
        }

        Command::Find(term) => match ctl.search_remote(&term).await {
            Ok(found) => print_list(out, "Server matches", &found)?,
            Err(e) => writeln!(out, "Search failed: {e}")?,
        },

        Command::Get(id) => match ctl.get_contact(&id).await {
            Ok(c) => {
                writeln!(out, "{}", format_contact(&c))?;
                writeln!(out, "  avatar: {}", c.avatar_url())?;
                if let Some(created) = &c.created_at {
                    writeln!(out, "  created: {created}")?;
                }
                if let Some(updated) = &c.updated_at {
                    writeln!(out, "  updated: {updated}")?;
                }
            }
            Err(e) => writeln!(out, "Failed to fetch contact {id}: {e}")?,
        },

        Command::Add(draft) => match ctl.add_contact(draft).await {
            Ok(c) => writeln!(out, "Added {}", format_contact(&c))?,
            Err(e) => print_contacts_error(out, "create", &e)?,
        },

        Command::Update(id, draft) => match ctl.update_contact(&id, draft).await {
            Ok(c) => writeln!(out, "Updated {}", format_contact(&c))?,
            Err(e) => print_contacts_error(out, "update", &e)?,
        },

        Command::Delete(id) => {
            let name = ctl
                .state()
                .contact(&id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("contact #{id}"));
            write!(out, "{} [y/N] ", delete_prompt(&name))?;
            out.flush()?;
            let mut answer = String::new();
            input.read_line(&mut answer)?;
            if !matches!(answer.trim(), "y" | "Y" | "yes") {
                writeln!(out, "Cancelled")?;
                return Ok(false);
            }
            match ctl.delete_contact(&id).await {
                Ok(()) => writeln!(out, "Deleted {name}")?,
                Err(e) => writeln!(out, "Failed to delete contact: {e}")?,
            }
        }

        Command::Retry => {
            if matches!(ctl.state().load, LoadState::LoadFailed(_)) {
                load_and_report(ctl, out).await?;
            } else {
                writeln!(out, "Nothing to retry")?;
            }
        }

        Command::Health => match ctl.health_check().await {
            Ok(h) => match h.timestamp {
                Some(ts) => writeln!(out, "Service is {} ({ts})", h.status)?,
                None => writeln!(out, "Service is {}", h.status)?,
            },
            Err(e) => writeln!(out, "Health check failed: {e}")?,
        },
    }
    Ok(false)
}

pub async fn run_cli_loop<R: BufRead, W: Write>(
    ctl: &mut ContactsController,
    mut input: R,
    mut out: W,
) -> Result<()> {
    writeln!(out, "contacts (CLI) - type /help for commands")?;
    load_and_report(ctl, &mut out).await?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let Some(cmd) = parse_command(&line) else {
            continue;
        };
        if let Command::Unknown(raw) = &cmd {
            warn!(line = %raw, "unknown command");
        }
        if execute(ctl, cmd, &mut input, &mut out).await? {
            break;
        }
    }
    info!("cli loop finished");
    ctl.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests;
