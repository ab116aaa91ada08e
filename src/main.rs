use std::io;

use anyhow::Result;
use log::*;
use structopt::StructOpt;

use pwbrowser::config::{self, CONFIG_PATH};
use pwbrowser::{Action, Controller, DmenuPrompt, EntryForm, HttpBackend, Outcome, Page, Prompt, TerminalPrompt};

#[derive(Debug, StructOpt)]
#[structopt(name = "pwbrowser", about = "Browse and manage entries in a password store over HTTP")]
struct Opt {
    /// Config file
    #[structopt(long, default_value = CONFIG_PATH)]
    config: String,
    /// Backend base URL, overrides the config file
    #[structopt(long)]
    url: Option<String>,
    /// Request timeout in seconds
    #[structopt(long)]
    timeout: Option<u64>,
    /// Prompt through dmenu instead of the terminal
    #[structopt(long)]
    dmenu: bool,
    #[structopt(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, StructOpt)]
enum Cmd {
    /// Print matching entries as HTML, everything if no query is given
    Search { query: Option<String> },
    /// Add an entry
    Add(AddArgs),
    /// Edit an entry, fields not given are kept
    Edit(EditArgs),
    /// Delete an entry after confirmation
    Delete { id: i64 },
    /// Show an entry's password
    Reveal { id: i64 },
}

#[derive(Debug, StructOpt)]
struct AddArgs {
    #[structopt(long)]
    service: String,
    #[structopt(long, default_value = "")]
    username: String,
    #[structopt(long, default_value = "")]
    email: String,
    #[structopt(long, default_value = "")]
    notes: String,
    #[structopt(long)]
    password: Option<String>,
}

#[derive(Debug, StructOpt)]
struct EditArgs {
    id: i64,
    #[structopt(long)]
    service: Option<String>,
    #[structopt(long)]
    username: Option<String>,
    #[structopt(long)]
    email: Option<String>,
    #[structopt(long)]
    notes: Option<String>,
    /// New password; blank keeps the current one
    #[structopt(long)]
    password: Option<String>,
}

// A password not given on the command line is asked for only through dmenu
fn secret_or_ask<F>(given: Option<String>, use_dmenu: bool, ask: F) -> Result<String>
where
    F: FnOnce() -> io::Result<Option<String>>,
{
    match given {
        Some(p) => Ok(p),
        None if use_dmenu => Ok(ask()?.unwrap_or_default()),
        None => Ok(String::new()),
    }
}

fn ask_secret() -> io::Result<Option<String>> {
    pwbrowser::prompt_secret("Password:")
}

impl AddArgs {
    fn fill<F>(self, form: &mut EntryForm, use_dmenu: bool, ask: F) -> Result<()>
    where
        F: FnOnce() -> io::Result<Option<String>>,
    {
        form.service_name = self.service;
        form.username = self.username;
        form.email = self.email;
        form.notes = self.notes;
        form.password = secret_or_ask(self.password, use_dmenu, ask)?;
        Ok(())
    }
}

impl EditArgs {
    /// Overlay the given fields on a form populated from the backend.
    fn apply<F>(self, form: &mut EntryForm, use_dmenu: bool, ask: F) -> Result<()>
    where
        F: FnOnce() -> io::Result<Option<String>>,
    {
        if let Some(s) = self.service {
            form.service_name = s;
        }
        if let Some(u) = self.username {
            form.username = u;
        }
        if let Some(e) = self.email {
            form.email = e;
        }
        if let Some(n) = self.notes {
            form.notes = n;
        }
        form.password = secret_or_ask(self.password, use_dmenu, ask)?;
        Ok(())
    }
}

fn run<P: Prompt>(cmd: Cmd, backend: HttpBackend, prompt: P, use_dmenu: bool) -> Result<Outcome> {
    let mut page = Page::new();
    let mut controller = Controller::new(backend, prompt);
    let outcome = match cmd {
        Cmd::Search { query } => {
            page.search_input = query.unwrap_or_default();
            controller.attach(&mut page)
        }
        Cmd::Add(args) => {
            page.add_modal_open = true;
            args.fill(&mut page.add_form, use_dmenu, ask_secret)?;
            controller.submit_add(&mut page)
        }
        Cmd::Edit(args) => match controller.dispatch(&mut page, Action::Edit(args.id)) {
            Outcome::Done => {
                args.apply(&mut page.edit_form.fields, use_dmenu, ask_secret)?;
                controller.submit_edit(&mut page)
            }
            other => other,
        },
        Cmd::Delete { id } => controller.dispatch(&mut page, Action::Delete(id)),
        Cmd::Reveal { id } => controller.dispatch(&mut page, Action::Reveal(id)),
    };
    if !page.search_results.is_empty() {
        println!("{}", page.search_results);
    }
    Ok(outcome)
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let opt = Opt::from_args();
    let mut config = config::read(&opt.config)?;
    if let Some(url) = opt.url {
        config.base_url = url;
    }
    if let Some(timeout) = opt.timeout {
        config.timeout_secs = timeout;
    }
    config.use_dmenu |= opt.dmenu;
    debug!("Using {:?}", config);

    let backend = HttpBackend::new(&config.base_url, config.timeout())?;
    let outcome = if config.use_dmenu {
        run(opt.cmd, backend, DmenuPrompt, true)?
    } else {
        run(opt.cmd, backend, TerminalPrompt, false)?
    };
    match outcome {
        Outcome::Done | Outcome::Cancelled => Ok(()),
        other => {
            warn!("Finished with {:?}", other);
            std::process::exit(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn edit_args(password: Option<&str>) -> EditArgs {
        EditArgs {
            id: 3,
            service: None,
            username: Some("robert".into()),
            email: None,
            notes: None,
            password: password.map(str::to_owned),
        }
    }

    fn populated() -> EntryForm {
        EntryForm {
            service_name: "mail".into(),
            username: "bob".into(),
            email: "bob@example.com".into(),
            password: String::new(),
            notes: "work".into(),
        }
    }

    #[test]
    fn edit_asks_for_missing_secret_through_dmenu() {
        let asked = Cell::new(0);
        let mut form = populated();
        edit_args(None)
            .apply(&mut form, true, || {
                asked.set(asked.get() + 1);
                Ok(Some("n3w".into()))
            })
            .unwrap();
        assert_eq!(asked.get(), 1);
        assert_eq!(form.password, "n3w");
        assert_eq!(form.username, "robert");
        assert_eq!(form.service_name, "mail");
        assert_eq!(form.notes, "work");
    }

    #[test]
    fn edit_cancelled_prompt_keeps_secret_blank() {
        let mut form = populated();
        edit_args(None).apply(&mut form, true, || Ok(None)).unwrap();
        assert!(form.password.is_empty());
    }

    #[test]
    fn edit_without_dmenu_or_flag_never_asks() {
        let mut form = populated();
        edit_args(None)
            .apply(&mut form, false, || panic!("should not prompt"))
            .unwrap();
        assert!(form.password.is_empty());

        edit_args(Some("given"))
            .apply(&mut form, true, || panic!("should not prompt"))
            .unwrap();
        assert_eq!(form.password, "given");
    }

    #[test]
    fn add_asks_for_missing_secret_through_dmenu() {
        let args = AddArgs {
            service: "bank".into(),
            username: String::new(),
            email: String::new(),
            notes: String::new(),
            password: None,
        };
        let mut form = EntryForm::default();
        args.fill(&mut form, true, || Ok(Some("pin".into()))).unwrap();
        assert_eq!(form.service_name, "bank");
        assert_eq!(form.password, "pin");
    }

    #[test]
    fn dmenu_failure_is_an_error() {
        let mut form = populated();
        let result = edit_args(None).apply(&mut form, true, || {
            Err(io::Error::new(io::ErrorKind::NotFound, "dmenu missing"))
        });
        assert!(result.is_err());
    }
}
