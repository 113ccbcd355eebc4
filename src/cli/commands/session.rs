//! skp session - Interactive pending-forms session
//!
//! The queue lives for the duration of the session only.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Args;

use crate::app::AppContext;
use crate::backend::SessionIdentity;
use crate::error::{Result, SkpError};
use crate::forms::FormKind;
use crate::forms::drafts::DraftsFile;
use crate::queue::PendingQueue;

use super::submit::{emit_report, short_id};

const HELP: &str = "\
Commands:
  load <file> [kind...]   queue drafts from a TOML/JSON file
  list                    show queued forms ([x] = selected)
  show <id>               print one queued form
  select <id|all>         check a form for submission
  unselect <id|all>       uncheck a form
  remove <id>             drop a form from the queue
  clear                   drop every form (asks first)
  submit                  submit the checked forms
  help                    this text
  quit                    leave the session";

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Drafts file to queue on start
    #[arg(long)]
    pub drafts: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session<'a> {
    ctx: &'a AppContext,
    queue: PendingQueue,
    identity: Option<SessionIdentity>,
}

pub fn run(ctx: &AppContext, args: &SessionArgs) -> Result<()> {
    let mut session = Session {
        ctx,
        queue: PendingQueue::new(),
        identity: None,
    };
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    if let Some(path) = &args.drafts {
        session.load(path, &[], &mut out)?;
    }
    writeln!(out, "Type `help` for commands.")?;

    loop {
        write!(out, "skp> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        match session.handle(line.trim(), &mut input, &mut out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => writeln!(out, "Error: {err}")?,
        }
    }

    if !session.queue.is_empty() {
        tracing::info!(discarded = session.queue.len(), "session ended with queued forms");
    }
    Ok(())
}

impl Session<'_> {
    fn handle<R: BufRead, W: Write>(&mut self, line: &str, input: &mut R, out: &mut W) -> Result<Flow> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Flow::Continue);
        };
        let rest: Vec<&str> = words.collect();

        match command {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => writeln!(out, "{HELP}")?,
            "load" => {
                let (path, kinds) = rest
                    .split_first()
                    .ok_or_else(|| SkpError::Config("usage: load <file> [kind...]".to_string()))?;
                let only = kinds
                    .iter()
                    .map(|kind| parse_kind(kind))
                    .collect::<Result<Vec<_>>>()?;
                self.load(Path::new(path), &only, out)?;
            }
            "list" => self.list(out)?,
            "show" => {
                let id = self.resolve(first(&rest)?)?;
                if let Some(entry) = self.queue.get(&id) {
                    writeln!(out, "{}", serde_json::to_string_pretty(entry)?)?;
                }
            }
            "select" | "unselect" => {
                let checked = command == "select";
                let target = first(&rest)?;
                let ids: Vec<String> = if target == "all" {
                    self.queue.entries().iter().map(|e| e.id.clone()).collect()
                } else {
                    vec![self.resolve(target)?]
                };
                for id in &ids {
                    self.queue.toggle_select(id, checked);
                }
                writeln!(out, "{} selected", self.queue.selected_count())?;
            }
            "remove" => {
                let id = self.resolve(first(&rest)?)?;
                if let Some(entry) = self.queue.remove(&id) {
                    writeln!(out, "Removed {} {}", entry.kind().label(), entry.summary())?;
                }
            }
            "clear" => {
                if self.queue.is_empty() {
                    writeln!(out, "Queue is already empty")?;
                } else if confirm("Clear all pending forms? This cannot be undone. [y/N] ", input, out)? {
                    let removed = self.queue.clear_all();
                    writeln!(out, "Cleared {removed} form(s)")?;
                }
            }
            "submit" => self.submit(out)?,
            other => writeln!(out, "Unknown command `{other}`. Type `help`.")?,
        }
        Ok(Flow::Continue)
    }

    fn load<W: Write>(&mut self, path: &Path, only: &[FormKind], out: &mut W) -> Result<()> {
        let drafts = DraftsFile::load(path)?;
        let mut added = 0;
        for payload in drafts.into_payloads(only) {
            let label = payload.kind().label();
            match self.queue.add(payload) {
                Ok(_) => added += 1,
                Err(err) => writeln!(out, "Skipped {label}: {err}")?,
            }
        }
        writeln!(out, "Queued {added} form(s), {} pending", self.queue.len())?;
        Ok(())
    }

    fn list<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.queue.is_empty() {
            writeln!(out, "No pending forms")?;
            return Ok(());
        }
        for entry in self.queue.entries() {
            let mark = if self.queue.is_selected(&entry.id) { "x" } else { " " };
            writeln!(
                out,
                "[{mark}] {}  {:<22} {}  ({})",
                short_id(&entry.id),
                entry.kind().label(),
                entry.summary(),
                entry.created_at.format("%Y-%m-%d %H:%M")
            )?;
        }
        writeln!(
            out,
            "{} pending, {} selected",
            self.queue.len(),
            self.queue.selected_count()
        )?;
        Ok(())
    }

    fn submit<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.queue.selected_count() == 0 {
            return Err(SkpError::NothingSelected);
        }
        let ctx = self.ctx;
        if self.identity.is_none() {
            self.identity = Some(ctx.block_on(ctx.backend.fetch_identity(&ctx.config.identity))?);
        }
        let submitter = self
            .identity
            .as_ref()
            .map(SessionIdentity::submitter)
            .unwrap_or_default();

        let report = ctx.block_on(self.queue.submit_selected(&ctx.backend, &submitter, super::today()))?;
        out.flush()?;
        emit_report(ctx.output_format, &report)?;
        Ok(())
    }

    /// Full id or a unique prefix of one.
    fn resolve(&self, token: &str) -> Result<String> {
        if self.queue.contains(token) {
            return Ok(token.to_string());
        }
        let mut matches = self
            .queue
            .entries()
            .iter()
            .filter(|entry| entry.id.starts_with(token));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(entry.id.clone()),
            _ => Err(SkpError::NotFound(token.to_string())),
        }
    }
}

fn first<'a>(rest: &[&'a str]) -> Result<&'a str> {
    rest.first()
        .copied()
        .ok_or_else(|| SkpError::Config("missing <id> argument".to_string()))
}

fn parse_kind(raw: &str) -> Result<FormKind> {
    <FormKind as clap::ValueEnum>::from_str(raw, true)
        .map_err(|_| SkpError::Config(format!("unknown form kind `{raw}`")))
}

fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
