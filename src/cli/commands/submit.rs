//! skp submit - Queue the drafts of a file and submit them together

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout, OutputFormat};
use crate::error::{Result, SkpError};
use crate::forms::FormKind;
use crate::forms::drafts::DraftsFile;
use crate::forms::payload::{Submission, SubmitterIdentity};
use crate::queue::{PendingQueue, SubmitReport};

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Drafts file (TOML, or JSON with a .json extension)
    pub drafts: PathBuf,

    /// Only submit drafts of these kinds (repeatable)
    #[arg(long, value_enum)]
    pub only: Vec<FormKind>,

    /// Print the request bodies instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
struct PlannedRequest<'a> {
    id: &'a str,
    kind: FormKind,
    method: &'static str,
    path: &'static str,
    body: Submission,
}

pub fn run(ctx: &AppContext, args: &SubmitArgs) -> Result<()> {
    let drafts = DraftsFile::load(&args.drafts)?;
    let mut queue = PendingQueue::new();
    for payload in drafts.into_payloads(&args.only) {
        queue.add(payload)?;
    }
    if queue.is_empty() {
        return Err(SkpError::NothingSelected);
    }

    if args.dry_run {
        return emit_plan(ctx, &queue);
    }

    let identity = ctx.block_on(ctx.backend.fetch_identity(&ctx.config.identity))?;
    let report = ctx.block_on(queue.submit_selected(
        &ctx.backend,
        &identity.submitter(),
        super::today(),
    ))?;
    emit_report(ctx.output_format, &report)?;

    if report.is_complete() {
        Ok(())
    } else {
        Err(SkpError::SubmissionIncomplete {
            succeeded: report.succeeded_count(),
            failed: report.failed_count(),
        })
    }
}

fn emit_plan(ctx: &AppContext, queue: &PendingQueue) -> Result<()> {
    // No session lookup in a dry run; ids come from config when set.
    let identity = SubmitterIdentity::new(
        ctx.config
            .identity
            .user_id
            .clone()
            .unwrap_or_else(|| "<session user>".to_string()),
        ctx.config.identity.manager_id.clone(),
    );
    let today = super::today();
    let plan: Vec<PlannedRequest<'_>> = queue
        .selected()
        .into_iter()
        .map(|entry| {
            let body = Submission::from_payload(&entry.payload, &identity, today);
            PlannedRequest {
                id: &entry.id,
                kind: entry.kind(),
                method: "POST",
                path: body.route(),
                body,
            }
        })
        .collect();

    if ctx.is_machine() {
        return output::emit_robot(&output::robot_ok(&plan), ctx.output_format);
    }

    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout.title(&format!("Dry run: {} request(s)", plan.len()));
    for request in &plan {
        layout.push_line(format!("{} {}", request.method, request.path));
        layout.push_line(serde_json::to_string_pretty(&request.body)?);
        layout.blank();
    }
    output::emit_human(layout);
    Ok(())
}

/// Print a submission report in the requested format.
pub(crate) fn emit_report(format: OutputFormat, report: &SubmitReport) -> Result<()> {
    if format.is_machine_readable() {
        let response = if report.is_complete() {
            output::robot_ok(report)
        } else {
            output::robot_partial(report, report.succeeded_count(), report.failed_count())
        };
        return output::emit_robot(&response, format);
    }

    let mut layout = HumanLayout::for_format(format);
    if report.succeeded_count() > 0 {
        layout.push_line(format!(
            "Successfully submitted {} form(s).",
            report.succeeded_count()
        ));
    }
    if !report.is_complete() {
        layout.push_line(format!(
            "Failed to submit {} form(s):",
            report.failed_count()
        ));
        for failure in &report.failed {
            layout.bullet(&format!(
                "{} {} [{}]: {}",
                failure.kind.label(),
                failure.summary,
                short_id(&failure.id),
                failure.error
            ));
        }
    }
    output::emit_human(layout);
    Ok(())
}

pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
