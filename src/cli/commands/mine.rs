//! skp mine - List your own submitted records and their review status

use clap::{Args, ValueEnum};
use futures::future::try_join_all;

use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout};
use crate::error::Result;
use crate::forms::FormKind;
use crate::forms::records::SubmittedRecord;

#[derive(Args, Debug)]
pub struct MineArgs {
    /// Only list records of these kinds (repeatable, default: all)
    #[arg(long, value_enum)]
    pub kind: Vec<FormKind>,

    /// Only list records with this status (e.g. pending, approved)
    #[arg(long)]
    pub status: Option<String>,

    /// List for this user id instead of the session user
    #[arg(long)]
    pub user: Option<String>,
}

pub fn run(ctx: &AppContext, args: &MineArgs) -> Result<()> {
    let user_id = match args.user.clone().or_else(|| ctx.config.identity.user_id.clone()) {
        Some(id) => id,
        None => {
            ctx.block_on(ctx.backend.fetch_identity(&ctx.config.identity))?
                .user_id
        }
    };
    let kinds: &[FormKind] = if args.kind.is_empty() {
        FormKind::value_variants()
    } else {
        &args.kind
    };

    let listed = ctx.block_on(try_join_all(
        kinds
            .iter()
            .map(|kind| ctx.backend.fetch_user_records(*kind, &user_id)),
    ))?;
    let records: Vec<SubmittedRecord> = listed
        .into_iter()
        .flatten()
        .filter(|record| args.status.as_deref().is_none_or(|s| record.has_status(s)))
        .collect();

    if ctx.is_machine() {
        return output::emit_robot(&output::robot_ok(&records), ctx.output_format);
    }

    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout.title(&format!("{} record(s) for {user_id}", records.len()));
    for kind in kinds {
        let of_kind: Vec<&SubmittedRecord> =
            records.iter().filter(|record| record.kind == *kind).collect();
        if of_kind.is_empty() {
            continue;
        }
        layout.section(kind.label());
        for record in of_kind {
            let status = if record.status.is_empty() { "-" } else { record.status.as_str() };
            let line = match &record.detail {
                Some(detail) => format!("[{status}] {} ({detail})", record.name),
                None => format!("[{status}] {}", record.name),
            };
            layout.bullet(&line);
        }
        layout.blank();
    }
    output::emit_human(layout);
    Ok(())
}
