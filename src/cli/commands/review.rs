//! skp review - Review reportee submissions

use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout};
use crate::error::{Result, SkpError};
use crate::review::{Decision, PendingItem, dispatch_decision, pending_items, resolve_decision};

#[derive(Args, Debug)]
pub struct ReviewArgs {
    #[command(subcommand)]
    pub command: ReviewCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommand {
    /// List pending submissions of your reportees
    List(ListArgs),
    /// Approve or reject one submission
    Decide(DecideArgs),
    /// Team size and record totals, with per-reportee counts
    Overview(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Manager id to list for (default: the session user)
    #[arg(long)]
    pub manager: Option<String>,
}

#[derive(Args, Debug)]
pub struct DecideArgs {
    /// Section type: skill, project, asset, certification, eminence
    #[arg(long)]
    pub section: String,

    /// Decision to record
    #[arg(long, value_enum, ignore_case = true)]
    pub decision: Decision,

    /// Request data JSON as shown by `review list`
    #[arg(long, required_unless_present = "id", conflicts_with = "id")]
    pub request_data: Option<String>,

    /// Record id (builds the request data for you)
    #[arg(long)]
    pub id: Option<String>,

    /// Item name sent with project and asset decisions
    #[arg(long)]
    pub item_name: Option<String>,

    /// Proficiency sent with skill decisions when using --id
    #[arg(long, requires = "id")]
    pub proficiency: Option<String>,
}

#[derive(Serialize)]
struct DecisionOutcome<'a> {
    section: &'a str,
    decision: Decision,
    path: String,
    recorded: bool,
}

pub fn run(ctx: &AppContext, args: &ReviewArgs) -> Result<()> {
    match &args.command {
        ReviewCommand::List(list) => run_list(ctx, list),
        ReviewCommand::Decide(decide) => run_decide(ctx, decide),
        ReviewCommand::Overview(overview) => run_overview(ctx, overview),
    }
}

fn resolve_manager_id(ctx: &AppContext, args: &ListArgs) -> Result<String> {
    match &args.manager {
        Some(id) => Ok(id.clone()),
        None => Ok(ctx
            .block_on(ctx.backend.fetch_identity(&ctx.config.identity))?
            .user_id),
    }
}

fn run_list(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let manager_id = resolve_manager_id(ctx, args)?;
    let include_eminence = ctx.config.review.include_eminence;
    let reportees = ctx.block_on(ctx.backend.fetch_reportees(&manager_id, include_eminence))?;
    let today = super::today();
    let items: Vec<PendingItem> = reportees
        .iter()
        .flat_map(|reportee| pending_items(reportee, Some(&manager_id), include_eminence, today))
        .collect();

    if ctx.is_machine() {
        return output::emit_robot(&output::robot_ok(&items), ctx.output_format);
    }

    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout.title(&format!(
        "{} pending item(s) across {} reportee(s)",
        items.len(),
        reportees.len()
    ));
    for item in &items {
        layout.section(&format!("{}: {}", item.section.label(), item.name));
        layout
            .kv("Reportee", &format!("{} ({})", item.user_name, item.user_id))
            .kv("Submitted", &item.submission_date)
            .kv("Request data", &item.request_data);
        if let Some(detail) = &item.detail {
            layout.kv("Detail", detail);
        }
        layout.blank();
    }
    output::emit_human(layout);
    Ok(())
}

fn run_overview(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let manager_id = resolve_manager_id(ctx, args)?;
    let overview = ctx.block_on(
        ctx.backend
            .fetch_team_overview(&manager_id, ctx.config.review.include_eminence),
    )?;

    if ctx.is_machine() {
        return output::emit_robot(&output::robot_ok(&overview), ctx.output_format);
    }

    let totals = &overview.totals;
    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout.title(&format!("Team of {}", overview.manager_id));
    layout
        .kv("Team size", &overview.team_size.to_string())
        .kv("Skills", &totals.skills.to_string())
        .kv("Projects", &totals.projects.to_string())
        .kv("Assets", &totals.assets.to_string())
        .kv("Certifications", &totals.certifications.to_string())
        .kv("Eminence", &totals.eminence.to_string())
        .kv("All records", &totals.total().to_string());
    if !overview.from_summary {
        layout.push_line("(summed from reportee counts)");
    }
    layout.blank();
    for reportee in &overview.reportees {
        let counts = &reportee.counts;
        layout.bullet(&format!(
            "{} ({}): {} skills, {} projects, {} assets, {} certifications, {} eminence",
            reportee.name,
            reportee.user_id,
            counts.skills,
            counts.projects,
            counts.assets,
            counts.certifications,
            counts.eminence
        ));
    }
    output::emit_human(layout);
    Ok(())
}

fn run_decide(ctx: &AppContext, args: &DecideArgs) -> Result<()> {
    let request_data = match (&args.request_data, &args.id) {
        (Some(raw), _) => raw.clone(),
        (None, Some(id)) => request_data_for(id, args.proficiency.as_deref()).to_string(),
        (None, None) => {
            return Err(SkpError::InvalidRequestData(
                "pass --request-data or --id".to_string(),
            ));
        }
    };
    let item_name = args.item_name.as_deref();

    // Surface bad input with its own error code before dispatching.
    let request = resolve_decision(&args.section, args.decision, &request_data, item_name)?;
    let recorded = ctx.block_on(dispatch_decision(
        &ctx.backend,
        &args.section,
        args.decision,
        &request_data,
        item_name,
    ));

    let outcome = DecisionOutcome {
        section: request.section.as_str(),
        decision: args.decision,
        path: request.path,
        recorded,
    };
    if !recorded {
        return Err(SkpError::DecisionNotRecorded(format!(
            "{} for {}",
            args.decision, outcome.path
        )));
    }

    if ctx.is_machine() {
        return output::emit_robot(&output::robot_ok(&outcome), ctx.output_format);
    }
    println!(
        "{} {} {} ({})",
        args.decision,
        outcome.section,
        outcome.path,
        output::status_word(true, ctx.output_format)
    );
    Ok(())
}

fn request_data_for(id: &str, proficiency: Option<&str>) -> Value {
    let mut data = Map::new();
    data.insert("id".to_string(), json!(id));
    if let Some(proficiency) = proficiency {
        data.insert("proficiency".to_string(), json!(proficiency));
    }
    Value::Object(data)
}
