//! skp taxonomy - Browse the skill taxonomy

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout};
use crate::error::Result;
use crate::taxonomy::{SkillTaxonomy, TaxonomyLoad, load_taxonomy};

#[derive(Args, Debug)]
pub struct TaxonomyArgs {
    /// List the segments of this platform
    #[arg(long)]
    pub platform: Option<String>,

    /// List the portfolios of this segment (needs --platform)
    #[arg(long, requires = "platform")]
    pub segment: Option<String>,

    /// List the specialties of this portfolio (needs --segment)
    #[arg(long, requires = "segment")]
    pub portfolio: Option<String>,
}

#[derive(Serialize)]
struct Choice<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    skill_id: Option<i64>,
}

#[derive(Serialize)]
struct ChoiceList<'a> {
    level: &'static str,
    choices: Vec<Choice<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

pub fn run(ctx: &AppContext, args: &TaxonomyArgs) -> Result<()> {
    let load = ctx.block_on(load_taxonomy(&ctx.backend));

    match &args.platform {
        None => emit_tree(ctx, &load),
        Some(platform) => {
            let list = choices(&load, platform, args.segment.as_deref(), args.portfolio.as_deref());
            emit_choices(ctx, &list)
        }
    }
}

fn choices<'a>(
    load: &'a TaxonomyLoad,
    platform: &str,
    segment: Option<&str>,
    portfolio: Option<&str>,
) -> ChoiceList<'a> {
    let tree: &SkillTaxonomy = &load.taxonomy;
    let (level, choices) = match (segment, portfolio) {
        (Some(segment), Some(portfolio)) => (
            "specialty",
            tree.specialties_for_portfolio(platform, segment, portfolio)
                .iter()
                .map(|s| Choice {
                    id: &s.id,
                    name: &s.name,
                    skill_id: s.skill_id,
                })
                .collect(),
        ),
        (Some(segment), None) => (
            "portfolio",
            tree.portfolios_for_segment(platform, segment)
                .iter()
                .map(|p| Choice {
                    id: &p.id,
                    name: &p.name,
                    skill_id: None,
                })
                .collect(),
        ),
        _ => (
            "segment",
            tree.segments_for_platform(platform)
                .iter()
                .map(|s| Choice {
                    id: &s.id,
                    name: &s.name,
                    skill_id: None,
                })
                .collect(),
        ),
    };
    ChoiceList {
        level,
        choices,
        error: load.error.as_deref(),
    }
}

fn emit_tree(ctx: &AppContext, load: &TaxonomyLoad) -> Result<()> {
    if ctx.is_machine() {
        return output::emit_robot(&output::robot_ok(load), ctx.output_format);
    }

    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout.title("Skill taxonomy");
    if let Some(error) = &load.error {
        layout.push_line(error.clone()).blank();
    }
    if load.taxonomy.is_empty() {
        layout.push_line("No skills available");
    }
    for platform in &load.taxonomy.platforms {
        layout.push_line(platform.name.clone());
        for segment in &platform.segments {
            layout.push_line(format!("  {}", segment.name));
            for portfolio in &segment.portfolios {
                layout.push_line(format!("    {}", portfolio.name));
                for specialty in &portfolio.specialties {
                    layout.push_line(format!("      - {}", specialty.name));
                }
            }
        }
    }
    output::emit_human(layout);
    Ok(())
}

fn emit_choices(ctx: &AppContext, list: &ChoiceList<'_>) -> Result<()> {
    if ctx.is_machine() {
        return output::emit_robot(&output::robot_ok(list), ctx.output_format);
    }

    let mut layout = HumanLayout::for_format(ctx.output_format);
    if let Some(error) = list.error {
        layout.push_line(error).blank();
    }
    if list.choices.is_empty() {
        layout.push_line(format!("No {} options", list.level));
    }
    for choice in &list.choices {
        match choice.skill_id {
            Some(skill_id) => layout.bullet(&format!("{} (skill {skill_id})", choice.name)),
            None => layout.bullet(choice.name),
        };
    }
    output::emit_human(layout);
    Ok(())
}
