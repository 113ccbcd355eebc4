//! skp whoami - Show the session identity

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub fn run(ctx: &AppContext, _args: &WhoamiArgs) -> Result<()> {
    let identity = ctx.block_on(ctx.backend.fetch_identity(&ctx.config.identity))?;

    if ctx.is_machine() {
        return output::emit_robot(&output::robot_ok(&identity), ctx.output_format);
    }

    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout
        .kv("User id", &identity.user_id)
        .kv("Name", identity.name.as_deref().unwrap_or("-"))
        .kv("Email", identity.email.as_deref().unwrap_or("-"))
        .kv("Role", &identity.role)
        .kv("Manager", identity.manager_id.as_deref().unwrap_or("-"));
    output::emit_human(layout);
    Ok(())
}
