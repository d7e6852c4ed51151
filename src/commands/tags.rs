//! Tag reconciliation on an existing snitch.

use crate::cli::TagsArgs;
use crate::output;
use crate::Context;
use deadmanssnitch::{Client, Result, SnitchRef};

pub fn run(ctx: &Context, client: &Client, args: TagsArgs) -> Result<()> {
    let reference = SnitchRef {
        id: args.id,
        name: args.name,
    };
    log::info!("reconciling tags to state {:?}", args.state);
    let outcome = client.reconcile_tags(&reference, &args.tags, args.state)?;

    if outcome.changed || !ctx.quiet {
        output::tag_outcome(&outcome, ctx.json);
    }
    Ok(())
}
