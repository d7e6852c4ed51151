//! Lifecycle operations: apply, pause, unpause.

use crate::cli::{ApplyArgs, SelectArgs};
use crate::output;
use crate::Context;
use deadmanssnitch::{Client, Result, SnitchRef, SnitchSpec};

fn spec_from_args(args: ApplyArgs) -> (SnitchSpec, deadmanssnitch::DesiredState) {
    let spec = SnitchSpec {
        id: args.id,
        name: args.name,
        interval: args.interval,
        alert_type: args.alert_type,
        alert_email: args.alert_email,
        notes: args.notes,
        tags: args.tags,
    };
    (spec, args.state)
}

pub fn apply(ctx: &Context, client: &Client, args: ApplyArgs) -> Result<()> {
    let (spec, state) = spec_from_args(args);
    log::info!("reconciling snitch to state {state:?}");
    let outcome = client.ensure(&spec, state)?;

    if outcome.changed || !ctx.quiet {
        let verb = match state {
            deadmanssnitch::DesiredState::Present => "applied",
            deadmanssnitch::DesiredState::Absent => "removed",
        };
        output::outcome(&outcome, verb, ctx.json);
    }
    Ok(())
}

fn reference(args: &SelectArgs) -> SnitchRef {
    SnitchRef {
        id: args.id.clone(),
        name: args.name.clone(),
    }
}

pub fn pause(ctx: &Context, client: &Client, args: &SelectArgs) -> Result<()> {
    let handle = client.pause(&reference(args))?;
    output::action(&handle, "paused", ctx.json);
    Ok(())
}

pub fn unpause(ctx: &Context, client: &Client, args: &SelectArgs) -> Result<()> {
    let handle = client.unpause(&reference(args))?;
    output::action(&handle, "unpaused", ctx.json);
    Ok(())
}
