use super::super::{Ctx, MoveArgs, parse_id, render};
use crate::Result;
use crate::core::EntityState;

/// Shared handler for submit/validate/reject/archive/reopen: they are all
/// one table-checked move to a fixed target.
pub(crate) fn handle(ctx: &mut Ctx, args: MoveArgs, target: EntityState) -> Result<()> {
    let json = ctx.json;
    let id = parse_id(&args.id)?;
    let actor = ctx.actor.clone();
    let out = {
        let entity = ctx.store.transition(&id, target, actor, args.reason)?;
        if json {
            serde_json::to_string_pretty(entity).unwrap_or_default()
        } else {
            render::render_transitioned(entity)
        }
    };

    if json {
        println!("{out}");
    } else {
        ctx.print(out);
    }
    Ok(())
}
