use super::super::{Ctx, ReviseArgs, parse_id, render};
use crate::Result;

pub(crate) fn handle(ctx: &mut Ctx, args: ReviseArgs) -> Result<()> {
    let json = ctx.json;
    let id = parse_id(&args.id)?;
    let actor = ctx.actor.clone();
    let out = {
        let entity = ctx.store.revise(&id, args.content, actor)?;
        if json {
            serde_json::to_string_pretty(entity).unwrap_or_default()
        } else {
            render::render_revised(entity)
        }
    };

    if json {
        println!("{out}");
    } else {
        ctx.print(out);
    }
    Ok(())
}
