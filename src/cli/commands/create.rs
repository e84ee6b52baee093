use super::super::{CreateArgs, Ctx, render};
use crate::Result;

pub(crate) fn handle(ctx: &mut Ctx, args: CreateArgs) -> Result<()> {
    let json = ctx.json;
    let actor = ctx.actor.clone();
    let out = {
        let entity = ctx
            .store
            .create(args.name, args.kind, args.content, actor)?;
        if json {
            serde_json::to_string_pretty(entity).unwrap_or_default()
        } else {
            render::render_created(entity)
        }
    };

    if json {
        println!("{out}");
    } else {
        ctx.print(out);
    }
    Ok(())
}
