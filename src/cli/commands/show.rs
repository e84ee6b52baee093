use super::super::{Ctx, ShowArgs, parse_id, render};
use crate::core::CoreError;
use crate::{Error, Result};

pub(crate) fn handle(ctx: &Ctx, args: ShowArgs) -> Result<()> {
    let id = parse_id(&args.id)?;
    let entity = ctx
        .store
        .get(&id)
        .ok_or_else(|| Error::Core(CoreError::not_found(id.as_str())))?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(entity).unwrap_or_default());
    } else {
        ctx.print(render::render_entity(entity));
    }
    Ok(())
}
