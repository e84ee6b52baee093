use super::super::{Ctx, UpdateArgs, parse_id, render};
use crate::core::CoreError;
use crate::{Error, Result};

pub(crate) fn handle(ctx: &mut Ctx, args: UpdateArgs) -> Result<()> {
    if args.name.is_none() && args.kind.is_none() {
        return Err(Error::Core(CoreError::Validation { field: "update" }));
    }
    let json = ctx.json;
    let id = parse_id(&args.id)?;
    let out = {
        let entity = ctx.store.update_metadata(&id, args.name, args.kind)?;
        if json {
            serde_json::to_string_pretty(entity).unwrap_or_default()
        } else {
            render::render_updated(entity)
        }
    };

    if json {
        println!("{out}");
    } else {
        ctx.print(out);
    }
    Ok(())
}
