use super::super::{Ctx, DeleteArgs, parse_id, render};
use crate::Result;

pub(crate) fn handle(ctx: &mut Ctx, args: DeleteArgs) -> Result<()> {
    let id = parse_id(&args.id)?;
    ctx.store.delete(&id)?;

    if ctx.json {
        println!("{}", serde_json::json!({ "deleted": id.as_str() }));
    } else {
        ctx.print(render::render_deleted(&id));
    }
    Ok(())
}
