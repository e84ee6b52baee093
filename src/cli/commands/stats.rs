use super::super::{Ctx, render};
use crate::Result;

pub(crate) fn handle(ctx: &Ctx) -> Result<()> {
    let stats = ctx.store.stats();

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&stats).unwrap_or_default());
    } else {
        ctx.print(render::render_stats(&stats));
    }
    Ok(())
}
