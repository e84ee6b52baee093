use super::super::{Ctx, ListArgs, parse_state, render};
use crate::Result;
use crate::core::Entity;

pub(crate) fn handle(ctx: &Ctx, args: ListArgs) -> Result<()> {
    let state = args.state.as_deref().map(parse_state).transpose()?;

    let mut entities: Vec<&Entity> = ctx
        .store
        .list()
        .iter()
        .filter(|e| state.is_none_or(|s| e.current_state == s))
        .filter(|e| {
            args.kind
                .as_deref()
                .is_none_or(|k| e.kind.eq_ignore_ascii_case(k))
        })
        .collect();
    entities.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    if ctx.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entities).unwrap_or_default()
        );
    } else {
        ctx.print(render::render_list(&entities));
    }
    Ok(())
}
