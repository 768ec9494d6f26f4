use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::{layout, Placement};
use crate::model::Nest;
use crate::render::RenderContext;

/// Lay `nest` out in `region` and replay the placements through the
/// render context. Callers finish the context afterwards.
pub fn treemap(nest: &Nest, region: Rect, ctx: &mut RenderContext<'_>) -> Result<()> {
    for event in layout(nest, region)? {
        match event {
            Placement::Tile { key, value, rect } => ctx.draw_tile(rect, key.as_deref(), value)?,
            Placement::Enter { key, value, rect } => ctx.begin_group(rect, &key, value)?,
            Placement::Exit => ctx.end_group()?,
        }
    }
    Ok(())
}
