use std::collections::HashMap;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::color::{ColorPair, ColorScheme};
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Gap between a drawn rectangle and its layout region, per side.
pub const MARGIN: f64 = 3.0;

/// Options a driver builds once and hands to every surface of a
/// render pass.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Seed colors, normally read from a CSV color table.
    pub color_table: IndexMap<String, ColorPair>,
    /// User style sheet embedded in the SVG verbatim; its presence
    /// suppresses generated per-key color rules.
    pub style_sheet: Option<String>,
    /// Draw labels even when they probably do not fit their tile.
    pub messy: bool,
    /// Where the SVG document is written on finish, if anywhere.
    pub output: Option<PathBuf>,
}

/// One resolved drawing instruction, identical for every surface.
#[derive(Debug, Clone)]
pub struct Figure {
    /// Normalized class name; `None` for anonymous tiles.
    pub key: Option<String>,
    pub rect: Rect,
    pub label: String,
    pub fill_color: String,
    pub label_color: String,
}

/// One render surface. The context drives every registered renderer
/// with the same figures, so surfaces cannot drift apart.
pub trait Renderer {
    fn draw_tile(&mut self, figure: &Figure) -> Result<()>;
    fn begin_group(&mut self, figure: &Figure) -> Result<()>;
    fn end_group(&mut self) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

/// Drives one render pass: normalizes keys, resolves colors, keeps
/// the stack of open groups, and fans identical figures out to every
/// registered renderer.
pub struct RenderContext<'a> {
    scheme: ColorScheme,
    stack: Vec<String>,
    seen_keys: HashMap<String, Vec<String>>,
    renderers: Vec<&'a mut dyn Renderer>,
}

impl<'a> RenderContext<'a> {
    pub fn new(options: &RenderOptions) -> RenderContext<'a> {
        RenderContext {
            scheme: ColorScheme::with_table(options.color_table.clone()),
            stack: Vec::new(),
            seen_keys: HashMap::new(),
            renderers: Vec::new(),
        }
    }

    pub fn add_renderer(&mut self, renderer: &'a mut dyn Renderer) {
        self.renderers.push(renderer);
    }

    pub fn draw_tile(&mut self, rect: Rect, key: Option<&str>, value: f64) -> Result<()> {
        let class = self.class_for(key);
        let colors = self.scheme.resolve(class.as_deref(), &self.stack);
        let label = match key {
            Some(key) => format!("{}\n{}", key, fmt_value(value)),
            None => fmt_value(value),
        };
        let figure = Figure {
            key: class,
            rect,
            label,
            fill_color: colors.fill,
            label_color: colors.text,
        };
        for renderer in &mut self.renderers {
            renderer.draw_tile(&figure)?;
        }
        Ok(())
    }

    pub fn begin_group(&mut self, rect: Rect, key: &str, value: f64) -> Result<()> {
        let class = self.class_for(Some(key));
        let colors = self.scheme.resolve(class.as_deref(), &self.stack);
        // Unnormalizable group keys still occupy a stack slot; the
        // empty string never matches a scheme entry
        self.stack.push(class.clone().unwrap_or_default());
        let figure = Figure {
            key: class,
            rect,
            label: format!("{}: {}", key, fmt_value(value)),
            fill_color: colors.fill,
            label_color: colors.text,
        };
        for renderer in &mut self.renderers {
            renderer.begin_group(&figure)?;
        }
        Ok(())
    }

    pub fn end_group(&mut self) -> Result<()> {
        if self.stack.pop().is_none() {
            return Err(Error::UnbalancedGroup);
        }
        for renderer in &mut self.renderers {
            renderer.end_group()?;
        }
        Ok(())
    }

    /// Close every renderer. Fails if any group is still open.
    pub fn finish(mut self) -> Result<()> {
        if !self.stack.is_empty() {
            return Err(Error::UnbalancedGroup);
        }
        for renderer in &mut self.renderers {
            renderer.finish()?;
        }
        Ok(())
    }

    /// Normalized class for a raw key, flagging keys that collapse
    /// onto a class some other key already claimed. Each colliding key
    /// is flagged once, not on every draw.
    fn class_for(&mut self, key: Option<&str>) -> Option<String> {
        let key = key?;
        let class = normalize_key(key)?;
        let originals = self.seen_keys.entry(class.clone()).or_default();
        if !originals.iter().any(|seen| seen == key) {
            if let Some(first) = originals.first() {
                tracing::warn!(%class, first, second = key, "distinct keys normalize to the same class");
            }
            originals.push(key.to_owned());
        }
        Some(class)
    }
}

/// Reduce a category name to an identifier usable as a CSS class and
/// scheme key: first line only, whitespace runs become underscores,
/// anything else non-alphanumeric is dropped, and a leading non-letter
/// gets a `C` prefix. Names that normalize to nothing yield `None`.
pub fn normalize_key(key: &str) -> Option<String> {
    let first_line = key.lines().next().unwrap_or("");
    let joined = first_line.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if cleaned.is_empty() {
        None
    } else if cleaned.chars().next().is_some_and(char::is_alphabetic) {
        Some(cleaned)
    } else {
        Some(format!("C{cleaned}"))
    }
}

/// Numbers print the way they read in the input: no trailing `.0` on
/// integral values.
pub fn fmt_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
