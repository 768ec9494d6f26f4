use eframe::egui::Color32;
use treemapper_core::render::{Figure, Renderer, MARGIN};
use treemapper_core::text::label_fits;
use treemapper_core::{Error, Rect, Result};

pub struct SceneTile {
    pub rect: Rect,
    pub label: String,
    pub fill: Color32,
    pub text: Color32,
    pub label_visible: bool,
    pub tooltip: String,
}

pub struct SceneGroup {
    pub rect: Rect,
    pub tooltip: String,
}

/// Retained shapes for the interactive canvas, collected through the
/// same renderer interface the SVG side uses. Coordinates stay in the
/// bottom-up figure system; the canvas flips them when painting.
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub tiles: Vec<SceneTile>,
    pub groups: Vec<SceneGroup>,
    messy: bool,
    depth: usize,
}

impl Scene {
    pub fn new(width: f32, height: f32, messy: bool) -> Scene {
        Scene {
            width,
            height,
            tiles: Vec::new(),
            groups: Vec::new(),
            messy,
            depth: 0,
        }
    }

    /// Tool tip for the figure under a point, tiles before enclosures
    /// and inner enclosures before outer ones.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&str> {
        if let Some(tile) = self.tiles.iter().find(|t| t.rect.contains(x, y)) {
            return Some(&tile.tooltip);
        }
        self.groups
            .iter()
            .rev()
            .find(|g| g.rect.contains(x, y))
            .map(|g| g.tooltip.as_str())
    }
}

impl Renderer for Scene {
    fn draw_tile(&mut self, figure: &Figure) -> Result<()> {
        let label_visible = !figure.label.is_empty()
            && (self.messy
                || label_fits(
                    &figure.label,
                    figure.rect.width() - 2.0 * MARGIN,
                    figure.rect.height() - 2.0 * MARGIN,
                ));
        self.tiles.push(SceneTile {
            rect: figure.rect,
            label: figure.label.clone(),
            fill: parse_color(&figure.fill_color),
            text: parse_color(&figure.label_color),
            label_visible,
            tooltip: figure.label.replace('\n', " – "),
        });
        Ok(())
    }

    fn begin_group(&mut self, figure: &Figure) -> Result<()> {
        self.groups.push(SceneGroup {
            rect: figure.rect,
            tooltip: figure.label.replace('\n', " – "),
        });
        self.depth += 1;
        Ok(())
    }

    fn end_group(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(Error::UnbalancedGroup);
        }
        self.depth -= 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.depth != 0 {
            return Err(Error::UnbalancedGroup);
        }
        Ok(())
    }
}

fn parse_color(css: &str) -> Color32 {
    match css.parse::<csscolorparser::Color>() {
        Ok(color) => {
            let [r, g, b, a] = color.to_rgba8();
            Color32::from_rgba_unmultiplied(r, g, b, a)
        }
        Err(_) => Color32::GRAY,
    }
}
