use std::path::{Path, PathBuf};

use anyhow::Context;
use treemapper_core::mapper::treemap;
use treemapper_core::svg::SvgDocument;
use treemapper_core::{Nest, Rect, RenderContext, RenderOptions};

use crate::scene::Scene;

pub struct AppState {
    pub input: Option<PathBuf>,
    pub nest: Option<Nest>,
    pub scene: Option<Scene>,
    pub svg_text: String,
    pub error: Option<String>,
    pub messy: bool,
    pub sorted: bool,
    pub width: u32,
    pub height: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            input: None,
            nest: None,
            scene: None,
            svg_text: String::new(),
            error: None,
            messy: false,
            sorted: false,
            width: 900,
            height: 600,
        }
    }

    /// Read the current input file and render it.
    pub fn load(&mut self) {
        let Some(path) = self.input.clone() else {
            return;
        };
        match read_nest(&path) {
            Ok(nest) => {
                self.nest = Some(nest);
                self.error = None;
                self.render();
            }
            Err(e) => {
                self.error = Some(format!("{e:#}"));
            }
        }
    }

    /// Lay the loaded tree out again with the current options, feeding
    /// the interactive scene and the SVG text side by side.
    pub fn render(&mut self) {
        let Some(nest) = &self.nest else {
            return;
        };
        let nest = if self.sorted { nest.ordered() } else { nest.clone() };

        let options = RenderOptions {
            messy: self.messy,
            ..Default::default()
        };
        let mut scene = Scene::new(self.width as f32, self.height as f32, self.messy);
        let mut svg = SvgDocument::new(self.width, self.height, &options);
        let mut context = RenderContext::new(&options);
        context.add_renderer(&mut scene);
        context.add_renderer(&mut svg);

        let region = Rect::from_size(self.width as f64, self.height as f64);
        match treemap(&nest, region, &mut context).and_then(|_| context.finish()) {
            Ok(()) => {
                self.svg_text = svg.content();
                self.scene = Some(scene);
                self.error = None;
            }
            Err(e) => {
                self.scene = None;
                self.svg_text.clear();
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn save_svg(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, &self.svg_text)
            .with_context(|| format!("could not write {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved SVG document");
        Ok(())
    }
}

fn read_nest(path: &Path) -> anyhow::Result<Nest> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    Ok(Nest::from_reader(std::io::BufReader::new(file))?)
}
