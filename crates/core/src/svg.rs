use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::render::{Figure, RenderOptions, Renderer, MARGIN};
use crate::text::label_fits;

// The document is assembled from fixed parts, in this order: header,
// CSS prologue, collected style rules, CSS epilogue, collected body
// fragments, closing tag.
const CSS_PROLOGUE: &str = "\n<defs>\n<style>\n\
.tile { fill: white; stroke: grey; }\n\
.tile_label {\n\
  text-anchor: middle;\n\
  font-family: Helvetica, Arial, sans-serif;\n\
  font-size: 12pt;\n\
  white-space: pre-wrap;\n\
}\n\
.group_outline { stroke: grey; fill: white; stroke-width: 2; }\n\
.group_outline:hover { stroke: red; fill: red; stroke-width: 20; }\n";
const CSS_EPILOGUE: &str = "\n</style>\n</defs>\n";

/// Builds the SVG rendition of a treemap. Style rules and body
/// fragments accumulate in order as figures arrive; `content`
/// serializes the whole document and `finish` writes it out.
pub struct SvgDocument {
    header: String,
    css: Vec<String>,
    body: String,
    /// A user style sheet is present, so per-key color rules are not
    /// generated.
    styled: bool,
    messy: bool,
    seen: HashSet<String>,
    depth: usize,
    output: Option<PathBuf>,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32, options: &RenderOptions) -> SvgDocument {
        let mut css = Vec::new();
        if let Some(sheet) = &options.style_sheet {
            css.push(sheet.clone());
        }
        SvgDocument {
            header: format!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">"#
            ),
            css,
            body: String::new(),
            styled: options.style_sheet.is_some(),
            messy: options.messy,
            seen: HashSet::new(),
            depth: 0,
            output: options.output.clone(),
        }
    }

    /// The assembled document. Well-formed even with an empty body.
    pub fn content(&self) -> String {
        let mut doc = String::with_capacity(
            self.header.len() + CSS_PROLOGUE.len() + CSS_EPILOGUE.len() + self.body.len() + 64,
        );
        doc.push_str(&self.header);
        doc.push_str(CSS_PROLOGUE);
        doc.push_str(&self.css.join("\n"));
        doc.push_str(CSS_EPILOGUE);
        doc.push_str(&self.body);
        doc.push_str("\n</svg>\n");
        doc
    }

    /// Tool tip and, if it probably fits the tile interior, a visible
    /// centered label with embedded newlines as line breaks.
    fn draw_label(&mut self, figure: &Figure) {
        let rect = figure.rect;
        let center = rect.center();
        let label = xml_escape(&figure.label);

        // The tool tip is there in every case, even when it duplicates
        // the visible label
        let title = label.replace('\n', " – ");
        self.body.push_str(&format!("<title>{title}</title>"));

        let fits = label_fits(
            &figure.label,
            rect.width() - 2.0 * MARGIN,
            rect.height() - 2.0 * MARGIN,
        );
        if !self.messy && !fits {
            return;
        }
        let broken = label.replace(
            '\n',
            &format!("</tspan><tspan x=\"{:.1}\" dy=\"1.2em\">", center.x),
        );
        let (class, style) = match &figure.key {
            Some(key) => (format!("tile_label {key}"), String::new()),
            None if !self.styled => (
                "tile_label".to_owned(),
                format!(" style=\"fill: {};\"", figure.label_color),
            ),
            None => ("tile_label".to_owned(), String::new()),
        };
        self.body.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" class=\"{}\"{}><tspan>{}</tspan></text>",
            center.x, center.y, class, style, broken
        ));
    }
}

impl Renderer for SvgDocument {
    fn draw_tile(&mut self, figure: &Figure) -> Result<()> {
        let rect = figure.rect;
        let width = (rect.width() - 2.0 * MARGIN).max(1.0);
        let height = (rect.height() - 2.0 * MARGIN).max(1.0);
        let (open, rect_attrs) = match &figure.key {
            Some(key) => (
                format!("\n<g class=\"{key}\">"),
                format!("class=\"tile {key}\""),
            ),
            // Anonymous tiles have no class to hang a color rule on,
            // so the fill rides along inline
            None if !self.styled => (
                "\n<g>".to_owned(),
                format!("class=\"tile\" style=\"fill: {};\"", figure.fill_color),
            ),
            None => ("\n<g>".to_owned(), "class=\"tile\"".to_owned()),
        };
        self.body.push_str(&open);
        self.body.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"10\" {} />",
            rect.ll.x + MARGIN,
            rect.ll.y + MARGIN,
            width,
            height,
            rect_attrs
        ));
        if !figure.label.is_empty() {
            self.draw_label(figure);
        }
        if !self.styled {
            if let Some(key) = &figure.key {
                // One rule pair per distinct class, matching the colors
                // the interactive surface shows
                if self.seen.insert(key.clone()) {
                    self.css
                        .push(format!(".{} {{ fill: {}; }}", key, figure.fill_color));
                    self.css
                        .push(format!("text.{} {{ fill: {}; }}", key, figure.label_color));
                }
            }
        }
        self.body.push_str("</g>");
        Ok(())
    }

    fn begin_group(&mut self, figure: &Figure) -> Result<()> {
        let rect = figure.rect;
        let width = (rect.width() - 2.0 * MARGIN).max(1.0);
        let height = (rect.height() - 2.0 * MARGIN).max(1.0);
        let class = match &figure.key {
            Some(key) => format!("group {key}"),
            None => "group".to_owned(),
        };
        self.body.push_str(&format!(
            "\n<g class=\"{}\"><rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"5\" class=\"group_outline\" />",
            class,
            rect.ll.x + MARGIN,
            rect.ll.y + MARGIN,
            width,
            height
        ));
        if !figure.label.is_empty() {
            let title = xml_escape(&figure.label).replace('\n', " – ");
            self.body.push_str(&format!("<title>{title}</title>"));
        }
        self.depth += 1;
        Ok(())
    }

    fn end_group(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(Error::UnbalancedGroup);
        }
        self.depth -= 1;
        self.body.push_str("\n</g>");
        Ok(())
    }

    /// Serialize and, when an output path is configured, write the
    /// document.
    fn finish(&mut self) -> Result<()> {
        if self.depth != 0 {
            return Err(Error::UnbalancedGroup);
        }
        if let Some(path) = &self.output {
            std::fs::write(path, self.content()).map_err(|source| Error::WriteOutput {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "wrote SVG document");
        }
        Ok(())
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
