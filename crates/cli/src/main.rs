use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use treemapper_core::mapper::treemap;
use treemapper_core::scheme::{read_color_table, read_style_sheet};
use treemapper_core::svg::SvgDocument;
use treemapper_core::{Nest, Rect, RenderContext, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "treemapper-cli", about = "Proportional treemap SVG renderer")]
struct Args {
    /// Nested JSON input: numbers, arrays and objects
    input: PathBuf,
    /// Figure width in pixels
    width: u32,
    /// Figure height in pixels
    height: u32,
    /// Output SVG path
    #[arg(default_value = "treemap.svg")]
    svg: PathBuf,
    /// Style sheet embedded in place of the generated color rules
    #[arg(long)]
    css: Option<PathBuf>,
    /// CSV color table with name,fill,text rows
    #[arg(long)]
    colors: Option<PathBuf>,
    /// Draw every label, even where it cannot fit its tile
    #[arg(short, long)]
    messy: bool,
    /// Lay out siblings largest first instead of document order
    #[arg(long)]
    sort: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("could not read {}", args.input.display()))?;
    let nest = Nest::from_reader(std::io::BufReader::new(file))?;
    let nest = if args.sort { nest.ordered() } else { nest };

    let options = RenderOptions {
        color_table: match &args.colors {
            Some(path) => read_color_table(path)?,
            None => Default::default(),
        },
        style_sheet: match &args.css {
            Some(path) => read_style_sheet(path)?,
            None => None,
        },
        messy: args.messy,
        output: Some(args.svg.clone()),
    };

    let mut svg = SvgDocument::new(args.width, args.height, &options);
    let mut context = RenderContext::new(&options);
    context.add_renderer(&mut svg);
    let region = Rect::from_size(args.width as f64, args.height as f64);
    treemap(&nest, region, &mut context)?;
    context.finish()?;
    Ok(())
}
