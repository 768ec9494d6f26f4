mod scene;
mod state;
mod ui;

use std::path::PathBuf;

use eframe::egui;
use state::AppState;
use tracing_subscriber::EnvFilter;

struct MyApp {
    state: AppState,
}

impl MyApp {
    fn new(_cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::draw(&mut self.state, ctx);
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional: input path and figure size from the command line
    let mut state = AppState::new();
    let mut args = std::env::args().skip(1);
    if let Some(input) = args.next() {
        state.input = Some(PathBuf::from(input));
        if let (Some(width), Some(height)) = (args.next(), args.next()) {
            if let (Ok(width), Ok(height)) = (width.parse(), height.parse()) {
                state.width = width;
                state.height = height;
            }
        }
        state.load();
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Treemapper",
        options,
        Box::new(move |cc| Ok(Box::new(MyApp::new(cc, state)))),
    )
}
