use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rounding, Sense, Stroke, Ui, Vec2,
};
use treemapper_core::render::MARGIN;
use treemapper_core::Rect;

use crate::state::AppState;

pub fn draw(app: &mut AppState, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top").show(ctx, |ui| {
        top_bar(ui, app);
    });

    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        status_line(ui, app);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            canvas(ui, app);
        });
    });
}

fn top_bar(ui: &mut Ui, app: &mut AppState) {
    ui.horizontal(|ui| {
        if ui.button("Open…").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                app.input = Some(path);
                app.load();
            }
        }
        if ui.button("Re-render").clicked() {
            app.render();
        }
        let save = ui.add_enabled(
            !app.svg_text.is_empty(),
            egui::Button::new("Save SVG As…"),
        );
        if save.clicked() {
            let mut dialog = rfd::FileDialog::new().add_filter("SVG", &["svg"]);
            if let Some(name) = app
                .input
                .as_deref()
                .map(|p| p.with_extension("svg"))
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            {
                dialog = dialog.set_file_name(name);
            }
            if let Some(path) = dialog.save_file() {
                if let Err(e) = app.save_svg(&path) {
                    app.error = Some(format!("{e:#}"));
                }
            }
        }
        ui.separator();
        if ui.checkbox(&mut app.messy, "Messy labels").changed() {
            app.render();
        }
        if ui.checkbox(&mut app.sorted, "Largest first").changed() {
            app.render();
        }
        ui.separator();
        ui.label("Size:");
        let width = ui.add(egui::DragValue::new(&mut app.width).clamp_range(100..=4000));
        ui.label("by");
        let height = ui.add(egui::DragValue::new(&mut app.height).clamp_range(100..=4000));
        if width.changed() || height.changed() {
            app.render();
        }
    });
}

fn status_line(ui: &mut Ui, app: &AppState) {
    match (&app.error, &app.input) {
        (Some(error), _) => {
            ui.colored_label(Color32::RED, error);
        }
        (None, Some(path)) => {
            ui.label(path.display().to_string());
        }
        (None, None) => {
            ui.label("Open a JSON tree to start");
        }
    }
}

fn canvas(ui: &mut Ui, app: &AppState) {
    let Some(scene) = &app.scene else {
        ui.label("Nothing rendered yet");
        return;
    };
    let (response, painter) =
        ui.allocate_painter(Vec2::new(scene.width, scene.height), Sense::hover());
    let origin = response.rect.min;
    painter.rect_filled(response.rect, 0.0, Color32::WHITE);

    let height = scene.height;

    // Enclosure outlines first, tiles over them, as in the document
    for group in &scene.groups {
        painter.rect_stroke(
            to_screen(origin, height, &group.rect),
            Rounding::same(5.0),
            Stroke::new(2.0, Color32::GRAY),
        );
    }
    for tile in &scene.tiles {
        let rect = to_screen(origin, height, &tile.rect);
        painter.rect_filled(rect, Rounding::same(10.0), tile.fill);
        painter.rect_stroke(rect, Rounding::same(10.0), Stroke::new(1.0, Color32::GRAY));
        if tile.label_visible {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &tile.label,
                FontId::proportional(14.0),
                tile.text,
            );
        }
    }

    if let Some(pointer) = response.hover_pos() {
        let x = (pointer.x - origin.x) as f64;
        let y = (height - (pointer.y - origin.y)) as f64;
        if let Some(tip) = scene.hit_test(x, y) {
            response.clone().on_hover_text_at_pointer(tip.to_owned());
        }
    }
}

/// Figure coordinates grow upward, the screen grows downward. The
/// drawn size never drops below one pixel, matching the SVG surface.
fn to_screen(origin: Pos2, height: f32, rect: &Rect) -> egui::Rect {
    let w = (rect.width() - 2.0 * MARGIN).max(1.0);
    let h = (rect.height() - 2.0 * MARGIN).max(1.0);
    egui::Rect::from_min_size(
        Pos2::new(
            origin.x + (rect.ll.x + MARGIN) as f32,
            origin.y + height - (rect.ll.y + MARGIN + h) as f32,
        ),
        Vec2::new(w as f32, h as f32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use treemapper_core::geometry::Point;

    #[test]
    fn screen_rects_flip_y_and_inset_by_the_margin() {
        let rect = Rect::new(Point::new(10.0, 20.0), Point::new(110.0, 60.0));
        let screen = to_screen(Pos2::new(5.0, 7.0), 100.0, &rect);
        assert_eq!(screen.min, Pos2::new(18.0, 50.0));
        assert_eq!(screen.max, Pos2::new(112.0, 84.0));
    }

    #[test]
    fn hairline_tiles_keep_a_visible_screen_rect() {
        // Thinner than twice the margin on both axes
        let rect = Rect::new(Point::new(40.0, 30.0), Point::new(44.0, 35.0));
        let screen = to_screen(Pos2::ZERO, 100.0, &rect);
        assert_eq!(screen.size(), Vec2::new(1.0, 1.0));
        assert_eq!(screen.min, Pos2::new(43.0, 66.0));
    }
}
