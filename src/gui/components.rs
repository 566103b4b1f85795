use crate::models::DiskRecord;
use eframe::egui;
use egui_extras::{Column, TableBuilder};

pub const COLUMN_HEADERS: [&str; 5] = ["ID", "Model", "Type", "Partition", "Size"];

/// Renders one row per record under five fixed, user-resizable columns.
pub fn disk_table(ui: &mut egui::Ui, records: &[DiskRecord]) {
    let row_height = 20.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(50.0).at_least(30.0))
        .column(Column::initial(220.0).at_least(60.0))
        .column(Column::initial(120.0).at_least(60.0))
        .column(Column::initial(90.0).at_least(60.0))
        .column(Column::remainder().at_least(80.0))
        .header(row_height, |mut header| {
            for title in COLUMN_HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for disk in records {
                body.row(row_height, |mut row| {
                    for cell in [&disk.id, &disk.model, &disk.kind, &disk.partition, &disk.size] {
                        row.col(|ui| {
                            ui.label(cell.as_str());
                        });
                    }
                });
            }
        });
}

/// Centered error window with a single OK button.
/// Returns true once the user dismisses it.
pub fn error_dialog(ctx: &egui::Context, message: &str) -> bool {
    let mut dismissed = false;

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("⛔")
                        .size(22.0)
                        .color(egui::Color32::from_rgb(220, 50, 50)),
                );
                ui.label(message);
            });
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    dismissed
}
