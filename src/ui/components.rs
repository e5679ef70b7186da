//! Reusable UI components
//!
//! Standalone renderers for the output area. Each takes already-resolved
//! display data, so nothing here looks at the live unit lists.

use crate::constants::MSG_BATCH_EMPTY;
use crate::theme;
use crate::types::{BatchResult, HealthStatus, SingleResult};
use crate::utils::format_number;
use eframe::egui;
use egui_extras::{Column, TableBuilder};

/// Headline value plus the full `a from = b to` line
pub fn result_card(ui: &mut egui::Ui, result: &SingleResult) {
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            egui::RichText::new(result.headline())
                .size(theme::FONT_RESULT)
                .strong()
                .color(theme::ACCENT),
        );
        ui.add_space(theme::SPACING_SM);
        ui.label(
            egui::RichText::new(result.detail())
                .size(theme::FONT_BODY)
                .color(theme::TEXT_MUTED),
        );
    });
}

pub fn batch_card(ui: &mut egui::Ui, batch: &BatchResult) {
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            egui::RichText::new(batch.header())
                .size(theme::FONT_BODY)
                .strong()
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(theme::SPACING_MD);

        if batch.rows.is_empty() {
            ui.label(egui::RichText::new(MSG_BATCH_EMPTY).color(theme::TEXT_DIM));
        } else {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::remainder().at_least(160.0))
                .column(Column::auto().at_least(120.0))
                .header(theme::TABLE_ROW_HEIGHT, |mut header| {
                    header.col(|ui| {
                        ui.label(egui::RichText::new("UNIT").size(theme::FONT_SMALL).color(theme::TEXT_DIM));
                    });
                    header.col(|ui| {
                        ui.label(egui::RichText::new("RESULT").size(theme::FONT_SMALL).color(theme::TEXT_DIM));
                    });
                })
                .body(|mut body| {
                    for row in &batch.rows {
                        body.row(theme::TABLE_ROW_HEIGHT, |mut table_row| {
                            table_row.col(|ui| {
                                ui.label(row.unit_name.as_str());
                            });
                            table_row.col(|ui| {
                                ui.label(egui::RichText::new(format_number(row.value)).strong());
                            });
                        });
                    }
                });
        }

        if let Some(warning) = batch.warning() {
            ui.add_space(theme::SPACING_MD);
            ui.horizontal_wrapped(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::WARNING).color(theme::STATUS_WARNING),
                );
                ui.label(egui::RichText::new(warning).color(theme::STATUS_WARNING));
            });
        }
    });
}

/// Single-line error banner
pub fn error_banner(ui: &mut egui::Ui, message: &str) {
    theme::error_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new(egui_phosphor::regular::WARNING_CIRCLE).color(theme::STATUS_ERROR));
            ui.label(egui::RichText::new(message).color(theme::STATUS_ERROR));
        });
    });
}

/// Colored dot + label for backend reachability
pub fn health_indicator(ui: &mut egui::Ui, status: HealthStatus, base_url: &str) {
    let (color, label) = match status {
        HealthStatus::Checking => (theme::TEXT_DIM, "checking"),
        HealthStatus::Online => (theme::STATUS_SUCCESS, "online"),
        HealthStatus::Offline => (theme::STATUS_ERROR, "offline"),
    };
    let size = theme::STATUS_DOT_RADIUS * 2.0;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), theme::STATUS_DOT_RADIUS, color);
    ui.label(
        egui::RichText::new(format!("{} ({})", base_url, label))
            .size(theme::FONT_SMALL)
            .color(theme::TEXT_DIM),
    );
}
