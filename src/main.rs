#![windows_subsystem = "windows"]
//! metrix - desktop client for the unit conversion API

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod constants;
mod error;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;
mod validation;

use app::App;
use constants::*;
use eframe::egui;
use tracing::info;
use types::{Category, Display};
use ui::components::{batch_card, error_banner, health_indicator, result_card};
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "metrix.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,metrix=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "metrix starting");

    let settings = settings::Settings::load(&data_dir);
    info!(api = %settings.api_base_url, category = settings.last_category.as_str(), "Settings applied");

    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(560.0, 720.0)))
        .with_min_inner_size([480.0, 560.0])
        .with_title("metrix");

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir)?;
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

/// User intent collected while drawing, applied once the frame's UI is built
enum Action {
    SelectCategory(Category),
    Convert,
    BatchConvert,
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Initial unit load and health probe on first frame
        self.start(ctx);

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Apply results from background requests
        self.poll_outcomes();

        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(12, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    health_indicator(ui, self.controller.health, &self.api_base_url);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("v{}", APP_VERSION))
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        );
                    });
                });
            });

        let mut actions = Vec::new();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(theme::SPACING_XL))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(theme::FORM_WIDTH);
                        ui.add(egui::Label::new(
                            egui::RichText::new("METRIX")
                                .size(theme::FONT_TITLE)
                                .strong()
                                .color(theme::ACCENT),
                        ));
                        ui.label(
                            egui::RichText::new("UNIT CONVERTER")
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        );
                        ui.add_space(theme::SPACING_XL);

                        theme::section_frame().show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            self.render_form(ui, &mut actions);
                        });

                        ui.add_space(theme::SPACING_LG);
                        self.render_output(ui);
                    });
                });
            });

        for action in actions {
            match action {
                Action::SelectCategory(category) => self.change_category(category, ctx),
                Action::Convert => self.convert(ctx),
                Action::BatchConvert => self.convert_batch(ctx),
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}

// ============================================================================
// FORM & OUTPUT RENDERING
// ============================================================================

fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(theme::FONT_SMALL)
            .color(theme::TEXT_DIM),
    );
}

impl App {
    fn render_form(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let width = ui.available_width();
        let loading_units = self.controller.is_loading_units();

        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            // Category
            field_label(ui, "CATEGORY");
            let mut category = self.controller.category;
            egui::ComboBox::from_id_salt("category")
                .width(width)
                .selected_text(category.label())
                .show_ui(ui, |ui| {
                    for option in Category::ALL {
                        ui.selectable_value(&mut category, option, option.label());
                    }
                });
            if category != self.controller.category {
                actions.push(Action::SelectCategory(category));
            }
            ui.add_space(theme::SPACING_MD);

            // Value; Enter converts
            field_label(ui, "VALUE");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.controller.value_input)
                    .hint_text("Enter a value")
                    .font(egui::FontId::proportional(theme::FONT_BODY))
                    .desired_width(width),
            );
            if self.controller.focus_value {
                self.controller.focus_value = false;
                response.request_focus();
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                actions.push(Action::Convert);
            }
            ui.add_space(theme::SPACING_MD);

            // Units
            let units = &self.controller.units;
            let placeholder = if loading_units { LABEL_LOADING_UNITS } else { "-" };
            let from_idx = &mut self.controller.from_idx;
            let to_idx = &mut self.controller.to_idx;

            field_label(ui, "FROM");
            ui.add_enabled_ui(!loading_units, |ui| {
                egui::ComboBox::from_id_salt("from_unit")
                    .width(width)
                    .selected_text(from_idx.and_then(|i| units.get(i)).map_or(placeholder, |u| u.name.as_str()))
                    .show_ui(ui, |ui| {
                        for (i, unit) in units.iter().enumerate() {
                            ui.selectable_value(from_idx, Some(i), unit.name.as_str());
                        }
                    });
            });
            ui.add_space(theme::SPACING_SM);

            field_label(ui, "TO");
            ui.add_enabled_ui(!loading_units, |ui| {
                egui::ComboBox::from_id_salt("to_unit")
                    .width(width)
                    .selected_text(to_idx.and_then(|i| units.get(i)).map_or(placeholder, |u| u.name.as_str()))
                    .show_ui(ui, |ui| {
                        for (i, unit) in units.iter().enumerate() {
                            ui.selectable_value(to_idx, Some(i), unit.name.as_str());
                        }
                    });
            });
            ui.add_space(theme::SPACING_LG);

            // Buttons - each has its own busy state
            let converting = self.controller.is_converting();
            let batch_converting = self.controller.is_batch_converting();
            let button_width = (width - theme::SPACING_MD) / 2.0;

            ui.horizontal(|ui| {
                let label = if converting {
                    LABEL_CONVERTING
                } else if loading_units {
                    LABEL_LOADING_UNITS
                } else {
                    LABEL_CONVERT
                };
                let convert = ui.add_enabled(
                    !converting && !loading_units,
                    theme::button_accent(label)
                        .min_size(egui::vec2(button_width, theme::BUTTON_HEIGHT_LARGE)),
                );
                if convert.clicked() {
                    actions.push(Action::Convert);
                }

                let label = if batch_converting {
                    LABEL_CONVERTING
                } else {
                    LABEL_BATCH_CONVERT
                };
                let batch = ui.add_enabled(
                    !batch_converting && !loading_units,
                    theme::button(label).min_size(egui::vec2(button_width, theme::BUTTON_HEIGHT_LARGE)),
                );
                if batch.clicked() {
                    actions.push(Action::BatchConvert);
                }
            });
        });
    }

    fn render_output(&self, ui: &mut egui::Ui) {
        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| match &self.controller.display {
            Display::Idle => {}
            Display::Loading => {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new().color(theme::ACCENT));
                    ui.label(egui::RichText::new(LABEL_CONVERTING).color(theme::TEXT_MUTED));
                });
            }
            Display::Result(result) => result_card(ui, result),
            Display::BatchResult(batch) => batch_card(ui, batch),
            Display::Error(message) => error_banner(ui, message),
        });
    }
}
