use std::env;

use anyhow::{Context, Result};
use eframe::egui;

use crate::command::syntax_hint;
use crate::config::AppConfig;
use crate::dispatch::DispatchTable;
use crate::history::CommandHistory;
use crate::notice::{NoticeQueue, Severity};
use crate::session::Session;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(12, 12, 20);
const PATH_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 200, 100);
const ENTRY_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 220, 220);
const HINT_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 200, 255);
const OUTPUT_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 255, 150);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 100, 100);

pub struct ExplorerApp {
    session: Session,
    table: DispatchTable,
    notices: NoticeQueue,
    history: CommandHistory,
    input: String,
    hint: &'static str,
    font_size: f32,
}

impl ExplorerApp {
    pub fn new(config: &AppConfig) -> Result<Self> {
        if let Some(dir) = &config.start_dir {
            env::set_current_dir(dir)
                .with_context(|| format!("cannot start in {}", dir.display()))?;
        }
        let session = Session::new().context("cannot read the working directory")?;
        let table = DispatchTable::new()?;

        Ok(Self {
            session,
            table,
            notices: NoticeQueue::new(),
            history: CommandHistory::new(config.history_limit),
            input: String::new(),
            hint: "",
            font_size: config.font_size,
        })
    }

    /// Dark terminal palette with monospace text everywhere.
    pub fn apply_theme(ctx: &egui::Context, font_size: f32) {
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = BACKGROUND;
        visuals.panel_fill = BACKGROUND;
        visuals.extreme_bg_color = egui::Color32::from_rgb(20, 20, 32);
        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style
            .text_styles
            .insert(egui::TextStyle::Monospace, egui::FontId::monospace(font_size));
        style
            .text_styles
            .insert(egui::TextStyle::Body, egui::FontId::monospace(font_size));
        ctx.set_style(style);
    }

    fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.history.push(&line);
        self.table
            .process_command(&mut self.session, &line, &mut self.notices);
        self.hint = "";
    }

    fn text(&self, text: impl Into<String>, color: egui::Color32) -> egui::RichText {
        egui::RichText::new(text)
            .font(egui::FontId::monospace(self.font_size))
            .color(color)
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notices.current() else {
            return;
        };
        let color = match notice.severity {
            Severity::Error => ERROR_COLOR,
            _ => OUTPUT_COLOR,
        };
        let title = notice.title();
        let message = self.text(notice.message.clone(), color);

        let mut dismissed = ctx.input(|i| {
            i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)
        });
        egui::Window::new(title)
            .id(egui::Id::new("notice"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.notices.dismiss();
        }
    }

    fn listing_box(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_source("listing")
                .max_height(260.0)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for entry in self.session.listing() {
                        ui.label(self.text(entry.as_str(), ENTRY_COLOR));
                    }
                });
        });
    }

    fn command_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.input)
                    .font(egui::FontId::monospace(self.font_size))
                    .desired_width(ui.available_width() - 80.0)
                    .hint_text("Type a command, e.g. mkdir notes"),
            );

            if response.has_focus() {
                let (up, down) = ui.input(|i| {
                    (
                        i.key_pressed(egui::Key::ArrowUp),
                        i.key_pressed(egui::Key::ArrowDown),
                    )
                });
                let recalled = if up {
                    self.history.older()
                } else if down {
                    self.history.newer()
                } else {
                    None
                };
                if let Some(line) = recalled {
                    self.input = line.to_string();
                    self.hint = syntax_hint(&self.input);
                }
            }

            if response.changed() {
                self.hint = syntax_hint(&self.input);
            }

            let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Enter").clicked() || entered {
                self.submit();
                response.request_focus();
                ui.ctx().request_repaint();
            }
        });
    }

    fn output_box(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_source("output")
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in self.session.output() {
                        ui.label(self.text(line.as_str(), OUTPUT_COLOR));
                    }
                });
        });
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_notice(ctx);
        let blocking = self.notices.is_blocking();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(self.notices.status());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocking, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(self.text(self.session.path_label(), PATH_COLOR));
                });
                ui.add_space(4.0);
                self.listing_box(ui);
                ui.add_space(8.0);

                self.command_row(ui);
                ui.add_space(8.0);

                ui.label("Command Syntax:");
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(self.text(self.hint, HINT_COLOR));
                });
                ui.add_space(8.0);

                ui.label("Output:");
                self.output_box(ui);
            });
        });
    }
}
