//! Chat window: conversation sidebar, message list, input row

use crate::backend::{ChatBackend, HttpBackend, Unconfigured};
use crate::error::Result;
use crate::model::{ChatSession, Role};
use crate::worker::RequestWorker;
use egui::{vec2, Align, Color32, Key, Layout, RichText, Rounding, ScrollArea, Stroke, Ui};
use samcore::config::ChatConfig;
use samcore::safety::truncate_chars;
use samcore::theme::AquaColors;
use std::sync::Arc;

const SIDEBAR_WIDTH: f32 = 180.0;
const SIDEBAR_COLLAPSED: f32 = 36.0;
const SIDEBAR_BG: Color32 = Color32::from_rgb(232, 232, 232);
const LINK: Color32 = Color32::from_rgb(0, 80, 205);
/// Sidebar entries show this many characters of the title.
const SIDEBAR_TITLE_CHARS: usize = 18;

pub struct ChatApp {
    session: ChatSession,
    worker: RequestWorker,
    input: String,
    sidebar_collapsed: bool,
    /// Shown under the conversation list after a refused delete.
    notice: Option<String>,
}

impl ChatApp {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            session: ChatSession::new(),
            worker: RequestWorker::new(backend),
            input: String::new(),
            sidebar_collapsed: false,
            notice: None,
        }
    }

    /// HTTP-backed chat; falls back to an always-failing backend when the
    /// client cannot be built.
    pub fn from_config(config: ChatConfig) -> Self {
        match HttpBackend::new(config) {
            Ok(backend) => Self::new(Arc::new(backend)),
            Err(e) => {
                log::warn!("chat backend unavailable: {}", e);
                Self::new(Arc::new(Unconfigured))
            }
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn is_waiting(&self) -> bool {
        self.session.is_waiting()
    }

    /// Deliver finished requests. Call every frame.
    pub fn poll(&mut self) {
        for (conversation, reply) in self.worker.poll() {
            self.session.receive(conversation, reply);
        }
    }

    fn send(&mut self, ctx: &egui::Context) {
        if let Some(request) = self.session.send(&self.input) {
            self.input.clear();
            let conversation = request.conversation;
            let ctx = ctx.clone();
            let submitted = self.worker.submit(request, move || ctx.request_repaint());
            self.submitted(conversation, submitted);
        }
    }

    /// A request that never started still gets its fallback reply.
    fn submitted(&mut self, conversation: u64, result: Result<()>) {
        if let Err(e) = result {
            self.session.receive(conversation, Err(e));
        }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        let width = if self.sidebar_collapsed { SIDEBAR_COLLAPSED } else { SIDEBAR_WIDTH };
        egui::SidePanel::left("chat_sidebar")
            .resizable(false)
            .exact_width(width)
            .frame(egui::Frame::none().fill(SIDEBAR_BG).stroke(Stroke::new(1.0, AquaColors::BORDER)))
            .show_inside(ui, |ui| self.sidebar(ui));

        egui::TopBottomPanel::top("chat_header")
            .exact_height(32.0)
            .frame(egui::Frame::none().fill(AquaColors::TOOLBAR).inner_margin(egui::Margin::symmetric(10.0, 0.0)))
            .show_inside(ui, |ui| self.header(ui));

        egui::TopBottomPanel::bottom("chat_input")
            .frame(egui::Frame::none().fill(AquaColors::WHITE).inner_margin(egui::Margin::same(8.0)))
            .show_inside(ui, |ui| self.input_row(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(AquaColors::WHITE).inner_margin(egui::Margin::same(12.0)))
            .show_inside(ui, |ui| self.messages(ui));
    }

    fn sidebar(&mut self, ui: &mut Ui) {
        ui.with_layout(Layout::bottom_up(Align::Center), |ui| {
            let chevron = if self.sidebar_collapsed { "›" } else { "‹" };
            if ui.add(egui::Button::new(chevron).frame(false)).clicked() {
                self.sidebar_collapsed = !self.sidebar_collapsed;
            }
            ui.separator();
            if self.sidebar_collapsed {
                return;
            }
            ui.with_layout(Layout::top_down(Align::Min), |ui| {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.label(RichText::new("ChatGPT").strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("+").on_hover_text("New Chat").clicked() {
                            self.session.new_conversation();
                            self.notice = None;
                        }
                    });
                });
                ui.separator();

                let mut select = None;
                let mut delete = None;
                ScrollArea::vertical().id_source("chat_conversations").show(ui, |ui| {
                    for conv in self.session.conversations() {
                        let current = conv.id == self.session.current_id();
                        ui.horizontal(|ui| {
                            let text = RichText::new(truncate_chars(&conv.title, SIDEBAR_TITLE_CHARS)).size(11.0);
                            let text = if current { text.color(AquaColors::WHITE) } else { text };
                            let button = egui::Button::new(text)
                                .fill(if current { AquaColors::SELECTION } else { Color32::TRANSPARENT })
                                .min_size(vec2(ui.available_width() - 24.0, 22.0));
                            if ui.add(button).clicked() {
                                select = Some(conv.id);
                            }
                            if ui.small_button("✕").on_hover_text("Delete conversation").clicked() {
                                delete = Some(conv.id);
                            }
                        });
                    }
                });

                if let Some(id) = select {
                    if let Err(e) = self.session.select(id) {
                        log::warn!("{}", e);
                    }
                }
                if let Some(id) = delete {
                    self.notice = match self.session.delete_conversation(id) {
                        Ok(()) => None,
                        Err(e) => Some(capitalize(&e.to_string())),
                    };
                }
                if let Some(notice) = &self.notice {
                    ui.label(RichText::new(notice).size(10.0).color(AquaColors::CLOSE_EDGE));
                }
            });
        });
    }

    fn header(&mut self, ui: &mut Ui) {
        ui.horizontal_centered(|ui| {
            ui.label(RichText::new("ChatGPT").strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if self.session.current().messages.len() > 1
                    && ui.add(egui::Button::new(RichText::new("Clear All").color(LINK).size(11.0)).frame(false)).clicked()
                {
                    self.session.clear();
                }
            });
        });
    }

    fn messages(&mut self, ui: &mut Ui) {
        let mut delete = None;
        ScrollArea::vertical()
            .id_source("chat_messages")
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (index, message) in self.session.current().messages.iter().enumerate() {
                    let user = message.role == Role::User;
                    let layout = if user { Layout::right_to_left(Align::Min) } else { Layout::left_to_right(Align::Min) };
                    ui.with_layout(layout, |ui| {
                        let (fill, color) = if user {
                            (AquaColors::SELECTION, AquaColors::WHITE)
                        } else {
                            (Color32::from_rgb(240, 240, 240), AquaColors::TEXT)
                        };
                        let max = ui.available_width() * 0.75;
                        egui::Frame::none()
                            .fill(fill)
                            .rounding(Rounding::same(10.0))
                            .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                            .show(ui, |ui| {
                                ui.set_max_width(max);
                                ui.add(egui::Label::new(RichText::new(&message.content).color(color)).wrap(true));
                            });
                        if ui.small_button("✕").on_hover_text("Delete message").clicked() {
                            delete = Some(index);
                        }
                    });
                    ui.add_space(6.0);
                }
                if self.session.is_waiting() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(RichText::new("Thinking...").color(AquaColors::TEXT_MUTED));
                    });
                }
            });
        if let Some(index) = delete {
            self.session.delete_message(index);
        }
    }

    fn input_row(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let waiting = self.session.is_waiting();
            let send_width = 60.0;
            let edit = egui::TextEdit::singleline(&mut self.input)
                .hint_text("Type a message...")
                .desired_width(ui.available_width() - send_width - 8.0);
            let response = ui.add(edit);
            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter) && !i.modifiers.shift);
            let can_send = !waiting && !self.input.trim().is_empty();
            let clicked = ui
                .add_enabled(can_send, egui::Button::new("Send").min_size(vec2(send_width, 0.0)))
                .clicked();
            if enter || clicked {
                self.send(ui.ctx());
                response.request_focus();
            }
        });
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("cannot delete the last conversation"), "Cannot delete the last conversation");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_unconfigured_app_starts() {
        let app = ChatApp::new(Arc::new(Unconfigured));
        assert!(!app.is_waiting());
        assert_eq!(app.session().conversations().len(), 1);
    }

    #[test]
    fn test_failed_submit_reenables_sending() {
        let mut app = ChatApp::new(Arc::new(Unconfigured));
        let request = app.session.send("hello").unwrap();
        assert!(app.is_waiting());
        let err = std::io::Error::new(std::io::ErrorKind::Other, "no threads left");
        app.submitted(request.conversation, Err(err.into()));
        assert!(!app.is_waiting());
        let last = app.session().current().messages.last().unwrap();
        assert_eq!(last.content, crate::model::ERROR_REPLY);
    }
}
