use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{domain::StudentId, protocol::Student};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::editor::{EditorMode, Field, StudentEditor};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

/// Below this viewport width (logical points) the roster renders as cards.
const CARD_LAYOUT_MAX_WIDTH: f32 = 768.0;

const EMPTY_FIELD_PLACEHOLDER: &str = "-";
const EMPTY_ROSTER_MESSAGE: &str = "No students found. Add a new student to get started.";
const LOAD_FAILED_MESSAGE: &str = "Failed to load students. Please try again.";
const SAVE_FAILED_MESSAGE: &str = "Failed to save student. Please try again.";
const DELETE_FAILED_MESSAGE: &str = "Failed to delete student. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListLayout {
    Table,
    Cards,
}

fn list_layout_for_width(width: f32) -> ListLayout {
    if width < CARD_LAYOUT_MAX_WIDTH {
        ListLayout::Cards
    } else {
        ListLayout::Table
    }
}

/// Table cells for optional fields; name and email always render raw.
fn display_or_dash(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => EMPTY_FIELD_PLACEHOLDER,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

/// Row affordances are collected during rendering and applied afterwards,
/// so the list itself never mutates the collection mid-iteration.
enum RowAction {
    Edit(Student),
    Delete(StudentId),
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    students: Vec<Student>,
    loading: bool,

    status: String,
    status_banner: Option<StatusBanner>,

    editor: Option<StudentEditor>,
    pending_delete: Option<StudentId>,
}

impl DesktopGuiApp {
    pub fn bootstrap(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            students: Vec::new(),
            loading: true,
            status: "Loading students...".to_string(),
            status_banner: None,
            editor: None,
            pending_delete: None,
        };
        dispatch_backend_command(&app.cmd_tx, BackendCommand::LoadStudents, &mut app.status);
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::RosterLoaded(students) => {
                    self.loading = false;
                    self.students = students;
                    self.status = format!("{} students loaded", self.students.len());
                    self.status_banner = None;
                }
                UiEvent::StudentCreated(student) => {
                    // New records go to the end; order otherwise mirrors the
                    // service's list order.
                    self.students.push(student);
                    self.editor = None;
                    self.status = "Student added".to_string();
                    self.status_banner = None;
                }
                UiEvent::StudentUpdated(student) => {
                    if let Some(slot) = self.students.iter_mut().find(|s| s.id == student.id) {
                        *slot = student;
                    }
                    self.editor = None;
                    self.status = "Student updated".to_string();
                    self.status_banner = None;
                }
                UiEvent::StudentDeleted(student_id) => {
                    self.students.retain(|s| s.id != student_id);
                    self.status = "Student deleted".to_string();
                    self.status_banner = None;
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => self.handle_backend_error(err),
            }
        }
    }

    fn handle_backend_error(&mut self, err: UiError) {
        tracing::warn!(
            category = ?err.category(),
            context = ?err.context(),
            "backend operation failed: {}",
            err.message()
        );
        let banner_message = match err.context() {
            UiErrorContext::LoadRoster => {
                self.loading = false;
                LOAD_FAILED_MESSAGE.to_string()
            }
            UiErrorContext::SaveStudent => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.save_failed();
                }
                SAVE_FAILED_MESSAGE.to_string()
            }
            UiErrorContext::DeleteStudent => DELETE_FAILED_MESSAGE.to_string(),
            UiErrorContext::BackendStartup | UiErrorContext::General => err.message().to_string(),
        };
        self.status = banner_message.clone();
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: banner_message,
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("XYZ University");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("Students list");
                    ui.label("Home");
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });
    }

    fn show_students_section(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.heading("All students");
        ui.add_space(6.0);

        self.show_status_banner(ui);

        if ui.button("Add a new student").clicked() {
            self.editor = Some(StudentEditor::add());
        }
        ui.add_space(10.0);

        if self.loading {
            ui.weak("Loading students...");
            return;
        }

        if self.students.is_empty() {
            ui.weak(EMPTY_ROSTER_MESSAGE);
            return;
        }

        let layout = list_layout_for_width(ui.ctx().screen_rect().width());
        let action = match layout {
            ListLayout::Table => self.show_students_table(ui),
            ListLayout::Cards => self.show_students_cards(ui),
        };

        match action {
            Some(RowAction::Edit(record)) => {
                self.editor = Some(StudentEditor::edit(&record));
            }
            Some(RowAction::Delete(student_id)) => {
                self.pending_delete = Some(student_id);
            }
            None => {}
        }
    }

    fn show_students_table(&self, ui: &mut egui::Ui) -> Option<RowAction> {
        let mut action = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("students_table")
                .num_columns(7)
                .striped(true)
                .spacing([18.0, 8.0])
                .show(ui, |ui| {
                    for heading in ["Name", "Address", "City", "State", "Email", "Phone", "Actions"]
                    {
                        ui.label(egui::RichText::new(heading).strong());
                    }
                    ui.end_row();

                    for student in &self.students {
                        ui.label(&student.name);
                        ui.label(display_or_dash(student.address.as_deref()));
                        ui.label(display_or_dash(student.city.as_deref()));
                        ui.label(display_or_dash(student.state.as_deref()));
                        ui.label(&student.email);
                        ui.label(display_or_dash(student.phone.as_deref()));
                        ui.horizontal(|ui| {
                            if ui.small_button("edit").clicked() {
                                action = Some(RowAction::Edit(student.clone()));
                            }
                            if ui.small_button("delete").clicked() {
                                action = Some(RowAction::Delete(student.id));
                            }
                        });
                        ui.end_row();
                    }
                });
        });
        action
    }

    fn show_students_cards(&self, ui: &mut egui::Ui) -> Option<RowAction> {
        let mut action = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for student in &self.students {
                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(egui::RichText::new(&student.name).strong());

                        // Cards only carry rows that have a value.
                        let rows = [
                            ("Address", student.address.as_deref()),
                            ("City", student.city.as_deref()),
                            ("State", student.state.as_deref()),
                            ("Email", Some(student.email.as_str())),
                            ("Phone", student.phone.as_deref()),
                        ];
                        for (label, value) in rows {
                            if let Some(text) = value {
                                if !text.is_empty() {
                                    ui.horizontal(|ui| {
                                        ui.weak(label);
                                        ui.label(text);
                                    });
                                }
                            }
                        }

                        ui.add_space(4.0);
                        ui.horizontal(|ui| {
                            if ui.small_button("edit").clicked() {
                                action = Some(RowAction::Edit(student.clone()));
                            }
                            if ui.small_button("delete").clicked() {
                                action = Some(RowAction::Delete(student.id));
                            }
                        });
                    });
                ui.add_space(8.0);
            }
        });
        action
    }

    fn show_editor_window(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        let title = match editor.mode() {
            EditorMode::Add => "Add New Student",
            EditorMode::Edit(_) => "Edit Student",
        };

        let window_frame = egui::Frame::NONE
            .fill(ctx.style().visuals.window_fill)
            .stroke(egui::Stroke::new(
                1.0,
                ctx.style().visuals.window_stroke().color,
            ))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(16, 14));

        let mut close_requested = false;
        let mut submit_requested = false;

        egui::Window::new("student_editor")
            .title_bar(false)
            .frame(window_frame)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(title);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add_enabled(editor.can_close(), egui::Button::new("\u{2715}").small())
                            .clicked()
                        {
                            close_requested = true;
                        }
                    });
                });
                ui.separator();
                ui.add_space(4.0);

                for field in Field::ALL {
                    if editor_text_field(ui, editor, field) {
                        submit_requested = true;
                    }
                }

                ui.add_space(10.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let submit_label = if editor.is_submitting() {
                        "Saving..."
                    } else {
                        match editor.mode() {
                            EditorMode::Add => "Add Student",
                            EditorMode::Edit(_) => "Update Student",
                        }
                    };
                    if ui
                        .add_enabled(!editor.is_submitting(), egui::Button::new(submit_label))
                        .clicked()
                    {
                        submit_requested = true;
                    }
                    if ui
                        .add_enabled(editor.can_close(), egui::Button::new("Cancel"))
                        .clicked()
                    {
                        close_requested = true;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && editor.can_close() {
            close_requested = true;
        }

        if submit_requested {
            if let Some(payload) = editor.submit() {
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::SaveStudent {
                        target: editor.target(),
                        payload,
                    },
                    &mut self.status,
                );
            }
        }

        if close_requested {
            self.editor = None;
        }
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(student_id) = self.pending_delete else {
            return;
        };

        let window_frame = egui::Frame::NONE
            .fill(ctx.style().visuals.window_fill)
            .stroke(egui::Stroke::new(
                1.0,
                ctx.style().visuals.window_stroke().color,
            ))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(16, 14));

        let mut confirmed = false;
        let mut dismissed = false;

        egui::Window::new("delete_confirmation")
            .title_bar(false)
            .frame(window_frame)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete this student?");
                ui.add_space(10.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Delete").clicked() {
                        confirmed = true;
                    }
                    if ui.button("Cancel").clicked() {
                        dismissed = true;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            dismissed = true;
        }

        if confirmed {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::DeleteStudent { student_id },
                &mut self.status,
            );
            self.pending_delete = None;
        } else if dismissed {
            self.pending_delete = None;
        }
    }
}

/// Renders one labelled input with its error line. Returns true when the
/// user pressed Enter in this field (submit the form).
fn editor_text_field(ui: &mut egui::Ui, editor: &mut StudentEditor, field: Field) -> bool {
    let label = if field.required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    };
    ui.label(egui::RichText::new(label).strong());

    let mut buffer = editor.draft().field(field).to_string();
    let edit = egui::TextEdit::singleline(&mut buffer)
        .id_salt(field.label())
        .hint_text(field.hint())
        .desired_width(f32::INFINITY);
    let response = ui.add_sized([ui.available_width(), 30.0], edit);

    if field == Field::Name && editor.take_autofocus() {
        response.request_focus();
    }

    if response.changed() {
        editor.field_changed(field, buffer);
    }
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if response.lost_focus() {
        editor.field_blurred(field);
    }

    if let Some(message) = editor.error(field) {
        ui.label(
            egui::RichText::new(message)
                .color(ui.visuals().error_fg_color)
                .small(),
        );
    }
    ui.add_space(6.0);

    submitted
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_students_section(ui);
        });
        self.show_editor_window(ctx);
        self.show_delete_confirmation(ctx);

        // Keep draining backend events even when no input arrives.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
