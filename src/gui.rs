use crate::config::EditorConfig;
use crate::convert::{FieldSelection, Script};
use crate::document::{Dialogs, DocumentController, UnsavedChoice};
use crate::entry::EntryId;
use crate::error::EditorError;
use crate::projection;
use crate::schema::{self, FieldKind, FieldSpec, FieldValue, Tab};
use crate::statics;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn run_gui(config: EditorConfig) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            install_cjk_fallback_font(&cc.egui_ctx);
            Ok(Box::new(WiEditApp::new(config)))
        }),
    )
}

/// rfd file pickers. The unsaved-changes answer is collected by the modal
/// window beforehand and handed back when the controller asks.
struct RfdDialogs {
    dir: Option<PathBuf>,
    answer: UnsavedChoice,
}

impl RfdDialogs {
    fn file_dialog(&self) -> rfd::FileDialog {
        let mut dlg = rfd::FileDialog::new().add_filter(statics::EN_FILTER_WORLD_INFO, &["json"]);
        if let Some(dir) = self.dir.clone() {
            dlg = dlg.set_directory(dir);
        }
        dlg
    }

    fn remember_dir(&mut self, path: &Path) {
        self.dir = path.parent().map(PathBuf::from);
    }
}

impl Dialogs for RfdDialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        let path = self.file_dialog().pick_file()?;
        self.remember_dir(&path);
        Some(path)
    }

    fn pick_save_path(&mut self, current: Option<&Path>) -> Option<PathBuf> {
        let mut dlg = self.file_dialog();
        if let Some(file_name) = current.and_then(Path::file_name) {
            dlg = dlg.set_file_name(file_name.to_string_lossy());
        }
        let path = dlg.save_file()?;
        self.remember_dir(&path);
        Some(path)
    }

    fn ask_unsaved(&mut self) -> UnsavedChoice {
        self.answer
    }
}

/// Actions that discard the current document and so go through the unsaved prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingAction {
    New,
    Open,
    Quit,
}

/// Window state around one DocumentController. Everything document-related
/// goes through the controller; this only keeps widget buffers.
struct WiEditApp {
    doc: DocumentController,
    dialog_dir: Option<PathBuf>,
    status: String,
    last_error: Option<String>,
    window_title: String,
    tab: Tab,
    search_input: String,
    scroll_list_to_selected: bool,

    // Unsaved-changes modal, open while Some.
    unsaved_for: Option<PendingAction>,
    quit_confirmed: bool,

    move_to_open: bool,
    move_to_input: String,
    move_to_request_focus: bool,

    // Duplicate-with-conversion window, open while Some.
    duplicate_target: Option<Script>,
    duplicate_selection: FieldSelection,

    find_input: String,
    replace_input: String,
    // Start and end of the last hit; replace works at the start, find resumes at the end.
    find_at: usize,
    find_from: usize,
}

impl WiEditApp {
    fn new(config: EditorConfig) -> Self {
        Self {
            doc: DocumentController::new(config),
            dialog_dir: None,
            status: String::new(),
            last_error: None,
            window_title: String::new(),
            tab: Tab::Basic,
            search_input: String::new(),
            scroll_list_to_selected: false,
            unsaved_for: None,
            quit_confirmed: false,
            move_to_open: false,
            move_to_input: String::new(),
            move_to_request_focus: false,
            duplicate_target: None,
            duplicate_selection: FieldSelection::ALL,
            find_input: String::new(),
            replace_input: String::new(),
            find_at: 0,
            find_from: 0,
        }
    }

    fn dialogs(&self, answer: UnsavedChoice) -> RfdDialogs {
        RfdDialogs {
            dir: self.dialog_dir.clone(),
            answer,
        }
    }

    fn report(&mut self, what: &str, e: EditorError) {
        self.last_error = Some(format!("{what}: {:#}", anyhow::Error::from(e)));
    }

    /// Run `action` now, or ask about unsaved changes first.
    fn request(&mut self, ctx: &egui::Context, action: PendingAction) {
        if self.doc.is_dirty() {
            self.unsaved_for = Some(action);
        } else {
            self.run(ctx, action, UnsavedChoice::Cancel);
        }
    }

    fn run(&mut self, ctx: &egui::Context, action: PendingAction, answer: UnsavedChoice) {
        let mut dialogs = self.dialogs(answer);
        match action {
            PendingAction::New => match self.doc.new_with(&mut dialogs) {
                Ok(true) => {
                    self.reset_view();
                    self.status = statics::EN_STATUS_NEW.to_string();
                }
                Ok(false) => {}
                Err(e) => self.report("Failed to save", e),
            },
            PendingAction::Open => match self.doc.open_with(&mut dialogs) {
                Ok(Some(report)) => {
                    self.reset_view();
                    self.status = format!(
                        "Loaded {} ({} entries)",
                        report.path.display(),
                        report.entries
                    );
                    if let Err(e) = report.backup {
                        self.report("Backup failed", e);
                    }
                }
                Ok(None) => {}
                Err(e) => self.report("Failed to load", e),
            },
            PendingAction::Quit => match self.doc.close(&mut dialogs) {
                Ok(true) => {
                    self.quit_confirmed = true;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                Ok(false) => {}
                Err(e) => self.report("Failed to save", e),
            },
        }
        self.dialog_dir = dialogs.dir;
    }

    fn reset_view(&mut self) {
        self.search_input.clear();
        self.doc.set_search("");
        self.last_error = None;
        self.find_at = 0;
        self.find_from = 0;
        self.move_to_open = false;
        self.duplicate_target = None;
    }

    fn save(&mut self) {
        let mut dialogs = self.dialogs(UnsavedChoice::Cancel);
        match self.doc.save(&mut dialogs) {
            Ok(true) => self.saved_status(),
            Ok(false) => {}
            Err(e) => self.report("Failed to save", e),
        }
        self.dialog_dir = dialogs.dir;
    }

    fn save_as(&mut self) {
        let mut dialogs = self.dialogs(UnsavedChoice::Cancel);
        match self.doc.save_as_with(&mut dialogs) {
            Ok(true) => self.saved_status(),
            Ok(false) => {}
            Err(e) => self.report("Failed to save", e),
        }
        self.dialog_dir = dialogs.dir;
    }

    fn saved_status(&mut self) {
        if let Some(path) = self.doc.path() {
            self.status = format!("Saved {}", path.display());
        }
        self.last_error = None;
    }

    fn select(&mut self, id: &EntryId) {
        if let Err(e) = self.doc.select(Some(id)) {
            self.report("Select failed", e);
        }
        self.find_at = 0;
        self.find_from = 0;
    }

    fn add_entry(&mut self) {
        match self.doc.create_entry() {
            Ok(id) => {
                self.status = format!("Added entry {id}");
                self.scroll_list_to_selected = true;
            }
            Err(e) => self.report("Add failed", e),
        }
    }

    fn delete_entry(&mut self) {
        let id = self.doc.selected().cloned();
        match self.doc.delete_selected() {
            Ok(()) => {
                if let Some(id) = id {
                    self.status = format!("Deleted entry {id}");
                }
            }
            Err(e) => self.report("Delete failed", e),
        }
    }

    fn move_by(&mut self, delta: isize) {
        match self.doc.move_selected_by(delta) {
            Ok(_) => self.scroll_list_to_selected = true,
            Err(e) => self.report("Move failed", e),
        }
    }

    fn duplicate(&mut self, target: Script) {
        match self.doc.duplicate_selected(self.duplicate_selection, target) {
            Ok(id) => {
                self.status = format!("Copied as entry {id}");
                self.scroll_list_to_selected = true;
            }
            Err(e) => self.report("Copy failed", e),
        }
    }

    fn find_next(&mut self) {
        match self.doc.find_in_content(&self.find_input, self.find_from) {
            Some(range) => {
                let content = self
                    .doc
                    .form()
                    .map(|f| f.text(statics::WI_CONTENT))
                    .unwrap_or_default();
                self.status = format!("Found at line {}", line_number(content, range.start));
                self.find_at = range.start;
                self.find_from = range.end;
            }
            None => {
                self.status = statics::EN_FIND_NOT_FOUND.to_string();
                self.find_at = 0;
                self.find_from = 0;
            }
        }
    }

    fn replace_next(&mut self) {
        match self
            .doc
            .replace_next_in_content(&self.find_input, &self.replace_input, self.find_at)
        {
            Ok(Some(done)) => {
                self.status = match &done.next {
                    Some(_) => "Replaced; next match selected".to_string(),
                    None => "Replaced; no more matches".to_string(),
                };
                let resume = done.next.unwrap_or(done.at);
                self.find_at = resume.start;
                self.find_from = resume.end;
            }
            Ok(None) => {
                self.status = statics::EN_FIND_NOT_FOUND.to_string();
                self.find_at = 0;
                self.find_from = 0;
            }
            Err(e) => self.report("Replace failed", e),
        }
    }

    fn replace_all(&mut self) {
        match self
            .doc
            .replace_all_in_content(&self.find_input, &self.replace_input)
        {
            Ok(n) => self.status = format!("Replaced {n} occurrence(s)"),
            Err(e) => self.report("Replace failed", e),
        }
        self.find_at = 0;
        self.find_from = 0;
    }

    fn convert_content(&mut self, target: Script) {
        if let Err(e) = self.doc.convert_current_content(target) {
            self.report("Conversion failed", e);
        }
    }

    fn render_entry_buttons(&mut self, ui: &mut egui::Ui) {
        let has_doc = self.doc.has_document();
        let has_sel = self.doc.selected().is_some();
        let searching = !self.doc.search().is_empty();
        let can_move = has_sel && !searching;

        ui.horizontal_wrapped(|ui| {
            if ui
                .add_enabled(has_doc, egui::Button::new(statics::EN_BTN_ADD))
                .clicked()
            {
                self.add_entry();
            }
            if ui
                .add_enabled(has_sel, egui::Button::new(statics::EN_BTN_DELETE))
                .clicked()
            {
                self.delete_entry();
            }

            for (label, delta) in [(statics::EN_BTN_UP, -1), (statics::EN_BTN_DOWN, 1)] {
                let mut resp = ui.add_enabled(can_move, egui::Button::new(label));
                if searching {
                    resp = resp.on_disabled_hover_text(statics::EN_REORDER_DISABLED);
                }
                if resp.clicked() {
                    self.move_by(delta);
                }
            }

            let mut resp = ui.add_enabled(can_move, egui::Button::new(statics::EN_BTN_MOVE_TO));
            if searching {
                resp = resp.on_disabled_hover_text(statics::EN_REORDER_DISABLED);
            }
            if resp.clicked() {
                self.move_to_open = true;
                self.move_to_input.clear();
                self.move_to_request_focus = true;
            }
        });

        ui.horizontal_wrapped(|ui| {
            for (label, script) in [
                (statics::EN_BTN_DUP_SIMPLIFIED, Script::Simplified),
                (statics::EN_BTN_DUP_TRADITIONAL, Script::Traditional),
            ] {
                if ui
                    .add_enabled(has_sel, egui::Button::new(label))
                    .clicked()
                {
                    self.duplicate_target = Some(script);
                    self.duplicate_selection = FieldSelection::ALL;
                }
            }
        });
    }

    fn render_entry_list(&mut self, ui: &mut egui::Ui) {
        ui.heading(statics::EN_HEADING_ENTRIES);
        ui.horizontal(|ui| {
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text(statics::EN_HINT_SEARCH)
                    .desired_width(ui.available_width() - 60.0),
            );
            if resp.changed() {
                self.doc.set_search(&self.search_input);
            }
            if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                self.search_input.clear();
                self.doc.set_search("");
            }
        });
        ui.separator();
        self.render_entry_buttons(ui);
        ui.separator();

        let rows = self.doc.projection();
        if rows.is_empty() {
            if !self.search_input.is_empty() {
                ui.label(statics::EN_SEARCH_NO_MATCHES);
            }
            return;
        }

        let selected = self.doc.selected().cloned();
        let mut clicked: Option<EntryId> = None;
        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;

        ui.push_id("entries_table", |ui| {
            let mut table = TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(44.0).resizable(false))
                .column(Column::remainder());
            if self.scroll_list_to_selected {
                if let Some(row) = rows.iter().position(|r| selected.as_ref() == Some(&r.id)) {
                    table = table.scroll_to_row(row, Some(egui::Align::Center));
                }
                self.scroll_list_to_selected = false;
            }
            table
                .header(row_h, |#[allow(unused_mut)] mut header| {
                    header.col(|ui| {
                        ui.strong(statics::EN_COL_POSITION);
                    });
                    header.col(|ui| {
                        ui.strong(statics::EN_COL_ENTRY);
                    });
                })
                .body(|body| {
                    body.rows(row_h, rows.len(), |#[allow(unused_mut)] mut row| {
                        let r = &rows[row.index()];
                        let is_selected = selected.as_ref() == Some(&r.id);
                        row.col(|ui| {
                            ui.label((r.store_index + 1).to_string());
                        });
                        row.col(|ui| {
                            if ui.selectable_label(is_selected, &r.label).clicked() {
                                clicked = Some(r.id.clone());
                            }
                        });
                    });
                });
        });

        if let Some(id) = clicked {
            self.select(&id);
        }
    }

    fn render_field(&mut self, ui: &mut egui::Ui, spec: &'static FieldSpec) {
        let Some(current) = self.doc.form().and_then(|f| f.get(spec.key)).cloned() else {
            return;
        };
        if let Some(value) = field_widget(ui, spec, current)
            && let Err(e) = self.doc.edit(spec.key, value)
        {
            self.report("Edit failed", e);
        }
    }

    fn render_find_replace(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.find_input)
                    .hint_text(statics::EN_HINT_FIND)
                    .desired_width(200.0),
            );
            if resp.changed() {
                self.find_at = 0;
                self.find_from = 0;
            }
            if ui.button(statics::EN_BTN_FIND_NEXT).clicked() {
                self.find_next();
            }
            ui.add(
                egui::TextEdit::singleline(&mut self.replace_input)
                    .hint_text(statics::EN_HINT_REPLACE)
                    .desired_width(200.0),
            );
            if ui.button(statics::EN_BTN_REPLACE).clicked() {
                self.replace_next();
            }
            if ui.button(statics::EN_BTN_REPLACE_ALL).clicked() {
                self.replace_all();
            }
        });
        ui.horizontal(|ui| {
            if ui.button(statics::EN_BTN_CONTENT_TO_SIMPLIFIED).clicked() {
                self.convert_content(Script::Simplified);
            }
            if ui.button(statics::EN_BTN_CONTENT_TO_TRADITIONAL).clicked() {
                self.convert_content(Script::Traditional);
            }
        });
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        let visible = self.doc.visible_fields();
        let tab = self.tab;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new(format!("form_{tab:?}"))
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for spec in schema::fields_on(tab) {
                            if !visible.contains(spec.key) {
                                continue;
                            }
                            ui.label(spec.label);
                            self.render_field(ui, spec);
                            ui.end_row();
                        }
                    });
                if tab == Tab::Basic {
                    ui.separator();
                    self.render_find_replace(ui);
                }
            });
    }
}

/// Draw the widget for one field. Returns the new value when the user changed it.
fn field_widget(ui: &mut egui::Ui, spec: &FieldSpec, current: FieldValue) -> Option<FieldValue> {
    match (spec.kind, current) {
        (FieldKind::Text { multiline: true }, FieldValue::Text(mut s)) => {
            let resp = ui.add(
                egui::TextEdit::multiline(&mut s)
                    .desired_rows(14)
                    .desired_width(f32::INFINITY),
            );
            resp.changed().then_some(FieldValue::Text(s))
        }
        (
            FieldKind::Text { .. } | FieldKind::StringList | FieldKind::NullableInteger,
            FieldValue::Text(mut s),
        ) => {
            let resp = ui.add(egui::TextEdit::singleline(&mut s).desired_width(f32::INFINITY));
            resp.changed().then_some(FieldValue::Text(s))
        }
        (FieldKind::Boolean { .. } | FieldKind::InvertedBoolean, FieldValue::Flag(mut b)) => {
            ui.checkbox(&mut b, "").changed().then_some(FieldValue::Flag(b))
        }
        (FieldKind::Integer { min, max, .. }, FieldValue::Number(mut n)) => ui
            .add(egui::DragValue::new(&mut n).range(min..=max).speed(1))
            .changed()
            .then_some(FieldValue::Number(n)),
        (
            kind @ (FieldKind::EnumIndex { .. } | FieldKind::TriState | FieldKind::StrategyComposite),
            FieldValue::Choice(mut i),
        ) => {
            let choices = kind.choices().unwrap_or_default();
            let before = i;
            egui::ComboBox::from_id_salt(spec.key)
                .selected_text(choices.get(i).copied().unwrap_or(statics::EN_EMPTY))
                .show_ui(ui, |ui| {
                    for (idx, label) in choices.iter().enumerate() {
                        ui.selectable_value(&mut i, idx, *label);
                    }
                });
            (i != before).then_some(FieldValue::Choice(i))
        }
        (FieldKind::MultiSelect { options }, FieldValue::Selection(selected)) => {
            let mut changed = None;
            ui.horizontal_wrapped(|ui| {
                for &(key, label) in options {
                    let mut on = selected.iter().any(|s| s == key);
                    if ui.checkbox(&mut on, label).changed() {
                        let next = options
                            .iter()
                            .filter(|(k, _)| {
                                if *k == key {
                                    on
                                } else {
                                    selected.iter().any(|s| s == *k)
                                }
                            })
                            .map(|(k, _)| k.to_string())
                            .collect();
                        changed = Some(FieldValue::Selection(next));
                    }
                }
            });
            changed
        }
        _ => None,
    }
}

/// 1-based line of a byte offset.
fn line_number(text: &str, byte: usize) -> usize {
    text.get(..byte).unwrap_or(text).matches('\n').count() + 1
}

fn window_title(doc: &DocumentController) -> String {
    if doc.has_document() {
        format!("{} - {}", doc.title(), statics::EN_APP_TITLE)
    } else {
        statics::EN_APP_TITLE.to_string()
    }
}

// --- CJK font fallback ------------------------------------------------------------------------
fn install_cjk_fallback_font(ctx: &egui::Context) {
    let Some(data) = candidate_font_paths()
        .into_iter()
        .find_map(|path| std::fs::read(path).ok())
    else {
        log::warn!("no CJK font found; Chinese text may not render");
        return;
    };
    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        statics::FONT_CJK_FALLBACK.into(),
        Arc::new(egui::FontData::from_owned(data)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(statics::FONT_CJK_FALLBACK.into());
    }
    ctx.set_fonts(fonts);
}

fn candidate_font_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(custom) = std::env::var_os(statics::FONT_ENV_VAR) {
        paths.push(PathBuf::from(custom));
    }
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts_dir = PathBuf::from(windir).join("Fonts");
        for candidate in ["msyh.ttc", "msjh.ttc", "simsun.ttc"] {
            paths.push(fonts_dir.join(candidate));
        }
    }
    for candidate in [
        "/System/Library/Fonts/PingFang.ttc",
        "/System/Library/Fonts/STHeiti Light.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    ] {
        paths.push(PathBuf::from(candidate));
    }
    paths
}

impl eframe::App for WiEditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut do_new = false;
        let mut do_open = false;
        let mut do_save = false;
        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::N) {
                do_new = true;
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::O) {
                do_open = true;
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::S) {
                do_save = true;
            }
        });
        if do_new {
            self.request(ctx, PendingAction::New);
        }
        if do_open {
            self.request(ctx, PendingAction::Open);
        }
        if do_save && self.doc.has_document() {
            self.save();
        }

        if ctx.input(|i| i.viewport().close_requested())
            && !self.quit_confirmed
            && self.doc.is_dirty()
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.unsaved_for = Some(PendingAction::Quit);
        }

        let title = window_title(&self.doc);
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_NEW).clicked() {
                    self.request(ctx, PendingAction::New);
                }
                if ui.button(statics::EN_BTN_OPEN).clicked() {
                    self.request(ctx, PendingAction::Open);
                }

                let has_doc = self.doc.has_document();
                if ui
                    .add_enabled(has_doc, egui::Button::new(statics::EN_BTN_SAVE))
                    .clicked()
                {
                    self.save();
                }
                if ui
                    .add_enabled(has_doc, egui::Button::new(statics::EN_BTN_SAVE_AS))
                    .clicked()
                {
                    self.save_as();
                }
                if ui.button(statics::EN_BTN_QUIT).clicked() {
                    self.request(ctx, PendingAction::Quit);
                }

                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        if let Some(action) = self.unsaved_for {
            let mut answer = None;
            egui::Window::new(statics::EN_WINDOW_UNSAVED)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(statics::EN_UNSAVED_PROMPT);
                    ui.horizontal(|ui| {
                        for (label, choice) in [
                            (statics::EN_BTN_SAVE_AND_CLOSE, UnsavedChoice::Save),
                            (statics::EN_BTN_SAVE_AS_AND_CLOSE, UnsavedChoice::SaveAs),
                            (statics::EN_BTN_DISCARD, UnsavedChoice::Discard),
                            (statics::EN_BTN_CANCEL, UnsavedChoice::Cancel),
                        ] {
                            if ui.button(label).clicked() {
                                answer = Some(choice);
                            }
                        }
                    });
                });
            if let Some(answer) = answer {
                self.unsaved_for = None;
                self.run(ctx, action, answer);
            }
        }

        if self.move_to_open {
            let mut open = self.move_to_open;
            let mut close_requested = false;
            egui::Window::new(statics::EN_WINDOW_MOVE_TO)
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(format!(
                        "{} (1-{})",
                        statics::EN_MOVE_TO_PROMPT,
                        self.doc.store().len()
                    ));
                    let resp = ui.add(egui::TextEdit::singleline(&mut self.move_to_input));
                    if self.move_to_request_focus {
                        resp.request_focus();
                        self.move_to_request_focus = false;
                    }
                    let pressed_enter =
                        resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    ui.horizontal(|ui| {
                        if ui.button(statics::EN_BTN_GO).clicked() || pressed_enter {
                            match self.move_to_input.trim().parse::<usize>() {
                                Ok(position) => match self.doc.move_selected_to(position) {
                                    Ok(()) => {
                                        close_requested = true;
                                        self.scroll_list_to_selected = true;
                                        self.last_error = None;
                                    }
                                    Err(e) => self.report("Move failed", e),
                                },
                                Err(_) => {
                                    self.last_error =
                                        Some(statics::EN_ERR_POSITION_INTEGER.to_string());
                                }
                            }
                        }
                        if ui.button(statics::EN_BTN_CANCEL).clicked() {
                            close_requested = true;
                        }
                    });
                });
            if close_requested {
                open = false;
            }
            self.move_to_open = open;
        }

        if let Some(target) = self.duplicate_target {
            let mut open = true;
            let mut confirmed = false;
            let mut cancelled = false;
            egui::Window::new(statics::EN_WINDOW_DUPLICATE)
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.checkbox(
                        &mut self.duplicate_selection.title,
                        statics::EN_LABEL_CONVERT_TITLE,
                    );
                    ui.checkbox(
                        &mut self.duplicate_selection.keys,
                        statics::EN_LABEL_CONVERT_KEYS,
                    );
                    ui.checkbox(
                        &mut self.duplicate_selection.content,
                        statics::EN_LABEL_CONVERT_CONTENT,
                    );
                    ui.horizontal(|ui| {
                        if ui.button(statics::EN_BTN_OK).clicked() {
                            confirmed = true;
                        }
                        if ui.button(statics::EN_BTN_CANCEL).clicked() {
                            cancelled = true;
                        }
                    });
                });
            if confirmed {
                self.duplicate(target);
            }
            if confirmed || cancelled || !open {
                self.duplicate_target = None;
            }
        }

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        if !self.doc.has_document() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading(statics::EN_HOME_HEADING);
                ui.label(statics::EN_HOME_INSTRUCTIONS);
            });
            return;
        }

        egui::TopBottomPanel::bottom("bottom_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let file_label = self
                    .doc
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| statics::EN_PLACEHOLDER_UNSAVED.to_string());
                ui.label(file_label);
                ui.separator();
                ui.label(format!(
                    "{} {}",
                    statics::EN_LABEL_ENTRIES_COUNT,
                    self.doc.store().len()
                ));
                if self.doc.is_dirty() {
                    ui.separator();
                    ui.colored_label(egui::Color32::YELLOW, statics::EN_BADGE_DIRTY);
                }
            });
        });

        egui::SidePanel::left("entries_panel")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                self.render_entry_list(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(id) = self.doc.selected().cloned() else {
                ui.label(statics::EN_SELECT_ENTRY);
                return;
            };

            ui.horizontal(|ui| {
                let heading = self
                    .doc
                    .entry(&id)
                    .map(|e| projection::display_label(&id, e))
                    .unwrap_or_default();
                ui.heading(heading);
                ui.separator();
                ui.label(format!("{} {id}", statics::EN_LABEL_UID));
            });
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Basic, statics::EN_TAB_BASIC);
                ui.selectable_value(&mut self.tab, Tab::Insertion, statics::EN_TAB_INSERTION);
                ui.selectable_value(&mut self.tab, Tab::Advanced, statics::EN_TAB_ADVANCED);
            });
            ui.separator();
            self.render_form(ui);
        });
    }
}
