//! The module that handles the user interface of the console.

use bevy::color::ColorToPacked;
use bevy::prelude::*;
use bevy_egui::*;

use crate::core::{ConsoleInputEvent, ConsoleMode, ConsoleModeEvent, DevConsole};

/// Keys and layout of the egui console window.
#[derive(Resource, Debug, Clone)]
pub struct ConsoleUiConfig {
    /// Key that opens and closes the console.
    pub open_key: KeyCode,
    /// Key that submits the input line.
    pub submit_key: KeyCode,
    /// Default window width.
    pub width: f32,
    /// Window title.
    pub title: String,
}

impl Default for ConsoleUiConfig {
    fn default() -> Self {
        Self {
            open_key: KeyCode::Backquote,
            submit_key: KeyCode::Enter,
            width: 900.0,
            title: "Developer Console".to_string(),
        }
    }
}

#[derive(Default, Resource)]
pub struct ConsoleUiState {
    /// Whether the console is open or not.
    pub(crate) open: bool,
    /// Whether we have set focus this open or not.
    pub(crate) text_focus: bool,
    /// The command in the text bar.
    pub(crate) command: String,
    /// Submitted lines, newest first.
    pub(crate) recall: Vec<String>,
    /// Current position in recall (0 = current input, 1+ = recall).
    pub(crate) recall_index: usize,
    /// Saved current input when navigating recall.
    pub(crate) draft: String,
}

impl ConsoleUiState {
    /// Whether the console is currently open or not
    pub fn open(&self) -> bool {
        self.open
    }

    /// Take the input line for submission and empty the input field.
    ///
    /// Blank lines are submitted like any other line but are not kept for
    /// recall.
    pub(crate) fn take_command(&mut self) -> String {
        let command = std::mem::take(&mut self.command);
        if !command.trim().is_empty() && self.recall.first() != Some(&command) {
            self.recall.insert(0, command.clone());
        }
        self.recall_index = 0;
        self.draft.clear();
        command
    }

    /// Step back to an older submitted line.
    pub(crate) fn recall_previous(&mut self) {
        if self.recall_index >= self.recall.len() {
            return;
        }
        if self.recall_index == 0 {
            self.draft = self.command.clone();
        }
        self.recall_index += 1;
        self.command = self.recall[self.recall_index - 1].clone();
    }

    /// Step forward to a newer submitted line, ending at the saved draft.
    pub(crate) fn recall_next(&mut self) {
        if self.recall_index == 0 {
            return;
        }
        self.recall_index -= 1;
        self.command = if self.recall_index == 0 {
            std::mem::take(&mut self.draft)
        } else {
            self.recall[self.recall_index - 1].clone()
        };
    }
}

fn egui_color(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_srgba().to_u8_array();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

pub(crate) fn open_close_ui(
    mut state: ResMut<ConsoleUiState>,
    key: Res<ButtonInput<KeyCode>>,
    config: Res<ConsoleUiConfig>,
) {
    if key.just_pressed(config.open_key) {
        state.open = !state.open;
        state.text_focus = false;
    }
}

pub(crate) fn render_ui_system(
    mut contexts: EguiContexts,
    mut state: ResMut<ConsoleUiState>,
    key: Res<ButtonInput<KeyCode>>,
    config: Res<ConsoleUiConfig>,
    console: Res<DevConsole>,
    mut input_events: MessageWriter<ConsoleInputEvent>,
    mut mode_events: MessageWriter<ConsoleModeEvent>,
) -> Result<(), BevyError> {
    let colors = console.colors();
    let frame = egui::Frame::window(&contexts.ctx_mut()?.style()).fill(egui_color(colors.background));

    egui::Window::new(config.title.as_str())
        .collapsible(false)
        .default_width(config.width)
        .frame(frame)
        .show(contexts.ctx_mut()?, |ui| {
            render_ui(
                ui,
                &mut state,
                &key,
                &config,
                &console,
                &mut input_events,
                &mut mode_events,
            )
        });
    Ok(())
}

/// The function that renders the UI of the developer console.
pub fn render_ui(
    ui: &mut egui::Ui,
    state: &mut ConsoleUiState,
    key: &ButtonInput<KeyCode>,
    config: &ConsoleUiConfig,
    console: &DevConsole,
    input_events: &mut MessageWriter<ConsoleInputEvent>,
    mode_events: &mut MessageWriter<ConsoleModeEvent>,
) {
    fn submit_command(state: &mut ConsoleUiState, input_events: &mut MessageWriter<ConsoleInputEvent>) {
        input_events.write(ConsoleInputEvent::new(state.take_command()));
    }

    if key.just_pressed(config.submit_key) {
        submit_command(state, input_events);
    }
    if key.just_pressed(KeyCode::ArrowUp) {
        state.recall_previous();
    }
    if key.just_pressed(KeyCode::ArrowDown) {
        state.recall_next();
    }

    let text_color = egui_color(console.colors().text);

    egui::TopBottomPanel::top("mode panel")
        .frame(egui::Frame::NONE.outer_margin(egui::Margin::symmetric(5, 2)))
        .show_inside(ui, |ui| {
            ui.horizontal(|ui| {
                let mode = console.mode();
                if ui.selectable_label(mode == ConsoleMode::Normal, "History").clicked() {
                    mode_events.write(ConsoleModeEvent::Set(ConsoleMode::Normal));
                }
                if ui.selectable_label(mode == ConsoleMode::Debug, "Debug").clicked() {
                    mode_events.write(ConsoleModeEvent::Set(ConsoleMode::Debug));
                }
            });
        });

    egui::TopBottomPanel::bottom("bottom panel")
        .frame(egui::Frame::NONE.outer_margin(egui::Margin {
            left: 5,
            right: 5,
            top: 11,
            bottom: 5,
        }))
        .show_inside(ui, |ui| {
            let text_edit_id = egui::Id::new("text_edit");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Submit").clicked() {
                    submit_command(state, input_events);
                    ui.ctx().memory_mut(|mem| mem.request_focus(text_edit_id));
                }

                egui::TextEdit::singleline(&mut state.command)
                    .id(text_edit_id)
                    .desired_width(ui.available_width())
                    .margin(egui::Vec2::splat(4.0))
                    .font(egui::TextStyle::Monospace)
                    .lock_focus(true)
                    .show(ui);

                if !state.text_focus {
                    state.text_focus = true;
                    ui.ctx().memory_mut(|mem| mem.request_focus(text_edit_id));
                }
            });
        });

    egui::ScrollArea::new([false, true])
        .auto_shrink([false, true])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(console.text())
                    .monospace()
                    .color(text_color),
            );
        });
}
