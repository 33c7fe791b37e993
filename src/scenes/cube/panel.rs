//! Keyboard-driven debug panel
//!
//! Renders [`CubeParams`] as a list of rows in the top-right corner.
//! Up/Down move focus, Left/Right step the focused value, Space or Enter
//! toggles a boolean or runs an action.

use super::params::{CubeParams, PanelRow, ParamAction};
use super::spin::SpinRequested;
use bevy::prelude::*;

const PANEL_MARGIN: f32 = 12.0;
const PANEL_PADDING: f32 = 10.0;
const PANEL_FONT_SIZE: f32 = 14.0;
const PANEL_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.1, 0.85);
const PANEL_TEXT: Color = Color::srgb(0.92, 0.92, 0.92);

/// Focus state of the panel
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct DebugPanel {
    pub focus: usize,
}

/// Marker for the panel's text node
#[derive(Component, Debug, Default)]
pub struct DebugPanelText;

impl DebugPanel {
    pub fn focused_row(&self) -> PanelRow {
        PanelRow::ALL[self.focus % PanelRow::ALL.len()]
    }

    pub fn move_focus(&mut self, delta: i32) {
        let len = PanelRow::ALL.len() as i32;
        self.focus = (self.focus as i32 + delta).rem_euclid(len) as usize;
    }

    /// Apply one key press. Returns the action to run, if any.
    pub fn handle_key(&mut self, key: KeyCode, params: &mut CubeParams) -> Option<ParamAction> {
        match (key, self.focused_row()) {
            (KeyCode::ArrowUp, _) => self.move_focus(-1),
            (KeyCode::ArrowDown, _) => self.move_focus(1),
            (KeyCode::ArrowLeft, PanelRow::Field(field)) => params.step(field, -1),
            (KeyCode::ArrowRight, PanelRow::Field(field)) => params.step(field, 1),
            (KeyCode::Space | KeyCode::Enter, PanelRow::Field(field)) => params.toggle(field),
            (KeyCode::Space | KeyCode::Enter, PanelRow::Action(action)) => return Some(action),
            _ => {}
        }
        None
    }

    pub fn render(&self, params: &CubeParams) -> String {
        let focused = self.focused_row();
        let mut lines = Vec::with_capacity(PanelRow::ALL.len() + 2);
        lines.push("position".to_string());
        for row in PanelRow::ALL {
            let cursor = if row == focused { ">" } else { " " };
            let line = match row {
                PanelRow::Field(field) => {
                    format!("{cursor} {:<12}{}", row.label(), params.display_value(field))
                }
                PanelRow::Action(_) => format!("{cursor} [{}]", row.label()),
            };
            lines.push(line);
        }
        lines.push(String::new());
        lines.push("up/down select, left/right adjust, space apply".to_string());
        lines.join("\n")
    }
}

pub fn spawn_debug_panel(mut commands: Commands) {
    commands
        .spawn((
            Name::new("Debug Panel"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(PANEL_MARGIN),
                right: Val::Px(PANEL_MARGIN),
                padding: UiRect::all(Val::Px(PANEL_PADDING)),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new(""),
                TextFont {
                    font_size: PANEL_FONT_SIZE,
                    ..default()
                },
                TextColor(PANEL_TEXT),
                DebugPanelText,
            ));
        });
}

pub fn handle_panel_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut panel: ResMut<DebugPanel>,
    mut params: ResMut<CubeParams>,
    mut spin_requests: EventWriter<SpinRequested>,
) {
    for &key in keys.get_just_pressed() {
        // Work on a copy so untouched params don't trip change detection
        let mut edited = params.clone();
        let action = panel.handle_key(key, &mut edited);
        if edited != *params {
            *params = edited;
        }
        if let Some(ParamAction::Spin) = action {
            debug!("Spin requested from debug panel");
            spin_requests.write(SpinRequested);
        }
    }
}

pub fn refresh_panel_text(
    panel: Res<DebugPanel>,
    params: Res<CubeParams>,
    mut texts: Query<&mut Text, With<DebugPanelText>>,
) {
    if !panel.is_changed() && !params.is_changed() {
        return;
    }
    let rendered = panel.render(&params);
    for mut text in &mut texts {
        text.0.clone_from(&rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::cube::params::ParamField;

    #[test]
    fn test_focus_wraps() {
        let mut panel = DebugPanel::default();
        panel.move_focus(-1);
        assert_eq!(panel.focused_row(), PanelRow::Action(ParamAction::Spin));
        panel.move_focus(1);
        assert_eq!(panel.focused_row(), PanelRow::Field(ParamField::PositionY));
    }

    #[test]
    fn test_keys_edit_focused_field() {
        let mut panel = DebugPanel::default();
        let mut params = CubeParams::default();

        assert_eq!(panel.handle_key(KeyCode::ArrowRight, &mut params), None);
        assert!((params.position.y - 0.1).abs() < 1e-6);

        panel.handle_key(KeyCode::ArrowDown, &mut params);
        panel.handle_key(KeyCode::ArrowLeft, &mut params);
        assert!((params.position.x + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_space_toggles_and_runs_actions() {
        let mut panel = DebugPanel::default();
        let mut params = CubeParams::default();

        panel.focus = 4;
        assert_eq!(panel.focused_row(), PanelRow::Field(ParamField::Wireframe));
        panel.handle_key(KeyCode::Space, &mut params);
        assert!(!params.wireframe);

        panel.focus = 6;
        assert_eq!(
            panel.handle_key(KeyCode::Enter, &mut params),
            Some(ParamAction::Spin)
        );
    }

    #[test]
    fn test_render_marks_focus() {
        let panel = DebugPanel { focus: 5 };
        let text = panel.render(&CubeParams::default());
        assert!(text.contains("> color"));
        assert!(text.contains("#ff0000"));
        assert!(text.contains("  [spin]"));
    }
}
