//! Debug-panel parameters for the cube scene
//!
//! The panel binds to a fixed set of fields rather than arbitrary properties,
//! plus one named action.

use bevy::prelude::*;

/// Position sliders cover [-POSITION_LIMIT, POSITION_LIMIT]
pub const POSITION_LIMIT: f32 = 3.0;
pub const POSITION_STEP: f32 = 0.1;

/// Colors the color row cycles through
pub const COLOR_PALETTE: [u32; 8] = [
    0xff0000, 0xff8800, 0xffff00, 0x00ff00, 0x00ffff, 0x0000ff, 0xff00ff, 0xffffff,
];

/// Bindable fields, in panel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    PositionY,
    PositionX,
    PositionZ,
    Visible,
    Wireframe,
    Color,
}

/// Named actions the panel can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamAction {
    Spin,
}

/// One panel row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRow {
    Field(ParamField),
    Action(ParamAction),
}

impl PanelRow {
    pub const ALL: [PanelRow; 7] = [
        PanelRow::Field(ParamField::PositionY),
        PanelRow::Field(ParamField::PositionX),
        PanelRow::Field(ParamField::PositionZ),
        PanelRow::Field(ParamField::Visible),
        PanelRow::Field(ParamField::Wireframe),
        PanelRow::Field(ParamField::Color),
        PanelRow::Action(ParamAction::Spin),
    ];

    pub fn label(self) -> &'static str {
        match self {
            PanelRow::Field(ParamField::PositionY) => "position.y",
            PanelRow::Field(ParamField::PositionX) => "position.x",
            PanelRow::Field(ParamField::PositionZ) => "position.z",
            PanelRow::Field(ParamField::Visible) => "visible",
            PanelRow::Field(ParamField::Wireframe) => "wireframe",
            PanelRow::Field(ParamField::Color) => "color",
            PanelRow::Action(ParamAction::Spin) => "spin",
        }
    }
}

/// Values bound to the mesh
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CubeParams {
    pub position: Vec3,
    pub visible: bool,
    pub wireframe: bool,
    /// 0xRRGGBB
    pub color: u32,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            visible: true,
            wireframe: true,
            color: 0xff0000,
        }
    }
}

impl CubeParams {
    /// Nudge a field one step in `direction` (negative or positive).
    ///
    /// Numbers move by [`POSITION_STEP`] and stay within range, booleans
    /// flip, the color walks the palette.
    pub fn step(&mut self, field: ParamField, direction: i32) {
        let direction = direction.signum();
        if direction == 0 {
            return;
        }
        match field {
            ParamField::PositionX => self.position.x = step_position(self.position.x, direction),
            ParamField::PositionY => self.position.y = step_position(self.position.y, direction),
            ParamField::PositionZ => self.position.z = step_position(self.position.z, direction),
            ParamField::Visible | ParamField::Wireframe => self.toggle(field),
            ParamField::Color => self.color = step_color(self.color, direction),
        }
    }

    /// Flip a boolean field. Other fields are left alone.
    pub fn toggle(&mut self, field: ParamField) {
        match field {
            ParamField::Visible => self.visible = !self.visible,
            ParamField::Wireframe => self.wireframe = !self.wireframe,
            _ => {}
        }
    }

    pub fn display_value(&self, field: ParamField) -> String {
        match field {
            ParamField::PositionX => format!("{:.1}", self.position.x),
            ParamField::PositionY => format!("{:.1}", self.position.y),
            ParamField::PositionZ => format!("{:.1}", self.position.z),
            ParamField::Visible => self.visible.to_string(),
            ParamField::Wireframe => self.wireframe.to_string(),
            ParamField::Color => format!("#{:06x}", self.color),
        }
    }

    pub fn bevy_color(&self) -> Color {
        hex_to_color(self.color)
    }
}

fn step_position(value: f32, direction: i32) -> f32 {
    let steps = (value / POSITION_STEP).round() + direction as f32;
    (steps * POSITION_STEP).clamp(-POSITION_LIMIT, POSITION_LIMIT)
}

fn step_color(color: u32, direction: i32) -> u32 {
    let len = COLOR_PALETTE.len() as i32;
    match COLOR_PALETTE.iter().position(|&entry| entry == color) {
        Some(index) => COLOR_PALETTE[(index as i32 + direction).rem_euclid(len) as usize],
        None => COLOR_PALETTE[0],
    }
}

pub fn hex_to_color(hex: u32) -> Color {
    Color::srgb_u8(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}
