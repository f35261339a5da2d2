use super::interaction::{EditorKey, InteractionState, KeyModifiers};
use super::model::{ConnectionCurve, FlowNode, NodeKind, Position};
use super::selection::Selection;
use super::state::FlowEditorState;
use crate::theme::{Theme, ThemePalette, blend_color};
use eframe::egui;
use eframe::epaint::Stroke;

mod canvas;
mod layout;
mod palette;
mod properties;

pub use layout::FlowBuilderUi;
