pub mod history;
pub mod interaction;
pub mod model;
pub mod selection;
pub mod state;
pub mod validation;
pub mod view;
pub mod viewport;

pub use state::FlowEditorState;
pub use view::FlowBuilderUi;
