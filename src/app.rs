mod events;
mod state;
mod ui;
mod widgets;

pub use state::FlowBuilderApp;
