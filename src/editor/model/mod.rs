mod connection;
mod error;
mod graph;
mod node;
mod position;

pub use connection::{Connection, ConnectionCurve};
pub use error::EditorError;
pub use graph::{ConnectOutcome, FlowGraph};
pub use node::{FlowNode, NodeKind, PLACEHOLDER_LABEL};
pub use position::Position;
