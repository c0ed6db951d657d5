// Purpose - hand-off seams between the poll thread and rendering threads

pub mod message;

pub use message::{CueMessage, MessageReceiver};
