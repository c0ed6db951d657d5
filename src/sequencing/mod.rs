pub mod cue;
pub mod sheet;
pub mod tempo;

pub use cue::{Cue, CueTime};
pub use sheet::{CueSheet, CueSheetBuilder, CueSheetError};
pub use tempo::Tempo;
