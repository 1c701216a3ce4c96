pub mod sequencer;

pub use crate::domain::model::{Line, PinEvent, Progress, SequencePlan, SequenceReport};
pub use crate::domain::ports::{ConfigProvider, ProgressSink, Sleeper, TriggerPort};
pub use crate::utils::error::Result;
