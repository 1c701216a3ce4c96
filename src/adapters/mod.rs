// Adapters layer: concrete implementations of the domain ports (GPIO lines, sleeping, progress files).

pub mod clock;
pub mod gpio;
pub mod progress;

pub use clock::{RecordingSleeper, TokioSleeper};
pub use gpio::{open_hardware, SimulatedTrigger};
pub use progress::{JsonProgressFile, NoProgress};
