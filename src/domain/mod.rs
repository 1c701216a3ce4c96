// Domain layer: sequence model and the ports the sequencer drives.

pub mod model;
pub mod ports;
