// Domain layer: task model and the port the engine talks through.

pub mod model;
pub mod ports;
