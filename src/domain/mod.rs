// Domain layer: plain data types and the ports the engine depends on.

pub mod model;
pub mod ports;
