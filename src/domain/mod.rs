// Domain layer: result models and the ports the lookup clients are written against.

pub mod model;
pub mod ports;
