// Domain layer: request models, payload composition and ports (interfaces).

pub mod model;
pub mod payload;
pub mod ports;
