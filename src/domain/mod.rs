// Domain layer: models and ports (traits).

pub mod model;
pub mod ports;
