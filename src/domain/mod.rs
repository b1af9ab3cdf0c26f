// Domain layer: student model and ports (interfaces).

pub mod model;
pub mod ports;
