// Domain layer: request/response models and the ports the adapter talks through.

pub mod model;
pub mod ports;
