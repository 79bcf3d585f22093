// Domain layer: core models and ports (interfaces) for the batch verifier.

pub mod model;
pub mod ports;
