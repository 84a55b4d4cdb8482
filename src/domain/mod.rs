// Domain layer: request/response models and the classifier port. No transport or runtime types here.

pub mod model;
pub mod ports;
