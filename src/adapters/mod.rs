// Adapters layer: concrete implementations for the systems around the core (model runtime, http).

pub mod http;
pub mod onnx;
