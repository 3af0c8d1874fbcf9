pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod interface;
pub mod labels;
pub mod pipeline;
pub mod preprocess;
pub mod ranking;
