pub mod color;
pub mod depth;

pub use color::Color;
pub use depth::{classify, DepthBucket, DepthScale, DEPTH_BUCKETS};
