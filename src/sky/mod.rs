mod error;
mod frame;
mod observer;
mod refraction;
mod transform;
mod types;

pub use error::ObserverError;
pub use frame::{FrameModel, MeanFrame};
pub use observer::Observer;
pub use refraction::Refraction;
pub use transform::Transformer;
pub use types::HorizontalPosition;
