pub mod surface;
pub mod touch;
pub mod viewport;

pub use surface::Surface;
pub use touch::TouchState;
pub use viewport::{Viewport, ZoomDirection};
