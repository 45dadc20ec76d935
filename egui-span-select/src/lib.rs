mod drag;
mod span;
mod surface;
mod tracker;

pub use span::*;
pub use surface::*;
pub use tracker::*;
