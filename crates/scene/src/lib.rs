pub mod components;
pub mod node;
pub mod picking;
pub mod selection;
pub mod surface;
pub mod svg;

pub use node::*;
pub use picking::*;
pub use selection::*;
pub use surface::*;
