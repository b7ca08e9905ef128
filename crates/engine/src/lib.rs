pub mod error;
pub mod events;
pub mod fit;
pub mod initializer;
pub mod interaction;
pub mod map;
pub mod options;
pub mod render;
pub mod tooltip;
pub mod transform_stack;

pub use error::*;
pub use events::*;
pub use initializer::*;
pub use interaction::*;
pub use map::*;
pub use options::*;
pub use tooltip::*;
pub use transform_stack::*;
