pub mod decode;
pub mod feature;
pub mod topology;

pub use decode::*;
pub use feature::*;
pub use topology::*;
