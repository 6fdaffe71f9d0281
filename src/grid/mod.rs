pub mod direction;
pub mod store;
pub mod types;

pub use direction::{Direction, DirectionVector, DIRECTION_VECTORS};
pub use store::{Grid, FILLER};
pub use types::*;
