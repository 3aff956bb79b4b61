pub mod grid;
pub mod shape;

pub use grid::{Grid, ValueRenderOption};
pub use shape::{shape, RowObject, ShapedSheet};
