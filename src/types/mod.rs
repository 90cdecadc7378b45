//! Data types shared by the engine, the composer and the renderers.

mod row;
mod virtual_item;

pub use row::*;
pub use virtual_item::*;
