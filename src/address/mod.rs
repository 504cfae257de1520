//! A1-style cell address algebra
//!
//! - `codec`  : coordinate string ↔ (column letters, row)
//! - `column` : base-26 column letters without a zero digit (Z → AA)
//! - `walker` : stepping one cell down or right

mod codec;
mod column;
mod walker;

pub use codec::{format, parse, CellRef};
pub use column::{column_letters, column_number, increment_column};
pub use walker::{next_cell, next_coordinate, steps_between, Direction};
