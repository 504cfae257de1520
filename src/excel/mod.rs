//! Spreadsheet engine access
//!
//! - `session` : the engine seam every export goes through
//! - `umya`    : .xlsx engine editing a copied template in place
//! - `memory`  : in-memory engine for dry runs and tests
//! - `reader`  : typed line reads and record line writes

mod memory;
mod reader;
mod session;
mod umya;

pub use memory::MemorySession;
pub use reader::{coerce, read_line, write_line};
pub use session::{CellKind, RawCell, SessionError, WorkbookSession};
pub use umya::{looks_like_date_format, UmyaSession};
