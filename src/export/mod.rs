//! Presentation glue: console table rendering and the non-blocking CSV
//! export writer.

pub mod table;
pub mod writer;

pub use writer::{create_export_channel, ExportChannel};
