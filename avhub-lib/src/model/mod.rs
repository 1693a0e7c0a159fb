//! Data model types

mod record;
mod value;

pub use record::Record;
pub use value::Value;
