pub mod host;
pub mod value;
pub use host::{HostValue, Lookup};
pub use value::{Number, Object, Value, ValueKind};
