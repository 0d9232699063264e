pub mod noop;
pub mod remote;
pub mod serialized;
