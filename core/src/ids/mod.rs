pub mod generator;

pub use generator::{IdGenerator, SequentialIdGenerator, UlidUuidGenerator};
