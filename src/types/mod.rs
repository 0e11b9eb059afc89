pub mod failure;

pub use failure::FailureKind;
