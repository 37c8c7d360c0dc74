//! Mock implementations for testing.

mod api;

pub use api::{sample_dog, ApiCall, MockDogApi};
