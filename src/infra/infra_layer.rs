// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "content_safety/mod.rs"]
pub mod content_safety;
