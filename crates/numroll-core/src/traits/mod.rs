//! Trait seams between the core and its collaborators.

pub mod channel;

pub use channel::Channel;
