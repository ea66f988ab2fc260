pub mod details;
pub mod movies;
pub mod player;
pub mod poster;
mod view_model;

#[cfg(test)]
pub(crate) mod testing;

pub use view_model::{channel_stream, deferred, effect, ChannelRouter, Router, ViewModel};
