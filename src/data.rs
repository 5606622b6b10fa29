mod app_config;
mod send_channels;

pub use app_config::*;
pub use send_channels::EventChannels;
