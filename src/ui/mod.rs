mod app;
mod details;
mod images;
mod movies;
mod overlays;
mod screen;
mod setup;
mod theme;

pub use app::Marquee;
