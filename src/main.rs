mod ui;

use iced::{Font, Size};

use marquee::observability::init_tracing;
use marquee::settings::AppSettings;
use ui::Marquee;

fn main() -> iced::Result {
    let settings = AppSettings::load();
    init_tracing(&settings.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting marquee");

    iced::application(move || Marquee::new(settings.clone()), Marquee::update, Marquee::view)
        .title("Marquee")
        .theme(Marquee::theme)
        .window_size(Size::new(1100.0, 760.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .run()
}
