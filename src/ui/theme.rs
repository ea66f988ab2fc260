use iced::widget::{button, container, pick_list, text, text_input};
use iced::{Background, Border, Color, Shadow};

pub const BACKGROUND_BLACK: Color = Color::from_rgb(0.0, 0.0, 0.0);
pub const SURFACE_DARK_GRAY: Color = Color::from_rgb(0.078, 0.078, 0.078);
pub const ACCENT_RED: Color = Color::from_rgb(0.898, 0.035, 0.078);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_GRAY: Color = Color::from_rgb(0.702, 0.702, 0.702);

pub const ICON_ARROW_LEFT: char = '\u{F12F}';
pub const ICON_CHECK: char = '\u{F26E}';
pub const ICON_FILM: char = '\u{F3C3}';
pub const ICON_PLAY_FILL: char = '\u{F4F4}';
pub const ICON_SEARCH: char = '\u{F52A}';
pub const ICON_SORT_DOWN: char = '\u{F575}';
pub const ICON_STAR_FILL: char = '\u{F586}';
pub const ICON_WIFI_OFF: char = '\u{F61B}';
pub const ICON_X_LG: char = '\u{F659}';

pub fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn page_background(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BACKGROUND_BLACK)),
        ..Default::default()
    }
}

pub fn surface(radius: f32) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(Background::Color(SURFACE_DARK_GRAY)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: radius.into(),
        },
        ..Default::default()
    }
}

pub fn scrim(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.85))),
        ..Default::default()
    }
}

pub fn primary_button(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Color::from_rgb(0.7, 0.02, 0.06),
        _ => ACCENT_RED,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: TEXT_WHITE,
        border: Border::default().rounded(4),
        shadow: Shadow::default(),
        snap: false,
    }
}

pub fn ghost_button(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let alpha = if matches!(status, button::Status::Hovered) {
        0.2
    } else {
        0.1
    };
    button::Style {
        background: Some(Background::Color(Color::from_rgba(1.0, 1.0, 1.0, alpha))),
        text_color: TEXT_WHITE,
        border: Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.2),
            width: 1.0,
            radius: 4.0.into(),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

pub fn row_button(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Color::from_rgba(1.0, 1.0, 1.0, 0.08),
        _ => Color::TRANSPARENT,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: TEXT_WHITE,
        border: Border::default().rounded(6),
        shadow: Shadow::default(),
        snap: false,
    }
}

pub fn search_input(_theme: &iced::Theme, _status: text_input::Status) -> text_input::Style {
    text_input::Style {
        background: Background::Color(Color::TRANSPARENT),
        border: Border::default(),
        icon: TEXT_GRAY,
        placeholder: TEXT_GRAY,
        value: TEXT_WHITE,
        selection: ACCENT_RED,
    }
}

pub fn search_field(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(1.0, 1.0, 1.0, 0.06))),
        border: Border {
            color: TEXT_GRAY,
            width: 1.0,
            radius: 24.0.into(),
        },
        ..Default::default()
    }
}

pub fn language_pick_list(_theme: &iced::Theme, _status: pick_list::Status) -> pick_list::Style {
    pick_list::Style {
        text_color: TEXT_WHITE,
        placeholder_color: TEXT_GRAY,
        handle_color: TEXT_WHITE,
        background: Background::Color(Color::from_rgba(1.0, 1.0, 1.0, 0.1)),
        border: Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.2),
            width: 1.0,
            radius: 4.0.into(),
        },
    }
}
