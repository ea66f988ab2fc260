use iced::widget::{button, column, container, pick_list, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

use marquee::settings::AppSettings;

use super::theme::{self, ACCENT_RED, TEXT_GRAY, TEXT_WHITE};

const LANGUAGES: [&str; 10] = [
    "en-US", "de-DE", "es-ES", "fr-FR", "it-IT", "ja-JP", "pl-PL", "pt-BR", "uk-UA", "zh-CN",
];

#[derive(Debug, Clone)]
pub enum SetupMessage {
    TokenChanged(String),
    LanguageChanged(String),
    Submit,
}

pub struct SetupPage {
    base: AppSettings,
    token: String,
    language: String,
    error: Option<String>,
}

impl SetupPage {
    pub fn new(base: AppSettings) -> Self {
        Self {
            token: base.access_token.clone(),
            language: base.language().to_string(),
            base,
            error: None,
        }
    }

    pub fn update(&mut self, message: SetupMessage) -> Option<AppSettings> {
        match message {
            SetupMessage::TokenChanged(token) => {
                self.token = token;
                self.error = None;
                None
            }
            SetupMessage::LanguageChanged(language) => {
                self.language = language;
                None
            }
            SetupMessage::Submit => {
                let settings = AppSettings {
                    access_token: self.token.trim().to_string(),
                    language: self.language.trim().to_string(),
                    ..self.base.clone()
                };
                if !settings.is_valid() {
                    self.error = Some(String::from("Access token is required"));
                    return None;
                }
                if let Err(e) = settings.save() {
                    tracing::warn!(error = %e, "failed to save settings");
                    self.error = Some(format!("Failed to save: {}", e));
                    return None;
                }
                Some(settings)
            }
        }
    }

    pub fn view(&self) -> Element<'_, SetupMessage> {
        let logo = text("MARQUEE").size(48).color(ACCENT_RED);
        let title = text("Welcome to Marquee").size(28).color(TEXT_WHITE);
        let subtitle = text("Connect your TMDB account to browse popular movies")
            .size(14)
            .color(TEXT_GRAY);

        let token_label = text("TMDB API read access token").size(14).color(TEXT_WHITE);
        let token_hint = text("Find it at themoviedb.org/settings/api")
            .size(12)
            .color(TEXT_GRAY);
        let token_input = text_input("eyJhbGciOiJIUzI1NiJ9...", &self.token)
            .on_input(SetupMessage::TokenChanged)
            .on_submit(SetupMessage::Submit)
            .secure(true)
            .padding(12)
            .size(14)
            .width(Length::Fill);

        let language_label = text("Language").size(14).color(TEXT_WHITE);
        let languages: Vec<String> = LANGUAGES.iter().map(|l| l.to_string()).collect();
        let language_picker = pick_list(
            languages,
            Some(self.language.clone()),
            SetupMessage::LanguageChanged,
        )
        .text_size(14)
        .padding(12)
        .width(Length::Fill)
        .style(theme::language_pick_list);

        let submit_button = button(text("Get Started").size(16).color(TEXT_WHITE))
            .padding([12, 32])
            .style(theme::primary_button)
            .on_press(SetupMessage::Submit);

        let error_text = match self.error {
            Some(ref err) => text(err).size(14).color(ACCENT_RED),
            None => text("").size(14),
        };

        let spacer = || Space::new().height(16);
        let small_spacer = || Space::new().height(4);

        let form = column![
            logo,
            spacer(),
            title,
            small_spacer(),
            subtitle,
            spacer(),
            spacer(),
            token_label,
            small_spacer(),
            token_hint,
            small_spacer(),
            token_input,
            spacer(),
            language_label,
            small_spacer(),
            language_picker,
            spacer(),
            error_text,
            small_spacer(),
            row![submit_button].width(Length::Fill),
        ]
        .width(Length::Fixed(400.0))
        .align_x(Alignment::Start);

        container(form)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(theme::page_background)
            .into()
    }
}
