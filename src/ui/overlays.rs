use std::sync::Arc;

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length, Padding, Task};

use marquee::screens::player::{PlayerInput, PlayerOutput, PlayerViewModel};
use marquee::screens::poster::{PosterInput, PosterOutput, PosterViewModel};
use marquee::screens::ChannelRouter;

use super::app::Message;
use super::images::ImageCache;
use super::screen::{self, ScreenHandle};
use super::theme::{self, icon, ICON_PLAY_FILL, ICON_X_LG, TEXT_GRAY, TEXT_WHITE};

pub enum Modal {
    Poster {
        handle: ScreenHandle<PosterInput>,
        url: Option<String>,
    },
    Player {
        handle: ScreenHandle<PlayerInput>,
        watch_url: Option<String>,
    },
}

impl Modal {
    pub fn poster(url: String) -> (Self, Task<Message>) {
        let (router, routes) = ChannelRouter::new();
        let view_model = PosterViewModel::new(url, Arc::new(router));
        let (handle, task) =
            screen::start(view_model, routes, Message::PosterOutput, Message::PosterRoute);
        handle.send(PosterInput::ViewDidLoad);
        (Modal::Poster { handle, url: None }, task)
    }

    pub fn player(key: String) -> (Self, Task<Message>) {
        let (router, routes) = ChannelRouter::new();
        let view_model = PlayerViewModel::new(key, Arc::new(router));
        let (handle, task) =
            screen::start(view_model, routes, Message::PlayerOutput, Message::PlayerRoute);
        handle.send(PlayerInput::ViewDidLoad);
        (
            Modal::Player {
                handle,
                watch_url: None,
            },
            task,
        )
    }

    pub fn dismiss(&self) {
        match self {
            Modal::Poster { handle, .. } => handle.send(PosterInput::Dismiss),
            Modal::Player { handle, .. } => handle.send(PlayerInput::Close),
        }
    }

    pub fn present_image(&mut self, output: PosterOutput, images: &mut ImageCache) -> Task<Message> {
        let PosterOutput::PresentImage { url: presented } = output;
        match self {
            Modal::Poster { url, .. } => {
                let task = images.request([presented.as_str()]);
                *url = Some(presented);
                task
            }
            Modal::Player { .. } => Task::none(),
        }
    }

    pub fn play(&mut self, output: PlayerOutput) -> Task<Message> {
        let PlayerOutput::Play { key, watch_url: url } = output;
        match self {
            Modal::Player { watch_url, .. } => {
                tracing::info!(key = %key, "playing trailer");
                *watch_url = Some(url.clone());
                Task::done(Message::OpenInBrowser(url))
            }
            Modal::Poster { .. } => Task::none(),
        }
    }

    pub fn view<'a>(&'a self, images: &'a ImageCache) -> Element<'a, Message> {
        let close = button(icon(ICON_X_LG).size(18).color(TEXT_WHITE))
            .padding(10)
            .style(theme::ghost_button)
            .on_press(Message::DismissModal);
        let top = row![Space::new().width(Length::Fill), close].padding(16);

        let content: Element<'a, Message> = match self {
            Modal::Poster { url, .. } => match url.as_deref().and_then(|url| images.get(url)) {
                Some(handle) => iced::widget::image(handle.clone())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .content_fit(iced::ContentFit::Contain)
                    .into(),
                None => text("Loading...").size(16).color(TEXT_GRAY).into(),
            },
            Modal::Player { watch_url, .. } => view_player(watch_url.as_deref()),
        };

        container(column![
            top,
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .padding(Padding::new(0.0).bottom(32.0))
        ])
        .width(Length::Fill)
        .height(Length::Fill)
        .style(theme::scrim)
        .into()
    }
}

fn view_player(watch_url: Option<&str>) -> Element<'_, Message> {
    let Some(url) = watch_url else {
        return text("Preparing trailer...").size(16).color(TEXT_GRAY).into();
    };

    let reopen = button(
        row![
            icon(ICON_PLAY_FILL).size(16).color(TEXT_WHITE),
            text("Open again").size(15).color(TEXT_WHITE)
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .padding([10, 24])
    .style(theme::primary_button)
    .on_press(Message::OpenInBrowser(url.to_string()));

    column![
        text("The trailer is playing in your browser")
            .size(20)
            .color(TEXT_WHITE),
        text(url).size(13).color(TEXT_GRAY),
        reopen
    ]
    .spacing(16)
    .align_x(Alignment::Center)
    .into()
}

pub fn view_alert(message: &str) -> Element<'_, Message> {
    let ok = button(text("OK").size(15).color(TEXT_WHITE))
        .padding([8, 32])
        .style(theme::primary_button)
        .on_press(Message::DismissAlert);

    let dialog = container(
        column![text(message).size(16).color(TEXT_WHITE), ok]
            .spacing(20)
            .align_x(Alignment::Center)
            .width(Length::Fixed(320.0)),
    )
    .padding(24)
    .style(theme::surface(8.0));

    container(dialog)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(theme::scrim)
        .into()
}

pub async fn open_in_browser(url: String) -> Result<(), String> {
    let mut command = if cfg!(target_os = "macos") {
        let mut command = tokio::process::Command::new("open");
        command.arg(&url);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = tokio::process::Command::new("cmd");
        command.args(["/C", "start", "", &url]);
        command
    } else {
        let mut command = tokio::process::Command::new("xdg-open");
        command.arg(&url);
        command
    };

    let status = command
        .status()
        .await
        .map_err(|e| format!("Failed to open browser: {}", e))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("Browser exited with {}", status))
    }
}
