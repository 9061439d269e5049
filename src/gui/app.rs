use iced::{Element, Task, Theme};

use super::screens::{landing_page::LandingPageScreen, Screen, ScreenData, ScreenMessage};
use super::{AppState, Message};

pub struct AutolabelApp {
    state: AppState,
    screen: ScreenData,
}

impl AutolabelApp {
    pub fn new() -> (Self, Task<Message>) {
        (
            Self {
                state: AppState::default(),
                screen: ScreenData::LandingPage(LandingPageScreen),
            },
            Task::none(),
        )
    }

    pub fn title(&self) -> String {
        "Autolabel - YOLO Dataset Builder".to_string()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        self.screen
            .update(message, &mut self.state)
            .map(|message| match message {
                ScreenMessage::ScreenMessage(message) => message,
                ScreenMessage::ParentMessage(never) => match never {},
            })
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.screen.view().map(|message| match message {
            ScreenMessage::ScreenMessage(message) => message,
            ScreenMessage::ParentMessage(never) => match never {},
        })
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}
