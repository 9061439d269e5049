use std::convert::Infallible;

use iced::{
    Alignment::Center,
    Element, Task,
    widget::{column, container, text},
};

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};

#[derive(Debug, Clone)]
pub struct RunningPageScreen {
    pub file_count: usize,
}

impl Screen for RunningPageScreen {
    type Message = Infallible;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content = column![
            text("Running detector...").size(24),
            text(format!(
                "Annotating {} file(s); this may take a while.",
                self.file_count
            )),
        ]
        .spacing(12)
        .align_x(Center);

        container(content)
            .center_x(iced::Length::Fill)
            .center_y(iced::Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        _message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        Task::none()
    }
}
