use std::path::PathBuf;

use iced::{
    Alignment::Center,
    Element, Task,
    widget::{button, column, container, text},
};
use rfd::AsyncFileDialog;

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};

#[derive(Debug, Clone)]
pub struct LandingPageScreen;

#[derive(Debug, Clone)]
pub enum LandingPageMessage {
    PickFiles,
    None,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    PickedFiles(Vec<PathBuf>),
}

impl Screen for LandingPageScreen {
    type Message = LandingPageMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content = column![
            text("Autolabel").size(32),
            text("Upload images or a ZIP of images and get back a YOLO dataset (images + labels)."),
            button("Select Images or ZIP...").on_press(ScreenMessage::ScreenMessage(
                LandingPageMessage::PickFiles
            )),
        ]
        .spacing(20)
        .padding(20)
        .align_x(Center);

        container(content)
            .center_x(iced::Length::Fill)
            .center_y(iced::Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LandingPageMessage::PickFiles => Task::perform(
                AsyncFileDialog::new()
                    .set_title("Select images or a ZIP archive")
                    .add_filter("Images or ZIP", &["jpg", "jpeg", "png", "zip"])
                    .pick_files(),
                |handles| match handles {
                    Some(handles) => ScreenMessage::ParentMessage(ParentMessage::PickedFiles(
                        handles
                            .iter()
                            .map(|handle| handle.path().to_path_buf())
                            .collect(),
                    )),
                    None => ScreenMessage::ScreenMessage(LandingPageMessage::None),
                },
            ),
            LandingPageMessage::None => Task::none(),
        }
    }
}
