use std::sync::Arc;

use iced::{
    Alignment::Center,
    Element, Task,
    widget::{button, column, container, image::Handle, row, scrollable, text},
};
use rfd::AsyncFileDialog;

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};
use crate::pipeline::RunOutput;

#[derive(Debug, Clone)]
pub struct ResultsPageScreen {
    outcome: Result<Arc<RunOutput>, String>,
    save_status: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ResultsPageMessage {
    SaveDataset,
    Saved(Result<String, String>),
    None,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    StartOver,
}

impl ResultsPageScreen {
    pub fn new(outcome: Result<Arc<RunOutput>, String>) -> Self {
        Self {
            outcome,
            save_status: None,
        }
    }
}

impl Screen for ResultsPageScreen {
    type Message = ResultsPageMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content = match &self.outcome {
            Err(error) => column![
                text("Run failed").size(24),
                text(error.clone()),
                button("Start Over")
                    .on_press(ScreenMessage::ParentMessage(ParentMessage::StartOver)),
            ]
            .spacing(20)
            .padding(20)
            .align_x(Center),
            Ok(output) => {
                let mut previews = column![].spacing(12).align_x(Center);
                for path in &output.previews {
                    let caption = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    previews = previews.push(
                        column![
                            iced::widget::image(Handle::from_path(path))
                                .width(iced::Length::Fixed(360.0)),
                            text(format!("Preview: {caption}")),
                        ]
                        .spacing(4)
                        .align_x(Center),
                    );
                }

                let mut content = column![
                    text("Dataset ready").size(24),
                    text(format!(
                        "{} image(s), {} label file(s), {} processed by the detector",
                        output.image_count, output.label_count, output.processed
                    )),
                    scrollable(previews).height(iced::Length::Fill),
                    row![
                        button("Save Dataset...").on_press(ScreenMessage::ScreenMessage(
                            ResultsPageMessage::SaveDataset
                        )),
                        button("Start Over")
                            .on_press(ScreenMessage::ParentMessage(ParentMessage::StartOver)),
                    ]
                    .spacing(20),
                ]
                .spacing(20)
                .padding(20)
                .align_x(Center);

                if let Some(status) = &self.save_status {
                    content = content.push(text(status.clone()));
                }
                content
            }
        };

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
            ResultsPageMessage::SaveDataset => {
                let archive = match &self.outcome {
                    Ok(output) => output.archive_path.clone(),
                    Err(_) => return Task::none(),
                };
                Task::perform(
                    async move {
                        let handle = AsyncFileDialog::new()
                            .set_title("Save dataset")
                            .set_file_name("dataset.zip")
                            .add_filter("ZIP archive", &["zip"])
                            .save_file()
                            .await?;
                        let dest = handle.path().to_path_buf();
                        Some(
                            std::fs::copy(&archive, &dest)
                                .map(|_| dest.display().to_string())
                                .map_err(|e| e.to_string()),
                        )
                    },
                    |saved| {
                        ScreenMessage::ScreenMessage(match saved {
                            Some(result) => ResultsPageMessage::Saved(result),
                            None => ResultsPageMessage::None,
                        })
                    },
                )
            }
            ResultsPageMessage::Saved(Ok(dest)) => {
                self.save_status = Some(format!("Saved to {dest}"));
                Task::none()
            }
            ResultsPageMessage::Saved(Err(error)) => {
                self.save_status = Some(format!("Save failed: {error}"));
                Task::none()
            }
            ResultsPageMessage::None => Task::none(),
        }
    }
}
