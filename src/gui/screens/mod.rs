pub mod landing_page;
pub mod results_page;
pub mod running_page;

use std::path::PathBuf;
use std::sync::Arc;

use iced::{Element, Task};

use crate::detect::ContourDetector;
use crate::gui::{AppState, Message};
use crate::pipeline::{run_annotation, RunOutput};
use crate::workspace::UploadFile;

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug + Clone;
    type ParentMessage: std::fmt::Debug + Clone;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    LandingPage(landing_page::LandingPageScreen),
    RunningPage(running_page::RunningPageScreen),
    ResultsPage(results_page::ResultsPageScreen),
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = std::convert::Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        match self {
            ScreenData::LandingPage(screen) => screen.view().map(Message::LandingPage),
            ScreenData::RunningPage(screen) => screen.view().map(Message::RunningPage),
            ScreenData::ResultsPage(screen) => screen.view().map(Message::ResultsPage),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (x, Message::ChangeScreen(screen)) => {
                *x = screen;
                Task::none()
            }
            (x, Message::RunFinished(result)) => {
                state.current_run = result.as_ref().ok().cloned();
                *x = ScreenData::ResultsPage(results_page::ResultsPageScreen::new(result));
                Task::none()
            }
            (ScreenData::LandingPage(page), Message::LandingPage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::LandingPage)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(landing_page::ParentMessage::PickedFiles(paths)) => {
                    // Dropping the previous run resets all of its scratch state
                    state.current_run = None;
                    let file_count = paths.len();
                    Task::done(ScreenMessage::ScreenMessage(Message::ChangeScreen(
                        ScreenData::RunningPage(running_page::RunningPageScreen { file_count }),
                    )))
                    .chain(Task::perform(run_pipeline(paths), |result| {
                        ScreenMessage::ScreenMessage(Message::RunFinished(result))
                    }))
                }
            },
            (ScreenData::ResultsPage(page), Message::ResultsPage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::ResultsPage)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(results_page::ParentMessage::StartOver) => {
                    state.current_run = None;
                    Task::done(ScreenMessage::ScreenMessage(Message::ChangeScreen(
                        ScreenData::LandingPage(landing_page::LandingPageScreen),
                    )))
                }
            },
            _ => Task::none(),
        }
    }
}

/// Read the picked files and run the blocking pipeline off the UI thread.
async fn run_pipeline(paths: Vec<PathBuf>) -> Result<Arc<RunOutput>, String> {
    let result = tokio::task::spawn_blocking(move || {
        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            files.push(UploadFile::from_path(path).map_err(|e| format!("{e:#}"))?);
        }
        run_annotation(&files, &ContourDetector::new(), false)
            .map(Arc::new)
            .map_err(|e| format!("{e:#}"))
    })
    .await;

    match result {
        Ok(run) => run,
        Err(e) => Err(format!("Annotation task panicked: {e}")),
    }
}
