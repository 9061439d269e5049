use std::sync::Arc;

use crate::gui::screens::{
    landing_page::LandingPageScreen, results_page::ResultsPageScreen,
    running_page::RunningPageScreen, ScreenData, ScreenMessage,
};
use crate::pipeline::RunOutput;

#[derive(Debug, Clone)]
pub enum Message {
    LandingPage(ScreenMessage<LandingPageScreen>),
    RunningPage(ScreenMessage<RunningPageScreen>),
    ResultsPage(ScreenMessage<ResultsPageScreen>),
    ChangeScreen(ScreenData),
    RunFinished(Result<Arc<RunOutput>, String>),
}
