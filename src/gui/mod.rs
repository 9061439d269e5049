mod app;
mod message;
mod state;
pub mod screens;

pub use app::AutolabelApp;
pub use message::Message;
pub use state::AppState;

/// Launch the GUI and block until the window closes.
pub fn run() -> iced::Result {
    iced::application(AutolabelApp::new, AutolabelApp::update, AutolabelApp::view)
        .title(AutolabelApp::title)
        .theme(AutolabelApp::theme)
        .run()
}
