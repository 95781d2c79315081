use crate::clipboard::SystemClipboard;
use crate::events::{AppEvent, EventHandler};
use crate::state::{AppState, Command};
use crate::ui;
use anyhow::Result;
use bionic_ai::ModelGateway;
use bionic_workflows::{Clipboard, CrmRecorder, ImageSelection};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

/// Main TUI application struct
pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    gateway: Arc<dyn ModelGateway>,
    crm: Arc<dyn CrmRecorder>,
    clipboard: Box<dyn Clipboard>,
    max_tool_rounds: usize,
}

impl App {
    pub fn new(
        state: AppState,
        gateway: Arc<dyn ModelGateway>,
        crm: Arc<dyn CrmRecorder>,
        max_tool_rounds: usize,
    ) -> Self {
        Self {
            state,
            should_quit: false,
            gateway,
            crm,
            clipboard: Box::new(SystemClipboard::new()),
            max_tool_rounds,
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        let mut event_handler = EventHandler::new(250);
        let sender = event_handler.sender().clone();

        while !self.should_quit {
            terminal.draw(|frame| {
                ui::render(frame, &self.state);
            })?;

            if let Some(event) = event_handler.next().await {
                self.handle_event(event, &sender).await;
            }
        }

        Ok(())
    }

    /// Apply one event to the state, dispatching any work it triggers
    pub async fn handle_event(&mut self, event: AppEvent, sender: &UnboundedSender<AppEvent>) {
        match event {
            AppEvent::Key(key) => {
                if let Some(command) = self.state.handle_key(key) {
                    self.dispatch(command, sender);
                }
            }
            AppEvent::Tick => self.state.tick(Instant::now()),
            AppEvent::Quit => self.quit(),
            AppEvent::ConciergeProgress(progress) => self.state.concierge.apply_progress(progress),
            AppEvent::ConciergeReply(resolution) => {
                self.state.concierge.complete_turn(resolution);
            }
            AppEvent::MarketingCopy(result) => self.state.marketing.complete_copy(result),
            AppEvent::ImageLoaded(Ok(selection)) => {
                if let Some(request) = self.state.select_image(selection) {
                    self.dispatch(Command::AnalyzeImage(request), sender);
                }
            }
            AppEvent::ImageLoaded(Err(message)) => self.state.set_notice(message),
            AppEvent::RoomAnalysis(image_id, result) => {
                if let Some(request) = self.state.marketing.complete_analysis(image_id, result) {
                    self.dispatch(Command::AnalyzeImage(request), sender);
                }
            }
            AppEvent::Ranking(result) => self.state.hunter.complete_ranking(result).await,
        }
    }

    /// Run a command, spawning gateway calls so the loop never blocks on them
    fn dispatch(&mut self, command: Command, sender: &UnboundedSender<AppEvent>) {
        match command {
            Command::Quit => self.quit(),
            Command::Copy { target, text } => match self.clipboard.set_text(&text) {
                Ok(()) => self.state.mark_copied(target, Instant::now()),
                Err(e) => {
                    warn!("Copy failed: {}", e);
                    self.state.set_notice(e.to_string());
                }
            },
            Command::SendChat(pending) => {
                let gateway = Arc::clone(&self.gateway);
                let crm = Arc::clone(&self.crm);
                let max_tool_rounds = self.max_tool_rounds;
                let tx = sender.clone();
                tokio::spawn(async move {
                    let progress_tx = tx.clone();
                    let resolution = pending
                        .resolve_with_progress(
                            gateway.as_ref(),
                            crm.as_ref(),
                            max_tool_rounds,
                            move |progress| {
                                let _ = progress_tx.send(AppEvent::ConciergeProgress(progress));
                            },
                        )
                        .await;
                    let _ = tx.send(AppEvent::ConciergeReply(resolution));
                });
            }
            Command::GenerateCopy(request) => {
                let gateway = Arc::clone(&self.gateway);
                let tx = sender.clone();
                tokio::spawn(async move {
                    let result = request.run(gateway.as_ref()).await;
                    let _ = tx.send(AppEvent::MarketingCopy(result));
                });
            }
            Command::LoadImage(path) => {
                debug!("Loading image {}", path.display());
                let tx = sender.clone();
                tokio::spawn(async move {
                    let result = ImageSelection::from_path(&path)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = tx.send(AppEvent::ImageLoaded(result));
                });
            }
            Command::AnalyzeImage(request) => {
                let gateway = Arc::clone(&self.gateway);
                let tx = sender.clone();
                tokio::spawn(async move {
                    let (image_id, result) = request.run(gateway.as_ref()).await;
                    let _ = tx.send(AppEvent::RoomAnalysis(image_id, result));
                });
            }
            Command::RankLeads(request) => {
                let gateway = Arc::clone(&self.gateway);
                let tx = sender.clone();
                tokio::spawn(async move {
                    let result = request.run(gateway.as_ref()).await;
                    let _ = tx.send(AppEvent::Ranking(result));
                });
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bionic_ai::{ConverseReply, MockModelGateway};
    use bionic_core::RoomAnalysis;
    use bionic_workflows::{
        ConciergeSession, MemoryClipboard, PropensityRanker, SeedLeadProvider, TracingCrm,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::mpsc;

    async fn app(gateway: MockModelGateway) -> App {
        let hunter = PropensityRanker::load(Arc::new(SeedLeadProvider::new()))
            .await
            .unwrap();
        let state = AppState::new(ConciergeSession::new(), hunter);
        App::new(state, Arc::new(gateway), Arc::new(TracingCrm), 3)
            .with_clipboard(Box::new(MemoryClipboard::new()))
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_chat_reply_arrives_as_event() {
        let mut gateway = MockModelGateway::new();
        gateway
            .expect_converse()
            .times(1)
            .returning(|_| Ok(ConverseReply::text("Welcome aboard.")));
        let mut app = app(gateway).await;
        let (tx, mut rx) = mpsc::unbounded_channel();

        for c in "Hi".chars() {
            app.handle_event(key(KeyCode::Char(c)), &tx).await;
        }
        app.handle_event(key(KeyCode::Enter), &tx).await;
        assert!(app.state.concierge.is_busy());

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::ConciergeReply(_)));
        app.handle_event(event, &tx).await;

        assert!(!app.state.concierge.is_busy());
        let last = app.state.concierge.messages().last().unwrap();
        assert_eq!(last.content, "Welcome aboard.");
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_app() {
        let mut app = app(MockModelGateway::new()).await;
        let (tx, _rx) = mpsc::unbounded_channel();
        app.handle_event(
            AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            &tx,
        )
        .await;
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_photo_chosen_during_analysis_is_analyzed_next() {
        let mut gateway = MockModelGateway::new();
        gateway.expect_analyze_image().times(2).returning(|bytes, _| {
            let style = if bytes.first() == Some(&1) { "Victorian" } else { "Art Deco" };
            Ok(RoomAnalysis {
                architectural_style: style.to_string(),
                top_selling_features: ["A".to_string(), "B".to_string(), "C".to_string()],
            })
        });
        let mut app = app(gateway).await;
        let (tx, mut rx) = mpsc::unbounded_channel();

        let parlor = ImageSelection::new("parlor.png", "image/png", vec![1]);
        let lobby = ImageSelection::new("lobby.png", "image/png", vec![2]);
        app.handle_event(AppEvent::ImageLoaded(Ok(parlor)), &tx).await;
        app.handle_event(AppEvent::ImageLoaded(Ok(lobby)), &tx).await;
        assert!(app.state.marketing.analysis_status().is_busy());

        // The parlor result is stale and triggers the lobby analysis
        let stale = rx.recv().await.unwrap();
        assert!(matches!(stale, AppEvent::RoomAnalysis(..)));
        app.handle_event(stale, &tx).await;
        assert!(app.state.marketing.visible_analysis().is_none());
        assert!(app.state.marketing.analysis_status().is_busy());

        let current = rx.recv().await.unwrap();
        app.handle_event(current, &tx).await;
        assert_eq!(
            app.state.marketing.selected_image().map(|i| i.name()),
            Some("lobby.png")
        );
        assert_eq!(
            app.state.marketing.visible_analysis().unwrap().architectural_style,
            "Art Deco"
        );
        assert!(!app.state.marketing.analysis_status().is_busy());
    }

    #[tokio::test]
    async fn test_image_load_failure_sets_notice() {
        let mut app = app(MockModelGateway::new()).await;
        let (tx, _rx) = mpsc::unbounded_channel();
        app.handle_event(
            AppEvent::ImageLoaded(Err("Unsupported image type: notes.txt".to_string())),
            &tx,
        )
        .await;
        assert_eq!(app.state.notice(), Some("Unsupported image type: notes.txt"));
    }
}
