use bionic_core::{MarketingContent, RankedLead, RoomAnalysis};
use bionic_workflows::{ImageId, ImageSelection, TurnProgress, TurnResolution, WorkflowResult};
use crossterm::event::{self, Event, KeyEvent};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Event types for the TUI application
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Quit,
    /// Tool activity reported while a concierge turn resolves
    ConciergeProgress(TurnProgress),
    ConciergeReply(TurnResolution),
    MarketingCopy(WorkflowResult<MarketingContent>),
    ImageLoaded(Result<ImageSelection, String>),
    RoomAnalysis(ImageId, WorkflowResult<RoomAnalysis>),
    Ranking(WorkflowResult<Vec<RankedLead>>),
}

/// Merges terminal input, ticks, and background task results into one stream
pub struct EventHandler {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
    handler: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::unbounded_channel();
        let input_sender = sender.clone();

        let handler = tokio::spawn(async move {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if let Ok(true) = event::poll(timeout) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if key.kind == event::KeyEventKind::Press
                            && input_sender.send(AppEvent::Key(key)).is_err()
                        {
                            break;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_sender.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            sender,
            receiver,
            handler,
        }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.receiver.recv().await
    }

    pub fn sender(&self) -> &mpsc::UnboundedSender<AppEvent> {
        &self.sender
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
