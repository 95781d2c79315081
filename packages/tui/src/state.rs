use crate::input::InputBuffer;
use bionic_workflows::{
    AnalysisRequest, ConciergeSession, CopyRequest, CopyTarget, ImageSelection,
    MarketingGenerator, PendingTurn, PropensityRanker, RankingRequest,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long the "Copied" marker stays on a card
pub const COPIED_FLASH: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Concierge,
    Multiplier,
    Hunter,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Concierge, Tab::Multiplier, Tab::Hunter];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Concierge => "AI Concierge",
            Tab::Multiplier => "Agent Multiplier",
            Tab::Hunter => "Predictive Hunter",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Concierge => 0,
            Tab::Multiplier => 1,
            Tab::Hunter => 2,
        }
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Input fields on the Agent Multiplier tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplierField {
    Notes,
    ImagePath,
}

/// Side effects a key press asks the app to perform
#[derive(Debug)]
pub enum Command {
    SendChat(PendingTurn),
    GenerateCopy(CopyRequest),
    LoadImage(PathBuf),
    AnalyzeImage(AnalysisRequest),
    RankLeads(RankingRequest),
    Copy { target: CopyTarget, text: String },
    Quit,
}

/// Application state management
pub struct AppState {
    pub current_tab: Tab,
    pub concierge: ConciergeSession,
    pub marketing: MarketingGenerator,
    pub hunter: PropensityRanker,
    chat_input: InputBuffer,
    notes_input: InputBuffer,
    image_path_input: InputBuffer,
    multiplier_field: MultiplierField,
    /// Lines scrolled back from the bottom of the transcript
    chat_scroll: usize,
    selected_lead: usize,
    copied: Option<(CopyTarget, Instant)>,
    notice: Option<String>,
}

impl AppState {
    pub fn new(concierge: ConciergeSession, hunter: PropensityRanker) -> Self {
        Self {
            current_tab: Tab::Concierge,
            concierge,
            marketing: MarketingGenerator::new(),
            hunter,
            chat_input: InputBuffer::new(),
            notes_input: InputBuffer::new(),
            image_path_input: InputBuffer::new(),
            multiplier_field: MultiplierField::Notes,
            chat_scroll: 0,
            selected_lead: 0,
            copied: None,
            notice: None,
        }
    }

    pub fn chat_input(&self) -> &InputBuffer {
        &self.chat_input
    }

    pub fn notes_input(&self) -> &InputBuffer {
        &self.notes_input
    }

    pub fn image_path_input(&self) -> &InputBuffer {
        &self.image_path_input
    }

    pub fn multiplier_field(&self) -> MultiplierField {
        self.multiplier_field
    }

    pub fn chat_scroll(&self) -> usize {
        self.chat_scroll
    }

    pub fn selected_lead(&self) -> usize {
        self.selected_lead
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Whether the copy marker for a target is still showing at `now`
    pub fn is_copied(&self, target: CopyTarget, now: Instant) -> bool {
        matches!(self.copied, Some((copied, at)) if copied == target && now.duration_since(at) < COPIED_FLASH)
    }

    pub fn mark_copied(&mut self, target: CopyTarget, at: Instant) {
        self.copied = Some((target, at));
    }

    /// Drop an expired copy marker
    pub fn tick(&mut self, now: Instant) {
        if let Some((_, at)) = self.copied {
            if now.duration_since(at) >= COPIED_FLASH {
                self.copied = None;
            }
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.notice = None;
    }

    pub fn select_image(&mut self, selection: ImageSelection) -> Option<AnalysisRequest> {
        self.notice = None;
        self.marketing.select_image(selection);
        self.marketing.begin_analysis()
    }

    /// The input buffer that receives typing on the current tab
    fn active_input_mut(&mut self) -> Option<&mut InputBuffer> {
        match (self.current_tab, self.multiplier_field) {
            (Tab::Concierge, _) => Some(&mut self.chat_input),
            (Tab::Multiplier, MultiplierField::Notes) => Some(&mut self.notes_input),
            (Tab::Multiplier, MultiplierField::ImagePath) => Some(&mut self.image_path_input),
            (Tab::Hunter, _) => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        // Global keys first
        match key.code {
            KeyCode::Char('c') if ctrl => return Some(Command::Quit),
            KeyCode::Char(_) if ctrl => return None,
            KeyCode::F(1) => {
                self.switch_tab(Tab::Concierge);
                return None;
            }
            KeyCode::F(2) => {
                self.switch_tab(Tab::Multiplier);
                return None;
            }
            KeyCode::F(3) => {
                self.switch_tab(Tab::Hunter);
                return None;
            }
            KeyCode::Right if ctrl => {
                self.switch_tab(self.current_tab.next());
                return None;
            }
            KeyCode::Left if ctrl => {
                self.switch_tab(self.current_tab.previous());
                return None;
            }
            KeyCode::Esc => {
                if let Some(input) = self.active_input_mut() {
                    input.clear();
                }
                self.notice = None;
                return None;
            }
            _ => {}
        }

        match self.current_tab {
            Tab::Concierge => self.handle_concierge_key(key),
            Tab::Multiplier if alt => self.handle_copy_key(key.code),
            Tab::Multiplier => self.handle_multiplier_key(key),
            Tab::Hunter => self.handle_hunter_key(key.code),
        }
    }

    fn edit_input(input: &mut InputBuffer, code: KeyCode) {
        match code {
            KeyCode::Char(c) => input.insert_char(c),
            KeyCode::Backspace => {
                input.backspace();
            }
            KeyCode::Delete => {
                input.delete_char();
            }
            KeyCode::Left => {
                input.move_left();
            }
            KeyCode::Right => {
                input.move_right();
            }
            KeyCode::Home => input.move_to_start(),
            KeyCode::End => input.move_to_end(),
            _ => {}
        }
    }

    fn handle_concierge_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Enter => {
                let pending = self.concierge.begin_turn(self.chat_input.content())?;
                self.chat_input.clear();
                self.chat_scroll = 0;
                Some(Command::SendChat(pending))
            }
            KeyCode::Up => {
                self.chat_scroll = self.chat_scroll.saturating_add(1);
                None
            }
            KeyCode::Down => {
                self.chat_scroll = self.chat_scroll.saturating_sub(1);
                None
            }
            KeyCode::PageUp => {
                self.chat_scroll = self.chat_scroll.saturating_add(10);
                None
            }
            KeyCode::PageDown => {
                self.chat_scroll = self.chat_scroll.saturating_sub(10);
                None
            }
            code => {
                Self::edit_input(&mut self.chat_input, code);
                None
            }
        }
    }

    fn handle_multiplier_key(&mut self, key: KeyEvent) -> Option<Command> {
        match (key.code, self.multiplier_field) {
            (KeyCode::Tab | KeyCode::BackTab, field) => {
                self.multiplier_field = match field {
                    MultiplierField::Notes => MultiplierField::ImagePath,
                    MultiplierField::ImagePath => MultiplierField::Notes,
                };
                None
            }
            (KeyCode::Enter, MultiplierField::Notes) => {
                self.marketing.set_notes(self.notes_input.content());
                self.marketing.begin_copy().map(Command::GenerateCopy)
            }
            (KeyCode::Delete, MultiplierField::ImagePath)
                if self.image_path_input.is_empty() && self.marketing.selected_image().is_some() =>
            {
                self.marketing.clear_image();
                self.notice = None;
                None
            }
            (KeyCode::Enter, MultiplierField::ImagePath) => {
                let path = self.image_path_input.content().trim();
                if path.is_empty() {
                    return None;
                }
                Some(Command::LoadImage(PathBuf::from(path)))
            }
            (code, MultiplierField::Notes) => {
                Self::edit_input(&mut self.notes_input, code);
                None
            }
            (code, MultiplierField::ImagePath) => {
                Self::edit_input(&mut self.image_path_input, code);
                None
            }
        }
    }

    fn handle_copy_key(&mut self, code: KeyCode) -> Option<Command> {
        let target = match code {
            KeyCode::Char('l') => CopyTarget::Listing,
            KeyCode::Char('c') => CopyTarget::Caption,
            KeyCode::Char('f') => CopyTarget::Flyer,
            KeyCode::Char(digit @ '1'..='3') => {
                CopyTarget::FlyerPoint(digit as usize - '1' as usize)
            }
            _ => return None,
        };
        let text = self.marketing.copy_text(target)?;
        Some(Command::Copy { target, text })
    }

    fn handle_hunter_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Enter | KeyCode::Char('r') => {
                self.hunter.begin_ranking().map(Command::RankLeads)
            }
            KeyCode::Up => {
                self.selected_lead = self.selected_lead.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                let last = self.hunter.leads().len().saturating_sub(1);
                self.selected_lead = (self.selected_lead + 1).min(last);
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bionic_core::{MarketingContent, PropensityCategory, RankedLead, RoomAnalysis};
    use bionic_workflows::{SeedLeadProvider, WELCOME_MESSAGE};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    async fn state() -> AppState {
        let hunter = PropensityRanker::load(Arc::new(SeedLeadProvider::new()))
            .await
            .unwrap();
        AppState::new(ConciergeSession::new(), hunter)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            assert!(state.handle_key(key(KeyCode::Char(c))).is_none());
        }
    }

    fn suite() -> MarketingContent {
        MarketingContent {
            professional_listing: "Listing".to_string(),
            instagram_caption: "Caption".to_string(),
            flyer_points: ["One".to_string(), "Two".to_string(), "Three".to_string()],
        }
    }

    #[tokio::test]
    async fn test_tab_navigation() {
        let mut state = state().await;
        assert_eq!(state.current_tab, Tab::Concierge);

        state.handle_key(key(KeyCode::F(3)));
        assert_eq!(state.current_tab, Tab::Hunter);

        state.handle_key(with(KeyCode::Right, KeyModifiers::CONTROL));
        assert_eq!(state.current_tab, Tab::Concierge);

        state.handle_key(with(KeyCode::Left, KeyModifiers::CONTROL));
        assert_eq!(state.current_tab, Tab::Hunter);

        state.handle_key(key(KeyCode::F(2)));
        assert_eq!(state.current_tab, Tab::Multiplier);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits() {
        let mut state = state().await;
        assert!(matches!(
            state.handle_key(with(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        ));
    }

    #[tokio::test]
    async fn test_enter_sends_chat_and_blocks_until_reply() {
        let mut state = state().await;
        type_text(&mut state, "I'm Jane Doe");

        let command = state.handle_key(key(KeyCode::Enter));
        assert!(matches!(command, Some(Command::SendChat(_))));
        assert!(state.chat_input().is_empty());
        assert!(state.concierge.is_busy());

        type_text(&mut state, "again");
        assert!(state.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(state.chat_input().content(), "again");
    }

    #[tokio::test]
    async fn test_enter_on_blank_chat_does_nothing() {
        let mut state = state().await;
        type_text(&mut state, "   ");
        assert!(state.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(state.concierge.messages().len(), 1);
        assert_eq!(state.concierge.messages()[0].content, WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn test_escape_clears_active_input() {
        let mut state = state().await;
        type_text(&mut state, "draft");
        state.handle_key(key(KeyCode::Esc));
        assert!(state.chat_input().is_empty());
    }

    #[tokio::test]
    async fn test_multiplier_fields_and_generate() {
        let mut state = state().await;
        state.switch_tab(Tab::Multiplier);

        assert!(state.handle_key(key(KeyCode::Enter)).is_none());

        type_text(&mut state, "4 bed, ocean views");
        let command = state.handle_key(key(KeyCode::Enter));
        assert!(matches!(command, Some(Command::GenerateCopy(ref r)) if r.notes() == "4 bed, ocean views"));
        assert!(state.marketing.copy_status().is_busy());

        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.multiplier_field(), MultiplierField::ImagePath);
        type_text(&mut state, "/tmp/den.png");
        assert_eq!(state.notes_input().content(), "4 bed, ocean views");
        assert!(matches!(
            state.handle_key(key(KeyCode::Enter)),
            Some(Command::LoadImage(path)) if path == PathBuf::from("/tmp/den.png")
        ));
    }

    #[tokio::test]
    async fn test_copy_keys_need_generated_content() {
        let mut state = state().await;
        state.switch_tab(Tab::Multiplier);
        assert!(state
            .handle_key(with(KeyCode::Char('f'), KeyModifiers::ALT))
            .is_none());

        state.marketing.set_notes("notes");
        let _request = state.marketing.begin_copy();
        state.marketing.complete_copy(Ok(suite()));

        match state.handle_key(with(KeyCode::Char('f'), KeyModifiers::ALT)) {
            Some(Command::Copy { target, text }) => {
                assert_eq!(target, CopyTarget::Flyer);
                assert_eq!(text, "• One\n• Two\n• Three");
            }
            other => panic!("expected copy command, got {:?}", other),
        }
        match state.handle_key(with(KeyCode::Char('2'), KeyModifiers::ALT)) {
            Some(Command::Copy { target, text }) => {
                assert_eq!(target, CopyTarget::FlyerPoint(1));
                assert_eq!(text, "Two");
            }
            other => panic!("expected copy command, got {:?}", other),
        }
        // Alt keys never reach the notes field
        assert!(state.notes_input().is_empty());
    }

    #[tokio::test]
    async fn test_copied_flash_expires() {
        let mut state = state().await;
        let start = Instant::now();
        state.mark_copied(CopyTarget::Listing, start);

        assert!(state.is_copied(CopyTarget::Listing, start + Duration::from_millis(500)));
        assert!(!state.is_copied(CopyTarget::Caption, start));

        state.tick(start + COPIED_FLASH);
        assert!(!state.is_copied(CopyTarget::Listing, start + COPIED_FLASH));
    }

    #[tokio::test]
    async fn test_selecting_image_starts_analysis() {
        let mut state = state().await;
        let request = state.select_image(ImageSelection::new("den.png", "image/png", vec![1, 2, 3]));
        assert!(request.is_some());
        assert!(state.marketing.analysis_status().is_busy());
        assert!(state.marketing.visible_analysis().is_none());
    }

    #[tokio::test]
    async fn test_delete_on_empty_path_removes_photo() {
        let mut state = state().await;
        state.switch_tab(Tab::Multiplier);
        state.handle_key(key(KeyCode::Tab));
        let request = state
            .select_image(ImageSelection::new("den.png", "image/png", vec![1, 2, 3]))
            .unwrap();
        let analysis = RoomAnalysis {
            architectural_style: "Craftsman".to_string(),
            top_selling_features: ["A".to_string(), "B".to_string(), "C".to_string()],
        };
        assert!(state
            .marketing
            .complete_analysis(request.image_id(), Ok(analysis))
            .is_none());
        assert!(state.marketing.visible_analysis().is_some());

        // Delete edits the path while there is text to delete
        type_text(&mut state, "x");
        state.handle_key(key(KeyCode::Left));
        assert!(state.handle_key(key(KeyCode::Delete)).is_none());
        assert!(state.image_path_input().is_empty());
        assert!(state.marketing.selected_image().is_some());

        assert!(state.handle_key(key(KeyCode::Delete)).is_none());
        assert!(state.marketing.selected_image().is_none());
        assert!(state.marketing.visible_analysis().is_none());
        assert!(state.marketing.begin_analysis().is_none());
    }

    #[tokio::test]
    async fn test_hunter_run_and_selection() {
        let mut state = state().await;
        state.switch_tab(Tab::Hunter);

        let command = state.handle_key(key(KeyCode::Char('r')));
        assert!(matches!(command, Some(Command::RankLeads(_))));
        assert!(state.handle_key(key(KeyCode::Enter)).is_none());

        state
            .hunter
            .complete_ranking(Ok(vec![RankedLead {
                id: "6".to_string(),
                score: 92,
                category: PropensityCategory::Hot,
                reasoning: "Long tenure".to_string(),
            }]))
            .await;
        assert!(state.hunter.has_analyzed());

        for _ in 0..20 {
            state.handle_key(key(KeyCode::Down));
        }
        assert_eq!(state.selected_lead(), 9);
        state.handle_key(key(KeyCode::Up));
        assert_eq!(state.selected_lead(), 8);
    }
}
