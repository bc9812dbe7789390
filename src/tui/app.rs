//! TUI application state.
//!
//! The state is plain data: key handling mutates it and returns a [`Job`]
//! when an action is ready to run. Running jobs is the event loop's business.

/// Maximum number of lines kept in the output pane.
pub const OUTPUT_LIMIT: usize = 2000;

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Projects,
    Monitor,
    Chat,
    Utilities,
    Config,
    Reports,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Projects,
        Tab::Monitor,
        Tab::Chat,
        Tab::Utilities,
        Tab::Config,
        Tab::Reports,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Projects => "Projects",
            Tab::Monitor => "Monitor",
            Tab::Chat => "Chat",
            Tab::Utilities => "Utilities",
            Tab::Config => "Config",
            Tab::Reports => "Reports",
        }
    }

    fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    pub fn actions(&self) -> &'static [Action] {
        match self {
            Tab::Projects => &[
                Action::CreateProject,
                Action::FullAutomation,
                Action::ListProjects,
                Action::InitProject,
            ],
            Tab::Monitor => &[
                Action::Dashboard,
                Action::HiveStatus,
                Action::HiveSessions,
                Action::MonitorHeal,
                Action::SelfHeal,
            ],
            Tab::Chat => &[Action::SetChatSession, Action::SendChat],
            Tab::Utilities => &[
                Action::Palette,
                Action::SecurityScan,
                Action::MetricsCollect,
                Action::Backup,
                Action::ShowHistory,
                Action::ShowLogs,
            ],
            Tab::Config => &[
                Action::ShowConfig,
                Action::SetGitToken,
                Action::SetOpenRouterToken,
                Action::SetModel,
                Action::SetLang,
            ],
            Tab::Reports => &[
                Action::PerformanceReport,
                Action::MonitoringReport,
                Action::SaveReport,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateProject,
    FullAutomation,
    ListProjects,
    InitProject,
    Dashboard,
    HiveStatus,
    HiveSessions,
    MonitorHeal,
    SelfHeal,
    SetChatSession,
    SendChat,
    Palette,
    SecurityScan,
    MetricsCollect,
    Backup,
    ShowHistory,
    ShowLogs,
    ShowConfig,
    SetGitToken,
    SetOpenRouterToken,
    SetModel,
    SetLang,
    PerformanceReport,
    MonitoringReport,
    SaveReport,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::CreateProject => "Create project",
            Action::FullAutomation => "Full automation run",
            Action::ListProjects => "List projects",
            Action::InitProject => "Initialise claude-flow here",
            Action::Dashboard => "Monitoring dashboard",
            Action::HiveStatus => "Hive status",
            Action::HiveSessions => "Hive sessions",
            Action::MonitorHeal => "Monitor session and self-heal",
            Action::SelfHeal => "Self-heal now",
            Action::SetChatSession => "Choose chat session",
            Action::SendChat => "Send message",
            Action::Palette => "Command palette",
            Action::SecurityScan => "Full security scan",
            Action::MetricsCollect => "Collect all metrics",
            Action::Backup => "Create backup",
            Action::ShowHistory => "Command history",
            Action::ShowLogs => "Show logs",
            Action::ShowConfig => "Show configuration",
            Action::SetGitToken => "Set GitHub token",
            Action::SetOpenRouterToken => "Set OpenRouter token",
            Action::SetModel => "Set OpenRouter model",
            Action::SetLang => "Set language",
            Action::PerformanceReport => "Performance report",
            Action::MonitoringReport => "Monitoring report",
            Action::SaveReport => "Save monitoring report",
        }
    }

    /// Prompts collected on the input line before the action runs.
    pub fn prompts(&self) -> &'static [&'static str] {
        match self {
            Action::CreateProject | Action::FullAutomation => {
                &["Project idea", "Template (blank for none)"]
            }
            Action::InitProject => &["Project name (blank for none)"],
            Action::MonitorHeal => &["Session id"],
            Action::SetChatSession => &["Session id"],
            Action::SendChat => &["Message"],
            Action::Palette => &["What do you want to do?"],
            Action::Backup => &["Backup file (blank for backup.json)"],
            Action::SetGitToken => &["GitHub token"],
            Action::SetOpenRouterToken => &["OpenRouter token"],
            Action::SetModel => &["OpenRouter model"],
            Action::SetLang => &["Language"],
            Action::SaveReport => &["Report file"],
            _ => &[],
        }
    }

    /// Actions applied on the UI thread instead of a worker.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Action::ShowConfig
                | Action::SetGitToken
                | Action::SetOpenRouterToken
                | Action::SetModel
                | Action::SetLang
        )
    }
}

/// An action with its collected inputs, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub action: Action,
    pub inputs: Vec<String>,
}

impl Job {
    /// Input at `index`, trimmed; `None` when absent or blank.
    pub fn input(&self, index: usize) -> Option<&str> {
        self.inputs
            .get(index)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// Sent by a worker thread when its action completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    Finished { title: String, output: Vec<String> },
}

/// The inline input line while an action collects its prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub action: Action,
    pub buffer: String,
    values: Vec<String>,
}

impl InputLine {
    fn new(action: Action) -> Self {
        Self {
            action,
            buffer: String::new(),
            values: Vec::new(),
        }
    }

    pub fn prompt(&self) -> &'static str {
        self.action
            .prompts()
            .get(self.values.len())
            .copied()
            .unwrap_or("")
    }

    /// Whether the buffer may be submitted empty.
    fn accepts_blank(&self) -> bool {
        self.prompt().contains("blank")
    }
}

pub struct App {
    pub tab: Tab,
    selected: [usize; Tab::ALL.len()],
    pub input: Option<InputLine>,
    pub output: Vec<String>,
    pub status: String,
    pub chat_session: Option<String>,
    busy: usize,
    spinner_frame: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            tab: Tab::Projects,
            selected: [0; Tab::ALL.len()],
            input: None,
            output: Vec::new(),
            status: "Tab switches tabs, Enter runs an action, q quits".to_string(),
            chat_session: None,
            busy: 0,
            spinner_frame: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected[self.tab.index()]
    }

    pub fn selected_action(&self) -> Action {
        self.tab.actions()[self.selected()]
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.tab = self.tab.previous();
    }

    pub fn select_next(&mut self) {
        let count = self.tab.actions().len();
        let slot = &mut self.selected[self.tab.index()];
        *slot = (*slot + 1) % count;
    }

    pub fn select_previous(&mut self) {
        let count = self.tab.actions().len();
        let slot = &mut self.selected[self.tab.index()];
        *slot = (*slot + count - 1) % count;
    }

    /// Trigger the selected action: open the input line, or hand back a job.
    pub fn trigger(&mut self) -> Option<Job> {
        let action = self.selected_action();
        if action.prompts().is_empty() {
            return self.complete(action, Vec::new());
        }
        if action == Action::SendChat && self.chat_session.is_none() {
            self.status = "Choose a chat session first".to_string();
            return None;
        }
        self.input = Some(InputLine::new(action));
        None
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.push(c);
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.pop();
        }
    }

    pub fn cancel_input(&mut self) {
        if self.input.take().is_some() {
            self.status = "Cancelled".to_string();
        }
    }

    /// Accept the current buffer; returns a job after the last prompt.
    pub fn submit_input(&mut self) -> Option<Job> {
        let input = self.input.as_mut()?;
        if input.buffer.trim().is_empty() && !input.accepts_blank() {
            self.status = "A value is required".to_string();
            return None;
        }
        let value = std::mem::take(&mut input.buffer);
        input.values.push(value.trim().to_string());
        if input.values.len() < input.action.prompts().len() {
            return None;
        }
        let input = self.input.take()?;
        self.complete(input.action, input.values)
    }

    fn complete(&mut self, action: Action, mut inputs: Vec<String>) -> Option<Job> {
        match action {
            Action::SetChatSession => {
                let session = inputs.pop()?;
                self.status = format!("Chatting with session {}", session);
                self.chat_session = Some(session);
                None
            }
            Action::SendChat => {
                let session = self.chat_session.clone()?;
                inputs.insert(0, session);
                Some(Job { action, inputs })
            }
            _ => Some(Job { action, inputs }),
        }
    }

    pub fn job_started(&mut self, job: &Job) {
        self.busy += 1;
        self.status = format!("Running: {}", job.action.label());
    }

    pub fn handle_worker_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Finished { title, output } => {
                self.busy = self.busy.saturating_sub(1);
                self.status = format!("Finished: {}", title);
                self.push_output(&title, output);
            }
        }
    }

    /// Append a titled block to the output pane, dropping the oldest lines past the limit.
    pub fn push_output(&mut self, title: &str, lines: Vec<String>) {
        self.output.push(format!("── {} ──", title));
        for line in lines {
            self.output.extend(line.lines().map(str::to_string));
        }
        self.output.push(String::new());
        if self.output.len() > OUTPUT_LIMIT {
            let excess = self.output.len() - OUTPUT_LIMIT;
            self.output.drain(..excess);
        }
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub fn is_busy(&self) -> bool {
        self.busy > 0
    }

    pub fn tick(&mut self) {
        if self.is_busy() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn spinner(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(app: &mut App, tab: Tab, action: Action) {
        while app.tab != tab {
            app.next_tab();
        }
        while app.selected_action() != action {
            app.select_next();
        }
    }

    fn type_line(app: &mut App, text: &str) -> Option<Job> {
        for c in text.chars() {
            app.input_char(c);
        }
        app.submit_input()
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut app = App::new();
        app.previous_tab();
        assert_eq!(app.tab, Tab::Reports);
        app.next_tab();
        assert_eq!(app.tab, Tab::Projects);
    }

    #[test]
    fn test_selection_is_kept_per_tab() {
        let mut app = App::new();
        app.select_next();
        app.next_tab();
        assert_eq!(app.selected(), 0);
        app.previous_tab();
        assert_eq!(app.selected_action(), Action::FullAutomation);
        app.select_previous();
        app.select_previous();
        assert_eq!(app.selected_action(), Action::InitProject);
    }

    #[test]
    fn test_action_without_prompts_yields_job() {
        let mut app = App::new();
        select(&mut app, Tab::Monitor, Action::HiveStatus);
        let job = app.trigger().unwrap();
        assert_eq!(job.action, Action::HiveStatus);
        assert!(job.inputs.is_empty());
        assert!(app.input.is_none());
    }

    #[test]
    fn test_multi_prompt_input() {
        let mut app = App::new();
        assert!(app.trigger().is_none());
        assert_eq!(app.input.as_ref().unwrap().prompt(), "Project idea");

        assert!(type_line(&mut app, "  todo web app ").is_none());
        assert_eq!(
            app.input.as_ref().unwrap().prompt(),
            "Template (blank for none)"
        );

        let job = app.submit_input().unwrap();
        assert_eq!(job.action, Action::CreateProject);
        assert_eq!(job.input(0), Some("todo web app"));
        assert_eq!(job.input(1), None);
        assert!(app.input.is_none());
    }

    #[test]
    fn test_required_value_rejects_blank() {
        let mut app = App::new();
        app.trigger();
        assert!(app.submit_input().is_none());
        assert_eq!(app.status, "A value is required");
        assert_eq!(app.input.as_ref().unwrap().prompt(), "Project idea");
    }

    #[test]
    fn test_backspace_and_cancel() {
        let mut app = App::new();
        app.trigger();
        app.input_char('a');
        app.input_char('b');
        app.input_backspace();
        assert_eq!(app.input.as_ref().unwrap().buffer, "a");
        app.cancel_input();
        assert!(app.input.is_none());
        assert_eq!(app.status, "Cancelled");
    }

    #[test]
    fn test_chat_needs_a_session() {
        let mut app = App::new();
        select(&mut app, Tab::Chat, Action::SendChat);
        assert!(app.trigger().is_none());
        assert!(app.input.is_none());

        select(&mut app, Tab::Chat, Action::SetChatSession);
        app.trigger();
        assert!(type_line(&mut app, "session-42").is_none());
        assert_eq!(app.chat_session.as_deref(), Some("session-42"));

        select(&mut app, Tab::Chat, Action::SendChat);
        app.trigger();
        let job = type_line(&mut app, "status please").unwrap();
        assert_eq!(job.inputs, vec!["session-42", "status please"]);
    }

    #[test]
    fn test_worker_events_update_busy_and_output() {
        let mut app = App::new();
        let job = Job {
            action: Action::HiveStatus,
            inputs: Vec::new(),
        };
        app.job_started(&job);
        assert!(app.is_busy());
        let before = app.spinner();
        app.tick();
        assert_ne!(app.spinner(), before);

        app.handle_worker_event(WorkerEvent::Finished {
            title: "Hive status".to_string(),
            output: vec!["queen: active\nworkers: 4".to_string()],
        });
        assert!(!app.is_busy());
        assert_eq!(
            app.output,
            vec!["── Hive status ──", "queen: active", "workers: 4", ""]
        );
        assert_eq!(app.status, "Finished: Hive status");
    }

    #[test]
    fn test_output_is_bounded() {
        let mut app = App::new();
        let lines: Vec<String> = (0..OUTPUT_LIMIT + 10).map(|i| i.to_string()).collect();
        app.push_output("bulk", lines);
        assert_eq!(app.output.len(), OUTPUT_LIMIT);
        assert_eq!(app.output.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_every_tab_has_actions() {
        for tab in Tab::ALL {
            assert!(!tab.actions().is_empty(), "{} has no actions", tab.title());
        }
    }
}
