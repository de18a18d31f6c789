//! TUI rendering and terminal management (impure shell).
//!
//! The thin host adapter around [`PayloadViewController`]: it owns the
//! terminal, translates key events into controller calls, and renders
//! whatever the controller's render instructions say. All decisions
//! (consent, mode, export lifecycle) live in the state layer.

pub mod adapter;
pub mod consent_modal;
pub mod export;
pub mod menu;

pub use adapter::PayloadAdapter;
pub use consent_modal::render_consent_modal;
pub use export::FileExportHandler;
pub use menu::ModeMenuBar;

use crate::consent::SharedConsentStore;
use crate::model::{AppError, MenuEntry};
use crate::source::{HttpLog, LogSource};
use crate::state::{GateDecision, GateOutcome, PayloadViewController, PromptChoice};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::debug;

/// Host-level options for one payload view.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Position of the transaction in the capture log.
    pub index: usize,
    /// Show the paired response instead of the request.
    pub show_reply: bool,
    /// Directory exported payloads are written to.
    pub export_dir: PathBuf,
}

/// Open the payload view over the given capture log and run it until the
/// user closes it.
///
/// `log` is `None` when no capture session is active; the controller turns
/// that into [`crate::model::PayloadViewError::SessionUnavailable`] and the
/// caller reports it without ever entering the alternate screen.
pub fn run(
    log: Option<&HttpLog>,
    options: &ViewOptions,
    store: SharedConsentStore,
) -> Result<(), AppError> {
    let controller = PayloadViewController::initialize(
        log.map(|l| l as &dyn LogSource),
        options.index,
        options.show_reply,
        store,
    )?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let mut app = TuiApp::with_terminal(terminal, controller, options.export_dir.clone());
    let result = app.run();

    // Best-effort restore; the run error (if any) matters more.
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);

    result.map_err(AppError::Terminal)
}

/// The payload view host.
///
/// Generic over the backend so tests can drive it with `TestBackend`.
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    controller: PayloadViewController,
    adapter: Rc<RefCell<PayloadAdapter>>,
    menu: Rc<RefCell<ModeMenuBar>>,
    /// Whether the data source is bound (consent gate has revealed).
    revealed: bool,
    /// Whether the consent prompt is currently blocking the view.
    prompting: bool,
    status: Option<String>,
    scroll: usize,
    should_close: bool,
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wire the controller to a ready terminal.
    ///
    /// Performs the host lifecycle sequence: create the render adapter,
    /// register it with the export binding, attach the export capability,
    /// construct the mode menu, and run the visibility gate.
    pub fn with_terminal(
        terminal: Terminal<B>,
        mut controller: PayloadViewController,
        export_dir: PathBuf,
    ) -> Self {
        let render = controller.render_instructions();
        let adapter = Rc::new(RefCell::new(PayloadAdapter::new(
            render.record.clone(),
            render.show_reply,
        )));
        controller.register_adapter(adapter.clone());
        controller.on_attach(Rc::new(FileExportHandler::new(export_dir)));

        let menu = Rc::new(RefCell::new(ModeMenuBar::new()));
        controller.on_mode_menu_initialized(menu.clone());

        let (revealed, prompting) = match controller.on_become_visible() {
            GateDecision::Reveal => (true, false),
            GateDecision::Prompt => (false, true),
        };
        debug!(revealed, prompting, "payload view visible");

        Self {
            terminal,
            controller,
            adapter,
            menu,
            revealed,
            prompting,
            status: None,
            scroll: 0,
            should_close: false,
        }
    }

    /// Run the event loop until the view closes.
    pub fn run(&mut self) -> io::Result<()> {
        self.draw()?;
        while !self.should_close {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key);
                    self.draw()?;
                }
                Event::Resize(_, _) => self.draw()?,
                _ => {}
            }
        }
        // Leaving the foreground context releases the export capability.
        self.controller.on_detach();
        Ok(())
    }

    /// Route one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.prompting {
            self.handle_prompt_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_close = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_close = true;
            }
            KeyCode::Char('p') => self.select_mode(MenuEntry::PrintableText),
            KeyCode::Char('x') => self.select_mode(MenuEntry::HexDump),
            KeyCode::Char('e') => self.export(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(self.page_height()),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(self.page_height()),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll = usize::MAX,
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let choice = match key.code {
            KeyCode::Enter | KeyCode::Char('y') => PromptChoice::Accept,
            KeyCode::Char('n') => PromptChoice::Decline,
            KeyCode::Esc => PromptChoice::Dismiss,
            _ => return,
        };
        match self.controller.resolve_prompt(choice) {
            GateOutcome::Reveal => {
                self.revealed = true;
                self.prompting = false;
            }
            GateOutcome::Close => self.should_close = true,
        }
    }

    fn select_mode(&mut self, entry: MenuEntry) {
        if self.controller.on_menu_item_selected(entry) {
            let printable = self.controller.mode().is_printable();
            self.adapter
                .borrow_mut()
                .set_display_as_printable_text(printable);
            self.scroll = 0;
        }
    }

    fn export(&mut self) {
        if !self.revealed {
            return;
        }
        self.status = Some(match self.adapter.borrow().export_current() {
            Some(Ok(path)) => format!("exported to {}", path.display()),
            Some(Err(e)) => format!("export failed: {e}"),
            None => "export unavailable".to_string(),
        });
    }

    fn page_height(&self) -> usize {
        self.terminal
            .size()
            .map(|size| size.height.saturating_sub(2) as usize)
            .unwrap_or(1)
            .max(1)
    }

    /// Render the current state.
    pub fn draw(&mut self) -> io::Result<()> {
        let menu_line = self.menu.borrow().line();
        let lines: Vec<Line<'static>> = if self.revealed {
            self.adapter.borrow().lines()
        } else {
            Vec::new()
        };
        let status = self.status.clone();
        let prompting = self.prompting;

        // Clamp before slicing so End/G land on the last page.
        let viewport = self
            .terminal
            .size()
            .map(|size| size.height.saturating_sub(2) as usize)
            .unwrap_or(0)
            .max(1);
        self.scroll = self.scroll.min(lines.len().saturating_sub(viewport));
        let scroll = self.scroll;

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(frame.area());

            frame.render_widget(Paragraph::new(menu_line), chunks[0]);

            let visible_end = (scroll + chunks[1].height as usize).min(lines.len());
            let visible = lines
                .get(scroll..visible_end)
                .unwrap_or_default()
                .to_vec();
            frame.render_widget(Paragraph::new(visible), chunks[1]);

            let status_line = match &status {
                Some(notice) => Line::from(notice.clone()),
                None => Line::styled(
                    " q quit  p/x mode  e export  j/k scroll",
                    Style::default().fg(Color::DarkGray),
                ),
            };
            frame.render_widget(Paragraph::new(status_line), chunks[2]);

            if prompting {
                render_consent_modal(frame);
            }
        })?;
        Ok(())
    }
}
