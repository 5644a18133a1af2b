use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::model::TagsInputConfig;
use crate::model::host::HostSelect;
use crate::ops::events::TagEvent;
use crate::widget::TagsInput;

use super::input;
use super::render;
use super::theme::Theme;

/// What a mouse click at a screen cell lands on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// The body of the chip with this value
    Chip(String),
    /// The `×` remove affordance of the chip with this value
    Remove(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hitbox {
    pub area: Rect,
    pub target: HitTarget,
}

/// Main application state
pub struct App {
    pub input: TagsInput,
    pub theme: Theme,
    pub should_quit: bool,
    /// Notifications received from the widget, most recent last
    pub events: Rc<RefCell<Vec<TagEvent>>>,
    /// Chip areas from the last render, for mouse hit-testing
    pub hitboxes: Vec<Hitbox>,
    /// Container area from the last render
    pub container_area: Rect,
}

impl App {
    pub fn new(config: &TagsInputConfig) -> Self {
        let mut input = TagsInput::new(config);
        input.focus();

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        input.subscribe(move |e: &TagEvent| sink.borrow_mut().push(e.clone()));

        App {
            input,
            theme: Theme::from_config(&config.ui),
            should_quit: false,
            events,
            hitboxes: Vec::new(),
            container_area: Rect::default(),
        }
    }

    /// Describe the most recent notification for the status row.
    pub fn last_event_text(&self) -> Option<String> {
        let events = self.events.borrow();
        // A trailing bare `Changed` only comes from a bulk clear.
        events.last().map(|e| match e {
            TagEvent::ItemAdded(item) => format!("added {}", item.text()),
            TagEvent::ItemRemoved(item) => format!("removed {}", item.text()),
            TagEvent::Changed => "cleared".to_string(),
        })
    }

    pub fn hit_test(&self, col: u16, row: u16) -> Option<&HitTarget> {
        self.hitboxes
            .iter()
            .find(|h| {
                col >= h.area.x
                    && col < h.area.x + h.area.width
                    && row >= h.area.y
                    && row < h.area.y + h.area.height
            })
            .map(|h| &h.target)
    }

    /// Tear down the widget and hand back the host select.
    pub fn finish(self) -> HostSelect {
        self.input.destroy()
    }
}

/// Run the interactive editor until the user quits; returns the host as
/// the widget left it.
pub fn run(config: &TagsInputConfig) -> Result<HostSelect, Box<dyn std::error::Error>> {
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;
    Ok(app.finish())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        } else {
            // Idle tick: a duplicate's pulse has been visible for one frame.
            app.input.settle_pulses();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
