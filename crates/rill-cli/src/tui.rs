use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use rill_core::{Coord, GridWorld};
use rill_sim::{SimulationEngine, SimulationState};

/// Interactive state for the play view.
struct App {
    name: String,
    world: GridWorld,
    state: SimulationState,
    engine: SimulationEngine,
    cursor: Coord,
    paused: bool,
    tick: u64,
}

impl App {
    fn new(name: &str, world: GridWorld) -> Self {
        let cursor = Coord::new(world.width() / 2, world.height() / 2);
        Self {
            name: name.to_string(),
            world,
            state: SimulationState::new(),
            engine: SimulationEngine::default(),
            cursor,
            paused: false,
            tick: 0,
        }
    }

    fn step(&mut self) {
        self.engine.tick(&self.world, &mut self.state);
        self.tick += 1;
    }

    fn reset(&mut self) {
        self.state = SimulationState::new();
        self.tick = 0;
    }

    /// Toggle a wall under the cursor, clearing any water on the tile.
    /// Emitter and sink tiles refuse the toggle.
    fn toggle_wall(&mut self) {
        let changed = if self.world.is_wall(self.cursor) {
            self.world.remove_wall(self.cursor)
        } else {
            self.world.add_wall(self.cursor)
        };
        if changed {
            self.state.water.remove(&self.cursor);
        }
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let next = Coord::new(self.cursor.x + dx, self.cursor.y + dy);
        if self.world.in_bounds(next) {
            self.cursor = next;
        }
    }
}

/// Run the interactive play view for a level.
pub fn run(name: &str, world: GridWorld) -> Result<(), String> {
    enable_raw_mode().map_err(|e| e.to_string())?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| e.to_string())?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| e.to_string())?;

    let result = event_loop(&mut terminal, App::new(name, world));

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map_err(|e| e.to_string())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(u64::from(app.engine.config().step_ms));
    loop {
        terminal.draw(|frame| draw(frame, &app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') => app.paused = !app.paused,
                    KeyCode::Char('n') => app.step(),
                    KeyCode::Char('r') => app.reset(),
                    KeyCode::Char('w') => app.toggle_wall(),
                    KeyCode::Up => app.move_cursor(0, -1),
                    KeyCode::Down => app.move_cursor(0, 1),
                    KeyCode::Left => app.move_cursor(-1, 0),
                    KeyCode::Right => app.move_cursor(1, 0),
                    _ => {}
                }
            }
        } else if !app.paused {
            app.step();
        }
    }
}

fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Board
            Constraint::Length(1), // Key help
        ])
        .split(frame.area());

    let mut lines = Vec::new();
    for y in 0..app.world.height() {
        let mut spans = Vec::new();
        for x in 0..app.world.width() {
            let pos = Coord::new(x, y);
            let (glyph, style) = tile_appearance(app, pos);
            let style = if pos == app.cursor {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            };
            spans.push(Span::styled(glyph.to_string(), style));
        }
        lines.push(Line::from(spans));
    }

    let paused = if app.paused { " [paused]" } else { "" };
    let title = format!(" {} | tick {}{} ", app.name, app.tick, paused);
    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(board, chunks[0]);

    let help = Paragraph::new(" space pause | n step | r reset | arrows cursor | w wall | q quit ")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[1]);
}

fn tile_appearance(app: &App, pos: Coord) -> (char, Style) {
    if app.world.is_wall(pos) {
        return ('#', Style::default().fg(Color::Gray));
    }
    if app.world.is_sink(pos) {
        return ('S', Style::default().fg(Color::Magenta));
    }
    if let Some(emitter) = app.world.emitters().iter().find(|e| e.pos == pos) {
        return (emitter.dir.glyph(), Style::default().fg(Color::Yellow));
    }
    if let Some(cell) = app.state.water.get(&pos) {
        return (cell.dir.glyph(), Style::default().fg(owner_color(cell.owner.0)));
    }
    ('.', Style::default().fg(Color::DarkGray))
}

fn owner_color(owner: u32) -> Color {
    const COLORS: [Color; 4] = [
        Color::Cyan,
        Color::LightBlue,
        Color::LightGreen,
        Color::LightMagenta,
    ];
    COLORS[owner as usize % COLORS.len()]
}
