use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue, terminal,
};
use lifecore::{Automaton, Game, Pos2, RunState};
use std::{io, time::Duration};

pub enum ConsoleCommand {
    Exit,
    /// Start or pause automatic ticking
    Toggle,
    /// Advance exactly one generation
    Step,
    Reset,
    Handled,
}

/// Terminal character-grid front-end
pub struct ConsoleRender {
    tl: Pos2,
    report: String,
}
impl ConsoleRender {
    pub fn new(top_left: Pos2) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self {
            tl: top_left,
            report: String::new(),
        })
    }

    pub fn render<A: Automaton>(&self, game: &Game<A>) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        // the last row holds the footer
        let br = self.tl.saturating_add(Pos2 {
            x: cols as i32,
            y: rows.saturating_sub(1) as i32,
        });
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for cell in game.current().window(self.tl, br).iter() {
            let cell = cell - self.tl;
            queue!(stdout, cursor::MoveTo(cell.x as u16, cell.y as u16))?;
            io::Write::write_all(&mut stdout, "█".as_bytes())?;
        }

        // write footer
        let state = match game.state() {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Stopped => "stopped",
        };
        queue!(stdout, cursor::MoveTo(0, rows.saturating_sub(1)))?;
        let footer = format!(
            "[{state}] gen:{} alive:{} {} | space start/stop, n step, r reset, q quit",
            game.generation(),
            game.alive_count(),
            self.report
        );
        io::Write::write_all(&mut stdout, footer.as_bytes())?;

        io::Write::flush(&mut stdout)
    }

    /// Takes the next pending key press, waiting at most `timeout`
    pub fn poll_events(&mut self, timeout: Duration) -> io::Result<Option<ConsoleCommand>> {
        // make sure event is present for us to take
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let command = match event::read()? {
            event::Event::Key(KeyEvent {
                kind: KeyEventKind::Release,
                ..
            }) => ConsoleCommand::Handled,
            // CTRL+C
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }) => ConsoleCommand::Exit,
            event::Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => ConsoleCommand::Exit,
                KeyCode::Char(' ') => ConsoleCommand::Toggle,
                KeyCode::Char('n') | KeyCode::Enter => ConsoleCommand::Step,
                KeyCode::Char('r') => ConsoleCommand::Reset,
                // arrows to move grid
                KeyCode::Up => self.pan(0, -1),
                KeyCode::Down => self.pan(0, 1),
                KeyCode::Left => self.pan(-1, 0),
                KeyCode::Right => self.pan(1, 0),
                _ => ConsoleCommand::Handled,
            },
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(command))
    }

    fn pan(&mut self, x: i32, y: i32) -> ConsoleCommand {
        self.tl = self.tl.saturating_add(Pos2 { x, y });
        ConsoleCommand::Handled
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // if we can enable it, we should be able to disable it
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
    }
}
