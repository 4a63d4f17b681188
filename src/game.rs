use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};

use gridsnake::{Cell, Direction, GameOverReason, Grid, Session, Status};

const INPUT_POLL: Duration = Duration::from_millis(10);

/// Largest grid side the terminal can address once the border and the two
/// status lines under the board are added.
pub const MAX_SIDE: u16 = u16::MAX - 3;

/// Terminal size of the bordered board, or `None` if it does not fit.
fn board_size(grid: Grid) -> Option<(u16, u16)> {
    let side = |n: i32| u16::try_from(n).ok().filter(|&n| n <= MAX_SIDE);
    Some((side(grid.cols())? + 2, side(grid.rows())? + 2))
}

enum Command {
    Steer(Direction),
    Restart,
    Quit,
}

fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::Steer(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::Steer(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::Steer(Direction::Right)),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Terminal front-end. The board is drawn with a one-cell `#` border, so
/// grid cell `(x, y)` lands on terminal column `x + 1`, row `y + 1`.
pub struct Game {
    session: Session,
    out: Stdout,
    width: u16,
    height: u16,
}

impl Game {
    pub fn new(session: Session) -> Result<Self> {
        let grid = session.grid();
        let (width, height) = board_size(grid).ok_or_else(|| {
            anyhow!(
                "a {}x{} grid does not fit a terminal (max side {})",
                grid.cols(),
                grid.rows(),
                MAX_SIDE
            )
        })?;
        Ok(Game {
            session,
            out: stdout(),
            width,
            height,
        })
    }

    pub fn run(&mut self) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide)?;

        let result = self.game_loop();

        // Restore the terminal even if the loop failed.
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        println!("Final score: {}", self.session.score());
        result
    }

    fn game_loop(&mut self) -> std::io::Result<()> {
        self.draw()?;
        let mut last_tick = Instant::now();

        loop {
            if event::poll(INPUT_POLL)? {
                if let Event::Key(key) = event::read()? {
                    match command_for(key) {
                        Some(Command::Quit) => return Ok(()),
                        Some(Command::Steer(direction)) => self.session.steer(direction),
                        Some(Command::Restart) if !self.session.status().is_running() => {
                            self.session.restart();
                            self.draw()?;
                            last_tick = Instant::now();
                        }
                        _ => {}
                    }
                }
            }

            // The interval shrinks as the snake eats.
            if last_tick.elapsed() >= self.session.tick_interval() {
                self.session.tick();
                self.draw()?;
                last_tick = Instant::now();
            }
        }
    }

    fn put(&mut self, cell: Cell, glyph: char) -> std::io::Result<()> {
        if !self.session.grid().in_bounds(cell) {
            return Ok(());
        }
        // In bounds implies both coordinates are below MAX_SIDE.
        if let (Ok(x), Ok(y)) = (u16::try_from(cell.x), u16::try_from(cell.y)) {
            queue!(self.out, MoveTo(x + 1, y + 1), Print(glyph))?;
        }
        Ok(())
    }

    fn draw(&mut self) -> std::io::Result<()> {
        let (width, height) = (self.width, self.height);
        queue!(self.out, Clear(ClearType::All))?;

        let border = "#".repeat(width as usize);
        queue!(self.out, MoveTo(0, 0), Print(&border))?;
        for y in 1..height - 1 {
            queue!(
                self.out,
                MoveTo(0, y),
                Print('#'),
                MoveTo(width - 1, y),
                Print('#')
            )?;
        }
        queue!(self.out, MoveTo(0, height - 1), Print(&border))?;

        if let Some(food) = self.session.food_position() {
            self.put(food, '*')?;
        }
        // Tail first so the head glyph wins on tail re-entry.
        let body: Vec<Cell> = self.session.snake().body().collect();
        for (i, &cell) in body.iter().enumerate().rev() {
            self.put(cell, if i == 0 { 'O' } else { 'o' })?;
        }

        let banner = match self.session.status() {
            Status::Running => "Arrows/WASD to move, 'q' to quit",
            Status::GameOver(GameOverReason::HitWall) => {
                "Hit the wall! Space to restart, 'q' to quit"
            }
            Status::GameOver(GameOverReason::HitSelf) => {
                "Bit yourself! Space to restart, 'q' to quit"
            }
            Status::Stalemate => "Board full! Space to restart, 'q' to quit",
        };
        queue!(
            self.out,
            MoveTo(0, height),
            Print(format!(
                "Score: {}  Speed: {:.1}",
                self.session.score(),
                self.session.speed()
            )),
            MoveTo(0, height + 1),
            Print(banner)
        )?;

        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsnake::GameConfig;

    #[test]
    fn test_board_size_adds_border() {
        let grid = Grid::new(30, 20).unwrap();
        assert_eq!(board_size(grid), Some((32, 22)));

        let grid = Grid::new(MAX_SIDE as i32, 1).unwrap();
        assert_eq!(board_size(grid), Some((u16::MAX - 1, 3)));
    }

    #[test]
    fn test_board_size_rejects_unaddressable_grids() {
        assert_eq!(board_size(Grid::new(65535, 20).unwrap()), None);
        assert_eq!(board_size(Grid::new(70000, 20).unwrap()), None);
        assert_eq!(board_size(Grid::new(20, MAX_SIDE as i32 + 1).unwrap()), None);
    }

    #[test]
    fn test_oversized_grid_fails_before_terminal_setup() {
        let config = GameConfig::new(65535, 20);
        assert_eq!(config.validate(), Ok(()));
        let session = Session::with_seed(config, 1).unwrap();
        assert!(Game::new(session).is_err());

        let session = Session::with_seed(GameConfig::default(), 1).unwrap();
        let game = Game::new(session).unwrap();
        assert_eq!((game.width, game.height), (32, 22));
    }
}
