use std::io::{Stdout, Write};

use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEventKind},
    execute, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::env::{Action, Environment};

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The goal was reached after this many moves
    Won { steps: usize },
    /// The player quit after this many moves
    Quit { steps: usize },
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(Action),
    Quit,
}

/// Map a key to a command. W/A/S/D and the arrow keys move, Q and Esc quit.
fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Up => Some(Command::Move(Action::North)),
        KeyCode::Down => Some(Command::Move(Action::South)),
        KeyCode::Left => Some(Command::Move(Action::West)),
        KeyCode::Right => Some(Command::Move(Action::East)),
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c) => match c.to_ascii_uppercase() {
            'W' => Some(Command::Move(Action::North)),
            'S' => Some(Command::Move(Action::South)),
            'A' => Some(Command::Move(Action::West)),
            'D' => Some(Command::Move(Action::East)),
            'Q' => Some(Command::Quit),
            _ => None,
        },
        _ => None,
    }
}

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate screen on panic
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
/// Also sets a panic hook to restore terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    Ok(())
}

/// Restore terminal to original state
/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Redraw the whole screen: the maze, the move count and a status line.
fn draw<W: Write>(
    out: &mut W,
    env: &Environment,
    steps: usize,
    status: &str,
) -> std::io::Result<()> {
    queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    // Raw mode does not return the carriage on a bare line feed
    for line in env.to_string().lines() {
        queue!(out, style::Print(line), style::Print("\r\n"))?;
    }
    queue!(
        out,
        style::PrintStyledContent(format!("Moves: {steps}\r\n").with(Color::Blue)),
        style::PrintStyledContent(status.with(Color::Yellow).attribute(Attribute::Bold)),
        style::Print("\r\n"),
    )?;
    out.flush()
}

/// Play the maze interactively until the goal is reached or the player quits.
///
/// The terminal must already be in raw mode, see [`setup_terminal`].
pub fn play(stdout: &mut Stdout, env: &mut Environment) -> std::io::Result<PlayOutcome> {
    const PROMPT: &str = "Action [W S A D or arrows; Q - Quit]";

    env.reset();
    let mut steps = 0;
    tracing::info!("[play] starting at {:?}, goal at {:?}", env.start(), env.goal());
    draw(stdout, env, steps, PROMPT)?;

    loop {
        let code = match event::read()? {
            event::Event::Key(event::KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => code,
            event::Event::Resize(_, _) => {
                draw(stdout, env, steps, PROMPT)?;
                continue;
            }
            _ => continue, // Ignore other events
        };

        match command_for(code) {
            Some(Command::Quit) => {
                tracing::info!("[play] quit after {} moves", steps);
                return Ok(PlayOutcome::Quit { steps });
            }
            Some(Command::Move(action)) => {
                let step = env.step(action);
                steps += 1;
                if step.done {
                    draw(stdout, env, steps, "You won! Press any key to exit...")?;
                    tracing::info!("[play] goal reached in {} moves", steps);
                    wait_for_key()?;
                    return Ok(PlayOutcome::Won { steps });
                }
                draw(stdout, env, steps, PROMPT)?;
            }
            None => {}
        }
    }
}

/// Block until any key is pressed.
fn wait_for_key() -> std::io::Result<()> {
    loop {
        if let event::Event::Key(event::KeyEvent {
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvConfig;
    use crate::maze::Grid;

    #[test]
    fn test_key_bindings() {
        let moves = [
            (KeyCode::Char('w'), Action::North),
            (KeyCode::Char('S'), Action::South),
            (KeyCode::Char('a'), Action::West),
            (KeyCode::Right, Action::East),
        ];
        for (code, action) in moves {
            assert_eq!(command_for(code), Some(Command::Move(action)));
        }
        assert_eq!(command_for(KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(command_for(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(command_for(KeyCode::Char('x')), None);
        assert_eq!(command_for(KeyCode::Enter), None);
    }

    #[test]
    fn test_draw_uses_carriage_returns() {
        let env = Environment::new(Grid::new(2, 3).unwrap(), EnvConfig::default()).unwrap();
        let mut out = Vec::new();
        draw(&mut out, &env, 3, "status").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("+---+---+---+\r\n"));
        assert!(text.contains("Moves: 3"));
        assert!(text.contains("status"));
    }
}
