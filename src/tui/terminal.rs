use std::io::{Error, Write, stdout};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{
    Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
    LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode, size,
};
use crossterm::{Command, queue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

/// Thin wrapper over queued crossterm commands on stdout.
pub struct Terminal;

impl Terminal {
    pub fn init() -> Result<(), Error> {
        enable_raw_mode()?;

        Self::queue_command(EnterAlternateScreen)?;
        Self::queue_command(EnableMouseCapture)?;
        Self::queue_command(DisableLineWrap)?;
        Self::queue_command(SetTitle("promptflow"))?;
        Self::clear_screen()?;
        Self::execute()
    }

    pub fn kill() -> Result<(), Error> {
        Self::queue_command(DisableMouseCapture)?;
        Self::queue_command(LeaveAlternateScreen)?;
        Self::queue_command(EnableLineWrap)?;
        Self::show_cursor()?;
        Self::execute()?;

        disable_raw_mode()
    }

    pub fn size() -> Result<Size, Error> {
        let (width, height) = size()?;
        Ok(Size {
            width: width as usize,
            height: height as usize,
        })
    }

    pub fn clear_screen() -> Result<(), Error> {
        Self::queue_command(Clear(ClearType::All))
    }

    pub fn hide_cursor() -> Result<(), Error> {
        Self::queue_command(Hide)
    }

    pub fn show_cursor() -> Result<(), Error> {
        Self::queue_command(Show)
    }

    pub fn move_cursor_to(row: usize, col: usize) -> Result<(), Error> {
        Self::queue_command(MoveTo(col as u16, row as u16))
    }

    pub fn print_styled_row(row: usize, text: &str, style: Style) -> Result<(), Error> {
        Self::move_cursor_to(row, 0)?;
        Self::queue_command(Clear(ClearType::CurrentLine))?;
        if let Some(color) = style.foreground {
            Self::queue_command(SetForegroundColor(color))?;
        }
        if style.bold {
            Self::queue_command(SetAttribute(Attribute::Bold))?;
        }
        if style.reverse {
            Self::queue_command(SetAttribute(Attribute::Reverse))?;
        }
        Self::queue_command(Print(text))?;
        Self::queue_command(SetAttribute(Attribute::Reset))?;
        Self::queue_command(ResetColor)
    }

    pub fn execute() -> Result<(), Error> {
        stdout().flush()
    }

    fn queue_command<T: Command>(command: T) -> Result<(), Error> {
        queue!(stdout(), command)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub foreground: Option<Color>,
    pub bold: bool,
    pub reverse: bool,
}

impl Style {
    pub fn fg(color: Color) -> Self {
        Self {
            foreground: Some(color),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}
