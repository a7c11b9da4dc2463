//! Full-screen terminal front end for the palette.

mod keys;
mod terminal;
mod view;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::style::Color;

use crate::confirm::Confirmer;
use crate::palette::{Effect, PaletteController};

use keys::translate;
use terminal::{Style, Terminal};

/// Take over the terminal and run the palette until the user quits.
///
/// The terminal is restored even when the loop fails.
pub async fn run(mut controller: PaletteController) -> Result<()> {
    Terminal::init().context("Failed to prepare the terminal")?;
    controller.set_confirmer(Box::new(TerminalConfirmer));

    let outcome = event_loop(&mut controller).await;
    let restored = Terminal::kill().context("Failed to restore the terminal");

    outcome?;
    restored
}

async fn event_loop(controller: &mut PaletteController) -> Result<()> {
    let signals = controller.load().await;
    log::debug!("initial load produced {} signal(s)", signals.len());
    redraw(controller)?;

    loop {
        let event = tokio::task::spawn_blocking(event::read)
            .await
            .context("Input reader stopped")??;

        let signals = match event {
            Event::Key(key_event) => {
                let Some(key) = translate(key_event) else {
                    continue;
                };
                controller.handle_key(key).await
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let size = Terminal::size()?;
                let Some(index) =
                    view::list_index_at(controller.palette(), size, mouse.row as usize)
                else {
                    continue;
                };
                controller.select_index(index).await
            }
            Event::Resize(..) => {
                Terminal::clear_screen()?;
                Vec::new()
            }
            _ => continue,
        };

        if signals.contains(&Effect::Quit) {
            log::debug!("quit requested");
            return Ok(());
        }
        for signal in signals {
            log::trace!("ui signal {signal:?}");
        }

        redraw(controller)?;
    }
}

/// Fit the list to the current terminal height, then draw.
fn redraw(controller: &mut PaletteController) -> Result<()> {
    let size = Terminal::size()?;
    controller.palette_mut().fit_list_to(view::list_rows(size));
    view::draw(controller.palette(), size)?;
    Ok(())
}

/// Asks on the notice row and waits for a single key; only `y` agrees.
struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, message: &str) -> bool {
        match ask(message) {
            Ok(answer) => answer,
            Err(error) => {
                log::warn!("confirmation failed: {error}");
                false
            }
        }
    }
}

fn ask(message: &str) -> Result<bool, std::io::Error> {
    let size = Terminal::size()?;
    Terminal::print_styled_row(
        size.height.saturating_sub(2),
        &format!("{message} [y/N]"),
        Style::fg(Color::Yellow).bold(),
    )?;
    Terminal::execute()?;

    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            return Ok(matches!(key.code, KeyCode::Char('y' | 'Y')));
        }
    }
}
