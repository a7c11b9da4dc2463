use anyhow::{Context, Result, bail};
use colored::*;
use std::io::{self, IsTerminal};
use std::sync::Arc;

use crate::clipboard::{ClipboardWriter, CommandClipboard};
use crate::config::Config;
use crate::confirm::{AlwaysConfirm, Confirmer, StdinConfirmer};
use crate::logging::{self, LogSink};
use crate::palette::{EditorBuffer, EditorField, Palette, PaletteController, matches};
use crate::session::FillSession;
use crate::store::{JsonFileStore, MemoryStore, Prompt, PromptDraft, RecordStore};
use crate::tui;

use super::args::{AddArgs, Cli, ClipArgs, Command, DeleteArgs, ListArgs, RenderArgs};
use super::config_cmd;
use super::util;

const CLIP_TAG: &str = "clipped";

pub(crate) async fn run(cli: Cli, config: Config) -> Result<()> {
    let sink = if cli.command.is_none() {
        LogSink::File
    } else {
        LogSink::Stderr
    };
    if let Err(error) = logging::init(&config.logging, cli.verbose, sink) {
        eprintln!("⚠️  Logging disabled: {error:#}");
    }
    if !cli.scratch {
        log::debug!("using prompt store {}", config.storage.path.display());
    }

    let store = open_store(&config, cli.scratch);
    match cli.command {
        None => run_palette(store, &config).await,
        Some(Command::List(args)) => handle_list(args, store).await,
        Some(Command::Add(args)) => handle_add(args, store).await,
        Some(Command::Render(args)) => handle_render(args, store, &config).await,
        Some(Command::Clip(args)) => handle_clip(args, store).await,
        Some(Command::Delete(args)) => handle_delete(args, store).await,
        Some(Command::Config(args)) => config_cmd::handle_config(args, config),
    }
}

fn open_store(config: &Config, scratch: bool) -> Arc<dyn RecordStore> {
    if scratch {
        log::info!("using in-memory scratch store");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(JsonFileStore::new(&config.storage.path))
    }
}

fn open_clipboard(config: &Config) -> Arc<dyn ClipboardWriter> {
    Arc::new(CommandClipboard::from_config(
        config.clipboard.command.as_deref(),
    ))
}

async fn run_palette(store: Arc<dyn RecordStore>, config: &Config) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        bail!("The palette needs an interactive terminal. Try 'promptflow list' instead.");
    }

    let controller = PaletteController::new(
        Palette::new(config.ui.list_height),
        store,
        open_clipboard(config),
        Box::new(StdinConfirmer),
    );
    tui::run(controller).await
}

async fn handle_list(args: ListArgs, store: Arc<dyn RecordStore>) -> Result<()> {
    let prompts = store.list().await?;
    let query = args.query.unwrap_or_default();
    let shown: Vec<&Prompt> = prompts
        .iter()
        .filter(|prompt| matches(prompt, &query))
        .collect();

    if shown.is_empty() {
        println!("{}", "No prompts found.".yellow());
        return Ok(());
    }

    for prompt in shown {
        print_prompt_line(prompt);
    }
    Ok(())
}

fn print_prompt_line(prompt: &Prompt) {
    let tags = if prompt.tags.is_empty() {
        String::new()
    } else {
        format!(" #{}", prompt.tags.join(" #"))
    };
    println!(
        "{}  {}{}  {}",
        prompt.id.dimmed(),
        prompt.title.bold(),
        tags.cyan(),
        format!("({} uses)", prompt.usage_count).dimmed()
    );
}

async fn handle_add(args: AddArgs, store: Arc<dyn RecordStore>) -> Result<()> {
    let content = match args.content {
        Some(content) => content,
        None => util::read_piped_stdin()?.unwrap_or_default(),
    };

    let buffer = EditorBuffer {
        editing: None,
        title: args.title,
        tags: args.tags,
        content,
        focus: EditorField::Title,
    };
    let draft = buffer.validate()?;

    let created = store.create(draft).await?;
    println!("✅ Saved '{}' ({})", created.title.bold(), created.id.dimmed());
    Ok(())
}

async fn handle_render(
    args: RenderArgs,
    store: Arc<dyn RecordStore>,
    config: &Config,
) -> Result<()> {
    let prompts = store.list().await?;
    let prompt = find_prompt(&prompts, &args.prompt)?;
    let values = util::parse_var_pairs(&args.vars)?;

    let text = match FillSession::start(prompt.content.clone()) {
        Some(mut session) => {
            for (name, value) in values {
                session.set_value(&name, value);
            }
            session.complete()
        }
        None => prompt.content.clone(),
    };

    if !args.copy {
        println!("{text}");
        return Ok(());
    }

    let clipboard = open_clipboard(config);
    clipboard
        .write(&text)
        .await
        .with_context(|| format!("Failed to copy using {}", clipboard.name()))?;
    store.record_usage(prompt.clone()).await?;
    println!("{}", "📋 Copied to clipboard".green());
    Ok(())
}

async fn handle_clip(args: ClipArgs, store: Arc<dyn RecordStore>) -> Result<()> {
    let text = if args.text.is_empty() {
        util::read_piped_stdin()?.unwrap_or_default()
    } else {
        args.text.join(" ")
    };
    let text = text.trim();
    if text.is_empty() {
        bail!("Nothing to clip. Pass text or pipe it on stdin.");
    }

    let draft = PromptDraft::new(util::clip_title(text), text, vec![CLIP_TAG.to_string()]);
    let created = store.create(draft).await?;
    println!("✅ Saved '{}' ({})", created.title.bold(), created.id.dimmed());
    Ok(())
}

async fn handle_delete(args: DeleteArgs, store: Arc<dyn RecordStore>) -> Result<()> {
    let prompts = store.list().await?;
    let Some(prompt) = prompts.iter().find(|prompt| prompt.id == args.id) else {
        bail!("No prompt with id '{}'", args.id);
    };

    let confirmer: Box<dyn Confirmer> = if args.yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(StdinConfirmer)
    };
    println!("{}", prompt.title.bold());
    if !confirmer.confirm("Delete this prompt?") {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    }

    store.delete(&prompt.id).await?;
    println!("🗑️  Deleted '{}'", prompt.title);
    Ok(())
}

/// Look a prompt up by id, then by title ignoring case.
fn find_prompt<'a>(prompts: &'a [Prompt], key: &str) -> Result<&'a Prompt> {
    if let Some(prompt) = prompts.iter().find(|prompt| prompt.id == key) {
        return Ok(prompt);
    }

    let by_title: Vec<&Prompt> = prompts
        .iter()
        .filter(|prompt| prompt.title.eq_ignore_ascii_case(key))
        .collect();
    match by_title.as_slice() {
        [prompt] => Ok(*prompt),
        [] => bail!("No prompt with id or title '{key}'"),
        _ => bail!("Several prompts are titled '{key}'; use the id instead"),
    }
}
