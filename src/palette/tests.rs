use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::clipboard::{ClipboardError, ClipboardWriter};
use crate::confirm::Confirmer;
use crate::error::PaletteError;
use crate::store::{MemoryStore, Prompt, PromptDraft, RecordStore};

use super::filter::{filter, is_create_command};
use super::types::Completion;
use super::{EditorField, Effect, Key, Mode, NoticeLevel, Palette, PaletteController, Viewport};

fn prompt(id: &str, title: &str, content: &str, tags: &[&str]) -> Prompt {
    Prompt {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        created_at: 1,
        updated_at: 1,
        usage_count: 0,
        is_favorite: false,
    }
}

fn sample_prompts() -> Vec<Prompt> {
    vec![
        prompt("1", "Cold Outreach Email", "Hi {{name}}, about {{topic}}", &["marketing", "email"]),
        prompt("2", "Code Review", "Review this diff carefully.", &["coding"]),
        prompt("3", "Story", "Write a {{tone}} story", &["fun"]),
    ]
}

fn palette() -> Palette {
    Palette::with_prompts(8, sample_prompts())
}

fn type_text(palette: &mut Palette, text: &str) {
    for ch in text.chars() {
        palette.handle_key(Key::Char(ch));
    }
}

fn ids(palette: &Palette) -> Vec<String> {
    palette.prompts().iter().map(|p| p.id.clone()).collect()
}

#[test]
fn starts_in_search_mode() {
    let palette = palette();
    assert_eq!(palette.mode(), Mode::Search);
    assert_eq!(palette.selected_index(), 0);
    assert!(palette.active_prompt().is_none());
}

#[test]
fn filter_matches_title_or_tag_case_insensitively() {
    let prompts = sample_prompts();
    let titles = |query: &str| -> Vec<String> {
        filter(&prompts, query)
            .into_iter()
            .map(|p| p.title.clone())
            .collect()
    };

    assert_eq!(titles("co"), vec!["Cold Outreach Email", "Code Review"]);
    assert_eq!(titles("EMAIL"), vec!["Cold Outreach Email"]);
    assert_eq!(titles("fun"), vec!["Story"]);
    assert_eq!(titles("").len(), 3);
    assert!(titles("zzz").is_empty());
}

#[test]
fn filtering_never_mutates_the_list() {
    let mut palette = palette();
    type_text(&mut palette, "story");
    assert_eq!(palette.filtered().len(), 1);
    assert_eq!(ids(&palette), vec!["1", "2", "3"]);
}

#[test]
fn navigation_wraps_around() {
    let mut palette = palette();
    let len = palette.filtered().len();
    for _ in 0..len {
        palette.handle_key(Key::Down);
    }
    assert_eq!(palette.selected_index(), 0);

    palette.handle_key(Key::Up);
    assert_eq!(palette.selected_index(), len - 1);
    palette.handle_key(Key::Down);
    assert_eq!(palette.selected_index(), 0);
}

#[test]
fn navigation_on_empty_list_is_noop() {
    let mut palette = Palette::new(8);
    palette.handle_key(Key::Down);
    palette.handle_key(Key::Up);
    assert_eq!(palette.selected_index(), 0);

    let effects = palette.handle_key(Key::Enter);
    assert!(effects.is_empty());
    assert_eq!(palette.mode(), Mode::Search);
}

#[test]
fn query_change_resets_selection() {
    let mut palette = palette();
    palette.handle_key(Key::Down);
    palette.handle_key(Key::Down);
    assert_eq!(palette.selected_index(), 2);

    type_text(&mut palette, "c");
    assert_eq!(palette.selected_index(), 0);

    palette.handle_key(Key::Down);
    palette.handle_key(Key::Backspace);
    assert_eq!(palette.selected_index(), 0);
    assert_eq!(palette.query(), "");
}

#[test]
fn escape_clears_query_in_search() {
    let mut palette = palette();
    type_text(&mut palette, "code");
    palette.handle_key(Key::Esc);
    assert_eq!(palette.query(), "");
    assert_eq!(palette.mode(), Mode::Search);
}

#[test]
fn selecting_prompt_with_variables_starts_fill_session() {
    let mut palette = palette();
    let effects = palette.handle_key(Key::Enter);

    assert_eq!(palette.mode(), Mode::Filling);
    assert_eq!(palette.active_prompt().map(|p| p.id.as_str()), Some("1"));
    assert_eq!(effects, vec![Effect::FocusVariable("name".to_string())]);

    let fill = palette.fill().unwrap();
    assert_eq!(fill.session.rendered(), "Hi {{name}}, about {{topic}}");
}

#[test]
fn selecting_prompt_without_variables_copies_directly() {
    let mut palette = palette();
    palette.handle_key(Key::Down);
    let effects = palette.handle_key(Key::Enter);

    assert_eq!(palette.mode(), Mode::Search);
    assert!(palette.fill().is_none());
    match effects.as_slice() {
        [Effect::Copy { text, prompt }] => {
            assert_eq!(text, "Review this diff carefully.");
            assert_eq!(prompt.id, "2");
        }
        other => panic!("unexpected effects: {other:?}"),
    }

    let effects = palette.complete(Completion::Copied {
        prompt: sample_prompts()[1].clone(),
        result: Ok(()),
    });
    assert_eq!(palette.mode(), Mode::Search);
    assert!(matches!(effects[0], Effect::RecordUsage(_)));
    assert!(effects.contains(&Effect::FocusSearch));
}

#[test]
fn pointer_selection_acts_on_row() {
    let mut palette = palette();
    let effects = palette.select_index(2);
    assert_eq!(palette.selected_index(), 2);
    assert_eq!(palette.mode(), Mode::Filling);
    assert_eq!(effects, vec![Effect::FocusVariable("tone".to_string())]);

    let mut palette = Palette::new(8);
    assert!(palette.select_index(0).is_empty());
}

#[test]
fn reserved_command_opens_editor_when_nothing_matches() {
    for command in ["new", "NEW", "New", "新建"] {
        let mut palette = palette();
        type_text(&mut palette, command);
        assert!(palette.filtered().is_empty(), "{command}");
        assert!(palette.offers_create());

        palette.handle_key(Key::Enter);
        assert_eq!(palette.mode(), Mode::Editor, "{command}");
        let editor = palette.editor().unwrap();
        assert!(editor.editing.is_none());
        assert!(editor.title.is_empty());
    }
}

#[test]
fn non_reserved_query_without_results_does_nothing() {
    let mut palette = palette();
    type_text(&mut palette, "nothing here");
    let effects = palette.handle_key(Key::Enter);
    assert!(effects.is_empty());
    assert_eq!(palette.mode(), Mode::Search);
    assert!(!is_create_command("news"));
}

#[test]
fn reserved_command_with_matches_selects_instead() {
    let mut palette = Palette::with_prompts(8, vec![prompt("n", "News digest", "{{day}}", &[])]);
    type_text(&mut palette, "new");
    palette.handle_key(Key::Enter);
    assert_eq!(palette.mode(), Mode::Filling);
}

#[test]
fn typing_in_fill_mode_updates_preview() {
    let mut palette = palette();
    palette.handle_key(Key::Enter);
    type_text(&mut palette, "Adx");
    palette.handle_key(Key::Backspace);
    palette.handle_key(Key::Char('a'));

    let effects = palette.handle_key(Key::Tab);
    assert_eq!(effects, vec![Effect::FocusVariable("topic".to_string())]);
    type_text(&mut palette, "Rust");

    let fill = palette.fill().unwrap();
    assert_eq!(fill.session.rendered(), "Hi Ada, about Rust");

    palette.handle_key(Key::Tab);
    assert_eq!(palette.fill().unwrap().focused_variable(), "name");
    palette.handle_key(Key::BackTab);
    assert_eq!(palette.fill().unwrap().focused_variable(), "topic");
}

#[test]
fn set_value_ignores_unknown_variables() {
    let mut palette = palette();
    palette.handle_key(Key::Enter);
    palette.set_value("name", "Ada");
    palette.set_value("unknown", "x");
    assert_eq!(
        palette.fill().unwrap().session.rendered(),
        "Hi Ada, about {{topic}}"
    );
}

#[test]
fn fill_confirm_copies_partial_render_and_waits_for_clipboard() {
    let mut palette = palette();
    palette.handle_key(Key::Enter);
    type_text(&mut palette, "Ada");

    let effects = palette.handle_key(Key::Enter);
    match effects.as_slice() {
        [Effect::Copy { text, .. }] => assert_eq!(text, "Hi Ada, about {{topic}}"),
        other => panic!("unexpected effects: {other:?}"),
    }
    assert_eq!(palette.mode(), Mode::Filling);
}

#[test]
fn successful_copy_returns_to_search() {
    let mut palette = palette();
    type_text(&mut palette, "cold");
    palette.handle_key(Key::Enter);

    let active = palette.active_prompt().cloned().unwrap();
    let effects = palette.complete(Completion::Copied {
        prompt: active.clone(),
        result: Ok(()),
    });

    assert_eq!(palette.mode(), Mode::Search);
    assert!(palette.active_prompt().is_none());
    assert_eq!(palette.query(), "");
    assert_eq!(
        effects,
        vec![Effect::RecordUsage(active), Effect::FocusSearch]
    );
    assert_eq!(palette.notice().unwrap().message, "Copied to clipboard");
}

#[test]
fn failed_copy_keeps_session_active() {
    let mut palette = palette();
    palette.handle_key(Key::Enter);
    type_text(&mut palette, "Ada");
    let active = palette.active_prompt().cloned().unwrap();

    let effects = palette.complete(Completion::Copied {
        prompt: active,
        result: Err(PaletteError::Clipboard("boom".to_string())),
    });

    assert!(effects.is_empty());
    assert_eq!(palette.mode(), Mode::Filling);
    assert_eq!(palette.fill().unwrap().session.value("name"), "Ada");
    assert_eq!(palette.notice().unwrap().level, NoticeLevel::Error);
}

#[test]
fn escape_from_filling_discards_session() {
    let mut palette = palette();
    palette.handle_key(Key::Enter);
    let effects = palette.handle_key(Key::Esc);

    assert_eq!(palette.mode(), Mode::Search);
    assert!(palette.active_prompt().is_none());
    assert_eq!(effects, vec![Effect::FocusSearch]);
}

#[test]
fn late_copy_completion_after_cancel_keeps_search_state() {
    let mut palette = palette();
    palette.handle_key(Key::Enter);
    let active = palette.active_prompt().cloned().unwrap();
    palette.handle_key(Key::Esc);
    type_text(&mut palette, "code");

    let effects = palette.complete(Completion::Copied {
        prompt: active,
        result: Ok(()),
    });
    assert_eq!(palette.mode(), Mode::Search);
    assert_eq!(palette.query(), "code");
    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::RecordUsage(_)));
}

#[test]
fn save_is_blocked_without_title_or_content() {
    let mut palette = palette();
    palette.handle_key(Key::Ctrl('n'));
    assert_eq!(palette.mode(), Mode::Editor);

    let effects = palette.handle_key(Key::Ctrl('s'));
    assert!(effects.is_empty());
    assert_eq!(palette.mode(), Mode::Editor);
    assert_eq!(palette.notice().unwrap().level, NoticeLevel::Error);

    type_text(&mut palette, "Only title");
    assert!(palette.handle_key(Key::Ctrl('s')).is_empty());
    assert_eq!(palette.mode(), Mode::Editor);
    assert_eq!(ids(&palette), vec!["1", "2", "3"]);
}

#[test]
fn editor_keys_move_between_fields() {
    let mut palette = palette();
    palette.handle_key(Key::Ctrl('n'));
    type_text(&mut palette, "Title");
    palette.handle_key(Key::Enter);
    type_text(&mut palette, "a, b");
    palette.handle_key(Key::Tab);
    type_text(&mut palette, "line one");
    palette.handle_key(Key::Enter);
    type_text(&mut palette, "line two");

    let editor = palette.editor().unwrap();
    assert_eq!(editor.focus, EditorField::Content);
    assert_eq!(editor.title, "Title");
    assert_eq!(editor.content, "line one\nline two");

    palette.handle_key(Key::BackTab);
    palette.handle_key(Key::Backspace);
    assert_eq!(palette.editor().unwrap().tags, "a, ");
}

#[test]
fn creating_prompt_prepends_it() {
    let mut palette = palette();
    palette.handle_key(Key::Ctrl('n'));
    {
        let editor = palette.editor_mut().unwrap();
        editor.title = "Fresh".to_string();
        editor.tags = "x, y".to_string();
        editor.content = "Hello {{who}}".to_string();
    }

    let effects = palette.handle_key(Key::Ctrl('s'));
    let expected = PromptDraft::new("Fresh", "Hello {{who}}", vec!["x".into(), "y".into()]);
    assert_eq!(effects, vec![Effect::Create(expected)]);

    let effects = palette.complete(Completion::Saved(Ok(prompt(
        "4",
        "Fresh",
        "Hello {{who}}",
        &["x", "y"],
    ))));
    assert_eq!(effects, vec![Effect::FocusSearch]);
    assert_eq!(palette.mode(), Mode::Search);
    assert!(palette.editor().is_none());
    assert_eq!(ids(&palette), vec!["4", "1", "2", "3"]);
}

#[test]
fn editing_prompt_replaces_it_in_place() {
    let mut palette = palette();
    palette.handle_key(Key::Down);
    palette.handle_key(Key::Ctrl('e'));

    let editor = palette.editor().unwrap();
    assert_eq!(editor.editing.as_deref(), Some("2"));
    assert_eq!(editor.tags, "coding");

    palette.editor_mut().unwrap().title = "Code Review v2".to_string();
    let effects = palette.handle_key(Key::Ctrl('s'));
    let updated = match effects.as_slice() {
        [Effect::Update(updated)] => updated.clone(),
        other => panic!("unexpected effects: {other:?}"),
    };
    assert_eq!(updated.id, "2");
    assert_eq!(updated.title, "Code Review v2");
    assert_eq!(updated.created_at, 1);

    palette.complete(Completion::Saved(Ok(updated)));
    assert_eq!(ids(&palette), vec!["1", "2", "3"]);
    assert_eq!(palette.prompts()[1].title, "Code Review v2");
}

#[test]
fn failed_save_leaves_editor_open() {
    let mut palette = palette();
    palette.handle_key(Key::Ctrl('n'));
    {
        let editor = palette.editor_mut().unwrap();
        editor.title = "T".to_string();
        editor.content = "C".to_string();
    }
    palette.handle_key(Key::Ctrl('s'));

    palette.complete(Completion::Saved(Err(PaletteError::StoreIo("disk full".into()))));
    assert_eq!(palette.mode(), Mode::Editor);
    assert_eq!(palette.editor().unwrap().title, "T");
    assert_eq!(ids(&palette), vec!["1", "2", "3"]);
}

#[test]
fn saving_edit_of_removed_prompt_reports_it_is_gone() {
    let mut palette = palette();
    palette.handle_key(Key::Down);
    palette.handle_key(Key::Ctrl('e'));
    assert_eq!(palette.editor().unwrap().editing.as_deref(), Some("2"));

    palette.complete(Completion::Deleted {
        id: "2".to_string(),
        result: Ok(()),
    });
    let effects = palette.handle_key(Key::Ctrl('s'));

    assert!(effects.is_empty());
    let notice = palette.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "This prompt no longer exists");
    assert_eq!(palette.mode(), Mode::Editor);
    assert_eq!(palette.editor().unwrap().editing.as_deref(), Some("2"));
}

#[test]
fn save_finishing_after_editor_closed_keeps_mode() {
    let mut palette = palette();
    palette.handle_key(Key::Ctrl('e'));
    palette.editor_mut().unwrap().title = "Cold Outreach v2".to_string();
    let updated = match palette.handle_key(Key::Ctrl('s')).as_slice() {
        [Effect::Update(updated)] => updated.clone(),
        other => panic!("unexpected effects: {other:?}"),
    };
    palette.handle_key(Key::Esc);
    assert_eq!(palette.mode(), Mode::Search);

    let created = prompt("9", "Late", "body", &[]);
    let effects = palette.complete(Completion::Saved(Ok(created)));
    assert!(effects.is_empty());
    assert_eq!(palette.mode(), Mode::Search);
    assert_eq!(ids(&palette), vec!["9", "1", "2", "3"]);

    let effects = palette.complete(Completion::Saved(Ok(updated)));
    assert!(!effects.contains(&Effect::FocusSearch));
    assert_eq!(palette.prompts()[1].title, "Cold Outreach v2");
}

#[test]
fn escape_from_editor_discards_buffer() {
    let mut palette = palette();
    palette.handle_key(Key::Ctrl('n'));
    type_text(&mut palette, "draft");
    let effects = palette.handle_key(Key::Esc);

    assert_eq!(effects, vec![Effect::FocusSearch]);
    assert_eq!(palette.mode(), Mode::Search);
    assert!(palette.editor().is_none());
    assert_eq!(ids(&palette), vec!["1", "2", "3"]);
}

#[test]
fn delete_removes_exactly_one_record() {
    let mut palette = palette();
    palette.handle_key(Key::Down);
    let effects = palette.handle_key(Key::Ctrl('d'));
    let target = match effects.as_slice() {
        [Effect::Delete(target)] => target.clone(),
        other => panic!("unexpected effects: {other:?}"),
    };
    assert_eq!(target.id, "2");

    palette.complete(Completion::Deleted {
        id: target.id,
        result: Ok(()),
    });
    assert_eq!(ids(&palette), vec!["1", "3"]);
}

#[test]
fn deleting_last_row_clamps_selection() {
    let mut palette = palette();
    palette.handle_key(Key::Up);
    assert_eq!(palette.selected_index(), 2);

    palette.complete(Completion::Deleted {
        id: "3".to_string(),
        result: Ok(()),
    });
    assert_eq!(palette.selected_index(), 1);
}

#[test]
fn usage_for_removed_prompt_is_ignored() {
    let mut palette = palette();
    let mut ghost = prompt("9", "Ghost", "boo", &[]);
    ghost.usage_count = 4;
    palette.complete(Completion::UsageRecorded(Ok(ghost)));
    assert_eq!(ids(&palette), vec!["1", "2", "3"]);

    let mut counted = sample_prompts()[0].clone();
    counted.usage_count = 1;
    palette.complete(Completion::UsageRecorded(Ok(counted)));
    assert_eq!(palette.prompts()[0].usage_count, 1);
}

#[test]
fn selection_is_kept_in_view() {
    let prompts = (0..10)
        .map(|i| prompt(&i.to_string(), &format!("Prompt {i}"), "text", &[]))
        .collect();
    let mut palette = Palette::with_prompts(3, prompts);

    for _ in 0..4 {
        palette.handle_key(Key::Down);
    }
    assert_eq!(palette.selected_index(), 4);
    assert_eq!(palette.viewport().offset(), 2);
    assert_eq!(palette.viewport().visible(10), 2..5);

    palette.handle_key(Key::Up);
    palette.handle_key(Key::Up);
    palette.handle_key(Key::Up);
    assert_eq!(palette.viewport().offset(), 1);

    type_text(&mut palette, "prompt");
    assert_eq!(palette.viewport().offset(), 0);

    palette.handle_key(Key::Up);
    assert_eq!(palette.selected_index(), 9);
    assert_eq!(palette.viewport().offset(), 7);
}

#[test]
fn fitting_list_to_short_terminal_keeps_selection_visible() {
    let prompts = (0..10)
        .map(|i| prompt(&i.to_string(), &format!("P{i}"), "body", &[]))
        .collect();
    let mut palette = Palette::with_prompts(8, prompts);
    for _ in 0..7 {
        palette.handle_key(Key::Down);
    }
    assert_eq!(palette.viewport().offset(), 0);

    palette.fit_list_to(4);
    assert_eq!(palette.viewport().height(), 4);
    assert_eq!(palette.viewport().offset(), 4);

    palette.fit_list_to(20);
    assert_eq!(palette.viewport().height(), 8);
    assert!(palette.viewport().offset() <= 7);
}

#[test]
fn viewport_visible_range_is_bounded() {
    let mut viewport = Viewport::new(5);
    assert_eq!(viewport.visible(2), 0..2);
    viewport.follow(7);
    assert_eq!(viewport.offset(), 3);
    viewport.clamp(4);
    assert_eq!(viewport.offset(), 0);
    assert_eq!(Viewport::new(0).height(), 1);
}

#[test]
fn ctrl_c_quits_from_any_mode() {
    let mut palette = palette();
    assert_eq!(palette.handle_key(Key::Ctrl('c')), vec![Effect::Quit]);
    palette.handle_key(Key::Enter);
    assert_eq!(palette.handle_key(Key::Ctrl('q')), vec![Effect::Quit]);
}

#[test]
fn notice_clears_on_next_key() {
    let mut palette = palette();
    palette.complete(Completion::Loaded(Err(PaletteError::StoreIo("offline".into()))));
    assert!(palette.notice().is_some());
    palette.handle_key(Key::Down);
    assert!(palette.notice().is_none());
}

// Controller tests with in-process collaborators.

#[derive(Default)]
struct RecordingClipboard {
    writes: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl ClipboardWriter for RecordingClipboard {
    fn name(&self) -> String {
        "recording".to_string()
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::NoProvider);
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

struct ScriptedConfirmer {
    answer: bool,
    asked: Arc<Mutex<Vec<String>>>,
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, message: &str) -> bool {
        self.asked.lock().unwrap().push(message.to_string());
        self.answer
    }
}

struct FailingStore;

#[async_trait]
impl RecordStore for FailingStore {
    async fn list(&self) -> Result<Vec<Prompt>> {
        Err(anyhow!("store offline"))
    }

    async fn create(&self, _draft: PromptDraft) -> Result<Prompt> {
        Err(anyhow!("store offline"))
    }

    async fn update(&self, _prompt: Prompt) -> Result<Prompt> {
        Err(anyhow!("store offline"))
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        Err(anyhow!("store offline"))
    }

    async fn record_usage(&self, _prompt: Prompt) -> Result<Prompt> {
        Err(anyhow!("store offline"))
    }
}

struct Harness {
    controller: PaletteController,
    store: Arc<MemoryStore>,
    writes: Arc<Mutex<Vec<String>>>,
    asked: Arc<Mutex<Vec<String>>>,
}

async fn harness(fail_clipboard: bool, confirm: bool) -> Harness {
    let store = Arc::new(MemoryStore::with_prompts(sample_prompts()));
    let writes = Arc::new(Mutex::new(Vec::new()));
    let asked = Arc::new(Mutex::new(Vec::new()));
    let clipboard = RecordingClipboard {
        writes: writes.clone(),
        fail: fail_clipboard,
    };
    let confirmer = ScriptedConfirmer {
        answer: confirm,
        asked: asked.clone(),
    };

    let mut controller = PaletteController::new(
        Palette::new(8),
        store.clone(),
        Arc::new(clipboard),
        Box::new(confirmer),
    );
    controller.load().await;

    Harness {
        controller,
        store,
        writes,
        asked,
    }
}

async fn type_keys(controller: &mut PaletteController, text: &str) {
    for ch in text.chars() {
        controller.handle_key(Key::Char(ch)).await;
    }
}

#[tokio::test]
async fn controller_fill_and_copy_flow() {
    let mut h = harness(false, true).await;
    type_keys(&mut h.controller, "story").await;

    let signals = h.controller.handle_key(Key::Enter).await;
    assert_eq!(signals, vec![Effect::FocusVariable("tone".to_string())]);
    type_keys(&mut h.controller, "dry").await;

    let signals = h.controller.handle_key(Key::Enter).await;
    assert_eq!(signals, vec![Effect::FocusSearch]);
    assert_eq!(*h.writes.lock().unwrap(), vec!["Write a dry story"]);

    let palette = h.controller.palette();
    assert_eq!(palette.mode(), Mode::Search);
    assert_eq!(palette.query(), "");
    let story = palette.prompts().iter().find(|p| p.id == "3").cloned().unwrap();
    assert_eq!(story.usage_count, 1);

    let stored = h.store.list().await.unwrap();
    assert_eq!(stored.iter().find(|p| p.id == "3").unwrap().usage_count, 1);
}

#[tokio::test]
async fn controller_clipboard_failure_keeps_filling() {
    let mut h = harness(true, true).await;
    h.controller.handle_key(Key::Enter).await;
    type_keys(&mut h.controller, "Ada").await;

    let signals = h.controller.handle_key(Key::Enter).await;
    assert!(signals.is_empty());

    let palette = h.controller.palette();
    assert_eq!(palette.mode(), Mode::Filling);
    assert_eq!(palette.notice().unwrap().level, NoticeLevel::Error);
    let stored = h.store.list().await.unwrap();
    assert!(stored.iter().all(|p| p.usage_count == 0));
}

#[tokio::test]
async fn controller_creates_prompt_through_store() {
    let mut h = harness(false, true).await;
    type_keys(&mut h.controller, "new").await;
    h.controller.handle_key(Key::Enter).await;
    assert_eq!(h.controller.palette().mode(), Mode::Editor);

    type_keys(&mut h.controller, "Greeting").await;
    h.controller.handle_key(Key::Tab).await;
    h.controller.handle_key(Key::Tab).await;
    type_keys(&mut h.controller, "Hello {{name}}").await;

    let signals = h.controller.handle_key(Key::Ctrl('s')).await;
    assert_eq!(signals, vec![Effect::FocusSearch]);

    let palette = h.controller.palette();
    assert_eq!(palette.mode(), Mode::Search);
    assert_eq!(palette.prompts()[0].title, "Greeting");
    assert_eq!(h.store.list().await.unwrap().len(), 4);
}

#[tokio::test]
async fn controller_delete_asks_for_confirmation() {
    let mut declined = harness(false, false).await;
    declined.controller.handle_key(Key::Ctrl('d')).await;
    assert_eq!(
        *declined.asked.lock().unwrap(),
        vec!["Delete this prompt?".to_string()]
    );
    assert_eq!(declined.controller.palette().prompts().len(), 3);
    assert_eq!(declined.store.list().await.unwrap().len(), 3);

    let mut accepted = harness(false, true).await;
    let first = accepted.controller.palette().selected_prompt().cloned().unwrap();
    accepted.controller.handle_key(Key::Ctrl('d')).await;
    let remaining = accepted.controller.palette().prompts();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|p| p.id != first.id));
    assert_eq!(accepted.store.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn controller_store_failures_keep_state() {
    let clipboard = RecordingClipboard::default();
    let mut controller = PaletteController::new(
        Palette::with_prompts(8, sample_prompts()),
        Arc::new(FailingStore),
        Arc::new(clipboard),
        Box::new(ScriptedConfirmer {
            answer: true,
            asked: Arc::new(Mutex::new(Vec::new())),
        }),
    );

    controller.handle_key(Key::Ctrl('n')).await;
    {
        let editor = controller.palette_mut().editor_mut().unwrap();
        editor.title = "T".to_string();
        editor.content = "C".to_string();
    }
    controller.handle_key(Key::Ctrl('s')).await;
    assert_eq!(controller.palette().mode(), Mode::Editor);
    assert!(controller.palette().notice().is_some());

    controller.handle_key(Key::Esc).await;
    controller.handle_key(Key::Ctrl('d')).await;
    assert_eq!(controller.palette().prompts().len(), 3);

    // Usage failures are logged only; the copy itself still completes.
    controller.handle_key(Key::Down).await;
    let signals = controller.handle_key(Key::Enter).await;
    assert_eq!(signals, vec![Effect::FocusSearch]);
}

#[tokio::test]
async fn controller_load_failure_shows_notice() {
    let mut controller = PaletteController::new(
        Palette::new(8),
        Arc::new(FailingStore),
        Arc::new(RecordingClipboard::default()),
        Box::new(ScriptedConfirmer {
            answer: true,
            asked: Arc::new(Mutex::new(Vec::new())),
        }),
    );

    controller.load().await;
    assert!(controller.palette().prompts().is_empty());
    let notice = controller.palette().notice().unwrap();
    assert!(notice.message.contains("store offline"));
}

#[tokio::test]
async fn controller_clicked_row_copies_that_prompt() {
    let mut h = harness(false, true).await;
    let row = h
        .controller
        .palette()
        .filtered()
        .iter()
        .position(|p| p.id == "2")
        .unwrap();

    let signals = h.controller.select_index(row).await;
    assert_eq!(signals, vec![Effect::FocusSearch]);
    assert_eq!(*h.writes.lock().unwrap(), vec!["Review this diff carefully."]);

    let signals = h.controller.select_index(99).await;
    assert!(signals.is_empty());
    assert_eq!(h.writes.lock().unwrap().len(), 1);
}
