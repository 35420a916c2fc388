use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use serde::Serialize;

use skugen_core::{
    is_blank_sku, update, EditorState, Effect, HistoryEntry, Msg, Notice, SaveTrigger, Sku,
};
use skugen_logging::{skugen_error, skugen_info, skugen_warn};
use skugen_store::HistoryStore;

/// Confirmation surface for intercepted saves.
pub trait Prompter {
    fn confirm(&mut self, title: &str, preview: &str) -> bool;
}

/// Asks on the terminal; anything but `y`/`yes` declines.
pub struct StdinPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdinPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, title: &str, preview: &str) -> io::Result<()> {
        write!(
            self.output,
            "Product {title:?} has no SKU. Generate {preview}? [y/N] "
        )?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Prompter for StdinPrompter<R, W> {
    fn confirm(&mut self, title: &str, preview: &str) -> bool {
        if let Err(err) = self.ask(title, preview) {
            skugen_warn!("Could not show confirmation prompt: {}", err);
            return false;
        }
        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Always answers yes; used for `--yes`.
pub struct AutoConfirm;

impl Prompter for AutoConfirm {
    fn confirm(&mut self, _title: &str, _preview: &str) -> bool {
        true
    }
}

/// Simulated host form: the fields the save guard reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormSnapshot {
    pub title: String,
    pub sku: String,
    pub saved: bool,
    /// What the title would produce, shown when the form ends up without a SKU.
    pub suggested_sku: Option<String>,
    pub notices: Vec<String>,
}

/// Executes save-guard effects against the simulated form, the prompt, and the history store.
pub struct EffectRunner<'a, P: Prompter> {
    prompter: P,
    history: &'a HistoryStore,
    clock: &'a dyn Fn() -> String,
    form: FormSnapshot,
}

impl<'a, P: Prompter> EffectRunner<'a, P> {
    pub fn new(prompter: P, history: &'a HistoryStore, clock: &'a dyn Fn() -> String) -> Self {
        Self {
            prompter,
            history,
            clock,
            form: FormSnapshot::default(),
        }
    }

    /// Drive one save attempt through the guard and return the final form.
    pub fn run_save(
        mut self,
        state: EditorState,
        title: &str,
        sku: Option<&str>,
        trigger: SaveTrigger,
    ) -> FormSnapshot {
        self.form.title = title.to_string();
        self.form.sku = sku.unwrap_or_default().to_string();

        let mut inbox = VecDeque::from([
            Msg::PageReady,
            Msg::TitleChanged(self.form.title.clone()),
            Msg::SkuFieldPresent {
                value: self.form.sku.clone(),
            },
            Msg::SaveRequested { trigger },
        ]);
        let mut state = state;
        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            inbox.extend(self.apply(effects));
        }

        let view = state.view();
        if is_blank_sku(&view.sku) {
            self.form.suggested_sku = view.sku_preview.map(Sku::into_string);
        }
        self.form
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut replies = Vec::new();
        for effect in effects {
            match effect {
                Effect::PassThrough { trigger } | Effect::ResumeSave { trigger } => {
                    skugen_info!("Saving product via {:?}", trigger);
                    self.form.saved = true;
                    replies.push(Msg::SaveCompleted);
                }
                Effect::PromptConfirmation { title, preview } => {
                    let accepted = self.prompter.confirm(&title, preview.as_str());
                    replies.push(Msg::ConfirmationAnswered { accepted });
                }
                Effect::InjectSku { sku } => {
                    self.form.sku = sku.into_string();
                }
                Effect::RecordHistory { title, sku } => {
                    let entry = HistoryEntry {
                        title,
                        sku: sku.into_string(),
                        recorded_at: (self.clock)(),
                    };
                    // A failed log write must not block the save.
                    if let Err(err) = self.history.append(entry) {
                        skugen_error!("Failed to record SKU history: {}", err);
                    }
                }
                Effect::Notify(notice) => self.notify(notice),
            }
        }
        replies
    }

    fn notify(&mut self, notice: Notice) {
        let text = match notice {
            Notice::TitleRequired => {
                skugen_warn!("Save held: enter a product title to generate a SKU");
                "cannot generate SKU: title is empty".to_string()
            }
            Notice::SkuGenerated { sku } => format!("generated SKU {sku}"),
            Notice::GenerationDeclined => "SKU generation declined".to_string(),
            Notice::SaveFailed { reason } => format!("save failed: {reason}"),
        };
        self.form.notices.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn fixed_clock() -> String {
        "2024-01-01T00:00:00Z".to_string()
    }

    fn store(temp: &TempDir) -> HistoryStore {
        HistoryStore::new(temp.path().join("history.ron"), 100)
    }

    #[test]
    fn accepted_prompt_fills_sku_and_records_history() {
        let temp = TempDir::new().unwrap();
        let history = store(&temp);
        let mut output = Vec::new();
        let prompter = StdinPrompter::new(Cursor::new("yes\n"), &mut output);

        let form = EffectRunner::new(prompter, &history, &fixed_clock)
            .run_save(
                EditorState::new(),
                "Blenko Vase 123",
                None,
                SaveTrigger::Click,
            );

        assert_eq!(form.sku, "GRFG-AGAV-FQD1");
        assert!(form.saved);
        assert_eq!(form.notices, vec!["generated SKU GRFG-AGAV-FQD1".to_string()]);
        let entries = history.load().unwrap();
        let entry = entries.entries().next().unwrap();
        assert_eq!(entry.title, "Blenko Vase 123");
        assert_eq!(entry.recorded_at, "2024-01-01T00:00:00Z");
        assert!(String::from_utf8(output).unwrap().contains("[y/N]"));
    }

    #[test]
    fn declined_prompt_saves_without_sku() {
        let temp = TempDir::new().unwrap();
        let history = store(&temp);
        let prompter = StdinPrompter::new(Cursor::new("\n"), Vec::new());

        let form = EffectRunner::new(prompter, &history, &fixed_clock)
            .run_save(EditorState::new(), "Widget", Some(" "), SaveTrigger::FormSubmit);

        assert!(form.saved);
        assert_eq!(form.sku, " ");
        assert_eq!(form.suggested_sku.as_deref(), Some("DRF9-ESD6-BLG7"));
        assert!(history.load().unwrap().is_empty());
    }

    struct ClosedOutput;

    impl Write for ClosedOutput {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn unwritable_prompt_declines_without_reading_input() {
        let mut prompter = StdinPrompter::new(Cursor::new("yes\n"), ClosedOutput);
        assert!(!prompter.confirm("Widget", "DRF9-ESD6-BLG7"));
    }

    #[test]
    fn existing_sku_is_left_alone() {
        let temp = TempDir::new().unwrap();
        let history = store(&temp);

        let form = EffectRunner::new(AutoConfirm, &history, &fixed_clock)
            .run_save(EditorState::new(), "Widget", Some("KEEP-ME"), SaveTrigger::Click);

        assert_eq!(form.sku, "KEEP-ME");
        assert_eq!(form.suggested_sku, None);
        assert!(form.saved);
        assert!(form.notices.is_empty());
    }

    #[test]
    fn empty_title_blocks_save() {
        let temp = TempDir::new().unwrap();
        let history = store(&temp);

        let form = EffectRunner::new(AutoConfirm, &history, &fixed_clock)
            .run_save(EditorState::new(), "  ", None, SaveTrigger::KeyboardShortcut);

        assert!(!form.saved);
        assert_eq!(form.sku, "");
        assert_eq!(
            form.notices,
            vec!["cannot generate SKU: title is empty".to_string()]
        );
    }
}
