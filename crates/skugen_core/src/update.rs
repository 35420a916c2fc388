use skugen_logging::{skugen_debug, skugen_info};

use crate::{derive_sku, EditorState, Effect, Msg, Notice, Phase, SaveTrigger};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: EditorState, msg: Msg) -> (EditorState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageReady => {
            // A fresh page has no save in flight and no open prompt.
            if state.phase() != Phase::Ready {
                skugen_debug!("Page ready; leaving {:?}", state.phase());
                state.set_phase(Phase::Ready);
            }
            Vec::new()
        }
        Msg::TitleChanged(title) => {
            state.set_title(title);
            Vec::new()
        }
        Msg::SkuFieldPresent { value } => {
            state.mark_sku_field_present(value);
            Vec::new()
        }
        Msg::SkuChanged(value) => {
            state.set_sku(value);
            Vec::new()
        }
        Msg::SaveRequested { trigger } => on_save_requested(&mut state, trigger),
        Msg::ConfirmationAnswered { accepted } => match state.phase() {
            Phase::AwaitingConfirmation { trigger } => {
                if accepted {
                    generate_and_resume(&mut state, trigger)
                } else {
                    skugen_info!("SKU generation declined; saving without SKU");
                    state.set_phase(Phase::Saving { trigger });
                    vec![
                        Effect::Notify(Notice::GenerationDeclined),
                        Effect::ResumeSave { trigger },
                    ]
                }
            }
            _ => Vec::new(),
        },
        Msg::SaveCompleted => {
            if matches!(state.phase(), Phase::Saving { .. }) {
                state.set_phase(Phase::Ready);
            }
            Vec::new()
        }
        Msg::SaveFailed { reason } => {
            if matches!(state.phase(), Phase::Saving { .. }) {
                skugen_info!("Host save failed: {}", reason);
                state.set_phase(Phase::Ready);
                vec![Effect::Notify(Notice::SaveFailed { reason })]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn on_save_requested(state: &mut EditorState, trigger: SaveTrigger) -> Vec<Effect> {
    match state.phase() {
        // One intent can arrive as click, submit, and shortcut at once.
        Phase::AwaitingConfirmation { .. } | Phase::Saving { .. } => {
            skugen_debug!("Ignoring duplicate save request via {:?}", trigger);
            return Vec::new();
        }
        Phase::Loading | Phase::Ready => {}
    }

    if !state.is_guarding() || !state.sku_missing() {
        state.set_phase(Phase::Saving { trigger });
        return vec![Effect::PassThrough { trigger }];
    }

    let preview = match derive_sku(state.title()) {
        Ok(sku) => sku,
        Err(err) => {
            skugen_info!("Holding save without SKU: {}", err);
            return vec![Effect::Notify(Notice::TitleRequired)];
        }
    };

    if !state.requires_confirmation() {
        return generate_and_resume(state, trigger);
    }

    skugen_info!("Intercepted save without SKU via {:?}", trigger);
    state.set_phase(Phase::AwaitingConfirmation { trigger });
    vec![Effect::PromptConfirmation {
        title: state.title().trim().to_string(),
        preview,
    }]
}

fn generate_and_resume(state: &mut EditorState, trigger: SaveTrigger) -> Vec<Effect> {
    let sku = match derive_sku(state.title()) {
        Ok(sku) => sku,
        Err(err) => {
            skugen_info!("Cannot generate SKU: {}", err);
            state.set_phase(Phase::Ready);
            return vec![Effect::Notify(Notice::TitleRequired)];
        }
    };

    let title = state.title().trim().to_string();
    skugen_info!("Generated SKU {} for title of {} bytes", sku, title.len());
    state.set_sku(sku.to_string());
    state.set_phase(Phase::Saving { trigger });
    vec![
        Effect::InjectSku { sku: sku.clone() },
        Effect::RecordHistory {
            title,
            sku: sku.clone(),
        },
        Effect::Notify(Notice::SkuGenerated { sku }),
        Effect::ResumeSave { trigger },
    ]
}
