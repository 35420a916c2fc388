use crate::view_model::EditorViewModel;
use crate::{derive_sku, is_blank_sku, SaveTrigger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Loading,
    Ready,
    AwaitingConfirmation {
        trigger: SaveTrigger,
    },
    Saving {
        trigger: SaveTrigger,
    },
}

/// What the save guard knows about one product-edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    phase: Phase,
    title: String,
    sku: String,
    sku_field_present: bool,
    require_confirmation: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            title: String::new(),
            sku: String::new(),
            sku_field_present: false,
            require_confirmation: true,
        }
    }

    /// Skip the prompt and generate as soon as a save without SKU is seen.
    pub fn without_confirmation(mut self) -> Self {
        self.require_confirmation = false;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn requires_confirmation(&self) -> bool {
        self.require_confirmation
    }

    pub fn view(&self) -> EditorViewModel {
        EditorViewModel {
            phase: self.phase,
            title: self.title.clone(),
            sku: self.sku.clone(),
            sku_field_present: self.sku_field_present,
            sku_preview: derive_sku(&self.title).ok(),
        }
    }

    pub(crate) fn is_guarding(&self) -> bool {
        self.sku_field_present && self.phase != Phase::Loading
    }

    pub(crate) fn sku_missing(&self) -> bool {
        is_blank_sku(&self.sku)
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn set_sku(&mut self, sku: String) {
        self.sku = sku;
    }

    pub(crate) fn mark_sku_field_present(&mut self, value: String) {
        self.sku_field_present = true;
        self.sku = value;
    }
}
