use crate::{SaveTrigger, Sku};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Let the host save run untouched.
    PassThrough { trigger: SaveTrigger },
    /// Ask the user whether a SKU should be generated for `title`.
    PromptConfirmation { title: String, preview: Sku },
    /// Write `sku` into the host SKU field.
    InjectSku { sku: Sku },
    /// Append to the history log.
    RecordHistory { title: String, sku: Sku },
    /// Replay the deferred host save.
    ResumeSave { trigger: SaveTrigger },
    Notify(Notice),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Save held back: no SKU and no title to derive one from.
    TitleRequired,
    SkuGenerated { sku: Sku },
    GenerationDeclined,
    SaveFailed { reason: String },
}
