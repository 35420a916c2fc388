/// How the user asked the host form to save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTrigger {
    Click,
    FormSubmit,
    KeyboardShortcut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The product-edit page finished loading.
    PageReady,
    /// Title field text as currently shown in the form.
    TitleChanged(String),
    /// The SKU field was located, with its current value.
    SkuFieldPresent { value: String },
    /// User edited the SKU field.
    SkuChanged(String),
    /// Save intent detected; the host save is deferred until effects resolve it.
    SaveRequested { trigger: SaveTrigger },
    /// Answer from the confirmation prompt.
    ConfirmationAnswered { accepted: bool },
    /// Host reported the save round-trip finished.
    SaveCompleted,
    /// Host rejected the save or never answered; the form stays editable.
    SaveFailed { reason: String },
    /// Fallback for placeholder wiring.
    NoOp,
}
