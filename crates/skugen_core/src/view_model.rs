use crate::{Phase, Sku};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorViewModel {
    pub phase: Phase,
    pub title: String,
    pub sku: String,
    pub sku_field_present: bool,
    /// SKU the current title would produce, if any.
    pub sku_preview: Option<Sku>,
}
