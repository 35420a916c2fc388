//! Skugen core: SKU derivation, the history log, and the pure save-guard state machine.
mod effect;
mod history;
mod msg;
mod sku;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Notice};
pub use history::{History, HistoryEntry, HISTORY_CAPACITY};
pub use msg::{Msg, SaveTrigger};
pub use sku::{
    derive_sku, derive_sku_from_bytes, is_blank_sku, Sku, SkuError, ALPHABET, FORMATTED_LEN,
    GROUP_LEN, SKU_LEN,
};
pub use state::{EditorState, Phase};
pub use update::update;
pub use view_model::EditorViewModel;
