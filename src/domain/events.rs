#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectPlace { place_id: String },
    RequestRemoval { place_id: String },
    CancelRemoval,
    ConfirmRemoval,
}
