//! Drag-and-drop payload codec and typed reorder requests.

use shared::{domain::SlotIndex, error::DragPayloadError};

/// Text carried by a drag: the decimal index of the dragged slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DragPayload(String);

impl DragPayload {
    pub fn from_slot(slot: SlotIndex) -> Self {
        Self(slot.get().to_string())
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse_slot(&self) -> Result<SlotIndex, DragPayloadError> {
        let index = self
            .0
            .trim()
            .parse::<usize>()
            .map_err(|_| DragPayloadError::NotANumber {
                payload: self.0.clone(),
            })?;
        Ok(SlotIndex::new(index)?)
    }
}

/// Swap the products at two validated slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderRequest {
    pub source: SlotIndex,
    pub target: SlotIndex,
}

impl ReorderRequest {
    pub fn new(source: SlotIndex, target: SlotIndex) -> Self {
        Self { source, target }
    }

    pub fn from_drop(payload: &DragPayload, target: SlotIndex) -> Result<Self, DragPayloadError> {
        Ok(Self::new(payload.parse_slot()?, target))
    }

    pub fn is_noop(&self) -> bool {
        self.source == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::SlotIndexError;

    fn slot(index: usize) -> SlotIndex {
        SlotIndex::new(index).expect("valid slot")
    }

    #[test]
    fn payload_encodes_slot_as_decimal_text() {
        let payload = DragPayload::from_slot(slot(14));
        assert_eq!(payload.as_str(), "14");
        assert_eq!(payload.parse_slot(), Ok(slot(14)));
    }

    #[test]
    fn non_numeric_payload_is_rejected() {
        for text in ["", "abc", "3.5", "-1", "7abc"] {
            let err = DragPayload::from_text(text)
                .parse_slot()
                .expect_err("payload should not parse");
            assert!(
                matches!(err, DragPayloadError::NotANumber { .. }),
                "{text:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn out_of_range_payload_is_rejected() {
        assert_eq!(
            DragPayload::from_text("20").parse_slot(),
            Err(DragPayloadError::InvalidSlot(SlotIndexError::OutOfRange {
                index: 20,
                slots: 20
            }))
        );
    }

    #[test]
    fn drop_on_own_slot_is_noop() {
        let request = ReorderRequest::from_drop(&DragPayload::from_text(" 4 "), slot(4))
            .expect("valid payload");
        assert!(request.is_noop());
    }
}
