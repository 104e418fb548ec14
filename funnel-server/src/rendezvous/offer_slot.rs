use crate::error::{Result, WhipError};
use crate::rendezvous::rendezvous_cell::{CellError, CellState, RendezvousCell};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub u64);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot-{}", self.0)
    }
}

/// Одноразовая точка встречи: оффер камеры в одну сторону, SDP-ответ в другую.
#[derive(Debug)]
pub struct OfferSlot {
    id: SlotId,
    offer: RendezvousCell<String>,
    answer: RendezvousCell<String>,
}

impl OfferSlot {
    pub fn new() -> Self {
        Self {
            id: SlotId(NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed)),
            offer: RendezvousCell::new(),
            answer: RendezvousCell::new(),
        }
    }

    pub fn with_offer(offer: impl Into<String>) -> Self {
        Self {
            offer: RendezvousCell::filled(offer.into()),
            ..Self::new()
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Слот еще можно отдать HTTP-стороне: оффер не получен и не брошен.
    pub fn is_live(&self) -> bool {
        self.offer.is_empty()
    }

    pub fn offer_state(&self) -> CellState<String> {
        self.offer.state()
    }

    pub fn answer_state(&self) -> CellState<String> {
        self.answer.state()
    }

    /// Кладет оффер. Повторный вызов или вызов после таймаута ничего не делает.
    pub fn fulfill(&self, offer: impl Into<String>) -> bool {
        self.offer.fill(offer.into())
    }

    pub async fn await_offer(&self, timeout: Duration) -> Result<String> {
        self.offer
            .wait(timeout)
            .await
            .map_err(|e| self.wait_error(e, "no offer received"))
    }

    pub fn resolve_answer(&self, sdp: impl Into<String>) -> bool {
        self.answer.fill(sdp.into())
    }

    pub async fn await_answer(&self, timeout: Duration) -> Result<String> {
        self.answer
            .wait(timeout)
            .await
            .map_err(|e| self.wait_error(e, "no answer received"))
    }

    /// Закрывает обе стороны; ожидающие просыпаются с ошибкой.
    pub fn abandon(&self) {
        self.offer.abandon();
        self.answer.abandon();
    }

    fn wait_error(&self, error: CellError, what: &str) -> WhipError {
        match error {
            CellError::TimedOut => WhipError::Timeout(format!("{what} for {}", self.id)),
            CellError::Abandoned => WhipError::Closed(format!("{} abandoned", self.id)),
        }
    }
}

impl Default for OfferSlot {
    fn default() -> Self {
        Self::new()
    }
}
