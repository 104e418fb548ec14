use crate::rendezvous::offer_slot::{OfferSlot, SlotId};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
struct Queue {
    slots: VecDeque<Arc<OfferSlot>>,
    closed: bool,
}

/// FIFO-очередь слотов одного устройства.
/// Мьютекс держится только на время push/pop и никогда через await.
#[derive(Debug, Default)]
pub struct PendingOfferRegistry {
    queue: Mutex<Queue>,
}

impl PendingOfferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// После `close` слот сразу бросается, и его ожидание заканчивается `Closed`.
    pub fn enqueue(&self, slot: Arc<OfferSlot>) {
        let mut queue = self.lock();
        if queue.closed {
            debug!("Registry closed, abandoning {}", slot.id());
            slot.abandon();
            return;
        }
        debug!("Enqueue {}", slot.id());
        queue.slots.push_back(slot);
    }

    /// Снимает слоты с головы, выбрасывая уже заполненные или брошенные,
    /// и возвращает первый живой.
    pub fn claim_next(&self) -> Option<Arc<OfferSlot>> {
        let mut queue = self.lock();
        while let Some(slot) = queue.slots.pop_front() {
            if slot.is_live() {
                debug!("Claimed {}", slot.id());
                return Some(slot);
            }
            debug!("Discarding retired {}", slot.id());
        }
        None
    }

    /// Убирает слот, который сессия бросила сама (таймаут или отмена).
    pub fn remove(&self, id: SlotId) -> bool {
        let mut queue = self.lock();
        let before = queue.slots.len();
        queue.slots.retain(|slot| slot.id() != id);
        queue.slots.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().slots.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Бросает все слоты в очереди и закрывает ее для новых.
    /// Возвращает число снятых слотов.
    pub fn close(&self) -> usize {
        let drained: Vec<_> = {
            let mut queue = self.lock();
            queue.closed = true;
            queue.slots.drain(..).collect()
        };
        for slot in &drained {
            slot.abandon();
        }
        drained.len()
    }
}
