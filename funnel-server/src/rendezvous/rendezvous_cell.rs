use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

/// Состояние ячейки. Из `Empty` можно перейти ровно один раз.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellState<T> {
    Empty,
    Filled(T),
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellError {
    TimedOut,
    Abandoned,
}

/// Ячейка однократного присваивания: одна сторона заполняет, другая ждет.
/// Поздние `fill` после таймаута ожидающего ничего не делают.
#[derive(Debug)]
pub struct RendezvousCell<T> {
    state: Mutex<CellState<T>>,
    notify: Notify,
}

impl<T: Clone> RendezvousCell<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CellState::Empty),
            notify: Notify::new(),
        }
    }

    pub fn filled(value: T) -> Self {
        Self {
            state: Mutex::new(CellState::Filled(value)),
            notify: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CellState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `false`, если ячейка уже заполнена или брошена.
    pub fn fill(&self, value: T) -> bool {
        {
            let mut state = self.lock();
            if !matches!(*state, CellState::Empty) {
                return false;
            }
            *state = CellState::Filled(value);
        }
        self.notify.notify_waiters();
        true
    }

    /// `false`, если в ячейке уже лежит значение.
    pub fn abandon(&self) -> bool {
        {
            let mut state = self.lock();
            match *state {
                CellState::Empty => *state = CellState::Abandoned,
                CellState::Abandoned => return true,
                CellState::Filled(_) => return false,
            }
        }
        self.notify.notify_waiters();
        true
    }

    pub fn is_empty(&self) -> bool {
        matches!(*self.lock(), CellState::Empty)
    }

    pub fn state(&self) -> CellState<T> {
        self.lock().clone()
    }

    fn peek(&self) -> Option<Result<T, CellError>> {
        match &*self.lock() {
            CellState::Empty => None,
            CellState::Filled(value) => Some(Ok(value.clone())),
            CellState::Abandoned => Some(Err(CellError::Abandoned)),
        }
    }

    async fn wait_resolved(&self) -> Result<T, CellError> {
        let notified = self.notify.notified();
        tokio::pin!(notified);

        loop {
            // Регистрируемся до проверки, чтобы не пропустить notify_waiters.
            notified.as_mut().enable();
            if let Some(outcome) = self.peek() {
                return outcome;
            }
            notified.as_mut().await;
            notified.set(self.notify.notified());
        }
    }

    /// Ждет значение не дольше `timeout`.
    ///
    /// По таймауту или при отмене future ячейка помечается `Abandoned`.
    /// Если значение успело прийти в момент таймаута, оно возвращается.
    pub async fn wait(&self, timeout: Duration) -> Result<T, CellError> {
        let mut guard = AbandonOnDrop {
            cell: self,
            armed: true,
        };

        let outcome = match tokio::time::timeout(timeout, self.wait_resolved()).await {
            Ok(outcome) => outcome,
            Err(_) if self.abandon() => Err(CellError::TimedOut),
            Err(_) => self.peek().unwrap_or(Err(CellError::TimedOut)),
        };

        guard.armed = false;
        outcome
    }
}

impl<T: Clone> Default for RendezvousCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

struct AbandonOnDrop<'a, T: Clone> {
    cell: &'a RendezvousCell<T>,
    armed: bool,
}

impl<T: Clone> Drop for AbandonOnDrop<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.cell.abandon();
        }
    }
}
