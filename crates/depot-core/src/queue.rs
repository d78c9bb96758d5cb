//! Conveyor queue — amortized O(1) FIFO intake buffer.

/// Two-stack FIFO queue. `enqueue` pushes onto the inbox; `dequeue` pops
/// from the outbox, refilling it by draining the inbox when it runs dry.
/// Each element is moved at most twice, so both operations are amortized
/// O(1).
#[derive(Debug, Clone, Default)]
pub struct ConveyorQueue<T> {
    inbox: Vec<T>,
    outbox: Vec<T>,
}

impl<T> ConveyorQueue<T> {
    pub fn new() -> Self {
        Self {
            inbox: Vec::new(),
            outbox: Vec::new(),
        }
    }

    pub fn enqueue(&mut self, item: T) {
        self.inbox.push(item);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        if self.outbox.is_empty() {
            while let Some(item) = self.inbox.pop() {
                self.outbox.push(item);
            }
        }
        self.outbox.pop()
    }

    pub fn len(&self) -> usize {
        self.inbox.len() + self.outbox.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
