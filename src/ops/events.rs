use crate::model::item::TagItem;

/// Notification emitted by the widget after a structural change.
#[derive(Debug, Clone, PartialEq)]
pub enum TagEvent {
    /// The tag set changed in any way
    Changed,
    ItemAdded(TagItem),
    ItemRemoved(TagItem),
}

/// Handle returned by `Observers::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&TagEvent)>;

/// Registered listeners, called synchronously in subscription order.
#[derive(Default)]
pub struct Observers {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Observers {
    pub fn subscribe(&mut self, listener: impl FnMut(&TagEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &TagEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
