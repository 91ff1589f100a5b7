use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

/// Buffer size for channels created implicitly by `publish`/`subscribe`.
const DEFAULT_CAPACITY: usize = 128;

/// Anything that is `Send + Sync + 'static` can travel on the bus.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

/// Type-erased `broadcast::Sender<Arc<T>>`.
type Slot = Box<dyn Any + Send + Sync>;

fn sender_of<T: Event>(slot: &Slot) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
    slot.downcast_ref::<broadcast::Sender<Arc<T>>>().cloned().ok_or_else(|| EventBusError::TypeMismatch {
        message: std::any::type_name::<T>().into(),
        context: None,
    })
}

/// Thread-safe event bus; cloning shares the same channel registry.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, Slot>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to events of type `T`.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the registry is corrupted for `T`.
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes with an explicit buffer size. The capacity only applies when this
    /// call creates the channel.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidCapacity`] for zero.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity {
                message: "capacity must be greater than zero".into(),
                context: Some(std::any::type_name::<T>().into()),
            });
        }
        Ok(self.sender::<T>(capacity)?.subscribe())
    }

    /// Publishes `event` to every current subscriber and returns how many received it.
    /// Publishing without subscribers is not an error.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the registry is corrupted for `T`.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        self.publish_arc(Arc::new(event))
    }

    /// Same as [`EventBus::publish`] for an already shared event.
    ///
    /// # Errors
    /// See [`EventBus::publish`].
    pub fn publish_arc<T: Event>(&self, event: Arc<T>) -> Result<usize, EventBusError> {
        let sender = self.sender::<T>(DEFAULT_CAPACITY)?;
        let delivered = sender.send(event).unwrap_or(0);
        trace!(event = std::any::type_name::<T>(), delivered, "Event published");
        Ok(delivered)
    }

    fn sender<T: Event>(&self, capacity: usize) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let key = TypeId::of::<T>();
        if let Some(slot) = self.channels.read().get(&key) {
            return sender_of::<T>(slot);
        }

        let mut channels = self.channels.write();
        let slot = channels.entry(key).or_insert_with(|| {
            let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
            Box::new(tx) as Slot
        });
        sender_of::<T>(slot)
    }
}
