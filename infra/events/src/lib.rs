//! # Event Bus
//!
//! A type-keyed, in-process event bus connecting feature slices.
//!
//! Every channel is a bounded broadcast that fans each event out to all current
//! subscribers (attempt submitted, game finished). Events are identified by their Rust
//! type and delivered as `Arc<T>`.
//!
//! # Example
//!
//! ```rust
//! use gems_event_bus::{EventBus, EventReceiverExt, EventBusError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct GameFinished { score: u32 }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!     let mut rx = bus.subscribe::<GameFinished>()?;
//!     bus.publish(GameFinished { score: 900 })?;
//!
//!     assert_eq!(rx.next_event().await.map(|e| e.score), Some(900));
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
