//! Tandem Core Library
//!
//! Platform-agnostic interaction and synchronization engine for the
//! Tandem shared canvas: geometry, the shape model, freehand stroke
//! capture, the mutation gateway over a replicated ordered collection,
//! the gesture state machine, and the presence adapter. Rendering, UI
//! chrome, transport, and the replicated backend itself live elsewhere
//! and plug in through the ports in [`room`].

pub mod camera;
pub mod chat;
pub mod config;
pub mod controller;
pub mod gateway;
pub mod geometry;
pub mod palette;
pub mod presence;
pub mod room;
pub mod shapes;
pub mod stroke;

pub use camera::Camera;
pub use chat::ChatEntry;
pub use config::BoardConfig;
pub use controller::{CanvasController, GestureState, HostEvent, MouseButton, Tool};
pub use gateway::{MutationError, MutationGateway, UpdateOutcome};
pub use geometry::{Frame, HandleKind};
pub use presence::{Presence, RemotePeer};
pub use room::{History, Identity, PresenceChannel, SharedList};
pub use shapes::{Color, Shape, ShapeId, ShapePatch};
