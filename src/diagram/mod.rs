//! Rendering-independent core of the diagram viewer: registry, selection
//! store, collapse tracking, click dispatch, tooltip and layout.

mod collapse;
mod config;
pub mod dispatch;
pub mod layout;
mod registry;
mod session;
mod store;
mod text;
mod tooltip;
mod types;
mod viewport;

pub use collapse::CollapseState;
pub use config::{ROOT_DIAGRAM_ID, ViewerConfig};
pub use dispatch::ClickAction;
pub use layout::{ContainerSize, LayoutEngine, LayoutResult};
pub use registry::{DiagramRegistry, RegistryError};
pub use session::DiagramSession;
pub use store::SelectionStore;
pub use text::{MessageCatalog, TextLookup, diagram_name_key};
pub use tooltip::{ScreenPoint, TooltipState};
pub use types::{
	DiagramDefinition, EdgeDescriptor, LayoutDirection, LayoutStrategy, NodeDescriptor, TableData,
	TreeConfig,
};
pub use viewport::{PanState, ViewTransform};
