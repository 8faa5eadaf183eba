pub mod controls;
pub mod legend;
pub mod popup;

#[cfg(feature = "egui")]
pub mod widget;

pub use controls::{ControlManager, ControlPosition, LayerAction, LayerEntry, LayersControl};
pub use legend::{Legend, LegendEntry};
pub use popup::{Popup, PopupContent};

#[cfg(feature = "egui")]
pub use widget::QuakeMapWidget;
