use crate::ui::legend::Legend;

/// Corner of the map a control is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[cfg(feature = "egui")]
impl ControlPosition {
    /// Pivot and screen position for a control inset by `margin` from the
    /// matching corner of `rect`
    pub fn anchor(&self, rect: egui::Rect, margin: f32) -> (egui::Align2, egui::Pos2) {
        use egui::{pos2, Align2};
        match self {
            ControlPosition::TopLeft => (
                Align2::LEFT_TOP,
                pos2(rect.left() + margin, rect.top() + margin),
            ),
            ControlPosition::TopRight => (
                Align2::RIGHT_TOP,
                pos2(rect.right() - margin, rect.top() + margin),
            ),
            ControlPosition::BottomLeft => (
                Align2::LEFT_BOTTOM,
                pos2(rect.left() + margin, rect.bottom() - margin),
            ),
            ControlPosition::BottomRight => (
                Align2::RIGHT_BOTTOM,
                pos2(rect.right() - margin, rect.bottom() - margin),
            ),
        }
    }
}

/// A layer as listed in the layers control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerEntry {
    pub id: String,
    pub name: String,
}

impl LayerEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A user choice made in the layers control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerAction {
    SelectBase(String),
    ToggleOverlay { id: String, visible: bool },
}

/// Base layer radio list plus overlay checkboxes
#[derive(Debug, Clone, PartialEq)]
pub struct LayersControl {
    pub position: ControlPosition,
    /// When false the list is always expanded
    pub collapsed: bool,
    pub base_layers: Vec<LayerEntry>,
    pub overlays: Vec<LayerEntry>,
}

impl LayersControl {
    pub fn new(base_layers: Vec<LayerEntry>, overlays: Vec<LayerEntry>) -> Self {
        Self {
            position: ControlPosition::TopRight,
            collapsed: true,
            base_layers,
            overlays,
        }
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }
}

#[cfg(feature = "egui")]
impl LayersControl {
    /// Draws the control; returns the choice made this frame, if any
    pub fn show(
        &self,
        ctx: &egui::Context,
        map_rect: egui::Rect,
        active_base: Option<&str>,
        overlay_visible: impl Fn(&str) -> bool,
    ) -> Option<LayerAction> {
        let mut action = None;
        let (align, corner) = self.position.anchor(map_rect, 10.0);

        egui::Area::new(egui::Id::new("quakemap_layers_control"))
            .pivot(align)
            .fixed_pos(corner)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    let body = |ui: &mut egui::Ui, action: &mut Option<LayerAction>| {
                        for entry in &self.base_layers {
                            let selected = active_base == Some(entry.id.as_str());
                            if ui.radio(selected, &entry.name).clicked() && !selected {
                                *action = Some(LayerAction::SelectBase(entry.id.clone()));
                            }
                        }
                        if !self.overlays.is_empty() {
                            ui.separator();
                        }
                        for entry in &self.overlays {
                            let mut visible = overlay_visible(&entry.id);
                            if ui.checkbox(&mut visible, &entry.name).changed() {
                                *action = Some(LayerAction::ToggleOverlay {
                                    id: entry.id.clone(),
                                    visible,
                                });
                            }
                        }
                    };

                    if self.collapsed {
                        ui.collapsing("Layers", |ui| body(ui, &mut action));
                    } else {
                        body(ui, &mut action);
                    }
                });
            });

        action
    }
}

/// Control manager that holds the map's controls
#[derive(Debug, Clone, Default)]
pub struct ControlManager {
    layers_control: Option<LayersControl>,
    legend: Option<Legend>,
}

impl ControlManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layers control
    pub fn with_layers_control(mut self, control: LayersControl) -> Self {
        self.layers_control = Some(control);
        self
    }

    /// Add a legend
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    pub fn layers_control(&self) -> Option<&LayersControl> {
        self.layers_control.as_ref()
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn len(&self) -> usize {
        self.layers_control.is_some() as usize + self.legend.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::DepthScale;

    #[test]
    fn test_layers_control_defaults() {
        let control = LayersControl::new(
            vec![LayerEntry::new("street", "Street Map")],
            vec![LayerEntry::new("quakes", "Earthquakes")],
        );
        assert!(control.collapsed);
        assert_eq!(control.position, ControlPosition::TopRight);
        assert!(!control.with_collapsed(false).collapsed);
    }

    #[test]
    fn test_control_manager() {
        let manager = ControlManager::new();
        assert!(manager.is_empty());

        let manager = manager
            .with_layers_control(LayersControl::new(Vec::new(), Vec::new()))
            .with_legend(Legend::from_scale("Depth", &DepthScale::default()));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.legend().map(|l| l.entries.len()), Some(6));
    }
}
