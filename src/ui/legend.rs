use crate::style::{color::Color, depth::DepthScale};
use crate::ui::controls::ControlPosition;
use crate::ui::popup::escape_html;

/// One legend row: a color swatch and its range label
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub color: Color,
    pub label: String,
}

/// Depth color legend
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub position: ControlPosition,
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// One entry per bucket of `scale`, in bucket order
    pub fn from_scale(title: impl Into<String>, scale: &DepthScale) -> Self {
        let entries = scale
            .buckets()
            .iter()
            .map(|bucket| LegendEntry {
                color: bucket.color,
                label: bucket.label.clone(),
            })
            .collect();

        Self {
            position: ControlPosition::BottomRight,
            title: title.into(),
            entries,
        }
    }

    /// Markup of the legend box: the title stacked one word per line, then
    /// a list of swatch/label pairs
    pub fn to_html(&self) -> String {
        let title = self
            .title
            .split_whitespace()
            .map(escape_html)
            .collect::<Vec<_>>()
            .join("<br />");

        let mut html = format!("<h1>{}</h1><ul>", title);
        for entry in &self.entries {
            html.push_str(&format!(
                "<li><span style=\"background-color: {};\" class=\"color-box\"></span>\
                 <span class=\"range-label\">{}</span></li>",
                entry.color,
                escape_html(&entry.label)
            ));
        }
        html.push_str("</ul>");
        html
    }
}

#[cfg(feature = "egui")]
impl Legend {
    pub fn show(&self, ctx: &egui::Context, map_rect: egui::Rect) {
        let margin = 10.0;
        let (align, corner) = self.position.anchor(map_rect, margin);

        egui::Area::new(egui::Id::new("quakemap_legend"))
            .pivot(align)
            .fixed_pos(corner)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.strong(&self.title);
                    for entry in &self.entries {
                        ui.horizontal(|ui| {
                            let (swatch, _) =
                                ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
                            ui.painter()
                                .rect_filled(swatch, 0.0, egui::Color32::from(entry.color));
                            ui.label(&entry.label);
                        });
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::LEGEND_TITLE;

    #[test]
    fn test_entries_follow_scale() {
        let legend = Legend::from_scale(LEGEND_TITLE, &DepthScale::default());

        let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["-10-10", "10-30", "30-50", "50-70", "70-90", "90+"]);

        let colors: Vec<String> = legend.entries.iter().map(|e| e.color.to_hex()).collect();
        assert_eq!(
            colors,
            vec!["#0feb2d", "#eef131", "#f7ca04", "#f78d04", "#f75104", "#d10000"]
        );
        assert_eq!(legend.position, ControlPosition::BottomRight);
    }

    #[test]
    fn test_html_markup() {
        let legend = Legend::from_scale(LEGEND_TITLE, &DepthScale::default());
        let html = legend.to_html();

        assert!(html.starts_with("<h1>Depth<br />color<br />scale</h1><ul>"));
        assert!(html.contains(
            "<li><span style=\"background-color: #0feb2d;\" class=\"color-box\"></span>\
             <span class=\"range-label\">-10-10</span></li>"
        ));
        assert!(html.ends_with("<span class=\"range-label\">90+</span></li></ul>"));
        assert_eq!(html.matches("<li>").count(), 6);
    }
}
