use crate::core::geo::LatLng;
use std::fmt;

/// Text shown when a marker is clicked: a heading followed by
/// separator-delimited lines
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub lines: Vec<String>,
}

impl PopupContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// `<h3>title</h3>` then each line as `<hr><p>line</p>`
    pub fn to_html(&self) -> String {
        let mut html = format!("<h3>{}</h3>", escape_html(&self.title));
        for line in &self.lines {
            html.push_str("<hr><p>");
            html.push_str(&escape_html(line));
            html.push_str("</p>");
        }
        html
    }
}

impl fmt::Display for PopupContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for line in &self.lines {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Escapes text for insertion into HTML markup
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The popup currently open on the map, anchored at its marker
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Overlay holding the marker
    pub layer_id: String,
    /// Index of the marker inside its overlay
    pub marker_index: usize,
    pub position: LatLng,
    pub content: PopupContent,
}

#[cfg(feature = "egui")]
impl Popup {
    /// Draws the popup just above `anchor` (screen coordinates).
    /// Returns true when the close button was clicked.
    pub fn show(&self, ctx: &egui::Context, anchor: egui::Pos2) -> bool {
        let mut close = false;

        egui::Area::new(egui::Id::new("quakemap_popup"))
            .order(egui::Order::Foreground)
            .fixed_pos(anchor + egui::vec2(12.0, -12.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(280.0);
                    ui.horizontal(|ui| {
                        ui.heading(&self.content.title);
                        if ui.small_button("×").clicked() {
                            close = true;
                        }
                    });
                    for line in &self.content.lines {
                        ui.separator();
                        ui.label(line);
                    }
                });
            });

        close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> PopupContent {
        PopupContent::new("1km SSE of Example, CA")
            .with_line("Tue Nov 14 2023")
            .with_line("Magnitude: 4.5")
            .with_line("Depth: 12.3")
    }

    #[test]
    fn test_html_markup() {
        assert_eq!(
            content().to_html(),
            "<h3>1km SSE of Example, CA</h3><hr><p>Tue Nov 14 2023</p><hr><p>Magnitude: 4.5</p><hr><p>Depth: 12.3</p>"
        );
    }

    #[test]
    fn test_title_is_escaped() {
        let html = PopupContent::new("<script>alert('x')</script> & co").to_html();
        assert_eq!(
            html,
            "<h3>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co</h3>"
        );
    }

    #[test]
    fn test_display_one_line_per_entry() {
        let text = content().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "1km SSE of Example, CA");
        assert_eq!(lines[3], "Depth: 12.3");
    }
}
