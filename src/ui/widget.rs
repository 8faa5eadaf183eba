use crate::{
    core::{geo::Point, map::Map},
    layers::base::LayerTrait,
    tiles::loader::{TileLoader, TileLoaderConfig},
    MapError, Result,
};
use egui::{
    pos2, Align2, Color32, ColorImage, CursorIcon, FontId, Pos2, Rect, Response, Sense, Stroke,
    TextureHandle, TextureId, TextureOptions, Ui,
};
use lru::LruCache;
use std::num::NonZeroUsize;

const BACKGROUND: Color32 = Color32::from_rgb(0xdd, 0xdd, 0xdd);
const TEXTURE_CACHE_SIZE: usize = 256;
/// Scroll distance in points that makes one zoom step (one wheel notch)
const SCROLL_STEP: f32 = 50.0;

/// Collects scroll deltas across frames so that trackpads, which report
/// many small deltas, zoom by whole steps like a wheel does
#[derive(Debug, Default)]
struct ScrollAccumulator {
    pending: f32,
}

impl ScrollAccumulator {
    /// Adds one frame's delta and returns the whole steps it completes
    fn feed(&mut self, delta: f32) -> i32 {
        self.pending += delta;
        let steps = (self.pending / SCROLL_STEP).trunc();
        self.pending -= steps * SCROLL_STEP;
        steps as i32
    }

    fn reset(&mut self) {
        self.pending = 0.0;
    }
}

/// Interactive egui view of a composed [`Map`]
///
/// Draws the active base layer's tiles, the visible marker overlays, the
/// layers control, the legend and the open popup. Dragging pans, the
/// scroll wheel zooms around the pointer and a click opens the popup of
/// the marker underneath it.
///
/// ```no_run
/// # fn demo(ui: &mut egui::Ui, map: quakemap::Map) {
/// use quakemap::ui::{widget::MapWidgetExt, QuakeMapWidget};
///
/// let mut widget = QuakeMapWidget::new(map);
/// ui.quake_map(&mut widget);
/// # }
/// ```
pub struct QuakeMapWidget {
    map: Map,
    tiles: TileLoader,
    textures: LruCache<String, TextureHandle>,
    scroll: ScrollAccumulator,
}

impl QuakeMapWidget {
    pub fn new(map: Map) -> Self {
        Self::with_tile_loader(map, TileLoader::new(TileLoaderConfig::default()))
    }

    pub fn with_tile_loader(map: Map, tiles: TileLoader) -> Self {
        let capacity = NonZeroUsize::new(TEXTURE_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self {
            map,
            tiles,
            textures: LruCache::new(capacity),
            scroll: ScrollAccumulator::default(),
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        let size = Point::new(rect.width() as f64, rect.height() as f64);
        if self.map.viewport().size != size {
            self.map.viewport_mut().set_size(size);
        }

        self.handle_input(ui, rect, &response);

        self.tiles.poll();
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);
        self.draw_tiles(ui.ctx(), &painter, rect);
        self.draw_markers(&painter, rect);
        self.draw_attribution(&painter, rect);

        self.show_controls(ui.ctx(), rect);
        self.show_popup(ui.ctx(), rect);

        if self.tiles.pending_count() > 0 {
            ui.ctx().request_repaint();
        }

        response
    }

    fn handle_input(&mut self, ui: &Ui, rect: Rect, response: &Response) {
        if response.dragged() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
            let delta = response.drag_delta();
            if delta.length_sq() > 0.0 {
                self.map.pan(Point::new(delta.x as f64, delta.y as f64));
            }
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            let focus = response.hover_pos().map(|pos| to_map_point(pos, rect));
            self.scroll_zoom(scroll, focus);
        } else {
            self.scroll.reset();
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.map.click(&to_map_point(pos, rect));
            }
        }
    }

    /// Zooms one step per [`SCROLL_STEP`] of accumulated scroll
    fn scroll_zoom(&mut self, delta: f32, focus: Option<Point>) {
        let steps = self.scroll.feed(delta);
        for _ in 0..steps.unsigned_abs() {
            self.map.zoom_by(steps.signum() as f64, focus);
        }
    }

    fn draw_tiles(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect) {
        let Some(base) = self.map.active_base_layer() else {
            return;
        };
        let viewport = self.map.viewport();
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

        for coord in viewport.visible_tiles(base.min_zoom(), base.max_zoom()) {
            let url = base.url(coord);
            let Some(texture) = tile_texture(ctx, &mut self.tiles, &mut self.textures, &url) else {
                continue;
            };

            let (min, max) = viewport.tile_screen_bounds(&coord);
            let tile_rect = Rect::from_min_max(to_screen(min, rect), to_screen(max, rect));
            painter.image(texture, tile_rect, uv, Color32::WHITE);
        }
    }

    fn draw_markers(&self, painter: &egui::Painter, rect: Rect) {
        let viewport = self.map.viewport();

        for layer in self.map.overlays() {
            if !layer.is_visible() {
                continue;
            }
            let opacity = layer.opacity();

            for marker in layer.markers() {
                if !marker.is_drawable() || !marker.position().is_valid() {
                    continue;
                }
                let center = to_screen(viewport.lat_lng_to_pixel(&marker.position()), rect);
                let radius = marker.radius() as f32;
                if !rect.expand(radius).contains(center) {
                    continue;
                }

                painter.circle(
                    center,
                    radius,
                    marker.fill_color().to_color32(marker.fill_opacity() * opacity),
                    Stroke::new(marker.stroke_weight(), marker.stroke_color().to_color32(opacity)),
                );
            }
        }
    }

    fn draw_attribution(&self, painter: &egui::Painter, rect: Rect) {
        if let Some(base) = self.map.active_base_layer() {
            painter.text(
                rect.left_bottom() + egui::vec2(5.0, -5.0),
                Align2::LEFT_BOTTOM,
                base.attribution_text(),
                FontId::proportional(10.0),
                Color32::from_gray(60),
            );
        }
    }

    fn show_controls(&mut self, ctx: &egui::Context, rect: Rect) {
        let active = self.map.active_base_layer().map(|l| l.id().to_string());

        let action = self.map.controls().layers_control().and_then(|control| {
            control.show(ctx, rect, active.as_deref(), |id| {
                self.map.overlay(id).is_some_and(|layer| layer.is_visible())
            })
        });

        if let Some(legend) = self.map.controls().legend() {
            legend.show(ctx, rect);
        }

        if let Some(action) = action {
            if let Err(e) = self.map.apply_layer_action(action) {
                log::warn!("layer control: {}", e);
            }
        }
    }

    fn show_popup(&mut self, ctx: &egui::Context, rect: Rect) {
        let close = match self.map.popup() {
            Some(popup) => {
                let anchor = to_screen(self.map.viewport().lat_lng_to_pixel(&popup.position), rect);
                rect.contains(anchor) && popup.show(ctx, anchor)
            }
            None => false,
        };

        if close {
            self.map.close_popup();
        }
    }
}

/// Texture for a tile URL, uploading freshly downloaded bytes on first use
fn tile_texture(
    ctx: &egui::Context,
    tiles: &mut TileLoader,
    textures: &mut LruCache<String, TextureHandle>,
    url: &str,
) -> Option<TextureId> {
    let key = url.to_string();
    if let Some(texture) = textures.get(&key) {
        return Some(texture.id());
    }

    let bytes = tiles.request(url)?;
    match decode_tile(&bytes) {
        Ok(image) => {
            let texture = ctx.load_texture(url, image, TextureOptions::LINEAR);
            let id = texture.id();
            textures.put(key, texture);
            Some(id)
        }
        Err(e) => {
            log::warn!("tile {} is not a usable image: {}", url, e);
            tiles.mark_failed(url);
            None
        }
    }
}

/// Decodes PNG/JPEG tile bytes into an egui image
pub(crate) fn decode_tile(bytes: &[u8]) -> Result<ColorImage> {
    let image = image::load_from_memory(bytes).map_err(|e| MapError::Image(e.to_string()))?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

fn to_screen(point: Point, rect: Rect) -> Pos2 {
    pos2(rect.min.x + point.x as f32, rect.min.y + point.y as f32)
}

fn to_map_point(pos: Pos2, rect: Rect) -> Point {
    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}

pub trait MapWidgetExt {
    fn quake_map(&mut self, widget: &mut QuakeMapWidget) -> Response;
}

impl MapWidgetExt for Ui {
    fn quake_map(&mut self, widget: &mut QuakeMapWidget) -> Response {
        widget.show(self)
    }
}
