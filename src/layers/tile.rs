use crate::{
    core::{config::TileLayerConfig, geo::TileCoord},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    tiles::source::{TemplateTileSource, TileSource},
};

/// Raster base layer backed by a slippy-map tile provider
pub struct TileLayer {
    properties: LayerProperties,
    config: TileLayerConfig,
    source: TemplateTileSource,
}

impl TileLayer {
    pub fn new(config: TileLayerConfig) -> Self {
        let properties =
            LayerProperties::new(config.id.clone(), config.name.clone(), LayerType::Tile);
        let source = TemplateTileSource::new(config.url_template.clone(), config.subdomains.clone());
        Self {
            properties,
            config,
            source,
        }
    }

    pub fn config(&self) -> &TileLayerConfig {
        &self.config
    }

    /// Tile URL for `coord`
    pub fn url(&self, coord: TileCoord) -> String {
        self.source.url(coord)
    }

    pub fn min_zoom(&self) -> u8 {
        self.config.min_zoom
    }

    pub fn max_zoom(&self) -> u8 {
        self.config.max_zoom
    }

    /// Provider attribution as HTML
    pub fn attribution(&self) -> &str {
        &self.config.attribution
    }

    /// Attribution with markup stripped and `&copy;` resolved, for plain text display
    pub fn attribution_text(&self) -> String {
        let mut text = String::with_capacity(self.config.attribution.len());
        let mut in_tag = false;
        for c in self.config.attribution.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => text.push(c),
                _ => {}
            }
        }
        text.replace("&copy;", "©").replace("&amp;", "&")
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(properties);

    fn options(&self) -> serde_json::Value {
        let mut options = self.properties.to_json();
        options["url_template"] = self.config.url_template.clone().into();
        options["attribution"] = self.config.attribution.clone().into();
        options["max_zoom"] = self.config.max_zoom.into();
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_layer() {
        let layer = TileLayer::new(TileLayerConfig::street());
        assert_eq!(layer.id(), "street");
        assert_eq!(layer.name(), "Street Map");
        assert_eq!(layer.layer_type(), LayerType::Tile);
        assert_eq!(
            layer.url(TileCoord::new(0, 0, 0)),
            "https://a.tile.openstreetmap.org/0/0/0.png"
        );
        assert_eq!(layer.options()["max_zoom"], 18);
    }

    #[test]
    fn test_attribution_text() {
        let layer = TileLayer::new(TileLayerConfig::street());
        assert_eq!(layer.attribution_text(), "© OpenStreetMap contributors");

        let topo = TileLayer::new(TileLayerConfig::topographic());
        assert!(topo.attribution().contains("opentopomap.org"));
        assert_eq!(
            topo.attribution_text(),
            "Map data: © OpenStreetMap contributors, SRTM | Map style: © OpenTopoMap (CC-BY-SA)"
        );
    }
}
