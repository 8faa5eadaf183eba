use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Slippy-map URL template such as `https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png`
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateTileSource {
    template: String,
    subdomains: Vec<String>,
}

impl TemplateTileSource {
    pub fn new(template: impl Into<String>, subdomains: Vec<String>) -> Self {
        Self {
            template: template.into(),
            subdomains,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Subdomain for a tile; neighbouring tiles rotate so requests spread
    /// over the provider's hosts
    fn subdomain(&self, coord: TileCoord) -> &str {
        if self.subdomains.is_empty() {
            return "";
        }
        let idx = ((coord.x as usize) + (coord.y as usize)) % self.subdomains.len();
        &self.subdomains[idx]
    }
}

impl TileSource for TemplateTileSource {
    fn url(&self, coord: TileCoord) -> String {
        self.template
            .replace("{s}", self.subdomain(coord))
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}
