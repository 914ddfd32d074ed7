use serde::{Deserialize, Serialize};

/// Anything that can produce a tile image URL for a tile index.
///
/// The engine only decides which tiles are visible; fetching and caching
/// images is up to the rendering layer.
pub trait TileSource: Send + Sync {
    /// Build a URL for tile `x`, `y` at zoom `z` in the `dpr` resolution tier
    fn url(&self, x: u32, y: u32, z: u8, dpr: f64) -> String;
}

impl<F> TileSource for F
where
    F: Fn(u32, u32, u8, f64) -> String + Send + Sync,
{
    fn url(&self, x: u32, y: u32, z: u8, dpr: f64) -> String {
        self(x, y, z, dpr)
    }
}

/// Built-in providers, chosen by value instead of a global name table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileProvider {
    #[default]
    OpenStreetMap,
    StamenTerrain,
    StamenToner,
}

impl TileSource for TileProvider {
    fn url(&self, x: u32, y: u32, z: u8, dpr: f64) -> String {
        let retina = if dpr >= 2.0 { "@2x" } else { "" };
        match self {
            TileProvider::OpenStreetMap => {
                let subdomain = ['a', 'b', 'c'][((x as u64 + y as u64 + z as u64) % 3) as usize];
                format!(
                    "https://{}.tile.openstreetmap.org/{}/{}/{}.png",
                    subdomain, z, x, y
                )
            }
            TileProvider::StamenTerrain => format!(
                "https://stamen-tiles.a.ssl.fastly.net/terrain/{}/{}/{}{}.jpg",
                z, x, y, retina
            ),
            TileProvider::StamenToner => format!(
                "https://stamen-tiles.a.ssl.fastly.net/toner/{}/{}/{}{}.png",
                z, x, y, retina
            ),
        }
    }
}
