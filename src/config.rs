//! Runtime configuration for the resolver.

use serde::Deserialize;

fn default_reserve_triangles() -> usize {
    128
}

/// Tuning knobs for the renderer and its worker pool.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Number of worker threads. 0 means "use hardware concurrency".
    #[serde(default)]
    pub workers: usize,

    /// Initial capacity of the per-frame triangle buffer.
    #[serde(default = "default_reserve_triangles")]
    pub reserve_triangles: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            reserve_triangles: default_reserve_triangles(),
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.workers, 0);
        assert_eq!(config.reserve_triangles, 128);
    }

    #[test]
    fn from_json_partial() {
        let config = RenderConfig::from_json(r#"{ "workers": 4 }"#).unwrap();
        assert_eq!(config.workers, 4);
        assert_eq!(config.reserve_triangles, 128);
    }
}
