use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};

use crate::render::RenderPass;

impl RenderPass<'_> {
    /// Export the pass as a FeatureCollection whose features carry `style` and
    /// `tooltip` objects next to their original properties.
    pub fn to_geojson(&self) -> Result<Value> {
        let features = self.styled()
            .map(|styled| {
                let mut properties: Map<String, Value> = styled.feature.properties.clone();
                properties.insert("style".to_string(), serde_json::to_value(&styled.style)?);
                properties.insert("tooltip".to_string(), serde_json::to_value(&styled.tooltip)?);

                let mut feature = json!({
                    "type": "Feature",
                    "geometry": styled.feature.geometry,
                    "properties": properties,
                });
                if let Some(id) = &styled.feature.id {
                    feature["id"] = id.clone();
                }
                Ok(feature)
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()
            .context("[render::geojson] Failed to serialize feature styles")?;

        Ok(json!({
            "type": "FeatureCollection",
            "features": features,
            "metadata": {
                "center": self.config().center,
                "zoom": self.config().zoom,
                "legend": self.legend(),
                "validation": self.validation().message(),
            },
        }))
    }

    /// Write the styled FeatureCollection to `path`.
    pub fn write_geojson(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(&self.to_geojson()?)
            .context("[render::geojson] Failed to serialize GeoJSON")?;
        fs::write(path, bytes)
            .with_context(|| format!("[render::geojson] Failed to write {}", path.display()))
    }
}
