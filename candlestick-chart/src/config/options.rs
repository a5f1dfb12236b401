//! Presentation options handed to the charting library

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Candlestick presentation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Chart width in pixels (viewport width)
    pub width: u32,
    /// Chart height in pixels (viewport height)
    pub height: u32,
    /// Fill of bars that close above their open
    pub rising_color: String,
    /// Fill of bars that close below their open
    pub falling_color: String,
    /// Legend position, `none` hides it
    pub legend: String,
    /// Bar width relative to its slot
    pub bar_group_width: String,
    /// Optional chart title
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 900,
            height: 500,
            rising_color: "#0f9d58".to_string(),
            falling_color: "#a52714".to_string(),
            legend: "none".to_string(),
            bar_group_width: "80%".to_string(),
            title: None,
        }
    }
}

impl RenderOptions {
    /// Default options sized to the current viewport
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Same options with a different viewport
    pub fn resized(&self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self.clone()
        }
    }

    /// Option object in the shape the charting library expects
    pub fn to_chart_options(&self) -> Value {
        let mut options = json!({
            "width": self.width,
            "height": self.height,
            "legend": self.legend,
            "bar": { "groupWidth": self.bar_group_width },
            "candlestick": {
                "fallingColor": { "strokeWidth": 0, "fill": self.falling_color },
                "risingColor": { "strokeWidth": 0, "fill": self.rising_color },
            },
        });
        if let Some(title) = &self.title {
            options["title"] = json!(title);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_options_shape() {
        let options = RenderOptions::for_viewport(640, 480).to_chart_options();

        assert_eq!(options["width"], 640);
        assert_eq!(options["height"], 480);
        assert_eq!(options["legend"], "none");
        assert_eq!(options["candlestick"]["risingColor"]["fill"], "#0f9d58");
        assert_eq!(options["candlestick"]["fallingColor"]["fill"], "#a52714");
        assert!(options.get("title").is_none());
    }

    #[test]
    fn test_title_is_forwarded() {
        let options = RenderOptions {
            title: Some("BTC/USDT".to_string()),
            ..RenderOptions::default()
        };
        assert_eq!(options.to_chart_options()["title"], "BTC/USDT");
    }
}
