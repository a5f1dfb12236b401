use anyhow::Context;
use candlestick_chart::{LengthPolicy, RenderOptions, WebAppDescriptor};
use dotenv::dotenv;

pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub length_policy: LengthPolicy,
    pub chart_width: u32,
    pub chart_height: u32,
    pub rising_color: Option<String>,
    pub falling_color: Option<String>,
    pub chart_title: Option<String>,
    pub descriptor_path: Option<String>,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        Ok(Config {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "9999".to_string())
                .parse::<u16>()
                .context("PORT must be a port number")?,
            length_policy: std::env::var("LENGTH_POLICY")
                .unwrap_or_else(|_| "strict".to_string())
                .parse::<LengthPolicy>()
                .map_err(anyhow::Error::msg)?,
            chart_width: std::env::var("CHART_WIDTH")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .unwrap_or(900),
            chart_height: std::env::var("CHART_HEIGHT")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .unwrap_or(500),
            rising_color: std::env::var("RISING_COLOR").ok(),
            falling_color: std::env::var("FALLING_COLOR").ok(),
            chart_title: std::env::var("CHART_TITLE").ok(),
            descriptor_path: std::env::var("DESCRIPTOR_PATH").ok(),
            log_format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::for_viewport(self.chart_width, self.chart_height);
        if let Some(color) = &self.rising_color {
            options.rising_color = color.clone();
        }
        if let Some(color) = &self.falling_color {
            options.falling_color = color.clone();
        }
        options.title = self.chart_title.clone();
        options
    }

    /// Descriptor from `DESCRIPTOR_PATH`, or the built-in candlestick one
    pub fn load_descriptor(&self) -> Result<WebAppDescriptor, anyhow::Error> {
        match &self.descriptor_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading webapp descriptor {}", path))?;
                Ok(WebAppDescriptor::from_json(&raw)?)
            }
            None => Ok(WebAppDescriptor::candlestick()),
        }
    }
}
