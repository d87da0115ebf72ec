use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the mail server.
    pub server: String,
    pub layout: LayoutConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Sender column width in characters
    pub sender_width: usize,
    /// Timestamp column width in characters
    pub timestamp_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub fg: String,
    pub fg_muted: String,
    pub bg_panel: String,

    pub border: String,
    pub border_active: String,

    pub primary: String,

    pub success: String,
    pub warning: String,
    pub error: String,

    pub selected_bg: String,
    pub unread: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: "http://127.0.0.1:8000".to_string(),
            layout: LayoutConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sender_width: 24,
            timestamp_width: 22,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            fg: "#d8dee9".to_string(),
            fg_muted: "#7b8394".to_string(),
            bg_panel: "#20242c".to_string(),

            border: "#3b4252".to_string(),
            border_active: "#88c0d0".to_string(),

            primary: "#88c0d0".to_string(),

            success: "#a3be8c".to_string(),
            warning: "#ebcb8b".to_string(),
            error: "#bf616a".to_string(),

            selected_bg: "#2e3440".to_string(),
            unread: "#8fbcbb".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = dirs::config_dir()
            .map(|p| p.join("postbox/config.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/postbox/config.toml"));

        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => eprintln!("Config parse error: {}", e),
                },
                Err(e) => eprintln!("Config read error: {}", e),
            }
        }

        Self::default()
    }
}

impl ThemeConfig {
    pub fn fg(&self) -> ratatui::style::Color {
        parse_color(&self.fg)
    }
    pub fn fg_muted(&self) -> ratatui::style::Color {
        parse_color(&self.fg_muted)
    }
    pub fn bg_panel(&self) -> ratatui::style::Color {
        parse_color(&self.bg_panel)
    }
    pub fn border(&self) -> ratatui::style::Color {
        parse_color(&self.border)
    }
    pub fn border_active(&self) -> ratatui::style::Color {
        parse_color(&self.border_active)
    }
    pub fn primary(&self) -> ratatui::style::Color {
        parse_color(&self.primary)
    }
    pub fn success(&self) -> ratatui::style::Color {
        parse_color(&self.success)
    }
    pub fn warning(&self) -> ratatui::style::Color {
        parse_color(&self.warning)
    }
    pub fn error(&self) -> ratatui::style::Color {
        parse_color(&self.error)
    }
    pub fn selected_bg(&self) -> ratatui::style::Color {
        parse_color(&self.selected_bg)
    }
    pub fn unread(&self) -> ratatui::style::Color {
        parse_color(&self.unread)
    }
}

/// Parse "#RRGGBB" or a named color, falling back to white.
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    if s.starts_with('#') && s.len() == 7 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[1..3], 16),
            u8::from_str_radix(&s[3..5], 16),
            u8::from_str_radix(&s[5..7], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }

    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => Color::White,
    }
}
