//! Configuration parsing for the fractal driver.

use anyhow::{Context, Result};
use clap::ValueEnum;
use fractal_mesh::constants::{
  DEFAULT_COLOR, DEFAULT_DEPTH, DEFAULT_EXPLODE_AMOUNT, DEFAULT_EXPLODE_SPEED, DEFAULT_ROTATION_SPEED,
  MAX_DEPTH,
};
use fractal_mesh::{FractalConfig, Rgb, ShapeVariant};
use serde::Deserialize;
use std::path::Path;

/// Shape names accepted on the command line and in TOML.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
  #[default]
  Triangle,
  Tetrahedron,
}

impl From<Shape> for ShapeVariant {
  fn from(shape: Shape) -> Self {
    match shape {
      Shape::Triangle => ShapeVariant::Triangle,
      Shape::Tetrahedron => ShapeVariant::Tetrahedron,
    }
  }
}

/// Root driver configuration. Every key is optional.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Initial recursion depth.
  pub depth: u32,
  /// Upper depth bound (capped by the engine limit).
  pub max_depth: u32,
  /// Fill colour as `#rrggbb` or `0xrrggbb`.
  pub color: String,
  pub shape: Shape,
  pub scale: f64,
  /// Radians per second around +Y.
  pub rotation_speed: f32,
  pub explode: bool,
  pub explode_speed: f32,
  pub explode_amount: f32,
  pub outline: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      depth: DEFAULT_DEPTH,
      max_depth: MAX_DEPTH,
      color: format!("#{DEFAULT_COLOR:06x}"),
      shape: Shape::default(),
      scale: 1.0,
      rotation_speed: DEFAULT_ROTATION_SPEED,
      explode: false,
      explode_speed: DEFAULT_EXPLODE_SPEED,
      explode_amount: DEFAULT_EXPLODE_AMOUNT,
      outline: true,
    }
  }
}

impl Config {
  /// Load configuration from a TOML file.
  pub fn load(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    Self::parse(&content)
  }

  /// Parse and validate TOML text.
  pub fn parse(content: &str) -> Result<Self> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config TOML")?;

    if !(config.scale.is_finite() && config.scale > 0.0) {
      anyhow::bail!("scale must be a positive number, got {}", config.scale);
    }
    if !config.explode_amount.is_finite() || !config.explode_speed.is_finite() {
      anyhow::bail!("explode_speed and explode_amount must be finite");
    }
    parse_color(&config.color)?;

    Ok(config)
  }

  /// Convert into the engine configuration.
  pub fn to_fractal_config(&self) -> Result<FractalConfig> {
    Ok(
      FractalConfig::new()
        .with_depth(self.depth)
        .with_max_depth(self.max_depth)
        .with_color(parse_color(&self.color)?)
        .with_shape(self.shape.into())
        .with_scale(self.scale)
        .with_rotation_speed(self.rotation_speed)
        .with_explode(self.explode, self.explode_speed, self.explode_amount)
        .with_outline(self.outline),
    )
  }
}

/// Parse `#rrggbb`, `0xrrggbb` or bare `rrggbb`.
pub fn parse_color(text: &str) -> Result<Rgb> {
  let trimmed = text.trim();
  let digits = trimmed
    .strip_prefix('#')
    .or_else(|| trimmed.strip_prefix("0x"))
    .unwrap_or(trimmed);

  if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
    anyhow::bail!("Invalid color {text:?}: expected #rrggbb");
  }
  let hex = u32::from_str_radix(digits, 16).with_context(|| format!("Invalid color {text:?}"))?;
  Ok(Rgb::from_hex(hex))
}

/// Parse a comma-separated rebuild sequence such as `3,0,5`.
pub fn parse_rebuild(text: &str) -> Result<Vec<i32>> {
  let depths = text
    .split(',')
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .map(|part| {
      part
        .parse::<i32>()
        .with_context(|| format!("Invalid depth in rebuild sequence: {part:?}"))
    })
    .collect::<Result<Vec<_>>>()?;

  if depths.is_empty() {
    anyhow::bail!("Rebuild sequence must name at least one depth");
  }
  Ok(depths)
}

#[cfg(test)]
mod tests {
  use super::*;
  use fractal_mesh::PackMode;

  #[test]
  fn test_empty_document_uses_defaults() {
    let config = Config::parse("").unwrap();
    let fractal = config.to_fractal_config().unwrap();
    assert_eq!(fractal, FractalConfig::default());
  }

  #[test]
  fn test_full_document() {
    let config = Config::parse(
      r##"
        depth = 5
        max_depth = 6
        color = "#ff8000"
        shape = "tetrahedron"
        scale = 2.0
        rotation_speed = 0.0
        explode = true
        explode_speed = 3.0
        explode_amount = 0.25
        outline = false
      "##,
    )
    .unwrap();
    let fractal = config.to_fractal_config().unwrap();

    assert_eq!(fractal.depth, 5);
    assert_eq!(fractal.depth_limit(), 6);
    assert_eq!(fractal.color.to_hex(), 0xff8000);
    assert_eq!(fractal.shape, ShapeVariant::Tetrahedron);
    assert_eq!(fractal.scale, 2.0);
    assert_eq!(fractal.explode.speed, 3.0);
    assert_eq!(fractal.pack_mode(), PackMode::Local);
    assert!(!fractal.outline);
  }

  #[test]
  fn test_unknown_key_rejected() {
    assert!(Config::parse("colour = \"#ffffff\"").is_err());
  }

  #[test]
  fn test_unknown_shape_rejected() {
    assert!(Config::parse("shape = \"cube\"").is_err());
  }

  #[test]
  fn test_invalid_scale_rejected() {
    assert!(Config::parse("scale = 0.0").is_err());
    assert!(Config::parse("scale = -1.5").is_err());
  }

  #[test]
  fn test_parse_color_forms() {
    assert_eq!(parse_color("#44c88d").unwrap().to_hex(), 0x44c88d);
    assert_eq!(parse_color("0x44C88D").unwrap().to_hex(), 0x44c88d);
    assert_eq!(parse_color(" 102030 ").unwrap().to_hex(), 0x102030);
    assert!(parse_color("#fff").is_err());
    assert!(parse_color("#gg0000").is_err());
    assert!(parse_color("").is_err());
  }

  #[test]
  fn test_invalid_color_in_document() {
    let err = Config::parse("color = \"green\"").unwrap_err();
    assert!(err.to_string().contains("Invalid color"));
  }

  #[test]
  fn test_parse_rebuild() {
    assert_eq!(parse_rebuild("3,0,5").unwrap(), vec![3, 0, 5]);
    assert_eq!(parse_rebuild(" -1 , 9 ").unwrap(), vec![-1, 9]);
    assert!(parse_rebuild("").is_err());
    assert!(parse_rebuild(",,").is_err());
    assert!(parse_rebuild("3,x").is_err());
  }
}
