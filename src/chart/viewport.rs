//! Viewport rectangle of a series inside its container.
//!
//! Margins are given either in pixels or as a percentage of the container
//! size, the same way chart options usually express box layouts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Axis-aligned rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A margin: absolute pixels or a percentage of the container dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LengthRepr", into = "LengthRepr")]
pub enum Length {
    Pixels(f64),
    Percent(f64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f64),
    Text(String),
}

impl Length {
    /// Pixels this length stands for inside a container `container` pixels long.
    pub fn resolve(self, container: f64) -> f64 {
        match self {
            Length::Pixels(px) => px,
            Length::Percent(percent) => container * percent / 100.0,
        }
    }
}

impl FromStr for Length {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (number, percent) = match trimmed.strip_suffix('%') {
            Some(number) => (number.trim_end(), true),
            None => (trimmed, false),
        };

        let value = number
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LayoutError::InvalidLength(s.to_string()))?;

        Ok(if percent {
            Length::Percent(value)
        } else {
            Length::Pixels(value)
        })
    }
}

impl TryFrom<LengthRepr> for Length {
    type Error = LayoutError;

    fn try_from(repr: LengthRepr) -> Result<Self, Self::Error> {
        match repr {
            LengthRepr::Number(px) if px.is_finite() => Ok(Length::Pixels(px)),
            LengthRepr::Number(px) => Err(LayoutError::InvalidLength(px.to_string())),
            LengthRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Length> for LengthRepr {
    fn from(length: Length) -> Self {
        match length {
            Length::Pixels(px) => LengthRepr::Number(px),
            Length::Percent(percent) => LengthRepr::Text(format!("{percent}%")),
        }
    }
}

/// Distance from each container edge to the series viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxMargins {
    pub left: Length,
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
}

impl Default for BoxMargins {
    fn default() -> Self {
        Self::uniform(Length::Percent(12.0))
    }
}

impl BoxMargins {
    /// The same margin on every side.
    pub fn uniform(length: Length) -> Self {
        Self {
            left: length,
            top: length,
            right: length,
            bottom: length,
        }
    }
}

/// Supplies the size of the container a chart is drawn into.
pub trait ViewportProvider {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
}

/// Fixed container size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl ViewportProvider for ContainerSize {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

/// Viewport left after applying `margins` to the provider's container.
///
/// Margins wider than the container collapse the viewport to zero size.
pub fn view_rect(margins: &BoxMargins, provider: &impl ViewportProvider) -> Rect {
    let (container_width, container_height) = (provider.width(), provider.height());

    let x = margins.left.resolve(container_width);
    let y = margins.top.resolve(container_height);
    let right = margins.right.resolve(container_width);
    let bottom = margins.bottom.resolve(container_height);

    Rect {
        x,
        y,
        width: (container_width - x - right).max(0.0),
        height: (container_height - y - bottom).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_parse() {
        assert_eq!("12%".parse::<Length>(), Ok(Length::Percent(12.0)));
        assert_eq!(" 40 ".parse::<Length>(), Ok(Length::Pixels(40.0)));
        assert_eq!("7.5 %".parse::<Length>(), Ok(Length::Percent(7.5)));
        assert_eq!(
            "wide".parse::<Length>(),
            Err(LayoutError::InvalidLength("wide".to_string()))
        );
        assert!("inf%".parse::<Length>().is_err());
    }

    #[test]
    fn test_length_resolve() {
        assert_eq!(Length::Pixels(30.0).resolve(500.0), 30.0);
        assert_eq!(Length::Percent(10.0).resolve(500.0), 50.0);
    }

    #[test]
    fn test_default_margins() {
        let rect = view_rect(&BoxMargins::default(), &ContainerSize::new(1000.0, 500.0));
        assert_eq!(
            rect,
            Rect {
                x: 120.0,
                y: 60.0,
                width: 760.0,
                height: 380.0
            }
        );
    }

    #[test]
    fn test_mixed_margins() {
        let margins = BoxMargins {
            left: Length::Pixels(10.0),
            top: Length::Pixels(20.0),
            right: Length::Percent(50.0),
            bottom: Length::Pixels(0.0),
        };
        let rect = view_rect(&margins, &ContainerSize::new(200.0, 100.0));
        assert_eq!(rect.x, 10.0);
        assert_eq!(rect.y, 20.0);
        assert_eq!(rect.width, 90.0);
        assert_eq!(rect.height, 80.0);
    }

    #[test]
    fn test_oversized_margins_clamp() {
        let margins = BoxMargins::uniform(Length::Percent(60.0));
        let rect = view_rect(&margins, &ContainerSize::new(100.0, 100.0));
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
    }

    #[test]
    fn test_margins_deserialize() {
        let margins: BoxMargins =
            serde_json::from_str(r#"{ "left": 16, "right": "5%" }"#).unwrap();
        assert_eq!(margins.left, Length::Pixels(16.0));
        assert_eq!(margins.right, Length::Percent(5.0));
        assert_eq!(margins.top, Length::Percent(12.0));

        assert!(serde_json::from_str::<BoxMargins>(r#"{ "left": "auto" }"#).is_err());
    }
}
