//! Placement vocabulary for floating elements: on which side of a reference they sit and how
//! they are aligned along that side.

use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::Axis;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// The axis along which an element on this side is pushed away from its reference.
    pub fn main_axis(self) -> Axis {
        match self {
            Side::Top | Side::Bottom => Axis::Y,
            Side::Left | Side::Right => Axis::X,
        }
    }

    /// The axis along which an element on this side is aligned and shifted.
    pub fn cross_axis(self) -> Axis {
        self.main_axis().other()
    }

    /// `true` if moving away from the reference decreases the coordinate.
    pub fn is_leading(self) -> bool {
        matches!(self, Side::Top | Side::Left)
    }

    fn name(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Alignment {
    Start,
    End,
}

impl Alignment {
    fn name(self) -> &'static str {
        match self {
            Alignment::Start => "start",
            Alignment::End => "end",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Alignment::Start),
            "end" => Some(Alignment::End),
            _ => None,
        }
    }
}

/// One of the 12 concrete placements. An alignment of `None` centers the floating element on the
/// reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Placement {
    pub side: Side,
    pub alignment: Option<Alignment>,
}

impl Placement {
    pub const TOP: Self = Self::new(Side::Top, None);
    pub const RIGHT: Self = Self::new(Side::Right, None);
    pub const BOTTOM: Self = Self::new(Side::Bottom, None);
    pub const LEFT: Self = Self::new(Side::Left, None);

    pub const fn new(side: Side, alignment: Option<Alignment>) -> Self {
        Self { side, alignment }
    }

    /// All concrete placements, side by side in clockwise order starting at the top.
    pub fn all() -> impl Iterator<Item = Placement> {
        Side::ALL.into_iter().flat_map(|side| {
            [None, Some(Alignment::Start), Some(Alignment::End)]
                .into_iter()
                .map(move |alignment| Placement::new(side, alignment))
        })
    }

    /// The same alignment on the opposite side.
    pub fn opposite(self) -> Self {
        Self::new(self.side.opposite(), self.alignment)
    }

    pub fn main_axis(self) -> Axis {
        self.side.main_axis()
    }

    pub fn cross_axis(self) -> Axis {
        self.side.cross_axis()
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::BOTTOM
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alignment {
            Some(alignment) => write!(f, "{}-{}", self.side.name(), alignment.name()),
            None => f.write_str(self.side.name()),
        }
    }
}

impl FromStr for Placement {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (side, alignment) = match s.split_once('-') {
            Some((side, alignment)) => (side, Some(alignment)),
            None => (s, None),
        };
        let side = Side::ALL
            .into_iter()
            .find(|candidate| candidate.name() == side)
            .ok_or_else(|| anyhow!("Unknown placement side `{side}` in `{s}`"))?;
        let alignment = match alignment {
            Some(name) => Some(
                Alignment::parse(name)
                    .ok_or_else(|| anyhow!("Unknown placement alignment `{name}` in `{s}`"))?,
            ),
            None => None,
        };
        Ok(Self::new(side, alignment))
    }
}

impl TryFrom<String> for Placement {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Placement> for String {
    fn from(value: Placement) -> Self {
        value.to_string()
    }
}

/// A requested placement: either a concrete one, or `auto`, which lets the engine pick the side
/// with the most space, optionally constrained to an alignment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlacementOption {
    Concrete(Placement),
    Auto(Option<Alignment>),
}

impl PlacementOption {
    pub fn is_auto(&self) -> bool {
        matches!(self, PlacementOption::Auto(_))
    }

    /// The placement the computation starts with. For `auto` this is the first candidate, the
    /// auto placement rule resolves the real one.
    pub fn initial(&self) -> Placement {
        match *self {
            PlacementOption::Concrete(placement) => placement,
            PlacementOption::Auto(alignment) => Placement::new(Side::Top, alignment),
        }
    }
}

impl Default for PlacementOption {
    fn default() -> Self {
        PlacementOption::Concrete(Placement::default())
    }
}

impl From<Placement> for PlacementOption {
    fn from(value: Placement) -> Self {
        PlacementOption::Concrete(value)
    }
}

impl fmt::Display for PlacementOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementOption::Concrete(placement) => placement.fmt(f),
            PlacementOption::Auto(None) => f.write_str("auto"),
            PlacementOption::Auto(Some(alignment)) => write!(f, "auto-{}", alignment.name()),
        }
    }
}

impl FromStr for PlacementOption {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "auto" {
            return Ok(PlacementOption::Auto(None));
        }
        if let Some(alignment) = s.strip_prefix("auto-") {
            let Some(alignment) = Alignment::parse(alignment) else {
                bail!("Unknown auto placement alignment `{alignment}` in `{s}`");
            };
            return Ok(PlacementOption::Auto(Some(alignment)));
        }
        Ok(PlacementOption::Concrete(s.parse()?))
    }
}

impl TryFrom<String> for PlacementOption {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PlacementOption> for String {
    fn from(value: PlacementOption) -> Self {
        value.to_string()
    }
}
