use std::fmt::{Display, Formatter};

/// Named anchor points an actor can be pivoted around.
///
/// When a behaviour has a gravity other than [`Gravity::None`], every actor's anchor point is
/// re-derived from its own geometry before the transformation is applied, so that the
/// transformation appears to happen around that point rather than around the actor's origin.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum Gravity {
    /// Leave the actor anchor point untouched.
    None,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    #[default]
    Center,
}

impl Gravity {
    pub const ALL: [Gravity; 10] = [
        Gravity::None,
        Gravity::North,
        Gravity::NorthEast,
        Gravity::East,
        Gravity::SouthEast,
        Gravity::South,
        Gravity::SouthWest,
        Gravity::West,
        Gravity::NorthWest,
        Gravity::Center,
    ];

    /// Computes the anchor point matching this gravity for a box of the given size, relative to
    /// the box origin (top-left corner, y axis pointing down).
    ///
    /// Returns `None` for [`Gravity::None`].
    ///
    /// # Example
    /// ```
    /// use clutter::Gravity;
    /// assert_eq!(Gravity::Center.anchor_point(100.0, 50.0), Some((50.0, 25.0)));
    /// assert_eq!(Gravity::SouthEast.anchor_point(100.0, 50.0), Some((100.0, 50.0)));
    /// assert_eq!(Gravity::None.anchor_point(100.0, 50.0), None);
    /// ```
    pub fn anchor_point(&self, width: f64, height: f64) -> Option<(f64, f64)> {
        let (x, y) = match self {
            Gravity::None => return None,
            Gravity::North => (width / 2.0, 0.0),
            Gravity::NorthEast => (width, 0.0),
            Gravity::East => (width, height / 2.0),
            Gravity::SouthEast => (width, height),
            Gravity::South => (width / 2.0, height),
            Gravity::SouthWest => (0.0, height),
            Gravity::West => (0.0, height / 2.0),
            Gravity::NorthWest => (0.0, 0.0),
            Gravity::Center => (width / 2.0, height / 2.0),
        };
        Some((x, y))
    }
}

impl Display for Gravity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Gravity::None => "none",
            Gravity::North => "north",
            Gravity::NorthEast => "north-east",
            Gravity::East => "east",
            Gravity::SouthEast => "south-east",
            Gravity::South => "south",
            Gravity::SouthWest => "south-west",
            Gravity::West => "west",
            Gravity::NorthWest => "north-west",
            Gravity::Center => "center",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gravity() {
        assert_eq!(Gravity::default(), Gravity::Center);
    }

    #[test]
    fn test_anchor_points() {
        let expectations = [
            (Gravity::North, (40.0, 0.0)),
            (Gravity::NorthEast, (80.0, 0.0)),
            (Gravity::East, (80.0, 10.0)),
            (Gravity::SouthEast, (80.0, 20.0)),
            (Gravity::South, (40.0, 20.0)),
            (Gravity::SouthWest, (0.0, 20.0)),
            (Gravity::West, (0.0, 10.0)),
            (Gravity::NorthWest, (0.0, 0.0)),
            (Gravity::Center, (40.0, 10.0)),
        ];
        for (gravity, anchor) in expectations {
            assert_eq!(gravity.anchor_point(80.0, 20.0), Some(anchor), "{}", gravity);
        }
        assert_eq!(Gravity::None.anchor_point(80.0, 20.0), None);
    }

    #[test]
    fn test_gravity_display() {
        let names: Vec<String> = Gravity::ALL.iter().map(|g| g.to_string()).collect();
        assert_eq!(
            names,
            [
                "none",
                "north",
                "north-east",
                "east",
                "south-east",
                "south",
                "south-west",
                "west",
                "north-west",
                "center"
            ]
        );
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_gravity_serde() {
            let json = serde_json::to_string(&Gravity::NorthEast).unwrap();
            assert_eq!(json, r#""north-east""#);
            let gravity: Gravity = serde_json::from_str(r#""center""#).unwrap();
            assert_eq!(gravity, Gravity::Center);
        }
    }
}
