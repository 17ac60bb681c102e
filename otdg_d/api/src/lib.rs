use serde::{Deserialize, Serialize};

/// 3-axis wrist orientation in whole degrees, as sent by the sensor peer.
///
/// The all-zero value doubles as "unknown" when orientation reception is
/// disabled or no frame has arrived yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orientation {
    pub alpha: i32,
    pub beta: i32,
    pub gamma: i32,
}

impl Orientation {
    pub const UNKNOWN: Orientation = Orientation {
        alpha: 0,
        beta: 0,
        gamma: 0,
    };
}

/// One pose: twelve contact pads plus the wrist orientation.
///
/// Palm pad orientation is FACING the viewer: `palm_left` is towards the
/// pinky. The `betw_*` pads sit between fingers, named by the initials of
/// the fingers on either side. Equality is field-by-field with no
/// tolerance; matching relies on the derived `PartialEq`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    pub pinky: bool,
    pub ring: bool,
    pub middle: bool,
    pub index: bool,
    pub thumb: bool,
    pub palm_left: bool,
    pub palm_right: bool,
    pub back_thumb: bool,
    pub back_ring: bool,
    #[serde(rename = "betwIM")]
    pub betw_im: bool,
    #[serde(rename = "betwMR")]
    pub betw_mr: bool,
    #[serde(rename = "betwRP")]
    pub betw_rp: bool,
    pub angle: Orientation,
    /// Reserved for multi-frame gestures; always empty for now.
    pub motion: String,
    /// Captured from the dominant hand.
    pub dom: bool,
}

/// One dictionary entry: a named reference pose.
///
/// `location` and `face` are descriptive qualifiers (e.g. signs pointing
/// downwards, facial-expression context) and take no part in matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignEntry {
    pub id: String,
    pub hand: Hand,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub face: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_serializes_with_wire_field_names() {
        let hand = Hand {
            palm_left: true,
            betw_im: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&hand).unwrap();
        assert!(json.contains("\"palmLeft\":true"));
        assert!(json.contains("\"betwIM\":true"));
        assert!(json.contains("\"backThumb\":false"));
        assert!(json.contains("\"angle\""));
    }

    #[test]
    fn orientation_unknown_is_all_zero() {
        assert_eq!(Orientation::UNKNOWN, Orientation::default());
    }
}
