//! Named wheel layouts.
//!
//! The catalog carries the show's stock configurations: the four-segment
//! difficulty wheel, the six-segment rule wheel the companion defaults to,
//! its eight and twelve segment extensions, and the original eleven-segment
//! table kept for backward compatibility.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::GameAction;
use crate::segment::SegmentConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WheelPreset {
    #[serde(rename = "4-segment")]
    Four,
    #[default]
    #[serde(rename = "6-segment")]
    Six,
    #[serde(rename = "8-segment")]
    Eight,
    #[serde(rename = "12-segment")]
    Twelve,
    #[serde(rename = "original")]
    Original,
}

impl WheelPreset {
    pub const ALL: [Self; 5] = [
        Self::Four,
        Self::Six,
        Self::Eight,
        Self::Twelve,
        Self::Original,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Four => "4-segment",
            Self::Six => "6-segment",
            Self::Eight => "8-segment",
            Self::Twelve => "12-segment",
            Self::Original => "original",
        }
    }

    /// Segment blueprints for this layout, in wheel order.
    #[must_use]
    pub fn segments(self) -> Vec<SegmentConfig> {
        match self {
            Self::Four => vec![
                SegmentConfig::new("Easy Mode", GameAction::NewRule),
                SegmentConfig::new("Medium Mode", GameAction::AudienceChoice),
                SegmentConfig::new("Hard Mode", GameAction::Challenge),
                SegmentConfig::new("Extreme Mode", GameAction::DestroyRuleSelf),
            ],
            Self::Six => rule_wheel_base(),
            Self::Eight => {
                let mut segments = rule_wheel_base();
                segments.extend([
                    SegmentConfig::new("New Rule (self)", GameAction::NewRuleSelf),
                    SegmentConfig::new("New Rule (other)", GameAction::NewRuleOther),
                ]);
                segments
            }
            Self::Twelve => {
                let mut segments = Self::Eight.segments();
                segments.extend([
                    SegmentConfig::new("Challenge", GameAction::Challenge),
                    SegmentConfig::new("Duplicate", GameAction::Duplicate),
                    SegmentConfig::new("Reverse", GameAction::Reverse),
                    SegmentConfig::new("New Rule", GameAction::NewRule),
                ]);
                segments
            }
            Self::Original => original_table(),
        }
    }
}

/// The six-segment rule wheel every larger rule wheel extends.
fn rule_wheel_base() -> Vec<SegmentConfig> {
    vec![
        SegmentConfig::new("Destroy Rule (self)", GameAction::DestroyRuleSelf),
        SegmentConfig::new("Audience Choice", GameAction::AudienceChoice),
        SegmentConfig::new("Swap", GameAction::Swap),
        SegmentConfig::new("Shift 1 to Right", GameAction::ShiftOneRight),
        SegmentConfig::new("Opposite Rule", GameAction::OppositeRule),
        SegmentConfig::new("Destroy Rule (other)", GameAction::DestroyRuleOther),
    ]
}

/// The eleven-segment layout of the original wheel.
pub(crate) fn original_table() -> Vec<SegmentConfig> {
    vec![
        SegmentConfig::new("New Rule", GameAction::NewRule),
        SegmentConfig::new("New Rule", GameAction::NewRule),
        SegmentConfig::new("New Rule", GameAction::NewRule),
        SegmentConfig::new("Modify: Audience Choice", GameAction::AudienceChoice),
        SegmentConfig::new("Modify: Audience Choice", GameAction::AudienceChoice),
        SegmentConfig::new("Challenge", GameAction::Challenge),
        SegmentConfig::new("Challenge", GameAction::Challenge),
        SegmentConfig::new("Challenge", GameAction::Challenge),
        SegmentConfig::new("Modify: Duplicate", GameAction::Duplicate),
        SegmentConfig::new("Modify: Reverse", GameAction::Reverse),
        SegmentConfig::new("Modify: Swap", GameAction::Swap),
    ]
}

impl fmt::Display for WheelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WheelPreset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4-segment" => Ok(Self::Four),
            "6-segment" => Ok(Self::Six),
            "8-segment" => Ok(Self::Eight),
            "12-segment" => Ok(Self::Twelve),
            "original" => Ok(Self::Original),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes_match_their_names() {
        assert_eq!(WheelPreset::Four.segments().len(), 4);
        assert_eq!(WheelPreset::Six.segments().len(), 6);
        assert_eq!(WheelPreset::Eight.segments().len(), 8);
        assert_eq!(WheelPreset::Twelve.segments().len(), 12);
        assert_eq!(WheelPreset::Original.segments().len(), 11);
    }

    #[test]
    fn names_round_trip() {
        for preset in WheelPreset::ALL {
            assert_eq!(preset.as_str().parse::<WheelPreset>(), Ok(preset));
        }
        assert!("13-segment".parse::<WheelPreset>().is_err());
    }

    #[test]
    fn larger_rule_wheels_extend_the_six_segment_base() {
        let six = WheelPreset::Six.segments();
        let eight = WheelPreset::Eight.segments();
        let twelve = WheelPreset::Twelve.segments();
        assert_eq!(&eight[..6], &six[..]);
        assert_eq!(&twelve[..8], &eight[..]);
    }

    #[test]
    fn twelve_segment_wheel_covers_every_action_once() {
        let twelve = WheelPreset::Twelve.segments();
        for action in GameAction::ALL {
            assert_eq!(
                twelve.iter().filter(|c| c.action == action).count(),
                1,
                "{action} should appear exactly once"
            );
        }
    }

    #[test]
    fn original_table_keeps_its_duplicates() {
        let original = WheelPreset::Original.segments();
        let new_rules = original
            .iter()
            .filter(|c| c.action == GameAction::NewRule)
            .count();
        assert_eq!(new_rules, 3);
        assert!(original.iter().all(|c| c.id.is_none()));
    }
}
