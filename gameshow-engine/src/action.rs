//! Game-action tags carried by wheel segments.
//!
//! The engine forwards these tags to its caller and never branches on them;
//! what an action means at the table is the host's business. The set is
//! closed so that configurations and results stay well-typed on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameAction {
    NewRule,
    AudienceChoice,
    Challenge,
    Duplicate,
    Reverse,
    Swap,
    DestroyRuleSelf,
    #[serde(rename = "shift_1_right")]
    ShiftOneRight,
    OppositeRule,
    DestroyRuleOther,
    NewRuleSelf,
    NewRuleOther,
}

impl GameAction {
    pub const ALL: [Self; 12] = [
        Self::NewRule,
        Self::AudienceChoice,
        Self::Challenge,
        Self::Duplicate,
        Self::Reverse,
        Self::Swap,
        Self::DestroyRuleSelf,
        Self::ShiftOneRight,
        Self::OppositeRule,
        Self::DestroyRuleOther,
        Self::NewRuleSelf,
        Self::NewRuleOther,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewRule => "new_rule",
            Self::AudienceChoice => "audience_choice",
            Self::Challenge => "challenge",
            Self::Duplicate => "duplicate",
            Self::Reverse => "reverse",
            Self::Swap => "swap",
            Self::DestroyRuleSelf => "destroy_rule_self",
            Self::ShiftOneRight => "shift_1_right",
            Self::OppositeRule => "opposite_rule",
            Self::DestroyRuleOther => "destroy_rule_other",
            Self::NewRuleSelf => "new_rule_self",
            Self::NewRuleOther => "new_rule_other",
        }
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new_rule" => Ok(Self::NewRule),
            "audience_choice" => Ok(Self::AudienceChoice),
            "challenge" => Ok(Self::Challenge),
            "duplicate" => Ok(Self::Duplicate),
            "reverse" => Ok(Self::Reverse),
            "swap" => Ok(Self::Swap),
            "destroy_rule_self" => Ok(Self::DestroyRuleSelf),
            "shift_1_right" => Ok(Self::ShiftOneRight),
            "opposite_rule" => Ok(Self::OppositeRule),
            "destroy_rule_other" => Ok(Self::DestroyRuleOther),
            "new_rule_self" => Ok(Self::NewRuleSelf),
            "new_rule_other" => Ok(Self::NewRuleOther),
            _ => Err(()),
        }
    }
}

impl From<GameAction> for String {
    fn from(value: GameAction) -> Self {
        value.as_str().to_string()
    }
}
