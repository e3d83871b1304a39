use std::collections::{BTreeMap, BTreeSet};

use crate::animation::curve::{AnimationCurve, SpringParams};
use crate::foundation::core::{Vec2, ViewId};
use crate::interaction::controller::DEFAULT_ROLLBACK;
use crate::orchestrator::orchestrator::DEFAULT_DURATION;

/// Maps view names used in definitions to host views.
pub type ViewNames = BTreeMap<String, ViewId>;

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

fn default_rollback() -> f64 {
    DEFAULT_ROLLBACK
}

fn one() -> f64 {
    1.0
}

/// One transition: configuration plus both screens' behaviour collections.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionDef {
    pub transition_identifier: String,
    #[serde(default)]
    pub segue_identifier: String,
    /// Seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Rollback threshold for interactive runs.
    #[serde(default = "default_rollback")]
    pub rollback: f64,
    /// Presenting-side screen.
    #[serde(default)]
    pub source: ScreenDef,
    /// Presented-side screen.
    #[serde(default)]
    pub destination: ScreenDef,
}

impl TransitionDef {
    /// Every view name the definition refers to.
    pub fn view_names(&self) -> BTreeSet<&str> {
        [&self.source, &self.destination]
            .into_iter()
            .flat_map(|s| s.collections.iter())
            .flat_map(|c| c.behaviours.iter())
            .flat_map(|b| {
                let reference = match &b.effect {
                    EffectDef::Translate {
                        reference: Some(r),
                        ..
                    } => Some(r.as_str()),
                    _ => None,
                };
                b.views.iter().map(String::as_str).chain(reference)
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenDef {
    #[serde(default)]
    pub collections: Vec<CollectionDef>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionDef {
    pub transition_identifier: String,
    #[serde(default)]
    pub behaviours: Vec<BehaviourDef>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviourDef {
    /// Pairing identifier; empty never pairs.
    #[serde(default)]
    pub identifier: String,
    /// View names, resolved through [`ViewNames`].
    #[serde(default)]
    pub views: Vec<String>,
    #[serde(default)]
    pub relative_start: f64,
    #[serde(default = "one")]
    pub relative_duration: f64,
    #[serde(default)]
    pub reverse_on_dismissal: bool,
    #[serde(default)]
    pub curve: AnimationCurve,
    #[serde(default)]
    pub spring: Option<SpringParams>,
    pub effect: EffectDef,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectDef {
    Fade {
        #[serde(default)]
        from_alpha: f64,
        #[serde(default = "one")]
        to_alpha: f64,
    },
    Scale {
        #[serde(default)]
        start_size: f64,
        #[serde(default = "one")]
        end_size: f64,
    },
    Translate {
        #[serde(default)]
        origin: Vec2,
        #[serde(default)]
        destination: Vec2,
        /// View name whose size the offsets are relative to; defaults to each view's parent.
        #[serde(default)]
        reference: Option<String>,
    },
    PositionSource {
        #[serde(default)]
        on_top: bool,
    },
    PositionDestination,
}

impl EffectDef {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fade { .. } => "fade",
            Self::Scale { .. } => "scale",
            Self::Translate { .. } => "translate",
            Self::PositionSource { .. } => "position_source",
            Self::PositionDestination => "position_destination",
        }
    }
}
