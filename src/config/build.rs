use crate::animation::timing::{BehaviourTiming, RelativeWindow};
use crate::behaviour::behaviour::{Behaviour, TransitionEffect};
use crate::behaviour::collection::BehaviourCollection;
use crate::behaviour::effects::fade::FadeEffect;
use crate::behaviour::effects::position::{PositionDestinationEffect, PositionSourceEffect};
use crate::behaviour::effects::scale::ScaleEffect;
use crate::behaviour::effects::translate::TranslateEffect;
use crate::config::model::{BehaviourDef, EffectDef, ScreenDef, TransitionDef, ViewNames};
use crate::config::validate::validate_transition;
use crate::foundation::core::ViewId;
use crate::foundation::error::{SegueError, SegueResult};
use crate::interaction::controller::InteractionController;
use crate::orchestrator::orchestrator::{TransitionConfig, TransitionOrchestrator};

/// A validated definition, turned into live objects.
#[derive(Debug)]
pub struct BuiltTransition {
    pub config: TransitionConfig,
    /// Rollback threshold to hand to [`InteractionController::rollback_threshold`].
    pub rollback: f64,
    /// Collections for the presenting-side screen.
    pub source: Vec<BehaviourCollection>,
    /// Collections for the presented-side screen.
    pub destination: Vec<BehaviourCollection>,
}

impl BuiltTransition {
    pub fn orchestrator(&self) -> TransitionOrchestrator {
        TransitionOrchestrator::new(self.config.clone())
    }

    /// Apply the configured rollback threshold to `controller`.
    pub fn configure_interaction(
        &self,
        controller: InteractionController,
    ) -> InteractionController {
        controller.rollback_threshold(self.rollback)
    }
}

impl TransitionDef {
    /// Check the definition against `views`. All problems are reported together, one per line.
    pub fn validate(&self, views: &ViewNames) -> SegueResult<()> {
        validate_transition(self, views)
            .map_err(|e| SegueError::validation(format!("transition definition invalid:\n{e}")))
    }

    /// Validate, then build fresh behaviours for both screens.
    pub fn build(&self, views: &ViewNames) -> SegueResult<BuiltTransition> {
        self.validate(views)?;
        Ok(BuiltTransition {
            config: TransitionConfig::new(self.transition_identifier.clone())
                .segue(self.segue_identifier.clone())
                .duration(self.duration),
            rollback: self.rollback,
            source: build_screen(&self.source, views),
            destination: build_screen(&self.destination, views),
        })
    }
}

fn build_screen(screen: &ScreenDef, views: &ViewNames) -> Vec<BehaviourCollection> {
    screen
        .collections
        .iter()
        .map(|c| {
            c.behaviours.iter().fold(
                BehaviourCollection::new(c.transition_identifier.clone()),
                |collection, b| collection.with(build_behaviour(b, views).into_handle()),
            )
        })
        .collect()
}

fn lookup(views: &ViewNames, name: &str) -> Option<ViewId> {
    views.get(name).copied()
}

fn build_effect(def: &EffectDef, views: &ViewNames) -> Box<dyn TransitionEffect> {
    match def {
        EffectDef::Fade {
            from_alpha,
            to_alpha,
        } => Box::new(FadeEffect::new(*from_alpha, *to_alpha)),
        EffectDef::Scale {
            start_size,
            end_size,
        } => Box::new(ScaleEffect::new(*start_size, *end_size)),
        EffectDef::Translate {
            origin,
            destination,
            reference,
        } => {
            let effect = TranslateEffect::new(*origin, *destination);
            match reference.as_deref().and_then(|r| lookup(views, r)) {
                Some(view) => Box::new(effect.with_reference(view)),
                None => Box::new(effect),
            }
        }
        EffectDef::PositionSource { on_top } => Box::new(PositionSourceEffect::new(*on_top)),
        EffectDef::PositionDestination => Box::new(PositionDestinationEffect::new()),
    }
}

fn build_behaviour(def: &BehaviourDef, views: &ViewNames) -> Behaviour {
    let timing = BehaviourTiming {
        window: RelativeWindow::new(def.relative_start, def.relative_duration),
        reverse_on_dismissal: def.reverse_on_dismissal,
        curve: def.curve,
        spring: def.spring,
    };
    Behaviour::from_boxed(build_effect(&def.effect, views))
        .identifier(def.identifier.clone())
        .views(def.views.iter().filter_map(|n| lookup(views, n)))
        .timing(timing)
}
