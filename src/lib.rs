//! Segue orchestrates screen-to-screen transitions built from small, reusable behaviours.
//!
//! Screens declare [`BehaviourCollection`]s per transition identifier. A
//! [`TransitionOrchestrator`] resolves the behaviours both screens contribute, pairs them by
//! identifier, and plays them on one shared [`Timeline`]:
//!
//! - timed runs advance with host frame ticks ([`TransitionOrchestrator::advance`])
//! - interactive runs are scrubbed by an [`InteractionController`] and then finished or rolled back
//!
//! Every behaviour completes exactly once per run, with a `presented` flag that already accounts
//! for cancellation. The host view hierarchy is reached through the [`ViewHost`] trait;
//! [`ViewArena`] is an in-memory implementation for headless runs and tests.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod behaviour;
pub(crate) mod config;
pub(crate) mod host;
pub(crate) mod interaction;
pub(crate) mod orchestrator;
pub(crate) mod screen;

pub use crate::foundation::core::{
    Affine, Point, Rect, RunId, Size, TransitionDirection, Vec2, ViewId, lerp_affine,
};
pub use crate::foundation::error::{SegueError, SegueResult};

pub use crate::animation::curve::{AnimationCurve, SpringParams};
pub use crate::animation::timeline::{
    AnimatedProperty, CompletionToken, PlaybackMode, PropertyChange, Timeline, TimelineOutcome,
};
pub use crate::animation::timing::{AbsoluteWindow, BehaviourTiming, RelativeWindow};
pub use crate::behaviour::behaviour::{
    AnimationCx, Behaviour, BehaviourHandle, EffectCx, RunInfo, TransitionEffect,
};
pub use crate::behaviour::collection::{BehaviourCollection, behaviours_for};
pub use crate::behaviour::effects::fade::FadeEffect;
pub use crate::behaviour::effects::position::{
    PositionDestinationEffect, PositionSourceEffect, transform_between,
};
pub use crate::behaviour::effects::scale::{MIN_SCALE, ScaleEffect, sanitize_scale};
pub use crate::behaviour::effects::translate::TranslateEffect;
pub use crate::behaviour::linker::{BehaviourLink, link, unlinked_destinations};
pub use crate::config::build::BuiltTransition;
pub use crate::config::model::{
    BehaviourDef, CollectionDef, EffectDef, ScreenDef, TransitionDef, ViewNames,
};
pub use crate::host::arena::ViewArena;
pub use crate::host::context::{ContextLog, RecordingContext, TransitionContext};
pub use crate::host::view::{ViewHost, ViewProvider, frame_in_container};
pub use crate::interaction::controller::{
    DEFAULT_ROLLBACK, GesturePhase, GestureSample, InteractionController, InteractionStrategy,
    TransitionTrigger,
};
pub use crate::interaction::pan::{Axis, AxisPanInteraction, PanInteraction};
pub use crate::orchestrator::orchestrator::{
    DEFAULT_DURATION, OrchestratorHandle, Phase, TransitionConfig, TransitionOrchestrator,
    TransitionOutcome, TransitionRequest,
};
pub use crate::orchestrator::router::SegueRouter;
pub use crate::screen::{LifecycleEvent, Screen, ScreenRef, dispatch_lifecycle};
