use super::*;
use crate::animation::curve::AnimationCurve;
use crate::config::model::{EffectDef, ViewNames};
use crate::foundation::core::{Vec2, ViewId};

const HERO: &str = r#"{
  "transition_identifier": "hero",
  "segue_identifier": "showDetail",
  "duration": 0.4,
  "source": {
    "collections": [{
      "transition_identifier": "hero",
      "behaviours": [
        { "identifier": "photo", "views": ["thumb"], "effect": { "kind": "position_source", "on_top": true } },
        { "views": ["list"], "effect": { "kind": "fade", "from_alpha": 1.0, "to_alpha": 0.0 } }
      ]
    }]
  },
  "destination": {
    "collections": [{
      "transition_identifier": "hero",
      "behaviours": [
        { "identifier": "photo", "views": ["hero"], "effect": { "kind": "position_destination" } },
        {
          "views": ["caption"],
          "relative_start": 0.5,
          "relative_duration": 0.5,
          "reverse_on_dismissal": true,
          "curve": "linear",
          "effect": { "kind": "translate", "origin": { "x": 0.0, "y": 1.0 }, "reference": "hero" }
        }
      ]
    }]
  }
}"#;

fn names(list: &[&str]) -> ViewNames {
    list.iter()
        .enumerate()
        .map(|(i, n)| ((*n).to_owned(), ViewId(i as u64)))
        .collect()
}

fn all_views() -> ViewNames {
    names(&["thumb", "list", "hero", "caption"])
}

#[test]
fn parses_and_fills_defaults() {
    let def = TransitionDef::from_json_str(HERO).unwrap();
    assert_eq!(def.transition_identifier, "hero");
    assert_eq!(def.duration, 0.4);
    assert_eq!(def.rollback, crate::interaction::controller::DEFAULT_ROLLBACK);

    let fade = &def.source.collections[0].behaviours[1];
    assert_eq!(fade.identifier, "");
    assert_eq!(fade.relative_start, 0.0);
    assert_eq!(fade.relative_duration, 1.0);
    assert_eq!(fade.curve, AnimationCurve::EaseInOut);
    assert_eq!(fade.effect.kind(), "fade");

    let caption = &def.destination.collections[0].behaviours[1];
    assert_eq!(caption.curve, AnimationCurve::Linear);
    assert_eq!(
        caption.effect,
        EffectDef::Translate {
            origin: Vec2::new(0.0, 1.0),
            destination: Vec2::ZERO,
            reference: Some("hero".to_owned()),
        }
    );
}

#[test]
fn minimal_definition_uses_defaults() {
    let def = TransitionDef::from_json_str(r#"{ "transition_identifier": "t" }"#).unwrap();
    assert_eq!(def.segue_identifier, "");
    assert_eq!(def.duration, crate::orchestrator::orchestrator::DEFAULT_DURATION);
    assert!(def.source.collections.is_empty());
    assert!(def.view_names().is_empty());
}

#[test]
fn unknown_fields_are_rejected() {
    let err = TransitionDef::from_json_str(r#"{ "transition_identifier": "t", "speed": 2 }"#)
        .unwrap_err();
    assert!(err.to_string().contains("speed"), "{err}");

    let err = TransitionDef::from_json_str(
        r#"{ "transition_identifier": "t", "source": { "collections": [{
            "transition_identifier": "t",
            "behaviours": [{ "effect": { "kind": "spin" } }]
        }] } }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("parse transition JSON"), "{err}");
}

#[test]
fn view_names_include_references() {
    let def = TransitionDef::from_json_str(HERO).unwrap();
    let got: Vec<&str> = def.view_names().into_iter().collect();
    assert_eq!(got, vec!["caption", "hero", "list", "thumb"]);
}

#[test]
fn validation_reports_every_problem_with_its_path() {
    let mut def = TransitionDef::from_json_str(HERO).unwrap();
    def.duration = -1.0;
    def.rollback = 2.0;
    def.destination.collections[0].behaviours[1].relative_start = 1.5;
    def.source.collections[0].behaviours[1].effect = EffectDef::Fade {
        from_alpha: 0.0,
        to_alpha: 3.0,
    };

    let err = def.validate(&names(&["list", "hero", "caption"])).unwrap_err();
    let msg = err.to_string();
    for expected in [
        "$.duration: must be finite and >= 0",
        "$.rollback: must be within [0, 1]",
        "$.source.collections[0].behaviours[0].views[0]: unknown view 'thumb'",
        "$.source.collections[0].behaviours[1].effect: fade alphas must be within [0, 1]",
        "$.destination.collections[0].behaviours[1].relative_start: must be within [0, 1]",
    ] {
        assert!(msg.contains(expected), "missing {expected:?} in:\n{msg}");
    }
}

#[test]
fn unknown_reference_is_reported() {
    let def = TransitionDef::from_json_str(HERO).unwrap();
    let err = def
        .validate(&names(&["thumb", "list", "caption"]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("unknown reference view 'hero'"), "{err}");
    assert!(err.contains("$.destination.collections[0].behaviours[0].views[0]"), "{err}");
}

#[test]
fn build_wires_behaviours_and_config() {
    let def = TransitionDef::from_json_str(HERO).unwrap();
    let views = all_views();
    let built = def.build(&views).unwrap();

    assert_eq!(built.config.transition_identifier, "hero");
    assert_eq!(built.config.segue_identifier, "showDetail");
    assert_eq!(built.config.duration, 0.4);
    assert_eq!(built.source.len(), 1);

    let dest = built.destination[0].behaviours();
    assert_eq!(dest.len(), 2);
    let photo = dest[0].borrow();
    assert_eq!(photo.behaviour_identifier(), "photo");
    assert_eq!(photo.effect_name(), "position_destination");
    assert_eq!(photo.resolved_views(), vec![views["hero"]]);

    let caption = dest[1].borrow();
    assert!(caption.timing_attrs().reverse_on_dismissal);
    assert_eq!(caption.timing_attrs().window.start, 0.5);
    assert_eq!(caption.effect_name(), "translate");

    let orchestrator = built.orchestrator();
    assert_eq!(orchestrator.segue_identifier(), "showDetail");
}

#[test]
fn build_refuses_invalid_definitions() {
    let def = TransitionDef::from_json_str(r#"{ "transition_identifier": "" }"#).unwrap();
    let err = def.build(&ViewNames::new()).unwrap_err();
    assert!(
        err.to_string()
            .contains("$.transition_identifier: must be non-empty"),
        "{err}"
    );
}

#[test]
fn pretty_json_parses_back() {
    let def = TransitionDef::from_json_str(HERO).unwrap();
    let text = def.to_json_pretty().unwrap();
    assert_eq!(TransitionDef::from_json_str(&text).unwrap(), def);
}

#[test]
fn missing_file_keeps_the_io_cause() {
    let err = TransitionDef::from_path("does/not/exist.json").unwrap_err();
    let SegueError::Other(inner) = &err else {
        panic!("expected an io error, got {err:?}");
    };
    assert!(inner.to_string().contains("does/not/exist.json"), "{inner}");
    assert!(inner.downcast_ref::<std::io::Error>().is_some());
}
