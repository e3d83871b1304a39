use std::fmt;

use crate::config::model::{BehaviourDef, EffectDef, ScreenDef, TransitionDef, ViewNames};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathElem {
    Field(&'static str),
    Index(usize),
}

/// One definition problem, located by a JSON path such as `$.source.collections[0]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DefError {
    pub(crate) path: Vec<PathElem>,
    pub(crate) message: String,
}

impl DefError {
    fn at(path: &[PathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct DefErrors {
    pub(crate) errors: Vec<DefError>,
}

impl fmt::Display for DefErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DefErrors {}

fn unit_interval(v: f64) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}

/// Check `def` against `views`, collecting every problem instead of stopping at the first.
pub(crate) fn validate_transition(def: &TransitionDef, views: &ViewNames) -> Result<(), DefErrors> {
    let mut errors = Vec::new();

    if def.transition_identifier.is_empty() {
        errors.push(DefError::at(
            &[PathElem::Field("transition_identifier")],
            "must be non-empty",
        ));
    }
    if !def.duration.is_finite() || def.duration < 0.0 {
        errors.push(DefError::at(
            &[PathElem::Field("duration")],
            "must be finite and >= 0",
        ));
    }
    if !unit_interval(def.rollback) {
        errors.push(DefError::at(
            &[PathElem::Field("rollback")],
            "must be within [0, 1]",
        ));
    }

    for (name, screen) in [("source", &def.source), ("destination", &def.destination)] {
        validate_screen(screen, &mut vec![PathElem::Field(name)], views, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DefErrors { errors })
    }
}

fn validate_screen(
    screen: &ScreenDef,
    path: &mut Vec<PathElem>,
    views: &ViewNames,
    errors: &mut Vec<DefError>,
) {
    path.push(PathElem::Field("collections"));
    for (ci, collection) in screen.collections.iter().enumerate() {
        path.push(PathElem::Index(ci));
        if collection.transition_identifier.is_empty() {
            path.push(PathElem::Field("transition_identifier"));
            errors.push(DefError::at(path, "must be non-empty"));
            path.pop();
        }
        path.push(PathElem::Field("behaviours"));
        for (bi, behaviour) in collection.behaviours.iter().enumerate() {
            path.push(PathElem::Index(bi));
            validate_behaviour(behaviour, path, views, errors);
            path.pop();
        }
        path.pop();
        path.pop();
    }
    path.pop();
}

fn validate_behaviour(
    def: &BehaviourDef,
    path: &mut Vec<PathElem>,
    views: &ViewNames,
    errors: &mut Vec<DefError>,
) {
    let mut field = |name: &'static str, message: String| {
        let mut p = path.clone();
        p.push(PathElem::Field(name));
        errors.push(DefError::at(&p, message));
    };

    if !unit_interval(def.relative_start) {
        field("relative_start", "must be within [0, 1]".to_owned());
    }
    if !unit_interval(def.relative_duration) {
        field("relative_duration", "must be within [0, 1]".to_owned());
    }
    if let Some(spring) = def.spring
        && (!spring.damping.is_finite() || spring.damping <= 0.0)
    {
        field("spring", "damping must be finite and > 0".to_owned());
    }
    if let Some(spring) = def.spring
        && !spring.initial_velocity.is_finite()
    {
        field("spring", "initial_velocity must be finite".to_owned());
    }

    match &def.effect {
        EffectDef::Fade {
            from_alpha,
            to_alpha,
        } => {
            if !unit_interval(*from_alpha) || !unit_interval(*to_alpha) {
                field("effect", "fade alphas must be within [0, 1]".to_owned());
            }
        }
        EffectDef::Scale {
            start_size,
            end_size,
        } => {
            if !start_size.is_finite() || !end_size.is_finite() {
                field("effect", "scale sizes must be finite".to_owned());
            }
        }
        EffectDef::Translate {
            origin,
            destination,
            reference,
        } => {
            if !origin.is_finite() || !destination.is_finite() {
                field("effect", "translate offsets must be finite".to_owned());
            }
            if let Some(name) = reference
                && !views.contains_key(name)
            {
                field("effect", format!("unknown reference view '{name}'"));
            }
        }
        EffectDef::PositionSource { .. } | EffectDef::PositionDestination => {}
    }

    for (i, name) in def.views.iter().enumerate() {
        if !views.contains_key(name) {
            let mut p = path.clone();
            p.push(PathElem::Field("views"));
            p.push(PathElem::Index(i));
            errors.push(DefError::at(&p, format!("unknown view '{name}'")));
        }
    }
}
