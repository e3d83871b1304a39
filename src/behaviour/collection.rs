use crate::behaviour::behaviour::BehaviourHandle;

/// Behaviours a screen contributes to one named transition.
#[derive(Clone, Debug, Default)]
pub struct BehaviourCollection {
    transition_identifier: String,
    behaviours: Vec<BehaviourHandle>,
}

impl BehaviourCollection {
    /// Create an empty collection for `transition_identifier`.
    pub fn new(transition_identifier: impl Into<String>) -> Self {
        Self {
            transition_identifier: transition_identifier.into(),
            behaviours: Vec::new(),
        }
    }

    /// Append a behaviour.
    pub fn with(mut self, behaviour: BehaviourHandle) -> Self {
        self.behaviours.push(behaviour);
        self
    }

    /// Append a behaviour in place.
    pub fn push(&mut self, behaviour: BehaviourHandle) {
        self.behaviours.push(behaviour);
    }

    pub fn transition_identifier(&self) -> &str {
        &self.transition_identifier
    }

    pub fn behaviours(&self) -> &[BehaviourHandle] {
        &self.behaviours
    }

    pub fn len(&self) -> usize {
        self.behaviours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviours.is_empty()
    }
}

/// Behaviours declared for `transition_identifier`, in declaration order.
///
/// Several collections may share an identifier; their behaviours are concatenated. Unknown
/// identifiers yield an empty sequence.
pub fn behaviours_for(
    collections: &[BehaviourCollection],
    transition_identifier: &str,
) -> Vec<BehaviourHandle> {
    collections
        .iter()
        .filter(|c| c.transition_identifier == transition_identifier)
        .flat_map(|c| c.behaviours.iter().cloned())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/behaviour/collection.rs"]
mod tests;
