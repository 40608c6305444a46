//! Source/target modifiers of an edge: activity, degradation,
//! translocation and plain location.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

const GO: &str = "GO";

/// Kind of a modifier that wraps the node, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    Activity,
    Degradation,
    Translocation,
}

/// Payload of an activity or translocation modifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Effect {
    Translocation {
        #[serde(rename = "fromLoc")]
        from_loc: Entity,
        #[serde(rename = "toLoc")]
        to_loc: Entity,
    },
    /// Molecular activity, e.g. `bel:kin` or `GO:0016301`.
    Activity(Entity),
}

/// Modifier on one side of an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<ModifierKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Entity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
}

fn intracellular() -> Entity {
    Entity::with_identifier(GO, "0005622", "intracellular")
}

fn extracellular_space() -> Entity {
    Entity::with_identifier(GO, "0005615", "extracellular space")
}

fn cell_surface() -> Entity {
    Entity::with_identifier(GO, "0009986", "cell surface")
}

impl Modifier {
    /// `act(x)` or `act(x, ma(activity))`.
    pub fn activity(activity: Option<Entity>) -> Self {
        Self { modifier: Some(ModifierKind::Activity), location: None, effect: activity.map(Effect::Activity) }
    }

    pub fn degradation() -> Self {
        Self { modifier: Some(ModifierKind::Degradation), ..Default::default() }
    }

    pub fn translocation(from_loc: Entity, to_loc: Entity) -> Self {
        Self {
            modifier: Some(ModifierKind::Translocation),
            location: None,
            effect: Some(Effect::Translocation { from_loc, to_loc }),
        }
    }

    /// Intracellular → extracellular space.
    pub fn secretion() -> Self {
        Self::translocation(intracellular(), extracellular_space())
    }

    /// Intracellular → cell surface.
    pub fn cell_surface_expression() -> Self {
        Self::translocation(intracellular(), cell_surface())
    }

    /// A bare location with no wrapping modifier.
    pub fn location(location: Entity) -> Self {
        Self { location: Some(location), ..Default::default() }
    }

    pub fn at(mut self, location: Entity) -> Self {
        self.location = Some(location);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.modifier.is_none() && self.location.is_none() && self.effect.is_none()
    }

    /// Every concept the modifier refers to.
    pub fn concepts(&self) -> Vec<&Entity> {
        let mut out: Vec<&Entity> = self.location.iter().collect();
        match &self.effect {
            Some(Effect::Activity(e)) => out.push(e),
            Some(Effect::Translocation { from_loc, to_loc }) => {
                out.push(from_loc);
                out.push(to_loc);
            }
            None => {}
        }
        out
    }

    /// Wrap the BEL rendering of a node with this modifier.
    pub fn wrap_bel(&self, node_bel: &str) -> String {
        let located = match (&self.location, node_bel.strip_suffix(')')) {
            (Some(location), Some(open)) => format!("{open}, loc({}))", location.as_bel()),
            _ => node_bel.to_string(),
        };
        match (self.modifier, &self.effect) {
            (Some(ModifierKind::Activity), Some(Effect::Activity(ma))) => {
                format!("act({located}, ma({}))", ma.as_bel())
            }
            (Some(ModifierKind::Activity), _) => format!("act({located})"),
            (Some(ModifierKind::Degradation), _) => format!("deg({located})"),
            (Some(ModifierKind::Translocation), Some(Effect::Translocation { from_loc, to_loc })) => {
                if *from_loc == intracellular() && *to_loc == extracellular_space() {
                    format!("sec({located})")
                } else if *from_loc == intracellular() && *to_loc == cell_surface() {
                    format!("surf({located})")
                } else {
                    format!("tloc({located}, fromLoc({}), toLoc({}))", from_loc.as_bel(), to_loc.as_bel())
                }
            }
            (Some(ModifierKind::Translocation), _) => format!("tloc({located})"),
            (None, _) => located,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
