//! BEL node DSL: concepts, variants, nodes, modifiers and their canonical
//! tuple and BEL renderings.

pub mod canonical;
pub mod entity;
pub mod fusion;
pub mod language;
pub mod modifiers;
pub mod nodes;
pub mod variants;

pub use canonical::{ensure_quotes, CanonicalTuple};
pub use entity::Entity;
pub use fusion::FusionRange;
pub use language::Function;
pub use modifiers::{Effect, Modifier, ModifierKind};
pub use nodes::{BaseAbundance, CentralDogmaAbundance, FusionNode, ListAbundance, Node, Reaction};
pub use variants::{Bound, Fragment, FragmentRange, GeneModification, HgvsVariant, ProteinModification, Variant};
