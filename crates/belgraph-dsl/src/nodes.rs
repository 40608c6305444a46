//! BEL node DSL.
//!
//! Every node kind is an immutable value whose identity is its canonical
//! tuple: `Hash`, `Eq` and `Ord` all go through [`Node::as_tuple`]. Derived
//! operations (`get_parent`, `with_variants`, `get_rna`, `get_gene`) return new
//! nodes.
//!
//! Two orderings are in play. The canonical tuple sorts variants, members,
//! reactants and products by their tuples so that insertion order never
//! changes identity. BEL rendering sorts the same collections by their
//! rendered strings so output reads alphabetically.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use belgraph_common::{BelError, Result};

use crate::canonical::{sha512_hex, CanonicalTuple};
use crate::entity::Entity;
use crate::fusion::FusionRange;
use crate::language::Function;
use crate::variants::Variant;

// ── Node kinds ────────────────────────────────────────────────────────────────

/// Abundance, BiologicalProcess or Pathology.
#[derive(Debug, Clone)]
pub struct BaseAbundance {
    function: Function,
    entity: Entity,
}

/// Gene, RNA, miRNA or Protein, optionally carrying variants.
#[derive(Debug, Clone)]
pub struct CentralDogmaAbundance {
    function: Function,
    entity: Entity,
    variants: Vec<Variant>,
}

/// Complex (optionally named) or Composite.
#[derive(Debug, Clone)]
pub struct ListAbundance {
    function: Function,
    members: Vec<Node>,
    entity: Option<Entity>,
}

#[derive(Debug, Clone)]
pub struct Reaction {
    reactants: Vec<Node>,
    products: Vec<Node>,
}

/// Fusion of two central dogma partners of the same function.
#[derive(Debug, Clone)]
pub struct FusionNode {
    function: Function,
    partner_5p: CentralDogmaAbundance,
    range_5p: FusionRange,
    partner_3p: CentralDogmaAbundance,
    range_3p: FusionRange,
}

/// A BEL term.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NodeRecord", into = "NodeRecord")]
pub enum Node {
    Base(BaseAbundance),
    CentralDogma(CentralDogmaAbundance),
    List(ListAbundance),
    Reaction(Reaction),
    Fusion(FusionNode),
}

// ── Construction ──────────────────────────────────────────────────────────────

impl BaseAbundance {
    pub fn function(&self) -> Function { self.function }
    pub fn entity(&self) -> &Entity { &self.entity }
}

impl CentralDogmaAbundance {
    pub fn new(
        function: Function,
        namespace: &str,
        name: Option<&str>,
        identifier: Option<&str>,
        variants: Vec<Variant>,
    ) -> Result<Self> {
        if !function.is_central_dogma() {
            return Err(BelError::MalformedNode(format!("{function} is not a central dogma function")));
        }
        let entity = Entity::for_node(function, namespace, name, identifier)?;
        Ok(Self { function, entity, variants })
    }

    pub fn protein(namespace: &str, name: Option<&str>, identifier: Option<&str>) -> Result<Self> {
        Self::new(Function::Protein, namespace, name, identifier, Vec::new())
    }

    pub fn rna(namespace: &str, name: Option<&str>, identifier: Option<&str>) -> Result<Self> {
        Self::new(Function::Rna, namespace, name, identifier, Vec::new())
    }

    pub fn gene(namespace: &str, name: Option<&str>, identifier: Option<&str>) -> Result<Self> {
        Self::new(Function::Gene, namespace, name, identifier, Vec::new())
    }

    pub fn function(&self) -> Function { self.function }
    pub fn entity(&self) -> &Entity { &self.entity }
    pub fn variants(&self) -> &[Variant] { &self.variants }

    fn as_tuple(&self) -> CanonicalTuple {
        if self.variants.is_empty() {
            return leaf_tuple(self.function, &self.entity);
        }
        CanonicalTuple::tuple(vec![
            self.function.as_str().into(),
            self.entity.key_tuple(),
            CanonicalTuple::sorted(self.variants.iter().map(Variant::as_tuple).collect()),
        ])
    }

    fn as_bel(&self) -> String {
        if self.variants.is_empty() {
            return format!("{}({})", self.function.short(), self.entity.as_bel());
        }
        let mut rendered: Vec<String> = self.variants.iter().map(Variant::as_bel).collect();
        rendered.sort();
        format!("{}({}, {})", self.function.short(), self.entity.as_bel(), rendered.join(", "))
    }
}

impl ListAbundance {
    pub fn function(&self) -> Function { self.function }
    pub fn members(&self) -> &[Node] { &self.members }
    pub fn entity(&self) -> Option<&Entity> { self.entity.as_ref() }
}

impl Reaction {
    pub fn reactants(&self) -> &[Node] { &self.reactants }
    pub fn products(&self) -> &[Node] { &self.products }
}

impl FusionNode {
    pub fn function(&self) -> Function { self.function }
    pub fn partner_5p(&self) -> &CentralDogmaAbundance { &self.partner_5p }
    pub fn partner_3p(&self) -> &CentralDogmaAbundance { &self.partner_3p }
    pub fn range_5p(&self) -> &FusionRange { &self.range_5p }
    pub fn range_3p(&self) -> &FusionRange { &self.range_3p }
}

impl Node {
    fn base(function: Function, namespace: &str, name: Option<&str>, identifier: Option<&str>) -> Result<Node> {
        let entity = Entity::for_node(function, namespace, name, identifier)?;
        Ok(Node::Base(BaseAbundance { function, entity }))
    }

    pub fn abundance(namespace: &str, name: Option<&str>, identifier: Option<&str>) -> Result<Node> {
        Self::base(Function::Abundance, namespace, name, identifier)
    }

    pub fn biological_process(namespace: &str, name: Option<&str>, identifier: Option<&str>) -> Result<Node> {
        Self::base(Function::BiologicalProcess, namespace, name, identifier)
    }

    pub fn pathology(namespace: &str, name: Option<&str>, identifier: Option<&str>) -> Result<Node> {
        Self::base(Function::Pathology, namespace, name, identifier)
    }

    pub fn gene(namespace: &str, name: Option<&str>, identifier: Option<&str>, variants: Vec<Variant>) -> Result<Node> {
        CentralDogmaAbundance::new(Function::Gene, namespace, name, identifier, variants).map(Node::CentralDogma)
    }

    pub fn rna(namespace: &str, name: Option<&str>, identifier: Option<&str>, variants: Vec<Variant>) -> Result<Node> {
        CentralDogmaAbundance::new(Function::Rna, namespace, name, identifier, variants).map(Node::CentralDogma)
    }

    pub fn micro_rna(namespace: &str, name: Option<&str>, identifier: Option<&str>, variants: Vec<Variant>) -> Result<Node> {
        CentralDogmaAbundance::new(Function::MicroRna, namespace, name, identifier, variants).map(Node::CentralDogma)
    }

    pub fn protein(namespace: &str, name: Option<&str>, identifier: Option<&str>, variants: Vec<Variant>) -> Result<Node> {
        CentralDogmaAbundance::new(Function::Protein, namespace, name, identifier, variants).map(Node::CentralDogma)
    }

    /// Unnamed complex of the given members.
    pub fn complex(members: Vec<Node>) -> Node {
        Node::List(ListAbundance { function: Function::Complex, members, entity: None })
    }

    /// Complex identified by a concept, with or without enumerated members.
    pub fn named_complex(
        namespace: &str,
        name: Option<&str>,
        identifier: Option<&str>,
        members: Vec<Node>,
    ) -> Result<Node> {
        let entity = Entity::for_node(Function::Complex, namespace, name, identifier)?;
        Ok(Node::List(ListAbundance { function: Function::Complex, members, entity: Some(entity) }))
    }

    pub fn composite(members: Vec<Node>) -> Node {
        Node::List(ListAbundance { function: Function::Composite, members, entity: None })
    }

    /// Empty reactant or product lists are accepted as-is.
    pub fn reaction(reactants: Vec<Node>, products: Vec<Node>) -> Node {
        Node::Reaction(Reaction { reactants, products })
    }

    fn fusion(
        function: Function,
        partner_5p: CentralDogmaAbundance,
        partner_3p: CentralDogmaAbundance,
        range_5p: Option<FusionRange>,
        range_3p: Option<FusionRange>,
    ) -> Node {
        Node::Fusion(FusionNode {
            function,
            partner_5p,
            range_5p: range_5p.unwrap_or_default(),
            partner_3p,
            range_3p: range_3p.unwrap_or_default(),
        })
    }

    pub fn protein_fusion(
        partner_5p: CentralDogmaAbundance,
        partner_3p: CentralDogmaAbundance,
        range_5p: Option<FusionRange>,
        range_3p: Option<FusionRange>,
    ) -> Node {
        Self::fusion(Function::Protein, partner_5p, partner_3p, range_5p, range_3p)
    }

    pub fn rna_fusion(
        partner_5p: CentralDogmaAbundance,
        partner_3p: CentralDogmaAbundance,
        range_5p: Option<FusionRange>,
        range_3p: Option<FusionRange>,
    ) -> Node {
        Self::fusion(Function::Rna, partner_5p, partner_3p, range_5p, range_3p)
    }

    pub fn gene_fusion(
        partner_5p: CentralDogmaAbundance,
        partner_3p: CentralDogmaAbundance,
        range_5p: Option<FusionRange>,
        range_3p: Option<FusionRange>,
    ) -> Node {
        Self::fusion(Function::Gene, partner_5p, partner_3p, range_5p, range_3p)
    }
}

impl From<CentralDogmaAbundance> for Node {
    fn from(c: CentralDogmaAbundance) -> Self { Node::CentralDogma(c) }
}

// ── Accessors ─────────────────────────────────────────────────────────────────

impl Node {
    pub fn function(&self) -> Function {
        match self {
            Node::Base(n) => n.function,
            Node::CentralDogma(n) => n.function,
            Node::List(n) => n.function,
            Node::Reaction(_) => Function::Reaction,
            Node::Fusion(n) => n.function,
        }
    }

    /// The node's own concept, if it has one.
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            Node::Base(n) => Some(&n.entity),
            Node::CentralDogma(n) => Some(&n.entity),
            Node::List(n) => n.entity.as_ref(),
            Node::Reaction(_) | Node::Fusion(_) => None,
        }
    }

    pub fn variants(&self) -> &[Variant] {
        match self {
            Node::CentralDogma(n) => &n.variants,
            _ => &[],
        }
    }

    pub fn has_variants(&self) -> bool {
        !self.variants().is_empty()
    }

    pub fn as_central_dogma(&self) -> Option<&CentralDogmaAbundance> {
        match self {
            Node::CentralDogma(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListAbundance> {
        match self {
            Node::List(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_reaction(&self) -> Option<&Reaction> {
        match self {
            Node::Reaction(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_fusion(&self) -> Option<&FusionNode> {
        match self {
            Node::Fusion(n) => Some(n),
            _ => None,
        }
    }
}

// ── Derived nodes ─────────────────────────────────────────────────────────────

impl Node {
    /// The same entity without variants, or `None` if there are none.
    pub fn get_parent(&self) -> Option<Node> {
        match self {
            Node::CentralDogma(n) if !n.variants.is_empty() => Some(Node::CentralDogma(CentralDogmaAbundance {
                function: n.function,
                entity: n.entity.clone(),
                variants: Vec::new(),
            })),
            _ => None,
        }
    }

    /// A new node of the same entity carrying exactly `variants`.
    pub fn with_variants(&self, variants: Vec<Variant>) -> Result<Node> {
        match self {
            Node::CentralDogma(n) => Ok(Node::CentralDogma(CentralDogmaAbundance {
                function: n.function,
                entity: n.entity.clone(),
                variants,
            })),
            other => Err(BelError::MalformedNode(format!("{} cannot carry variants", other.function()))),
        }
    }

    fn relative(&self, function: Function) -> Result<Node> {
        let n = self.as_central_dogma().ok_or_else(|| {
            BelError::InferCentralDogma(format!("{} has no central dogma relatives", self.function()))
        })?;
        if !n.variants.is_empty() {
            return Err(BelError::InferCentralDogma(self.as_bel()));
        }
        Ok(Node::CentralDogma(CentralDogmaAbundance { function, entity: n.entity.clone(), variants: Vec::new() }))
    }

    /// RNA coding for this protein.
    pub fn get_rna(&self) -> Result<Node> {
        match self.function() {
            Function::Protein => self.relative(Function::Rna),
            other => Err(BelError::InferCentralDogma(format!("{other} is not translated from an RNA"))),
        }
    }

    /// Gene of this RNA, miRNA or protein.
    pub fn get_gene(&self) -> Result<Node> {
        match self.function() {
            Function::Rna | Function::MicroRna | Function::Protein => self.relative(Function::Gene),
            other => Err(BelError::InferCentralDogma(format!("{other} is not transcribed from a gene"))),
        }
    }
}

// ── Canonicalization ──────────────────────────────────────────────────────────

fn leaf_tuple(function: Function, entity: &Entity) -> CanonicalTuple {
    CanonicalTuple::tuple(vec![
        function.as_str().into(),
        entity.namespace.as_str().into(),
        entity.name_or_identifier().into(),
    ])
}

fn sorted_tuples(nodes: &[Node]) -> Vec<CanonicalTuple> {
    let mut tuples: Vec<CanonicalTuple> = nodes.iter().map(Node::as_tuple).collect();
    tuples.sort();
    tuples
}

fn sorted_bel(nodes: &[Node]) -> String {
    let mut rendered: Vec<String> = nodes.iter().map(Node::as_bel).collect();
    rendered.sort();
    rendered.join(", ")
}

impl Node {
    /// Canonical tuple; the basis of hashing and equality.
    pub fn as_tuple(&self) -> CanonicalTuple {
        match self {
            Node::Base(n) => leaf_tuple(n.function, &n.entity),
            Node::CentralDogma(n) => n.as_tuple(),
            Node::List(n) => {
                let mut items: Vec<CanonicalTuple> = vec![n.function.as_str().into()];
                if let Some(entity) = &n.entity {
                    items.push(entity.key_tuple());
                }
                items.extend(sorted_tuples(&n.members));
                CanonicalTuple::tuple(items)
            }
            Node::Reaction(n) => CanonicalTuple::tuple(vec![
                Function::Reaction.as_str().into(),
                CanonicalTuple::tuple(sorted_tuples(&n.reactants)),
                CanonicalTuple::tuple(sorted_tuples(&n.products)),
            ]),
            Node::Fusion(n) => CanonicalTuple::tuple(vec![
                n.function.as_str().into(),
                n.partner_5p.entity.key_tuple(),
                n.range_5p.as_tuple(),
                n.partner_3p.entity.key_tuple(),
                n.range_3p.as_tuple(),
            ]),
        }
    }

    /// Canonical BEL rendering.
    pub fn as_bel(&self) -> String {
        match self {
            Node::Base(n) => format!("{}({})", n.function.short(), n.entity.as_bel()),
            Node::CentralDogma(n) => n.as_bel(),
            Node::List(n) => match (&n.entity, n.members.is_empty()) {
                (Some(entity), true) => format!("{}({})", n.function.short(), entity.as_bel()),
                (Some(entity), false) => {
                    format!("{}({}, {})", n.function.short(), entity.as_bel(), sorted_bel(&n.members))
                }
                (None, _) => format!("{}({})", n.function.short(), sorted_bel(&n.members)),
            },
            Node::Reaction(n) => format!(
                "rxn(reactants({}), products({}))",
                sorted_bel(&n.reactants),
                sorted_bel(&n.products)
            ),
            Node::Fusion(n) => format!(
                "{}(fus({}, {}, {}, {}))",
                n.function.short(),
                n.partner_5p.entity.as_bel(),
                n.range_5p.as_bel(),
                n.partner_3p.entity.as_bel(),
                n.range_3p.as_bel()
            ),
        }
    }

    /// Hex SHA-512 of the BEL rendering; a fixed-width cross-process key.
    pub fn as_sha512(&self) -> String {
        sha512_hex(self.as_bel().as_bytes())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.as_tuple() == other.as_tuple()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_tuple().hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_tuple().cmp(&other.as_tuple())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_bel())
    }
}

// ── Mapping form ──────────────────────────────────────────────────────────────

/// Dictionary form of a node: `function`, `concept`, `variants`, `members`,
/// `reactants`, `products`, `fusion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeRecord {
    function: Function,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    concept: Option<Entity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    variants: Vec<Variant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    members: Vec<NodeRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    reactants: Vec<NodeRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    products: Vec<NodeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fusion: Option<Box<FusionRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FusionRecord {
    partner_5p: NodeRecord,
    #[serde(default)]
    range_5p: FusionRange,
    partner_3p: NodeRecord,
    #[serde(default)]
    range_3p: FusionRange,
}

impl NodeRecord {
    fn concept(&self) -> Result<Entity> {
        let entity = self
            .concept
            .clone()
            .ok_or_else(|| BelError::MissingNodeIdentity { function: self.function.as_str().to_string() })?;
        entity.check_identity(self.function)?;
        Ok(entity)
    }

    fn into_partner(self) -> Result<CentralDogmaAbundance> {
        match Node::try_from(self)? {
            Node::CentralDogma(partner) => Ok(partner),
            other => Err(BelError::MalformedNode(format!("fusion partner must be a gene, RNA or protein: {other}"))),
        }
    }
}

fn rehydrate(records: Vec<NodeRecord>) -> Result<Vec<Node>> {
    records.into_iter().map(Node::try_from).collect()
}

impl TryFrom<NodeRecord> for Node {
    type Error = BelError;

    fn try_from(record: NodeRecord) -> Result<Self> {
        let function = record.function;
        match function {
            Function::Abundance | Function::BiologicalProcess | Function::Pathology => {
                if !record.variants.is_empty() {
                    return Err(BelError::MalformedNode(format!("{function} cannot carry variants")));
                }
                Ok(Node::Base(BaseAbundance { function, entity: record.concept()? }))
            }
            Function::Gene | Function::Rna | Function::MicroRna | Function::Protein => match record.fusion {
                Some(fusion) => {
                    let fusion = *fusion;
                    Ok(Node::Fusion(FusionNode {
                        function,
                        partner_5p: fusion.partner_5p.into_partner()?,
                        range_5p: fusion.range_5p,
                        partner_3p: fusion.partner_3p.into_partner()?,
                        range_3p: fusion.range_3p,
                    }))
                }
                None => {
                    let entity = record.concept()?;
                    Ok(Node::CentralDogma(CentralDogmaAbundance { function, entity, variants: record.variants }))
                }
            },
            Function::Complex => {
                let entity = match &record.concept {
                    Some(_) => Some(record.concept()?),
                    None => None,
                };
                Ok(Node::List(ListAbundance { function, members: rehydrate(record.members)?, entity }))
            }
            Function::Composite => {
                if record.concept.is_some() {
                    return Err(BelError::MalformedNode("composite abundances are never named".to_string()));
                }
                Ok(Node::composite(rehydrate(record.members)?))
            }
            Function::Reaction => Ok(Node::reaction(rehydrate(record.reactants)?, rehydrate(record.products)?)),
        }
    }
}

fn partner_record(partner: &CentralDogmaAbundance) -> NodeRecord {
    NodeRecord::from(Node::CentralDogma(partner.clone()))
}

fn records(nodes: &[Node]) -> Vec<NodeRecord> {
    nodes.iter().cloned().map(NodeRecord::from).collect()
}

impl From<Node> for NodeRecord {
    fn from(node: Node) -> Self {
        let mut record = NodeRecord {
            function: node.function(),
            concept: node.entity().cloned(),
            variants: Vec::new(),
            members: Vec::new(),
            reactants: Vec::new(),
            products: Vec::new(),
            fusion: None,
        };
        match &node {
            Node::Base(_) => {}
            Node::CentralDogma(n) => record.variants = n.variants.clone(),
            Node::List(n) => record.members = records(&n.members),
            Node::Reaction(n) => {
                record.reactants = records(&n.reactants);
                record.products = records(&n.products);
            }
            Node::Fusion(n) => {
                record.fusion = Some(Box::new(FusionRecord {
                    partner_5p: partner_record(&n.partner_5p),
                    range_5p: n.range_5p.clone(),
                    partner_3p: partner_record(&n.partner_3p),
                    range_3p: n.range_3p.clone(),
                }));
            }
        }
        record
    }
}

impl Node {
    /// Dictionary form for consumers that need field access by name.
    pub fn to_mapping(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rehydrate a node from its dictionary form. Unknown keys such as `id`
    /// are ignored.
    pub fn from_mapping(value: &Value) -> Result<Node> {
        let record: NodeRecord =
            serde_json::from_value(value.clone()).map_err(|e| BelError::MalformedNode(e.to_string()))?;
        Node::try_from(record)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
