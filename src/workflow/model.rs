use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::warn;

use super::stage::Stage;

/// Anything the Orders API embeds with a Mongo-style `_id`
pub trait Identified {
    fn id(&self) -> &str;
}

/// A reference field that the API sends either as a bare identifier or as
/// the embedded document. `id()` resolves both forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Id(String),
    Embedded(T),
}

impl<T: Identified> Reference<T> {
    pub fn id(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Embedded(doc) => doc.id(),
        }
    }

    /// True when the reference resolves to an empty or whitespace-only id
    pub fn is_blank(&self) -> bool {
        self.id().trim().is_empty()
    }

    pub fn embedded(&self) -> Option<&T> {
        match self {
            Reference::Id(_) => None,
            Reference::Embedded(doc) => Some(doc),
        }
    }

    /// Reduce to the bare identifier form used in update payloads
    pub fn to_id_only(&self) -> Reference<T> {
        Reference::Id(self.id().to_string())
    }
}

impl<T> From<&str> for Reference<T> {
    fn from(id: &str) -> Self {
        Reference::Id(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified!(Employee, Product, Customer, Company);

impl Customer {
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

/// Binds one stage of one order item to an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub stage: Stage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Reference<Employee>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Assignment {
    pub fn new(stage: Stage) -> Self {
        Self {
            id: None,
            stage,
            assigned_to: None,
            stage_notes: None,
            is_active: None,
        }
    }

    pub fn assigned(stage: Stage, employee_id: &str) -> Self {
        Self {
            assigned_to: Some(Reference::from(employee_id)),
            ..Self::new(stage)
        }
    }

    /// Resolved assignee id; `None` when absent, null or blank
    pub fn assignee_id(&self) -> Option<&str> {
        self.assigned_to
            .as_ref()
            .map(Reference::id)
            .filter(|id| !id.trim().is_empty())
    }
}

/// One product line on an order, tracked through the stage workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `null` when the product document was deleted
    #[serde(default)]
    pub product: Option<Reference<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name_snapshot: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub item_status: Stage,
    #[serde(default, deserialize_with = "skippable_stages")]
    pub disabled_stages: BTreeSet<Stage>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderItem {
    /// A freshly composed item: `TO_DO`, nothing skipped, no assignments
    pub fn new(product: Reference<Product>, quantity: u32) -> Self {
        Self {
            id: None,
            product: Some(product),
            product_name_snapshot: None,
            quantity,
            item_status: Stage::ToDo,
            disabled_stages: BTreeSet::new(),
            assignments: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn product_name(&self) -> Option<&str> {
        self.product_name_snapshot
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                self.product
                    .as_ref()
                    .and_then(Reference::embedded)
                    .and_then(|p| p.name.as_deref())
            })
    }

    /// Replace every embedded reference with its bare identifier
    pub fn normalize_references(&mut self) {
        self.product = self.product.as_ref().map(Reference::to_id_only);
        for assignment in &mut self.assignments {
            if let Some(assignee) = assignment.assigned_to.as_mut() {
                *assignee = assignee.to_id_only();
            }
        }
    }
}

/// Decode `disabledStages`, keeping only work stages. Control stages and
/// unknown names are dropped with a warning.
fn skippable_stages<'de, D>(deserializer: D) -> Result<BTreeSet<Stage>, D::Error>
where
    D: Deserializer<'de>,
{
    let names: Option<Vec<String>> = Option::deserialize(deserializer)?;
    let mut stages = BTreeSet::new();
    for name in names.unwrap_or_default() {
        match name.parse::<Stage>() {
            Ok(stage) if stage.is_work_state() => {
                stages.insert(stage);
            }
            _ => warn!(stage = %name, "Ignoring stage that cannot be skipped in disabledStages"),
        }
    }
    Ok(stages)
}
