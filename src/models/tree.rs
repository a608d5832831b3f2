//! Expression tree and flat item types
//!
//! The tree is the external shape consumed and produced by the editor: a leaf
//! `{ value }` or a binary node `{ operator, operand1, operand2 }`. The flat
//! item list is what the grammar engine converts to and from.

use serde::{Deserialize, Serialize};

/// Binary-recursive expression tree
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Tree {
    Node {
        operator: String,
        operand1: Box<Tree>,
        operand2: Box<Tree>,
    },
    Leaf {
        value: Operand,
    },
}

impl Tree {
    /// Leaf holding a plain number
    pub fn unit(unit: f64) -> Self {
        Tree::Leaf {
            value: Operand::Unit(UnitValue::new(unit)),
        }
    }

    /// Leaf holding host data
    pub fn data(data: serde_json::Value) -> Self {
        Tree::Leaf {
            value: Operand::Data(data),
        }
    }

    pub fn node(operator: &str, operand1: Tree, operand2: Tree) -> Self {
        Tree::Node {
            operator: operator.to_string(),
            operand1: Box::new(operand1),
            operand2: Box::new(operand2),
        }
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        match self {
            Tree::Node { operand1, operand2, .. } => operand1.leaf_count() + operand2.leaf_count(),
            Tree::Leaf { .. } => 1,
        }
    }
}

/// Value carried by a leaf
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Operand {
    Unit(UnitValue),
    Data(serde_json::Value),
}

/// `{ "type": "unit", "unit": 1 }`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UnitValue {
    #[serde(rename = "type")]
    pub kind: UnitTag,
    pub unit: f64,
}

impl UnitValue {
    pub fn new(unit: f64) -> Self {
        Self {
            kind: UnitTag::Unit,
            unit,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnitTag {
    Unit,
}

/// One entry of the flat, left-to-right expression
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum FlatItem {
    /// Textual value: a number, an operator or a bracket
    Value(String),
    /// Host data standing in for an operand
    Data(serde_json::Value),
}

impl FlatItem {
    pub fn value(value: &str) -> Self {
        FlatItem::Value(value.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlatItem::Value(value) => Some(value),
            FlatItem::Data(_) => None,
        }
    }
}
