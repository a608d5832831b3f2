//! Grammar engine
//!
//! Converts between the flat item list read off the token sequence and the
//! binary expression tree, and decides whether a tree is well-formed. The
//! editor only talks to the [`Grammar`] trait; [`ArithmeticGrammar`] is the
//! bundled implementation (precedence climbing, left-associative operators).

use crate::error::GrammarError;
use crate::models::{FlatItem, Operand, Tree};
use crate::parse::number::is_number;

/// Grammar engine contract used by the tree bridge
pub trait Grammar {
    /// Tree to flat list (the order a user would type it in)
    fn to_items(&self, tree: &Tree) -> Result<Vec<FlatItem>, GrammarError>;

    /// Flat list to tree
    fn to_tree(&self, items: &[FlatItem]) -> Result<Tree, GrammarError>;

    /// Whether the tree is well-formed
    fn is_valid(&self, tree: &Tree) -> bool;
}

/// `+ -` bind loosest, `x * / %` tighter, brackets group.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticGrammar;

impl ArithmeticGrammar {
    pub fn new() -> Self {
        Self
    }

    fn precedence(operator: &str) -> Option<u8> {
        match operator {
            "+" | "-" => Some(1),
            "x" | "*" | "/" | "%" => Some(2),
            _ => None,
        }
    }

    fn flatten(&self, tree: &Tree, out: &mut Vec<FlatItem>) -> Result<(), GrammarError> {
        match tree {
            Tree::Leaf { value: Operand::Unit(unit) } => {
                if !unit.unit.is_finite() {
                    return Err(GrammarError::UnexpectedItem(unit.unit.to_string()));
                }
                out.push(FlatItem::Value(unit.unit.to_string()));
            }
            Tree::Leaf { value: Operand::Data(data) } => out.push(FlatItem::Data(data.clone())),
            Tree::Node {
                operator,
                operand1,
                operand2,
            } => {
                let precedence = Self::precedence(operator)
                    .ok_or_else(|| GrammarError::UnsupportedOperator(operator.clone()))?;

                // Left-associative: a right operand of equal precedence needs brackets.
                let left_brackets = self.binds_looser(operand1, precedence, false);
                let right_brackets = self.binds_looser(operand2, precedence, true);

                self.flatten_grouped(operand1, left_brackets, out)?;
                out.push(FlatItem::Value(operator.clone()));
                self.flatten_grouped(operand2, right_brackets, out)?;
            }
        }
        Ok(())
    }

    fn flatten_grouped(
        &self,
        tree: &Tree,
        grouped: bool,
        out: &mut Vec<FlatItem>,
    ) -> Result<(), GrammarError> {
        if grouped {
            out.push(FlatItem::value("("));
        }
        self.flatten(tree, out)?;
        if grouped {
            out.push(FlatItem::value(")"));
        }
        Ok(())
    }

    fn binds_looser(&self, tree: &Tree, precedence: u8, right: bool) -> bool {
        match tree {
            Tree::Node { operator, .. } => match Self::precedence(operator) {
                Some(inner) if right => inner <= precedence,
                Some(inner) => inner < precedence,
                None => false,
            },
            Tree::Leaf { .. } => false,
        }
    }
}

impl Grammar for ArithmeticGrammar {
    fn to_items(&self, tree: &Tree) -> Result<Vec<FlatItem>, GrammarError> {
        let mut items = Vec::new();
        self.flatten(tree, &mut items)?;
        Ok(items)
    }

    fn to_tree(&self, items: &[FlatItem]) -> Result<Tree, GrammarError> {
        if items.is_empty() {
            return Err(GrammarError::Empty);
        }

        let mut parser = Parser { items, pos: 0 };
        let tree = parser.expression(1)?;

        match parser.peek() {
            None => Ok(tree),
            Some(FlatItem::Value(value)) if value == ")" => Err(GrammarError::UnbalancedBrackets),
            Some(_) => Err(GrammarError::Malformed(parser.pos)),
        }
    }

    fn is_valid(&self, tree: &Tree) -> bool {
        match tree {
            Tree::Node {
                operator,
                operand1,
                operand2,
            } => {
                Self::precedence(operator).is_some()
                    && self.is_valid(operand1)
                    && self.is_valid(operand2)
            }
            Tree::Leaf { value: Operand::Unit(unit) } => unit.unit.is_finite(),
            Tree::Leaf { value: Operand::Data(_) } => true,
        }
    }
}

/// Precedence-climbing parser over flat items
struct Parser<'a> {
    items: &'a [FlatItem],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a FlatItem> {
        self.items.get(self.pos)
    }

    fn peek_operator(&self) -> Option<(&'a str, u8)> {
        let value = self.peek()?.as_str()?;
        ArithmeticGrammar::precedence(value).map(|precedence| (value, precedence))
    }

    fn expression(&mut self, min_precedence: u8) -> Result<Tree, GrammarError> {
        let mut lhs = self.primary()?;

        while let Some((operator, precedence)) = self.peek_operator() {
            if precedence < min_precedence {
                break;
            }
            self.pos += 1;
            let rhs = self.expression(precedence + 1)?;
            lhs = Tree::node(operator, lhs, rhs);
        }

        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Tree, GrammarError> {
        let item = self.peek().ok_or(GrammarError::Malformed(self.pos))?;
        self.pos += 1;

        match item {
            FlatItem::Data(data) => Ok(Tree::data(data.clone())),
            FlatItem::Value(value) if value == "(" => {
                let inner = self.expression(1)?;
                match self.peek() {
                    Some(FlatItem::Value(close)) if close == ")" => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    None => Err(GrammarError::UnbalancedBrackets),
                    Some(_) => Err(GrammarError::Malformed(self.pos)),
                }
            }
            FlatItem::Value(value) if is_number(value) => value
                .parse::<f64>()
                .map(Tree::unit)
                .map_err(|_| GrammarError::UnexpectedItem(value.clone())),
            FlatItem::Value(value) if value == ")" => Err(GrammarError::UnbalancedBrackets),
            FlatItem::Value(value) if ArithmeticGrammar::precedence(value).is_some() => {
                Err(GrammarError::Malformed(self.pos - 1))
            }
            FlatItem::Value(value) => Err(GrammarError::UnexpectedItem(value.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items(values: &[&str]) -> Vec<FlatItem> {
        values.iter().map(|v| FlatItem::value(v)).collect()
    }

    fn one_plus_two_plus_three() -> Tree {
        Tree::node("+", Tree::node("+", Tree::unit(1.0), Tree::unit(2.0)), Tree::unit(3.0))
    }

    #[test]
    fn test_left_associative_flatten() {
        let grammar = ArithmeticGrammar::new();
        assert_eq!(
            grammar.to_items(&one_plus_two_plus_three()).unwrap(),
            items(&["1", "+", "2", "+", "3"])
        );
    }

    #[test]
    fn test_right_nested_gets_brackets() {
        let grammar = ArithmeticGrammar::new();
        let tree = Tree::node(
            "-",
            Tree::unit(1.0),
            Tree::node("-", Tree::unit(2.0), Tree::unit(3.0)),
        );
        let flat = grammar.to_items(&tree).unwrap();
        assert_eq!(flat, items(&["1", "-", "(", "2", "-", "3", ")"]));
        assert_eq!(grammar.to_tree(&flat).unwrap(), tree);
    }

    #[test]
    fn test_precedence() {
        let grammar = ArithmeticGrammar::new();
        let tree = grammar.to_tree(&items(&["1", "+", "2", "x", "3"])).unwrap();
        assert_eq!(
            tree,
            Tree::node("+", Tree::unit(1.0), Tree::node("x", Tree::unit(2.0), Tree::unit(3.0)))
        );

        let grouped = Tree::node(
            "x",
            Tree::node("+", Tree::unit(1.0), Tree::unit(2.0)),
            Tree::unit(3.0),
        );
        let flat = grammar.to_items(&grouped).unwrap();
        assert_eq!(flat, items(&["(", "1", "+", "2", ")", "x", "3"]));
        assert_eq!(grammar.to_tree(&flat).unwrap(), grouped);
    }

    #[test]
    fn test_data_operand() {
        let grammar = ArithmeticGrammar::new();
        let flat = vec![
            FlatItem::Data(json!({ "id": 7 })),
            FlatItem::value("/"),
            FlatItem::value("2"),
        ];
        assert_eq!(
            grammar.to_tree(&flat).unwrap(),
            Tree::node("/", Tree::data(json!({ "id": 7 })), Tree::unit(2.0))
        );
    }

    #[test]
    fn test_errors() {
        let grammar = ArithmeticGrammar::new();
        assert_eq!(grammar.to_tree(&[]), Err(GrammarError::Empty));
        assert_eq!(grammar.to_tree(&items(&["1", "+"])), Err(GrammarError::Malformed(2)));
        assert_eq!(grammar.to_tree(&items(&["(", "1"])), Err(GrammarError::UnbalancedBrackets));
        assert_eq!(grammar.to_tree(&items(&["1", ")"])), Err(GrammarError::UnbalancedBrackets));
        assert_eq!(grammar.to_tree(&items(&["1", "2"])), Err(GrammarError::Malformed(1)));
        assert_eq!(grammar.to_tree(&items(&["1", ",", "2"])), Err(GrammarError::Malformed(1)));
        assert_eq!(
            grammar.to_tree(&items(&["1."])),
            Err(GrammarError::UnexpectedItem("1.".into()))
        );
    }

    #[test]
    fn test_unsupported_operator() {
        let grammar = ArithmeticGrammar::new();
        let tree = Tree::node("^", Tree::unit(2.0), Tree::unit(3.0));
        assert_eq!(
            grammar.to_items(&tree),
            Err(GrammarError::UnsupportedOperator("^".into()))
        );
        assert!(!grammar.is_valid(&tree));
        assert!(grammar.is_valid(&one_plus_two_plus_three()));
    }
}
