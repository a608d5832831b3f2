// Keyboard decoding across platforms

use formula_editor::input::keys::{analyze, key_value, KeyIntent, Platform};
use formula_editor::parse::tokens::{classify, TokenClass};
use formula_editor::KeyInput;
use rstest::rstest;

#[rstest]
#[case("*", false, Some("x"))]
#[case("+", false, Some("+"))]
#[case("=", true, Some("+"))]
#[case("=", false, None)]
#[case("±", true, Some("+"))]
#[case("-", false, Some("-"))]
#[case("–", false, Some("-"))]
#[case(".", false, Some("."))]
#[case("/", false, Some("/"))]
#[case("÷", false, Some("/"))]
#[case("7", false, Some("7"))]
#[case("5", true, Some("%"))]
#[case("8", true, Some("*"))]
#[case("9", true, Some("("))]
#[case("0", true, Some(")"))]
#[case("1", true, Some("!"))]
#[case("%", true, Some("%"))]
#[case("(", true, Some("("))]
#[case(",", false, Some(","))]
#[case("[", false, None)]
#[case("a", false, None)]
#[case("Tab", false, None)]
fn test_key_value(#[case] key: &str, #[case] shift: bool, #[case] expected: Option<&str>) {
    assert_eq!(key_value(key, shift).as_deref(), expected);
}

#[rstest]
#[case(KeyInput::new("F5"), Platform::Other, Some(KeyIntent::Reload))]
#[case(KeyInput::new("r").with_ctrl(), Platform::Other, Some(KeyIntent::Reload))]
#[case(KeyInput::new("r").with_meta().with_shift(), Platform::Mac, Some(KeyIntent::Reload))]
#[case(KeyInput::new("a").with_ctrl(), Platform::Other, Some(KeyIntent::SelectAll))]
#[case(KeyInput::new("a").with_meta(), Platform::Mac, Some(KeyIntent::SelectAll))]
#[case(KeyInput::new("a").with_meta(), Platform::Other, None)]
#[case(KeyInput::new("Backspace"), Platform::Mac, Some(KeyIntent::Backspace))]
#[case(KeyInput::new("Delete"), Platform::Other, Some(KeyIntent::Delete))]
#[case(KeyInput::new("ArrowUp"), Platform::Other, Some(KeyIntent::Up))]
#[case(KeyInput::new("ArrowDown"), Platform::Other, Some(KeyIntent::Down))]
#[case(KeyInput::new("Home").with_shift(), Platform::Other, Some(KeyIntent::Home))]
#[case(KeyInput::new("ArrowLeft").with_meta(), Platform::Mac, Some(KeyIntent::Home))]
#[case(KeyInput::new("ArrowRight").with_meta(), Platform::Mac, Some(KeyIntent::End))]
#[case(KeyInput::new("ArrowRight").with_meta(), Platform::Other, Some(KeyIntent::Right))]
#[case(KeyInput::new("ArrowLeft").with_shift(), Platform::Other, Some(KeyIntent::Left))]
#[case(KeyInput::new("5"), Platform::Other, None)]
fn test_analyze(
    #[case] input: KeyInput,
    #[case] platform: Platform,
    #[case] expected: Option<KeyIntent>,
) {
    assert_eq!(analyze(&input, platform), expected);
}

#[rstest]
#[case("12", Some(TokenClass::Numeric))]
#[case(".", Some(TokenClass::Numeric))]
#[case("(", Some(TokenClass::Bracket))]
#[case(")", Some(TokenClass::Bracket))]
#[case(",", Some(TokenClass::Comma))]
#[case("%", Some(TokenClass::Operator))]
#[case("x", Some(TokenClass::Operator))]
#[case("[", None)]
fn test_classify(#[case] value: &str, #[case] expected: Option<TokenClass>) {
    assert_eq!(classify(value), expected);
}
