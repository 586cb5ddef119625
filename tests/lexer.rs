use algom::interpreter::{
    lexer::{Lexer, tokenize},
    token::{Token, TokenKind},
};
use pretty_assertions::assert_eq;
use TokenKind::{
    And, Bang, BangEqual, Binary, Complex, Else, Eof, EqualEqual, False, Float, Fraction, GreaterEqual,
    Hex, If, Inf, Integer, LeftParen, LessEqual, Let, Minus, Mod, NaN, Nand, Negate, Nor, Not,
    Null, Octal, Or, PlusPlus, Rem, Reserved, RightParen, Scientific, Slash, SlashSlash, Star,
    Symbol, True, While, Xnor, Xor,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

fn lexemes(source: &str) -> Vec<String> {
    tokenize(source).into_iter()
                    .filter(|t| t.kind != Eof)
                    .map(|t| t.lexeme)
                    .collect()
}

#[test]
fn fractions_need_tight_slashes() {
    assert_eq!(kinds("3/4"), [Fraction, Eof]);
    assert_eq!(kinds("3 / 4"), [Integer, Slash, Integer, Eof]);
    assert_eq!(kinds("3/x"), [Integer, Slash, Symbol, Eof]);
    assert_eq!(kinds("3//4"), [Integer, SlashSlash, Integer, Eof]);
}

#[test]
fn minus_depends_on_what_came_before() {
    assert_eq!(kinds("3-4"), [Integer, Minus, Integer, Eof]);
    assert_eq!(kinds("x-4"), [Symbol, Minus, Integer, Eof]);
    assert_eq!(kinds("x - 4"), [Symbol, Minus, Integer, Eof]);
    assert_eq!(lexemes("x -4"), ["x", "-4"]);
    assert_eq!(lexemes("x -y"), ["x", "-", "y"]);
    assert_eq!(lexemes("3 -4"), ["3", "-", "4"]);
    assert_eq!(kinds("-x"), [Negate, Symbol, Eof]);
    assert_eq!(kinds("2 * -3"), [Integer, Star, Integer, Eof]);
    assert_eq!(lexemes("2 * -3"), ["2", "*", "-3"]);
    assert_eq!(lexemes("(-4)"), ["(", "-4", ")"]);
    assert_eq!(kinds("-(1)"), [Negate, LeftParen, Integer, RightParen, Eof]);
}

#[test]
fn number_forms() {
    assert_eq!(kinds("42 3.14 .5 1e3 2.5E-2 0b101 0o17 0xff"),
               [Integer, Float, Float, Scientific, Scientific, Binary, Octal, Hex, Eof]);
}

#[test]
fn imaginary_suffix() {
    assert_eq!(kinds("2i"), [Complex, Eof]);
    assert_eq!(lexemes("1.5i"), ["1.5i"]);
    assert_eq!(lexemes("-3i"), ["-3i"]);
    // After a number the minus is subtraction again.
    assert_eq!(lexemes("2i-3i"), ["2i", "-", "3i"]);
    // `in` is an identifier, not an imaginary unit.
    assert_eq!(kinds("2in"), [Integer, Symbol, Eof]);
    assert_eq!(kinds("i"), [Symbol, Eof]);
}

#[test]
fn keywords_and_reserved_words() {
    assert_eq!(kinds("let if else while true false null"),
               [Let, If, Else, While, True, False, Null, Eof]);
    assert_eq!(kinds("and or not xor xnor nand nor mod rem"),
               [And, Or, Not, Xor, Xnor, Nand, Nor, Mod, Rem, Eof]);
    assert_eq!(kinds("Inf NaN inf"), [Inf, NaN, Symbol, Eof]);
    assert_eq!(kinds("return for"), [Reserved, Reserved, Eof]);
}

#[test]
fn operators_take_the_longest_match() {
    assert_eq!(kinds("a ++ b == c != d <= e >= f"),
               [Symbol, PlusPlus, Symbol, EqualEqual, Symbol, BangEqual, Symbol, LessEqual,
                Symbol, GreaterEqual, Symbol, Eof]);
    assert_eq!(kinds("5!"), [Integer, Bang, Eof]);
}

#[test]
fn strings_drop_their_quotes() {
    assert_eq!(tokenize(r#""hi there""#)[0], Token::new(TokenKind::String, "hi there", 1));
}

#[test]
fn lines_are_counted_across_strings_and_breaks() {
    let lines: Vec<usize> = tokenize("1;\n2;\n\n3").iter().map(|t| t.line).collect();
    assert_eq!(lines, [1, 1, 2, 2, 4, 4]);

    let tokens = tokenize("\"a\nb\" x");
    assert_eq!(tokens[1].line, 2);
}

#[test]
fn bad_input_becomes_error_tokens() {
    let tokens = tokenize("1 @ 2");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, [Integer, TokenKind::Error, Integer, Eof]);
    assert!(tokens[1].lexeme.contains('@'));

    let tokens = tokenize("\"open");
    assert_eq!(tokens[0], Token::error("Unterminated string.", 1));
}

#[test]
fn eof_repeats_but_the_iterator_stops() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().kind, Symbol);
    assert_eq!(lexer.next_token().kind, Eof);
    assert_eq!(lexer.next_token().kind, Eof);

    assert_eq!(Lexer::new("x").count(), 2);
}
