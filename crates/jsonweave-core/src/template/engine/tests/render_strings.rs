//! Text template tests: interpolation, coercion, expansion and escaping

use super::helpers::{grid, store};
use super::*;
use serde_json::json;

#[test]
fn test_render_interpolation() {
    let template = json!("Shop: {{ $.name }} ({{$.currency}})");
    let result = render(&template, &store()).unwrap();
    assert_eq!(result, json!("Shop: Corner Books (EUR)"));
}

#[test]
fn test_render_interpolation_with_leading_whitespace_placeholder() {
    let result = render(&json!("  $.name"), &store()).unwrap();
    assert_eq!(result, json!("Corner Books"));
}

#[test]
fn test_render_interpolation_coerces_values() {
    let data = store();
    let cases = [
        ("{{ $.books[1].price }}", "4"),
        ("{{ $.books[0].price }}", "9.5"),
        ("{{ $.open }}", "true"),
        ("{{ $.books[0].tags }}", "scifi,classic"),
        ("{{ $.books[0] }}", "[object Object]"),
        ("[{{ $.missing }}]", "[]"),
    ];
    for (template, expected) in cases {
        let result = render(&json!(template), &data).unwrap();
        assert_eq!(result, json!(expected), "template {}", template);
    }
}

#[test]
fn test_render_interpolation_takes_first_match() {
    let result = render(&json!("first: {{ $.books[*].title }}"), &store()).unwrap();
    assert_eq!(result, json!("first: Dune"));
}

#[test]
fn test_render_interpolation_with_expression() {
    let data = store();
    assert_eq!(
        render(&json!("Total: {{ $.books[1].price => $ * 3 }}"), &data).unwrap(),
        json!("Total: 12")
    );
    assert_eq!(
        render(&json!("{{ $.name => $.toUpperCase() }}!"), &data).unwrap(),
        json!("CORNER BOOKS!")
    );
}

#[test]
fn test_render_interpolation_root_marker() {
    let template = json!(["$.books[*]", "{{ $.title }} at {{ $$.name }}"]);
    let result = render(&template, &store()).unwrap();
    assert_eq!(
        result,
        json!(["Dune at Corner Books", "Emma at Corner Books", "Ubik at Corner Books"])
    );
}

#[test]
fn test_render_list_cartesian_row_major() {
    let renderer = Renderer::new();
    let result = renderer
        .render_list(&json!("{{ $.rows[*] }}{{ $.cols[*] }}"), &grid())
        .unwrap();
    assert_eq!(
        result,
        vec![
            json!("a1"),
            json!("a2"),
            json!("a3"),
            json!("b1"),
            json!("b2"),
            json!("b3"),
        ]
    );
}

#[test]
fn test_render_list_cartesian_keeps_literals() {
    let renderer = Renderer::new();
    let result = renderer
        .render_list(&json!("<{{ $.rows[*] }}|{{ $.rows[*] => $.toUpperCase() }}>"), &grid())
        .unwrap();
    assert_eq!(
        result,
        vec![json!("<a|A>"), json!("<a|B>"), json!("<b|A>"), json!("<b|B>")]
    );
}

#[test]
fn test_render_list_with_empty_placeholder_is_empty() {
    let renderer = Renderer::new();
    let result = renderer
        .render_list(&json!("{{ $.rows[*] }}-{{ $.none[*] }}"), &grid())
        .unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_render_list_in_sequence_splices_expansion() {
    let template = json!(["start", "{{ $.rows[*] }}{{ $.cols[0] }}"]);
    let result = render(&template, &grid()).unwrap();
    assert_eq!(result, json!(["start", "a1", "b1"]));
}

#[test]
fn test_render_escaped_marker() {
    let data = store();
    assert_eq!(render(&json!("\\$.name"), &data).unwrap(), json!("$.name"));
    assert_eq!(
        render(&json!("write {{ \\$.name }} to interpolate"), &data).unwrap(),
        json!("write {{ $.name }} to interpolate")
    );
    assert_eq!(
        render(&json!("{{ $.currency }} {{ \\$.currency }}"), &data).unwrap(),
        json!("EUR {{ $.currency }}")
    );
}

#[test]
fn test_render_escaped_marker_in_list_mode() {
    let renderer = Renderer::new();
    let result = renderer.render_list(&json!("\\$$"), &store()).unwrap();
    assert_eq!(result, vec![json!("$$")]);
}

#[test]
fn test_render_other_brackets_untouched() {
    let data = store();
    assert_eq!(render(&json!("{{ name }}"), &data).unwrap(), json!("{{ name }}"));
    assert_eq!(
        render(&json!("{{ name }} / {{ $.name }}"), &data).unwrap(),
        json!("{{ name }} / Corner Books")
    );
    assert_eq!(
        render(&json!("unclosed {{ $.name"), &data).unwrap(),
        json!("unclosed {{ $.name")
    );
}

#[test]
fn test_render_dollar_inside_text_is_literal() {
    let result = render(&json!("costs $5 {{ $.currency }}"), &store()).unwrap();
    assert_eq!(result, json!("costs $5 EUR"));
}
