//! Basic rendering tests: scalars, whole-value placeholders, arity and scope

use super::helpers::store;
use super::*;
use serde_json::json;

#[test]
fn test_render_scalars_pass_through() {
    let data = store();
    assert_eq!(render(&json!(42), &data).unwrap(), json!(42));
    assert_eq!(render(&json!(true), &data).unwrap(), json!(true));
    assert_eq!(render(&Value::Null, &data).unwrap(), Value::Null);
    assert_eq!(render(&json!("plain text"), &data).unwrap(), json!("plain text"));
}

#[test]
fn test_render_whole_value_placeholder() {
    let result = render(&json!("$.name"), &store()).unwrap();
    assert_eq!(result, json!("Corner Books"));
}

#[test]
fn test_render_keeps_value_type() {
    let data = store();
    assert_eq!(render(&json!("$.open"), &data).unwrap(), json!(true));
    assert_eq!(render(&json!("$.books[0].price"), &data).unwrap(), json!(9.5));
    assert_eq!(
        render(&json!("$.books[0].tags"), &data).unwrap(),
        json!(["scifi", "classic"])
    );
}

#[test]
fn test_render_single_mode_takes_first_match() {
    let result = render(&json!("$.books[*].title"), &store()).unwrap();
    assert_eq!(result, json!("Dune"));
}

#[test]
fn test_render_unmatched_query_is_null() {
    let result = render(&json!("$.missing"), &store()).unwrap();
    assert_eq!(result, Value::Null);
}

#[test]
fn test_render_bare_markers() {
    let data = store();
    assert_eq!(render(&json!("$"), &data).unwrap(), data);
    assert_eq!(render(&json!("$$"), &data).unwrap(), data);
    assert_eq!(render(&json!("  $ "), &data).unwrap(), data);
}

#[test]
fn test_render_with_expression() {
    let data = store();
    assert_eq!(render(&json!("$.books[0].price => $ * 2"), &data).unwrap(), json!(19));
    assert_eq!(
        render(&json!("$.books[1] => $.title + ' by ' + $.author"), &data).unwrap(),
        json!("Emma by Austen")
    );
    assert_eq!(
        render(&json!("$ => Object.keys($).length"), &data).unwrap(),
        json!(4)
    );
}

#[test]
fn test_render_expression_sees_root() {
    let template = json!(["$.books[*]", "$.title => $ + ' (' + $$.currency + ')'"]);
    let result = render(&template, &store()).unwrap();
    assert_eq!(result, json!(["Dune (EUR)", "Emma (EUR)", "Ubik (EUR)"]));
}

#[test]
fn test_render_list_mode() {
    let renderer = Renderer::new();
    let titles = renderer.render_list(&json!("$.books[*].title"), &store()).unwrap();
    assert_eq!(titles, vec![json!("Dune"), json!("Emma"), json!("Ubik")]);

    let none = renderer.render_list(&json!("$.missing[*]"), &store()).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_render_list_mode_binds_keys() {
    let renderer = Renderer::new();
    let positions = renderer
        .render_list(&json!("$.books[*].title => $keys[-2]"), &store())
        .unwrap();
    assert_eq!(positions, vec![json!(0), json!(1), json!(2)]);

    let fields = renderer
        .render_list(&json!("$.books[0].* => $keys[3]"), &store())
        .unwrap();
    assert_eq!(fields, vec![json!("title"), json!("author"), json!("price"), json!("tags")]);
}

#[test]
fn test_render_list_mode_of_plain_values() {
    let renderer = Renderer::new();
    let data = store();
    assert_eq!(renderer.render_list(&json!(5), &data).unwrap(), vec![json!(5)]);
    assert_eq!(renderer.render_list(&json!("hi"), &data).unwrap(), vec![json!("hi")]);
    assert_eq!(renderer.render_list(&Value::Null, &data).unwrap(), vec![Value::Null]);
    assert_eq!(
        renderer.render_list(&json!({"a": 1}), &data).unwrap(),
        vec![json!({"a": 1})]
    );
}

#[test]
fn test_render_root_is_stable_in_nested_scopes() {
    let template = json!({
        "shelves": ["$.books[*]", {
            "title": "$.title",
            "shop": "$$.name",
            "tags": ["$.tags[*]", "{{ $ }}@{{ $$.currency }}"]
        }]
    });
    let result = render(&template, &store()).unwrap();
    assert_eq!(
        result,
        json!({
            "shelves": [
                {"title": "Dune", "shop": "Corner Books", "tags": ["scifi@EUR", "classic@EUR"]},
                {"title": "Emma", "shop": "Corner Books", "tags": ["romance@EUR"]},
                {"title": "Ubik", "shop": "Corner Books", "tags": []}
            ]
        })
    );
}

#[test]
fn test_render_scoped_with_explicit_root() {
    let renderer = Renderer::new();
    let data = json!({"x": 1});
    let root = json!({"x": 2});
    let scope = Scope::with_root(&data, &root);

    let both = json!({"data": "$.x", "root": "$$.x"});
    let rendered = renderer.render_scoped(&both, scope, Arity::Single).unwrap();
    assert_eq!(rendered, Rendered::Single(json!({"data": 1, "root": 2})));

    let listed = renderer.render_scoped(&json!("$$.x"), scope, Arity::List).unwrap();
    assert_eq!(listed.into_value(), json!([2]));
}

#[test]
fn test_render_without_placeholder_borrows_template() {
    let renderer = Renderer::new();
    let template = json!({"a": [1, "two", {"three": null}], "b": "{{ name }}"});
    let data = store();

    let rendered = renderer.render_cow(&template, Scope::new(&data)).unwrap();
    match rendered {
        Cow::Borrowed(value) => assert!(std::ptr::eq(value, &template)),
        Cow::Owned(_) => panic!("Expected the template to be returned as is"),
    }
}

#[test]
fn test_render_does_not_mutate_inputs() {
    let template = json!({"@": "$.books[*]", "$.title": "$.price"});
    let data = store();
    let template_before = template.clone();
    let data_before = data.clone();

    render(&template, &data).unwrap();
    assert_eq!(template, template_before);
    assert_eq!(data, data_before);
}

#[test]
fn test_template_kind() {
    assert!(matches!(TemplateKind::of(&Value::Null), TemplateKind::Sentinel));
    assert!(matches!(TemplateKind::of(&json!(1.5)), TemplateKind::Scalar(_)));
    assert!(matches!(TemplateKind::of(&json!("x")), TemplateKind::Text("x")));
    assert!(matches!(TemplateKind::of(&json!([1])), TemplateKind::Sequence(items) if items.len() == 1));
    assert!(matches!(TemplateKind::of(&json!({})), TemplateKind::Mapping(_)));
}

#[test]
fn test_has_placeholder() {
    assert!(has_placeholder(&json!("$.a")));
    assert!(has_placeholder(&json!("  $$")));
    assert!(has_placeholder(&json!("x {{ $.a }}")));
    assert!(has_placeholder(&json!("{{ a }} {{ $.b }}")));
    assert!(has_placeholder(&json!([1, [2, ["$"]]])));
    assert!(has_placeholder(&json!({"$.key": 1})));
    assert!(has_placeholder(&json!({"k": {"n": "$.v"}})));

    assert!(!has_placeholder(&json!("{{ a }}")));
    assert!(!has_placeholder(&json!("\\$.a")));
    assert!(!has_placeholder(&json!("cost: $5")));
    assert!(!has_placeholder(&json!("{{ $.open")));
    assert!(!has_placeholder(&json!([1, null, true, {"k": "v"}])));
    assert!(!has_placeholder(&json!(3)));
}

#[test]
fn test_placeholders_listing() {
    let renderer = Renderer::new();
    let template = json!({
        "$.key": ["$.items[*]", "{{ $.a }}-{{ $$.b }}"],
        "plain": "text"
    });
    assert_eq!(
        renderer.placeholders(&template),
        vec!["$.key", "$.items[*]", "$.a", "$$.b"]
    );
}
