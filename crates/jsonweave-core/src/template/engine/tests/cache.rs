//! Memoization tests: caches change latency, never results

use super::helpers::{grid, store};
use super::*;
use crate::config::RenderConfig;
use serde_json::json;

fn sample_templates() -> Vec<Value> {
    vec![
        json!("$.name"),
        json!("{{ $.currency }} {{ $.books[*].title }}"),
        json!(["$.books[*]", {"t": "$.title", "p": "$.price => $ * 2"}]),
        json!({"@": "$.books[*]", "{{ $.author }}": "$.tags.length => $"}),
        json!({"$.currency": ["$.books[*].tags[*]"], "fixed": [1, 2]}),
    ]
}

#[test]
fn test_text_templates_are_cached() {
    let renderer = Renderer::new();
    let data = store();
    renderer.render(&json!("$.name"), &data).unwrap();
    renderer.render(&json!("$.name"), &data).unwrap();

    let stats = renderer.stats();
    assert_eq!(stats.texts.entries, 1);
    assert!(stats.texts.hits >= 1);
}

#[test]
fn test_placeholders_are_cached() {
    let renderer = Renderer::new();
    let data = store();
    let template = json!("$.books[*].title => $.length");
    renderer.render(&template, &data).unwrap();
    renderer.render(&template, &data).unwrap();

    let stats = renderer.stats();
    assert_eq!(stats.placeholders.entries, 1);
    assert_eq!(stats.placeholders.misses, 1);
    assert_eq!(stats.placeholders.hits, 1);
    assert_eq!(renderer.query_engine().cache().len(), 1);
}

#[test]
fn test_cache_is_keyed_by_text_not_data() {
    let renderer = Renderer::new();
    let template = json!("$.x");
    assert_eq!(renderer.render(&template, &json!({"x": 1})).unwrap(), json!(1));
    assert_eq!(renderer.render(&template, &json!({"x": 2})).unwrap(), json!(2));
    assert_eq!(renderer.stats().placeholders.entries, 1);
}

#[test]
fn test_failed_compilation_is_not_cached() {
    let renderer = Renderer::new();
    let data = store();
    assert!(renderer.render(&json!("$.name => $ +"), &data).is_err());
    assert!(renderer.render(&json!("$.name => $ +"), &data).is_err());
    assert_eq!(renderer.stats().placeholders.entries, 0);
}

#[test]
fn test_policies_give_identical_results() {
    let data = store();
    let unbounded = Renderer::with_policy(CachePolicy::Unbounded);
    let bounded = Renderer::with_policy(CachePolicy::Bounded { capacity: 2 });
    let disabled = Renderer::with_policy(CachePolicy::Disabled);

    for template in sample_templates() {
        let expected = unbounded.render(&template, &data).unwrap();
        // twice each, so the second pass runs against warm (or evicted) caches
        for _ in 0..2 {
            assert_eq!(bounded.render(&template, &data).unwrap(), expected);
            assert_eq!(disabled.render(&template, &data).unwrap(), expected);
        }
    }

    assert!(bounded.stats().texts.entries <= 2);
    assert!(bounded.stats().placeholders.entries <= 2);
    assert_eq!(disabled.stats().texts.entries, 0);
    assert_eq!(disabled.stats().placeholders.entries, 0);
}

#[test]
fn test_renderer_from_config() {
    let config = RenderConfig::from_toml_str("[cache]\nmode = \"bounded\"\ncapacity = 8\n").unwrap();
    let renderer = Renderer::from_config(&config).unwrap();
    assert_eq!(renderer.policy(), CachePolicy::Bounded { capacity: 8 });
    assert_eq!(
        renderer.render_list(&json!("{{ $.rows[*] }}{{ $.cols[*] }}"), &grid()).unwrap().len(),
        6
    );
}

#[test]
fn test_renderer_shared_across_threads() {
    let renderer = Renderer::new();
    let data = store();
    let templates = sample_templates();
    let expected: Vec<Value> = templates
        .iter()
        .map(|t| renderer.render(t, &data).unwrap())
        .collect();
    renderer.texts.clear();
    renderer.placeholders.clear();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for (template, expected) in templates.iter().zip(&expected) {
                    assert_eq!(&renderer.render(template, &data).unwrap(), expected);
                }
            });
        }
    });
}
