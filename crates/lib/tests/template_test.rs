//! # Prompt Template Tests
//!
//! Validates loading templates from per-type YAML files and the literal
//! replace-all placeholder substitution.

use knowledgebot::prompts::PromptStore;
use knowledgebot::TemplateError;
use std::fs;
use tempfile::TempDir;

fn write_template(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(format!("{name}.yaml")), content)
        .expect("failed to write template fixture");
}

#[test]
fn test_load_and_render_template() {
    let dir = TempDir::new().unwrap();
    write_template(
        &dir,
        "concise",
        "template: \"Context:\\n{context}\\n\\nQ: {question}\\nA:\"",
    );

    let store = PromptStore::new(dir.path());
    let template = store.load("concise").expect("template should load");

    assert_eq!(template.name, "concise");
    let rendered = template.render("Movie A\nMovie B", "What is the top movie?");
    assert_eq!(
        rendered,
        "Context:\nMovie A\nMovie B\n\nQ: What is the top movie?\nA:"
    );
}

#[test]
fn test_load_missing_template_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = PromptStore::new(dir.path());

    let err = store.load("nonexistent").unwrap_err();
    assert!(matches!(err, TemplateError::NotFound(name) if name == "nonexistent"));
}

#[test]
fn test_load_malformed_template_is_parse_error() {
    let dir = TempDir::new().unwrap();
    // Valid YAML, but the required `template` key is missing.
    write_template(&dir, "broken", "not_template: 42");

    let store = PromptStore::new(dir.path());
    let err = store.load("broken").unwrap_err();
    assert!(matches!(err, TemplateError::Parse(_)));
}

#[test]
fn test_render_replaces_every_occurrence() {
    let dir = TempDir::new().unwrap();
    write_template(&dir, "repeat", "template: \"{context} {question} {context}\"");

    let store = PromptStore::new(dir.path());
    let template = store.load("repeat").unwrap();

    assert_eq!(template.render("C", "Q"), "C Q C");
}

#[test]
fn test_render_replaces_tokens_inside_substituted_values() {
    // The substitution is a plain replace-all: a `{question}` token
    // arriving inside the context value is replaced by the second pass.
    let dir = TempDir::new().unwrap();
    write_template(&dir, "quirk", "template: \"{context}|{question}\"");

    let store = PromptStore::new(dir.path());
    let template = store.load("quirk").unwrap();

    let rendered = template.render("before {question} after", "Q");
    assert_eq!(rendered, "before Q after|Q");
}

#[test]
fn test_templates_are_reread_per_load() {
    let dir = TempDir::new().unwrap();
    write_template(&dir, "live", "template: \"v1 {question}\"");

    let store = PromptStore::new(dir.path());
    assert_eq!(store.load("live").unwrap().render("", "Q"), "v1 Q");

    // Edits to the file take effect on the next load without a restart.
    write_template(&dir, "live", "template: \"v2 {question}\"");
    assert_eq!(store.load("live").unwrap().render("", "Q"), "v2 Q");
}
