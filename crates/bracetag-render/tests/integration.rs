use bracetag::{parse_markup, render, RenderTree, TagRegistry};
use bracetag_render::{render_nodes, render_tree, OutputMode, Palette};
use console::Style;

fn forced_palette() -> Palette {
    Palette::new()
        .add("bold", Style::new().bold().force_styling(true))
        .add("italic", Style::new().italic().force_styling(true))
        .error_style(Style::new().red().force_styling(true))
}

#[test]
fn term_mode_emits_ansi_codes() {
    let registry = TagRegistry::standard();
    let nodes = parse_markup("{@b hello} {@i world}", &registry);
    let out = render_nodes(&nodes, &forced_palette(), OutputMode::Term);

    assert!(out.contains("\x1b[1m"), "missing bold escape: {out:?}");
    assert!(out.contains("\x1b[3m"), "missing italic escape: {out:?}");
    assert!(out.contains("hello"));
    assert!(out.contains("world"));
}

#[test]
fn nested_styles_preserve_content() {
    let registry = TagRegistry::standard();
    let nodes = parse_markup("{@b bolded {@i and italic} tail}", &registry);
    let out = render_nodes(&nodes, &forced_palette(), OutputMode::Term);

    assert!(out.contains("bolded "));
    assert!(out.contains("and italic"));
    assert!(out.contains(" tail"));
    assert!(!out.contains('{') && !out.contains('@'));
}

#[test]
fn error_markers_are_styled_but_visible() {
    let registry = TagRegistry::standard();
    let nodes = parse_markup("ok {@mystery x} ok", &registry);
    let out = render_nodes(&nodes, &forced_palette(), OutputMode::Term);

    assert!(out.contains("\x1b[31m"), "missing red escape: {out:?}");
    assert!(out.contains("UNKNOWN tag=\"mystery\""));
    assert!(out.contains("{@mystery x}"));
}

#[test]
fn structured_json_renders_through_the_document_walker() {
    let registry = TagRegistry::standard();
    let json = r#"{
        "type": "section",
        "name": "Rules",
        "entries": [
            "The first rule is {@b important}.",
            { "type": "list", "items": ["one", "{@i two}"] }
        ]
    }"#;

    let tree = render(json, &registry);
    assert!(matches!(tree, RenderTree::Document(_)));

    let out = render_tree(&tree, &registry, &Palette::standard(), OutputMode::Plain);
    assert_eq!(out, "Rules\nThe first rule is important.\n• one\n• two");
}

#[test]
fn malformed_document_still_renders() {
    let registry = TagRegistry::standard();
    let tree = render(r#"{ "type": "wormhole" }"#, &registry);
    let out = render_tree(&tree, &registry, &Palette::standard(), OutputMode::Plain);
    assert!(out.starts_with("document error:"));
}

#[test]
fn unclosed_markup_end_to_end_never_panics() {
    let registry = TagRegistry::standard();
    for input in [
        "waa {@b bold} {@b never ever closing!",
        "waa {@b never ever closing! {@b bold}",
        "{@",
        "}{@}{",
    ] {
        let tree = render(input, &registry);
        for mode in [OutputMode::Term, OutputMode::Plain, OutputMode::Debug] {
            let out = render_tree(&tree, &registry, &forced_palette(), mode);
            assert!(!out.is_empty(), "empty output for {input:?}");
        }
    }
}
