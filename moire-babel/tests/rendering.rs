//! Rendering a realistic document in every dialect

use moire_babel::registry::DEFAULT_FORMATS;
use moire_babel::{FormatRegistry, RenderContext, Renderer};
use moire_parser::parse_document;
use rstest::rstest;

const GUIDE: &str = r"\1 {Contributing} {contributing}

Thank you for your interest in the project.

\2 {Code style} {code-style}

We use \ref {https://github.com/rust-lang/rustfmt} {rustfmt} with the default
settings. Before sending a patch:

\numbers
    {format the code with \m {cargo fmt},}
    {run \m {cargo test} and make sure \b {every} test passes.}

\code {cargo fmt --all
cargo test} {shell}

\hr
";

fn render(source: &str, format: &str) -> String {
    let doc = parse_document(source).unwrap();
    FormatRegistry::with_defaults()
        .serialize(&doc, format)
        .unwrap()
}

#[test]
fn guide_to_markdown() {
    insta::assert_snapshot!(render(GUIDE, "markdown").trim_end(), @r"
    # Contributing

    Thank you for your interest in the project.

    ## Code style

    We use [rustfmt](https://github.com/rust-lang/rustfmt) with the default settings. Before sending a patch:

    1. format the code with `cargo fmt`,
    2. run `cargo test` and make sure **every** test passes.

    ```shell
    cargo fmt --all
    cargo test
    ```

    ---
    ");
}

#[test]
fn guide_to_html() {
    insta::assert_snapshot!(render(GUIDE, "html").trim_end(), @r#"
    <h1 id="contributing">Contributing</h1>

    <p>Thank you for your interest in the project.</p>

    <h2 id="code-style">Code style</h2>

    <p>We use <a href="https://github.com/rust-lang/rustfmt">rustfmt</a> with the default settings. Before sending a patch:</p>

    <ol>
      <li>format the code with <code>cargo fmt</code>,</li>
      <li>run <code>cargo test</code> and make sure <strong>every</strong> test passes.</li>
    </ol>

    <pre><code class="language-shell">cargo fmt --all
    cargo test</code></pre>

    <hr />
    "#);
}

#[test]
fn guide_to_wiki() {
    insta::assert_snapshot!(render(GUIDE, "wiki").trim_end(), @r#"
    = Contributing =

    Thank you for your interest in the project.

    == Code style ==

    We use [https://github.com/rust-lang/rustfmt rustfmt] with the default settings. Before sending a patch:

    # format the code with <code><nowiki>cargo fmt</nowiki></code>,
    # run <code><nowiki>cargo test</nowiki></code> and make sure '''every''' test passes.

    <syntaxhighlight lang="shell">
    cargo fmt --all
    cargo test
    </syntaxhighlight>

    ----
    "#);
}

#[rstest]
#[case::markdown("markdown", "# Title\n\nSome `code` text.\n")]
#[case::html(
    "html",
    "<h1 id=\"id\">Title</h1>\n\n<p>Some <code>code</code> text.</p>\n"
)]
#[case::wiki("wiki", "= Title =\n\nSome <code><nowiki>code</nowiki></code> text.\n")]
fn heading_scenario(#[case] format: &str, #[case] expected: &str) {
    assert_eq!(render(r"\1{Title}{id} Some \m{code} text.", format), expected);
}

#[rstest]
#[case::markdown("markdown", "\\# \\*not\\* \\[markup\\]\n")]
#[case::html("html", "<p># *not* [markup]</p>\n")]
#[case::wiki("wiki", "&#35; *not* &#91;markup&#93;\n")]
fn reserved_text_is_escaped(#[case] format: &str, #[case] expected: &str) {
    assert_eq!(render("# *not* [markup]", format), expected);
}

#[rstest]
#[case::markdown("markdown", "Some **bold** text and  *x*y\n")]
#[case::html("html", "<p>Some <strong>bold</strong> text and  <em>x</em>y</p>\n")]
#[case::wiki("wiki", "Some '''bold''' text and  ''x''y\n")]
fn span_edge_spaces_stay_outside_delimiters(#[case] format: &str, #[case] expected: &str) {
    assert_eq!(render(r"Some \b{bold }text and \i{ x}y", format), expected);
}

#[rstest]
#[case::markdown("markdown", "[docs](https://x.org) next\n")]
#[case::html("html", "<p><a href=\"https://x.org\">docs</a> next</p>\n")]
#[case::wiki("wiki", "[https://x.org docs] next\n")]
fn link_label_edge_space_is_kept(#[case] format: &str, #[case] expected: &str) {
    assert_eq!(render(r"\ref{https://x.org}{ docs }next", format), expected);
}

#[rstest]
#[case::markdown("markdown", "# Learn C \\#\n")]
#[case::html("html", "<h1>Learn C #</h1>\n")]
#[case::wiki("wiki", "= Learn C # =\n")]
fn heading_title_keeps_trailing_hash(#[case] format: &str, #[case] expected: &str) {
    assert_eq!(render(r"\1{Learn C #}", format), expected);
}

#[test]
fn wiki_heading_title_keeps_trailing_equals() {
    assert_eq!(render(r"\2{x =}", "wiki"), "== x &#61; ==\n");
}

#[test]
fn dialects_do_not_share_state() {
    let registry = FormatRegistry::configured(|_| moire_babel::RenderOptions {
        number_headings: true,
        indent: 2,
    });
    let doc = parse_document(GUIDE).unwrap();

    let first = registry.serialize(&doc, "markdown").unwrap();
    for name in DEFAULT_FORMATS {
        registry.serialize(&doc, name).unwrap();
    }
    let again = registry.serialize(&doc, "markdown").unwrap();

    assert_eq!(first, again);
    assert!(first.starts_with("# 1. Contributing"));
}

#[test]
fn renderer_writes_into_context() {
    let registry = FormatRegistry::with_defaults();
    let format = registry.get("html").unwrap();
    let doc = parse_document(r"\list{a}").unwrap();

    let mut ctx = RenderContext::new();
    Renderer::new(format.as_dialect())
        .render(&doc, &mut ctx)
        .unwrap();
    assert_eq!(ctx.output(), "<ul>\n  <li>a</li>\n</ul>\n");
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn parallel_renders_agree() {
    let registry = FormatRegistry::with_defaults();
    let doc = parse_document(GUIDE).unwrap();
    let expected = registry.serialize(&doc, "wiki").unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| registry.serialize(&doc, "wiki").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
