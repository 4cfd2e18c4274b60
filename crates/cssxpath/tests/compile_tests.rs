//! Integration tests for selector to XPath compilation.

use cssxpath::{
    Anchor, CompileError, CompileOptions, Compiler, ListPolicy, SkippedSelector, compile,
};

const CLASS_NOTE: &str = r#"contains(concat(" ", normalize-space(@class), " "), " note ")"#;

/// Split the predicate of a single-bracket step into its sorted conjuncts.
fn conjuncts(path: &str) -> Vec<String> {
    let open = path.find('[').unwrap();
    let body = &path[open + 1..path.len() - 1];
    let mut terms: Vec<String> = body.split(" and ").map(str::to_string).collect();
    terms.sort();
    terms
}

#[test]
fn test_compile_type_selector() {
    assert_eq!(
        compile("div").unwrap(),
        "descendant-or-self::*/child::*[self::div]"
    );
}

#[test]
fn test_compile_child_first_child() {
    assert_eq!(
        compile("div > span:first-child").unwrap(),
        "descendant-or-self::*/child::*[self::div]/child::*[self::span and position()=1]"
    );
}

#[test]
fn test_compile_descendant_chain() {
    assert_eq!(
        compile("ul li a").unwrap(),
        "descendant-or-self::*/child::*[self::ul]\
         /descendant-or-self::*/child::*[self::li]\
         /descendant-or-self::*/child::*[self::a]"
    );
}

#[test]
fn test_compile_sibling_combinators() {
    assert_eq!(
        compile("h1 + p").unwrap(),
        "descendant-or-self::*/child::*[self::h1]/following-sibling::*[position()=1][self::p]"
    );
    assert_eq!(
        compile("h1 ~ p").unwrap(),
        "descendant-or-self::*/child::*[self::h1]/following-sibling::*[self::p]"
    );
}

#[test]
fn test_compile_leading_child_combinator() {
    assert_eq!(compile("> li").unwrap(), "child::*[self::li]");
}

#[test]
fn test_compile_class_and_id() {
    assert_eq!(
        compile("#main.note").unwrap(),
        format!("descendant-or-self::*/child::*[@id=\"main\" and {CLASS_NOTE}]")
    );
}

#[test]
fn test_compile_attribute_operators() {
    let cases = [
        ("[href]", "@href"),
        ("[type=text]", r#"@type="text""#),
        ("[rel~=nofollow]", r#"contains(concat(" ", normalize-space(@rel), " "), " nofollow ")"#),
        ("[lang|=en]", r#"(@lang="en" or starts-with(@lang, "en-"))"#),
        ("[href^='https:']", r#"starts-with(@href, "https:")"#),
        (
            "[src$='.png']",
            r#"substring(@src, string-length(@src) - string-length(".png") + 1)=".png""#,
        ),
        ("[title*=\"news\"]", r#"contains(@title, "news")"#),
    ];
    for (selector, predicate) in cases {
        assert_eq!(
            compile(selector).unwrap(),
            format!("descendant-or-self::*/child::*[{predicate}]"),
            "{selector}"
        );
    }
}

#[test]
fn test_compile_attribute_value_quoting() {
    assert_eq!(
        compile(r#"[title='say "hi"']"#).unwrap(),
        r#"descendant-or-self::*/child::*[@title='say "hi"']"#
    );
    assert_eq!(
        compile(r#"[title="it's \"x\""]"#).unwrap(),
        r#"descendant-or-self::*/child::*[@title=concat("it's ", '"', "x", '"')]"#
    );
}

#[test]
fn test_compile_structural_pseudo_classes() {
    assert_eq!(
        compile("li:last-child").unwrap(),
        "descendant-or-self::*/child::*[self::li and position()=last()]"
    );
    assert_eq!(
        compile("li:only-child").unwrap(),
        "descendant-or-self::*/child::*[self::li and position()=1 and position()=last()]"
    );
    assert_eq!(
        compile("li:nth-child(2n+1)").unwrap(),
        "descendant-or-self::*/child::*[self::li and (position() - 1) mod 2 = 0]"
    );
}

#[test]
fn test_compile_of_type_uses_own_bracket() {
    assert_eq!(
        compile("p:first-of-type").unwrap(),
        "descendant-or-self::*/child::*[self::p][position()=1]"
    );
    assert_eq!(
        compile("p.note:nth-of-type(odd):first-child").unwrap(),
        format!(
            "descendant-or-self::*/child::*[self::p][position() mod 2 = 1]\
             [{CLASS_NOTE} and not(preceding-sibling::*)]"
        )
    );
}

#[test]
fn test_compile_of_type_on_sibling_axis_counts() {
    assert_eq!(
        compile("h1 ~ p:last-of-type").unwrap(),
        "descendant-or-self::*/child::*[self::h1]\
         /following-sibling::*[self::p and not(following-sibling::p)]"
    );
}

#[test]
fn test_compile_negation() {
    assert_eq!(
        compile("li:not(.note)").unwrap(),
        format!("descendant-or-self::*/child::*[self::li and not({CLASS_NOTE})]")
    );
    assert_eq!(
        compile("p:not(:first-child)").unwrap(),
        "descendant-or-self::*/child::*[self::p and not(not(preceding-sibling::*))]"
    );
}

#[test]
fn test_qualifiers_commute() {
    let forward = compile("a.note[href]:first-child").unwrap();
    let backward = compile("a:first-child[href].note").unwrap();
    assert_ne!(forward, backward);
    assert_eq!(conjuncts(&forward), conjuncts(&backward));
}

#[test]
fn test_combinator_order_matters() {
    assert_ne!(compile("a > b c").unwrap(), compile("a b > c").unwrap());
}

#[test]
fn test_compile_selector_list() {
    assert_eq!(
        compile("h1, h2").unwrap(),
        "descendant-or-self::*/child::*[self::h1] | descendant-or-self::*/child::*[self::h2]"
    );
}

#[test]
fn test_compile_document_anchor() {
    let compiler = Compiler::new(CompileOptions::default().with_anchor(Anchor::Document));
    assert_eq!(
        compiler.compile("body > p").unwrap(),
        "/descendant-or-self::*/child::*[self::body]/child::*[self::p]"
    );
}

#[test]
fn test_strict_list_rejects_bad_member() {
    assert!(matches!(
        compile("div, a:hover, p"),
        Err(CompileError::UnsupportedPseudoClass { position: 6, .. })
    ));
}

#[test]
fn test_skip_invalid_list() {
    let compiler =
        Compiler::new(CompileOptions::default().with_list_policy(ListPolicy::SkipInvalid));
    assert_eq!(
        compiler.compile("div, a:hover, p").unwrap(),
        "descendant-or-self::*/child::*[self::div] | descendant-or-self::*/child::*[self::p]"
    );
}

#[test]
fn test_skip_invalid_list_reports_skipped_members() {
    let compiler =
        Compiler::new(CompileOptions::default().with_list_policy(ListPolicy::SkipInvalid));
    let list = compiler.parse("div, a:hover, p, [x!=y]").unwrap();
    assert_eq!(list.selectors.len(), 2);
    assert_eq!(
        list.skipped,
        vec![
            SkippedSelector {
                text: "a:hover".to_string(),
                error: CompileError::UnsupportedPseudoClass {
                    position: 6,
                    name: "hover".to_string(),
                },
            },
            SkippedSelector {
                text: "[x!=y]".to_string(),
                error: CompileError::UnsupportedAttributeOperator {
                    position: 19,
                    operator: "!=".to_string(),
                },
            },
        ]
    );
}

#[test]
fn test_strict_list_has_no_skipped_members() {
    let list = Compiler::default().parse("div, p").unwrap();
    assert!(list.skipped.is_empty());
}

#[test]
fn test_skip_invalid_list_with_trailing_garbage_member() {
    let compiler =
        Compiler::new(CompileOptions::default().with_list_policy(ListPolicy::SkipInvalid));
    assert_eq!(
        compiler.compile("p ), div").unwrap(),
        "descendant-or-self::*/child::*[self::div]"
    );
}

#[test]
fn test_skip_invalid_list_all_fail() {
    let compiler =
        Compiler::new(CompileOptions::default().with_list_policy(ListPolicy::SkipInvalid));
    assert!(matches!(
        compiler.compile("a:hover, [x!=y]"),
        Err(CompileError::UnsupportedPseudoClass { position: 1, .. })
    ));
}

#[test]
fn test_empty_and_comma_inputs() {
    assert!(matches!(
        compile(""),
        Err(CompileError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        compile(","),
        Err(CompileError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        compile("div,"),
        Err(CompileError::UnexpectedToken { position: 4, .. })
    ));
}

#[test]
fn test_compiler_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Compiler<'static>>();
}

#[test]
fn test_empty_substring_operators_match_nothing() {
    for selector in ["[title^='']", "[src$='']", "[title*=\"\"]"] {
        assert_eq!(
            compile(selector).unwrap(),
            "descendant-or-self::*/child::*[false()]",
            "{selector}"
        );
    }
}

#[test]
fn test_includes_with_empty_or_spaced_word_matches_nothing() {
    assert_eq!(
        compile("[rel~='']").unwrap(),
        "descendant-or-self::*/child::*[false()]"
    );
    assert_eq!(
        compile("[rel~='a b']").unwrap(),
        "descendant-or-self::*/child::*[false()]"
    );
}

#[test]
fn test_empty_value_still_meaningful_for_equals_and_dash_match() {
    assert_eq!(
        compile("[alt='']").unwrap(),
        r#"descendant-or-self::*/child::*[@alt=""]"#
    );
    assert_eq!(
        compile("[lang|='']").unwrap(),
        r#"descendant-or-self::*/child::*[(@lang="" or starts-with(@lang, "-"))]"#
    );
}

#[test]
fn test_negated_of_type_counts_enclosing_name() {
    assert_eq!(
        compile("p:not(:first-of-type)").unwrap(),
        "descendant-or-self::*/child::*[self::p and not(not(preceding-sibling::p))]"
    );
    assert_eq!(
        compile("h1 ~ p:not(:last-of-type)").unwrap(),
        "descendant-or-self::*/child::*[self::h1]\
         /following-sibling::*[self::p and not(not(following-sibling::p))]"
    );
}

#[test]
fn test_escaped_nul_becomes_replacement_character() {
    assert_eq!(
        compile(r#"[x="\0"]"#).unwrap(),
        "descendant-or-self::*/child::*[@x=\"\u{FFFD}\"]"
    );
}
