use block_splice::{apply_plan, extract, replace, BlockLocator, Document, ReplacementPlan};
use proptest::prelude::*;

/// Text with no parentheses, so it can never contain a signature.
fn filler() -> impl Strategy<Value = String> {
    "[a-z ;=\n]{0,40}"
}

/// A brace-balanced body of arbitrary nesting depth.
fn body() -> impl Strategy<Value = String> {
    let leaf = "[a-z0-9 ;=+\n]{0,12}";
    leaf.prop_recursive(6, 64, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|parts| format!("{{{}}}", parts.join(" ")))
    })
    .prop_map(|inner| format!("{{{inner}}}"))
}

fn block(name: &str, body: &str) -> String {
    format!("function {name}(x) {body}")
}

fn balanced(text: &str) -> bool {
    let mut depth = 0i64;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

proptest! {
    #[test]
    fn test_located_span_is_contained(
        before in filler(),
        after in filler(),
        body in body(),
    ) {
        let expected = block("foo", &body);
        let document = format!("{before}\n{expected}\n{after}");

        let found = extract(&document, "foo").unwrap();

        prop_assert_eq!(found.text, expected.as_str());
        prop_assert_eq!(found.span.start, before.len() + 1);
        prop_assert!(found.text.starts_with("function foo("));
        prop_assert!(balanced(found.text));
    }

    #[test]
    fn test_replace_has_no_collateral_edit(
        before in filler(),
        after in filler(),
        old_body in body(),
        replacement in "\\PC{0,60}",
    ) {
        let document = Document::new(format!("{before}\n{}\n{after}", block("foo", &old_body)));

        let out = replace(&document, "foo", &replacement).unwrap();
        let text = out.document.as_str();
        let span = out.original;

        prop_assert_eq!(&text[..span.start], &document.as_str()[..span.start]);
        prop_assert_eq!(
            &text[span.start + replacement.len()..],
            &document.as_str()[span.end..]
        );
        prop_assert_eq!(&text[out.inserted.range()], replacement.as_str());
    }

    #[test]
    fn test_plan_is_idempotent(
        gap in filler(),
        old_foo in body(),
        old_bar in body(),
        new_foo in body(),
        new_bar in body(),
    ) {
        let target = Document::new(format!(
            "{}\n{gap}\n{}\n",
            block("foo", &old_foo),
            block("bar", &old_bar)
        ));
        let plan = ReplacementPlan::new()
            .with("foo", block("foo", &new_foo))
            .with("bar", block("bar", &new_bar));
        let locator = BlockLocator::default();

        let once = apply_plan(&locator, target, &plan);
        let twice = apply_plan(&locator, once.document.clone(), &plan);

        prop_assert!(once.is_success());
        prop_assert_eq!(once.document, twice.document);
    }

    #[test]
    fn test_unrelated_blocks_commute(
        gap in filler(),
        old_foo in body(),
        old_bar in body(),
        new_foo in body(),
        new_bar in body(),
    ) {
        let target = Document::new(format!(
            "{}\n{gap}\n{}\n",
            block("foo", &old_foo),
            block("bar", &old_bar)
        ));
        let locator = BlockLocator::default();
        let foo_then_bar = ReplacementPlan::new()
            .with("foo", block("foo", &new_foo))
            .with("bar", block("bar", &new_bar));
        let bar_then_foo = ReplacementPlan::new()
            .with("bar", block("bar", &new_bar))
            .with("foo", block("foo", &new_foo));

        let a = apply_plan(&locator, target.clone(), &foo_then_bar);
        let b = apply_plan(&locator, target, &bar_then_foo);

        prop_assert_eq!(a.document, b.document);
    }
}
