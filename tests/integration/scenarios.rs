use block_splice::{
    extract, replace, transplant, BlockError, BlockLocator, Document, LiteralMode, Outcome,
    ScanOptions,
};

#[test]
fn test_extract_and_replace_foo() {
    let donor = "function foo(x) { if (x) { return 1; } return 0; }";
    let extracted = extract(donor, "foo").unwrap();
    assert_eq!(extracted.text, donor);

    let target = Document::new(
        "// header\nvar a = 1;\nfunction foo(x) { return -1; }\nvar b = 2;\n// footer\n",
    );
    let out = replace(&target, "foo", extracted.text).unwrap();

    assert_eq!(
        out.document.as_str(),
        "// header\nvar a = 1;\nfunction foo(x) { if (x) { return 1; } return 0; }\nvar b = 2;\n// footer\n"
    );
}

#[test]
fn test_missing_donor_block_does_not_abort() {
    let donor = "function foo() { return 'new'; }\nfunction baz() { return 'new'; }\n";
    let target = Document::new("function foo() {}\nfunction baz() {}\n");

    let report = transplant(&BlockLocator::default(), donor, target, &["foo", "bar", "baz"]);

    assert_eq!(report.outcome("foo"), Some(Outcome::Applied));
    assert_eq!(report.outcome("bar"), Some(Outcome::ExtractFailed));
    assert_eq!(report.outcome("baz"), Some(Outcome::Applied));
    assert_eq!(
        report.document.as_str(),
        "function foo() { return 'new'; }\nfunction baz() { return 'new'; }\n"
    );
    assert_eq!(report.output_len, report.document.len());
}

#[test]
fn test_duplicate_target_only_first_replaced() {
    let target = Document::new("function foo() { 1 }\n\nfunction foo() { 2 }\n");
    let out = replace(&target, "foo", "function foo() { 3 }").unwrap();
    assert_eq!(
        out.document.as_str(),
        "function foo() { 3 }\n\nfunction foo() { 2 }\n"
    );
}

#[test]
fn test_five_levels_of_nesting() {
    let donor = "\
async function confirmSeatAllocation(orderId) {
  for (const d of details) {
    if (d.seat) {
      try {
        await tx(async () => {
          if (d.locked) { await release(d); }
        });
      } catch (e) {
        log(e);
      }
    }
  }
}
function next() {}
";
    let block = extract(donor, "confirmSeatAllocation").unwrap();
    assert!(block.text.ends_with("      }\n    }\n  }\n}"));
    assert!(!block.text.contains("function next"));
}

#[test]
fn test_replacement_may_be_longer_or_shorter() {
    let target = Document::new("A\nfunction a() { x; }\nB\nfunction b() { y; }\nC\n");
    let locator = BlockLocator::default();

    let grown = locator
        .replace(&target, "a", "function a() {\n  x;\n  x;\n  x;\n}")
        .unwrap();
    let shrunk = locator.replace(&grown.document, "b", "function b() {}").unwrap();

    assert_eq!(
        shrunk.document.as_str(),
        "A\nfunction a() {\n  x;\n  x;\n  x;\n}\nB\nfunction b() {}\nC\n"
    );
}

#[test]
fn test_literal_modes_differ_on_string_braces() {
    let target = "function fmt(v) { return \"}\" + v; }\nfunction tail() {}\n";

    let naive = BlockLocator::default();
    let aware = BlockLocator::new(ScanOptions::default().with_literals(LiteralMode::Aware));

    // naive counts the quoted brace and closes the body early
    let naive_block = naive.extract(target, "fmt").unwrap();
    assert_eq!(naive_block.text, "function fmt(v) { return \"}");

    let aware_block = aware.extract(target, "fmt").unwrap();
    assert_eq!(aware_block.text, "function fmt(v) { return \"}\" + v; }");
}

#[test]
fn test_unbalanced_target_reports_apply_failed() {
    let donor = "function foo() { ok(); }";
    let target = Document::new("function foo() {\n  if (x) {\n    broken();\n}\n");

    let report = transplant(&BlockLocator::default(), donor, target.clone(), &["foo"]);

    assert_eq!(report.outcome("foo"), Some(Outcome::ApplyFailed));
    let error = report.outcomes[0].error.clone().unwrap();
    assert!(matches!(error, BlockError::UnbalancedBlock { depth: 1, .. }));
    assert!(error.is_absent());
    assert_eq!(report.document, target);
}

#[test]
fn test_bounded_lookahead() {
    let options = ScanOptions {
        max_block_bytes: 64,
        ..ScanOptions::default()
    };
    let locator = BlockLocator::new(options);
    let long_body = format!("function big() {{\n{}}}\n", "  step();\n".repeat(20));

    let result = locator.extract(&long_body, "big");
    assert!(matches!(result, Err(BlockError::UnbalancedBlock { .. })));

    assert!(BlockLocator::default().extract(&long_body, "big").is_ok());
}

#[test]
fn test_earlier_edits_do_not_shift_later_ones() {
    let donor = "\
function first() {
  return 'a much longer body than before, which shifts every later offset';
}
function second() { return 2; }
";
    let target = Document::new("function first() { 1 }\nfunction second() { 0 }\nend();\n");

    let report = transplant(&BlockLocator::default(), donor, target, &["first", "second"]);

    assert!(report.is_success());
    assert!(report
        .document
        .as_str()
        .ends_with("}\nfunction second() { return 2; }\nend();\n"));
}
