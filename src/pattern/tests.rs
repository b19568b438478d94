use super::Pattern;

#[test]
fn param_names_follow_order_of_appearance() {
    let rule = Pattern::from("/org/:org_id/repo/:repo_id")
        .compile()
        .unwrap();
    let names: Vec<&str> = rule.param_names().iter().map(|n| n.as_ref()).collect();
    assert_eq!(names, vec!["org_id", "repo_id"]);
}

#[test]
fn wildcard_records_star_name() {
    let rule = Pattern::from("/files/*").compile().unwrap();
    let names: Vec<&str> = rule.param_names().iter().map(|n| n.as_ref()).collect();
    assert_eq!(names, vec!["*"]);
    assert!(rule.is_match("/files/a/b/c.txt"));
}

#[test]
fn one_capture_group_per_param_plus_reserved_suffix() {
    let rule = Pattern::from("/a/:x/b/:y(\\d+)").compile().unwrap();
    // params + the two reserved hash-fragment groups + the implicit whole-match group
    assert_eq!(rule.matcher().captures_len(), rule.param_names().len() + 3);
}
