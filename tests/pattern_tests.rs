use regex::Regex;
use veer::pattern::Pattern;

#[test]
fn literal_matches_only_itself() {
    let rule = Pattern::from("/about").compile().unwrap();
    assert!(rule.is_match("/about"));
    assert!(!rule.is_match("/aboutus"));
    assert!(!rule.is_match("/abou"));
    assert!(!rule.is_match("/about/team"));
}

#[test]
fn literal_tolerates_trailing_hash_fragment() {
    let rule = Pattern::from("/about").compile().unwrap();
    assert!(rule.is_match("/about#section"));
    assert!(rule.is_match("/about#a/b/c"));
}

#[test]
fn literal_with_regex_metacharacters_is_escaped() {
    let rule = Pattern::from("/v1.0/items").compile().unwrap();
    assert!(rule.is_match("/v1.0/items"));
    assert!(!rule.is_match("/v1x0/items"));
}

#[test]
fn matching_is_case_insensitive() {
    let rule = Pattern::from("/User/Profile").compile().unwrap();
    assert!(rule.is_match("/user/profile"));
    assert!(rule.is_match("/USER/PROFILE"));
}

#[test]
fn named_parameter_captures_segment() {
    let rule = Pattern::from("/user/:id").compile().unwrap();
    let caps = rule.matcher().captures("/user/42").unwrap();
    assert_eq!(caps.get(1).map(|m| m.as_str()), Some("42"));
    assert_eq!(rule.param_names()[0].as_ref(), "id");
}

#[test]
fn parameter_segment_is_optional() {
    let rule = Pattern::from("/user/:id").compile().unwrap();
    assert!(rule.is_match("/user"));
    let caps = rule.matcher().captures("/user").unwrap();
    assert!(caps.get(1).is_none());
}

#[test]
fn constrained_parameter_uses_constraint_body() {
    let rule = Pattern::from(r"/user/:id(\d+)").compile().unwrap();
    assert!(rule.is_match("/user/42"));
    assert!(!rule.is_match("/user/abc"));
    // constrained segments are still optional
    assert!(rule.is_match("/user"));
}

#[test]
fn middle_parameter_may_be_absent() {
    let rule = Pattern::from("/user/:id/profile").compile().unwrap();
    assert!(rule.is_match("/user/42/profile"));
    assert!(rule.is_match("/user/profile"));
}

#[test]
fn wildcard_matches_across_slashes() {
    let rule = Pattern::from("/files/*").compile().unwrap();
    let caps = rule.matcher().captures("/files/a/b/c.txt").unwrap();
    assert_eq!(caps.get(1).map(|m| m.as_str()), Some("a/b/c.txt"));
}

#[test]
fn bare_wildcard_matches_any_path() {
    let rule = Pattern::from("*").compile().unwrap();
    assert!(rule.is_match("/"));
    assert!(rule.is_match("/anything/at/all"));
    assert!(rule.is_match(""));
}

#[test]
fn hash_route_matches_anywhere_in_fragment() {
    let rule = Pattern::from("#tab/:id").compile().unwrap();
    assert!(rule.is_match("/page#tab/3"));
    let caps = rule.matcher().captures("/settings#tab/7").unwrap();
    assert_eq!(caps.get(1).map(|m| m.as_str()), Some("7"));
}

#[test]
fn non_hash_route_is_anchored_at_start() {
    let rule = Pattern::from("/tab").compile().unwrap();
    assert!(!rule.is_match("/page/tab"));
}

#[test]
fn alternatives_match_each_member_without_params() {
    let pattern = Pattern::from(vec!["/cats", "/dogs"]);
    let rule = pattern.compile().unwrap();
    assert!(rule.is_match("/cats"));
    assert!(rule.is_match("/dogs"));
    assert!(!rule.is_match("/birds"));
    assert!(rule.param_names().is_empty());
}

#[test]
fn alternatives_do_not_extract_inner_params() {
    // alternation contents are opaque; no names are recorded
    let rule = Pattern::from(vec!["/user/:id", "/account/:id"])
        .compile()
        .unwrap();
    assert!(rule.param_names().is_empty());
}

#[test]
fn raw_regex_is_used_unchanged() {
    let re = Regex::new(r"^/items/(\d+)$").unwrap();
    let rule = Pattern::from(re.clone()).compile().unwrap();
    assert!(rule.param_names().is_empty());
    assert_eq!(rule.matcher().as_str(), re.as_str());
    assert!(rule.is_match("/items/9"));
    // no tolerant hash suffix is added for raw patterns
    assert!(!rule.is_match("/items/9#frag"));
}

#[test]
fn unbalanced_constraint_fails_at_compile_time() {
    let result = Pattern::from(r"/user/:id(\d+").compile();
    assert!(result.is_err());
    let msg = format!("{:#}", result.unwrap_err());
    assert!(msg.contains("invalid route pattern"), "got: {msg}");
}

#[test]
fn with_base_prefixes_literals() {
    let pattern = Pattern::from("/home").with_base("/app");
    assert_eq!(pattern.to_string(), "/app/home");
    let rule = pattern.compile().unwrap();
    assert!(rule.is_match("/app/home"));
    assert!(!rule.is_match("/home"));
}

#[test]
fn with_base_skips_wildcard_and_prefixed_patterns() {
    assert_eq!(Pattern::from("*").with_base("/app").to_string(), "*");
    assert_eq!(
        Pattern::from("/app/home").with_base("/app").to_string(),
        "/app/home"
    );
}
