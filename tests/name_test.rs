use kiln::name::{resolve_name, DEFAULT_NAME};

#[test]
fn test_resolve_name() {
    assert_eq!(resolve_name("My App!!"), "my-app");
    assert_eq!(resolve_name("___.hidden-"), "hidden");
    assert_eq!(resolve_name("/home/user/projects/Shop_API"), "shop-api");
    assert_eq!(resolve_name("v1.2-beta"), "v1.2-beta");
}

#[test]
fn test_resolve_name_default() {
    assert_eq!(resolve_name(""), DEFAULT_NAME);
    assert_eq!(resolve_name("!!!"), DEFAULT_NAME);
    assert_eq!(resolve_name("/"), DEFAULT_NAME);
    assert_eq!(resolve_name(".."), DEFAULT_NAME);
}

#[test]
fn test_resolve_name_uses_last_segment() {
    assert_eq!(resolve_name("outer dir/Inner"), "inner");
    assert_eq!(resolve_name("outer/inner/"), "inner");
}

#[test]
fn test_resolve_name_idempotent() {
    for input in ["My App!!", "___.hidden-", "Über Service", "", "a--b", "x.y.z"] {
        let once = resolve_name(input);
        assert_eq!(resolve_name(&once), once, "input: {input:?}");
    }
}

#[test]
fn test_resolved_name_charset() {
    for input in ["Hello World", "-._lead", "trail---", "MiXeD_case 42"] {
        let name = resolve_name(input);
        assert!(!name.is_empty());
        assert!(name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-'));
        assert!(!name.starts_with(['-', '_', '.']));
        assert!(!name.ends_with('-'));
    }
}
