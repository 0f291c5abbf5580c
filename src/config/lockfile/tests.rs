//! Shrinkwrap parsing tests

use std::path::Path;

use super::*;
use crate::domain::GitLocator;
use crate::error::UnwrapError;

fn parse(json: &str) -> Result<App> {
    parse_app(json.as_bytes(), Path::new("npm-shrinkwrap.json"))
}

#[test]
fn test_parse_nested_shrinkwrap() {
    let app = parse(
        r#"{
          "name": "demo",
          "version": "1.0.0",
          "dependencies": {
            "left-pad": {
              "version": "1.3.0",
              "from": "left-pad@^1.3.0",
              "resolved": "https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz"
            },
            "foo": {
              "version": "2.0.0",
              "from": "git+https://example.com/foo.git#v2.0.0",
              "resolved": "git+https://example.com/foo.git#v2.0.0",
              "dependencies": {
                "bar": {
                  "version": "1.0.0",
                  "resolved": "https://registry.npmjs.org/bar/-/bar-1.0.0.tgz"
                }
              }
            }
          }
        }"#,
    )
    .unwrap();

    assert_eq!(app.name, "demo");
    assert_eq!(app.version, "1.0.0");
    assert_eq!(app.dependencies.len(), 2);

    let left_pad = &app.dependencies[0];
    assert_eq!(left_pad.name, "left-pad");
    assert_eq!(left_pad.from.as_deref(), Some("left-pad@^1.3.0"));
    assert_eq!(
        left_pad.resolution,
        Resolution::Tarball("https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz".to_string())
    );

    let foo = &app.dependencies[1];
    assert_eq!(
        foo.resolution,
        Resolution::Git(GitLocator {
            url: "https://example.com/foo.git".to_string(),
            revision: "v2.0.0".to_string(),
        })
    );
    assert_eq!(foo.dependencies.len(), 1);
    assert_eq!(foo.dependencies[0].name, "bar");
}

#[test]
fn test_parse_preserves_document_order() {
    let app = parse(
        r#"{"name": "demo", "version": "1.0.0", "dependencies": {
            "zeta": {"version": "1.0.0", "resolved": "https://r/zeta-1.0.0.tgz"},
            "alpha": {"version": "1.0.0", "resolved": "https://r/alpha-1.0.0.tgz"},
            "mid": {"version": "1.0.0", "resolved": "https://r/mid-1.0.0.tgz"}
        }}"#,
    )
    .unwrap();

    let names: Vec<&str> = app.dependencies.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_missing_resolved_is_unresolved() {
    let app = parse(
        r#"{"name": "demo", "version": "1.0.0", "dependencies": {
            "ghost": {"version": "0.1.0"},
            "null-resolved": {"version": "0.2.0", "resolved": null}
        }}"#,
    )
    .unwrap();

    assert_eq!(app.dependencies[0].resolution, Resolution::Unresolved);
    assert_eq!(app.dependencies[1].resolution, Resolution::Unresolved);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let app = parse(
        r#"{"name": "demo", "version": "1.0.0", "lockfileVersion": 1, "requires": true,
            "dependencies": {
              "a": {"version": "1.0.0", "resolved": "https://r/a-1.0.0.tgz",
                    "integrity": "sha512-xyz", "dev": true, "requires": {"b": "^1.0.0"}}
            }}"#,
    )
    .unwrap();
    assert_eq!(app.dependencies.len(), 1);
}

#[test]
fn test_no_dependencies() {
    let app = parse(r#"{"name": "empty", "version": "0.0.1"}"#).unwrap();
    assert!(app.dependencies.is_empty());
}

#[test]
fn test_malformed_document() {
    let result = parse(r#"["not", "an", "object"]"#);
    assert!(matches!(
        result,
        Err(UnwrapError::LockfileParseFailed { .. })
    ));
}

#[test]
fn test_invalid_git_locator_names_module() {
    let err = parse(
        r#"{"name": "demo", "version": "1.0.0", "dependencies": {
            "broken": {"version": "1.0.0", "resolved": "git+#v1"}
        }}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("npm-shrinkwrap.json"));
    assert!(matches!(err, UnwrapError::LockfileParseFailed { ref reason, .. } if reason.contains("broken")));
}

#[test]
fn test_load_app_missing_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let result = load_app(&temp.path().join(SHRINKWRAP_FILE));
    assert!(matches!(
        result,
        Err(UnwrapError::LockfileParseFailed { .. })
    ));
}

#[test]
fn test_module_names_that_leave_node_modules_rejected() {
    for name in ["..", "", ".", "/abs", "a\\\\b", "a/b", "@scope/../x"] {
        let document = format!(
            r#"{{"name": "demo", "version": "1.0.0", "dependencies": {{
                "ok": {{"version": "1.0.0", "dependencies": {{
                    "{name}": {{"version": "1.0.0"}}
                }}}}
            }}}}"#
        );
        let err = parse(&document).unwrap_err();
        assert!(
            matches!(err, UnwrapError::LockfileParseFailed { ref reason, .. } if reason.contains("invalid module name")),
            "'{name}' should be rejected, got {err:?}"
        );
    }
}

#[test]
fn test_scoped_module_name_accepted() {
    let app = parse(
        r#"{"name": "demo", "version": "1.0.0", "dependencies": {
            "@types/node": {"version": "20.0.0", "resolved": "https://registry.npmjs.org/@types/node/-/node-20.0.0.tgz"}
        }}"#,
    )
    .unwrap();
    assert_eq!(app.dependencies[0].name, "@types/node");
}
