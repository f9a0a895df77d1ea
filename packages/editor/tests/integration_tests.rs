//! End-to-end tests: open a session, append, check the serialized text

mod fixtures;

use fixtures::*;
use protoedit_editor::{DeclKind, EditSession, EditorError};

fn index_of(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in:\n{}", needle, haystack))
}

fn assert_parses(source: &str) {
    if let Err(e) = EditSession::new(source) {
        panic!("result should be valid proto: {}", e);
    }
}

#[test]
fn test_new_session() {
    assert!(EditSession::new(TEST_PROTO).is_ok());
    assert!(EditSession::new("").is_ok());
    assert!(EditSession::new(TEST_PROTO_MINIMAL).is_ok());

    match EditSession::new(TEST_PROTO_INVALID) {
        Err(EditorError::Grammar { diagnostic, .. }) => assert!(diagnostic.contains("input.proto")),
        other => panic!("expected grammar error, got {:?}", other.map(|s| s.into_source())),
    }
}

#[test]
fn test_diagnostic_after_multibyte_comment() {
    let source = "// héllo wörld 🎉 日本語\nmessage Foo {\n  string a 1;\n}\n";

    let err = EditSession::new(source).unwrap_err();
    let diagnostic = err.diagnostic().unwrap();
    assert!(diagnostic.contains("input.proto:3:12"), "{}", diagnostic);
    assert!(diagnostic.contains("string a 1;"), "{}", diagnostic);
    assert!(diagnostic.contains("expected '='"), "{}", diagnostic);
    assert!(!diagnostic.contains('\u{1b}'));
}

#[test]
fn test_append_to_service() {
    let mut session = EditSession::new(TEST_PROTO).unwrap();
    session.append_to_service("TestService", RPC_CONTENT).unwrap();

    let result = session.source();
    assert!(index_of(result, "rpc CreateBar") > index_of(result, "rpc GetFoo"));
    assert!(result.contains("// GetFoo gets a foo."));
    assert!(result.contains(
        "  rpc GetFoo(GetFooRequest) returns (GetFooResponse) {}\n\n  // CreateBar creates a bar.\n  rpc CreateBar(CreateBarRequest) returns (CreateBarResponse) {}\n}"
    ));
    assert_parses(result);

    let svc = session
        .structure()
        .root
        .child(DeclKind::Service, "TestService")
        .unwrap();
    let rpcs: Vec<_> = svc.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(rpcs, vec!["GetFoo", "CreateBar"]);
}

#[test]
fn test_append_preserves_all_comments() {
    let mut session = EditSession::new(TEST_PROTO_WITH_COMMENTS).unwrap();
    session
        .append_to_service("MyService", "  rpc NewRPC(NewRequest) returns (NewResponse) {}")
        .unwrap();

    for comment in [
        "// File comment",
        "// Service comment line 1",
        "// Service comment line 2",
        "// RPC comment",
    ] {
        assert!(session.source().contains(comment), "comment {:?} should be preserved", comment);
    }
}

#[test]
fn test_append_to_message() {
    let mut session = EditSession::new(TEST_PROTO).unwrap();
    session.append_to_message("GetFooRequest", FIELD_CONTENT).unwrap();

    let result = session.source();
    assert!(index_of(result, "extra_field") > index_of(result, "string id = 1"));
    assert!(result.contains(
        "message GetFooRequest {\n  string id = 1;\n\n  // extra_field is an additional field.\n  string extra_field = 99;\n}"
    ));
    assert_parses(result);
}

#[test]
fn test_append_to_enum() {
    let mut session = EditSession::new(TEST_PROTO).unwrap();
    session.append_to_enum("Status", ENUM_VALUE_CONTENT).unwrap();

    let result = session.source();
    assert!(index_of(result, "STATUS_PENDING") > index_of(result, "STATUS_ACTIVE"));
    assert_parses(result);

    let status = session
        .structure()
        .root
        .child(DeclKind::Enum, "Status")
        .unwrap();
    assert!(status.member("STATUS_PENDING").is_some());
}

#[test]
fn test_append_to_file() {
    let mut session = EditSession::new(TEST_PROTO).unwrap();
    session.append_to_file(MESSAGE_CONTENT).unwrap();

    let result = session.source();
    assert!(index_of(result, "message CreateBarRequest") > index_of(result, "enum Status"));
    assert!(result.starts_with(TEST_PROTO));
    assert!(result.ends_with("}\n\n// CreateBarRequest is the request for CreateBar.\nmessage CreateBarRequest {\n  string name = 1;\n}\n"));
    assert_parses(result);
}

#[test]
fn test_append_multiple_messages_to_file() {
    let mut session = EditSession::new(TEST_PROTO_MINIMAL).unwrap();
    session.append_to_file(MESSAGES_CONTENT).unwrap();

    assert_eq!(
        session.source(),
        format!("{}\n\n{}\n", TEST_PROTO_MINIMAL, MESSAGES_CONTENT)
    );
    let names: Vec<_> = session
        .structure()
        .root
        .children
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["CreateBarRequest", "CreateBarResponse"]);
}

#[test]
fn test_lookup_errors_leave_text_unchanged() {
    let mut session = EditSession::new(TEST_PROTO).unwrap();

    let err = session
        .append_to_service("NonExistentService", RPC_CONTENT)
        .unwrap_err();
    assert_eq!(
        err,
        EditorError::NotFound {
            kind: DeclKind::Service,
            name: "NonExistentService".to_string()
        }
    );

    assert!(session.append_to_message("NonExistentMessage", FIELD_CONTENT).is_err());
    assert!(session.append_to_enum("NonExistentEnum", ENUM_VALUE_CONTENT).is_err());

    // Kinds are not interchangeable
    assert!(session.append_to_enum("GetFooRequest", ENUM_VALUE_CONTENT).is_err());
    assert!(session.append_to_message("TestService", FIELD_CONTENT).is_err());

    assert_eq!(session.source(), TEST_PROTO);
    assert_eq!(session.version(), 0);
}

#[test]
fn test_grammar_error_rolls_back() {
    let mut session = EditSession::new(TEST_PROTO).unwrap();

    let err = session
        .append_to_message("GetFooRequest", "string broken = ;")
        .unwrap_err();
    assert!(matches!(err, EditorError::Grammar { .. }));
    assert!(err.diagnostic().is_some());
    assert_eq!(session.source(), TEST_PROTO);

    // The session is still usable
    session.append_to_message("GetFooRequest", "string ok = 2;").unwrap();
    assert!(session.source().contains("  string ok = 2;\n}"));
}

#[test]
fn test_unbalanced_snippet_is_rejected() {
    let mut session = EditSession::new(TEST_PROTO).unwrap();

    // A stray closing brace would end the message early
    let err = session
        .append_to_message("GetFooRequest", "string a = 2; }")
        .unwrap_err();
    assert!(matches!(err, EditorError::Grammar { .. }));
    assert_eq!(session.source(), TEST_PROTO);

    assert!(session.append_to_file("message Open {").is_err());
    assert_eq!(session.source(), TEST_PROTO);
}

#[test]
fn test_file_kind_is_not_a_container_target() {
    let mut session = EditSession::new(TEST_PROTO).unwrap();

    let err = session.append_to(DeclKind::File, "", "message X {}").unwrap_err();
    assert_eq!(err, EditorError::UnsupportedTarget(DeclKind::File));
    assert_eq!(session.source(), TEST_PROTO);
}

#[test]
fn test_nested_service_lookup_is_flat() {
    // Only top-level services are candidates; a message named like the
    // service does not count.
    let source = "message Svc {}\nservice Api {}\n";
    let mut session = EditSession::new(source).unwrap();

    assert!(session.append_to_service("Svc", "rpc A(R) returns (R);").is_err());
    session.append_to_service("Api", "rpc A(R) returns (R);").unwrap();
    assert_eq!(session.source(), "message Svc {}\nservice Api {\n  rpc A(R) returns (R);\n}\n");
}
