use protoedit_parser::{parse, DeclKind, MemberKind, ParseError};

#[test]
fn test_service_file() {
    let source = r#"syntax = "proto3";

package test.v1;

import "google/protobuf/timestamp.proto";
import public "other.proto";

option go_package = "example.com/test/v1;testv1";

// TestService is a test service.
service TestService {
  // GetFoo gets a foo.
  rpc GetFoo(GetFooRequest) returns (GetFooResponse) {}
}

message GetFooRequest {
  string id = 1;
}

message GetFooResponse {
  string name = 1;
  google.protobuf.Timestamp created_at = 2;
}

enum Status {
  STATUS_UNSPECIFIED = 0;
  STATUS_ACTIVE = 1;
}
"#;

    let result = parse(source);
    if let Err(e) = &result {
        eprintln!("Parse error: {:?}", e);
    }
    let file = result.unwrap();

    assert_eq!(file.syntax.as_deref(), Some("proto3"));
    assert_eq!(file.package.as_deref(), Some("test.v1"));
    assert_eq!(
        file.imports().collect::<Vec<_>>(),
        vec!["google/protobuf/timestamp.proto", "other.proto"]
    );

    let kinds: Vec<_> = file.root.children.iter().map(|d| (d.kind, d.name.as_str())).collect();
    assert_eq!(
        kinds,
        vec![
            (DeclKind::Service, "TestService"),
            (DeclKind::Message, "GetFooRequest"),
            (DeclKind::Message, "GetFooResponse"),
            (DeclKind::Enum, "Status"),
        ]
    );

    for decl in &file.root.children {
        assert_eq!(&source[decl.open..decl.open + 1], "{");
        assert_eq!(&source[decl.close..decl.close + 1], "}");
    }
}

#[test]
fn test_proto2_features() {
    let source = r#"
        syntax = "proto2";

        message Search {
          required string query = 1;
          optional int32 page = 2 [default = 10];
          repeated group Result = 3 {
            required string url = 4;
            optional string title = 5;
          }
          extensions 100 to 199, 500 to max;
          reserved 6, 8 to 11;
          reserved "foo", "bar";
        }

        extend Search {
          optional string source = 100;
        }
    "#;

    let file = parse(source).unwrap();
    let search = &file.root.children[0];

    // A group declares a nested message type named after it
    assert_eq!(search.children.len(), 1);
    assert_eq!(search.children[0].kind, DeclKind::Message);
    assert_eq!(search.children[0].name, "Result");
    assert!(search.children[0].member("url").is_some());

    assert!(search.members.iter().any(|m| m.kind == MemberKind::Extensions));
    assert_eq!(
        search
            .members
            .iter()
            .filter(|m| m.kind == MemberKind::Reserved)
            .count(),
        2
    );
    assert!(file
        .root
        .members
        .iter()
        .any(|m| m.kind == MemberKind::Extend && m.name == "Search"));
}

#[test]
fn test_oneof_map_and_options() {
    let source = r#"
        syntax = "proto3";

        import "google/api/annotations.proto";

        message Config {
          option (my.message_opt) = { name: "x" nested { value: 1 } };

          oneof choice {
            option (my.oneof_opt) = true;
            string text = 1;
            int64 number = 2 [(validate.rules).int64.gt = 0, deprecated = true];
          }

          map<string, .pkg.Value> values = 3;
          double ratio = 4 [default = -inf];
        }

        service Api {
          rpc Get(Config) returns (Config) {
            option (google.api.http) = {
              get: "/v1/config"
            };
          }
        }
    "#;

    let file = parse(source).unwrap();
    let config = &file.root.children[0];

    assert!(config.member("choice").is_some());
    assert_eq!(config.member("choice").unwrap().kind, MemberKind::Oneof);
    assert_eq!(config.member("text").unwrap().kind, MemberKind::Field);
    assert_eq!(config.member("values").unwrap().kind, MemberKind::MapField);
    assert!(config.member("(my.message_opt)").is_some());
}

#[test]
fn test_enum_values_and_options() {
    let source = r#"
        enum Level {
          option allow_alias = true;
          LEVEL_UNSPECIFIED = 0;
          LEVEL_LOW = 1 [deprecated = true];
          LEVEL_ALIAS = 1;
          LEVEL_NEGATIVE = -1;
          reserved 10 to 20;
          reserved "OLD";
        }
    "#;

    let file = parse(source).unwrap();
    let level = &file.root.children[0];

    let values: Vec<_> = level
        .members
        .iter()
        .filter(|m| m.kind == MemberKind::EnumValue)
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(values, vec!["LEVEL_UNSPECIFIED", "LEVEL_LOW", "LEVEL_ALIAS", "LEVEL_NEGATIVE"]);
    assert!(level.children.is_empty());
}

#[test]
fn test_editions_file() {
    let source = r#"
        edition = "2023";

        message Foo {
          reserved bar, baz;
          string name = 1 [features.field_presence = IMPLICIT];
        }
    "#;

    let file = parse(source).unwrap();
    assert_eq!(file.edition.as_deref(), Some("2023"));
    assert!(file.syntax.is_none());
}

#[test]
fn test_errors_carry_positions() {
    let source = "syntax = \"proto3\";\nmessage Foo {\n  string name = ;\n}\n";

    match parse(source) {
        Err(ParseError::UnexpectedToken { span, expected, .. }) => {
            assert_eq!(&source[span.start..span.end], ";");
            assert_eq!(expected, "integer");
        }
        other => panic!("expected unexpected-token error, got {:?}", other),
    }
}

#[test]
fn test_unterminated_string_is_lex_error() {
    let err = parse("syntax = \"proto3;\n").unwrap_err();
    assert!(matches!(err, ParseError::LexError { .. }));
}
