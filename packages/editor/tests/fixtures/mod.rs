//! Shared .proto sources for the editor tests

#![allow(dead_code)]

pub const TEST_PROTO: &str = r#"syntax = "proto3";

package test.v1;

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
}

enum Status {
  STATUS_UNSPECIFIED = 0;
  STATUS_ACTIVE = 1;
}
"#;

pub const TEST_PROTO_MINIMAL: &str = r#"syntax = "proto3";"#;

pub const TEST_PROTO_INVALID: &str = "this is not valid proto {{{";

pub const TEST_PROTO_WITH_COMMENTS: &str = r#"syntax = "proto3";

// File comment
package test.v1;

// Service comment line 1
// Service comment line 2
service MyService {
  // RPC comment
  rpc MyRPC(MyRequest) returns (MyResponse) {}
}
"#;

pub const RPC_CONTENT: &str = "  // CreateBar creates a bar.
  rpc CreateBar(CreateBarRequest) returns (CreateBarResponse) {}";

pub const FIELD_CONTENT: &str = "  // extra_field is an additional field.
  string extra_field = 99;";

pub const ENUM_VALUE_CONTENT: &str = "  STATUS_PENDING = 99;";

pub const MESSAGE_CONTENT: &str = "// CreateBarRequest is the request for CreateBar.
message CreateBarRequest {
  string name = 1;
}";

pub const MESSAGES_CONTENT: &str = "message CreateBarRequest {
  string name = 1;
}

message CreateBarResponse {
  string id = 1;
}";
