use graft::prelude::*;

// declared before its interface on purpose
#[graph_type(implements(Node, Named), description = "A user account")]
struct User {
    id: String,
    user_name: String,
}

#[graph_interface]
struct Node {
    id: String,
}

#[graph_type(interface)]
struct Named {
    user_name: String,
}

#[graph_type]
struct Team {
    members: Vec<User>,
    lead: Option<User>,
}

#[graph_type]
struct Plain {
    id: String,
}

#[graph_type(implements(Plain))]
struct NotAnInterface {
    id: String,
}

#[test]
fn interfaces_are_decorated_before_implementors() {
    let ty = User::graph_type();
    let names: Vec<&str> = ty.wire().interfaces().iter().map(|i| i.name()).collect();

    assert_eq!(names, ["Node", "Named"]);
    assert!(
        ty.wire().interfaces()[0]
            .same_type(Node::graph_type().wire().as_interface().unwrap())
    );
    assert_eq!(User::definition().supertypes(), ["Node", "Named"]);
}

#[test]
fn interface_kinds_are_recorded() {
    assert_eq!(Node::graph_type().kind(), Kind::Interface);
    assert_eq!(Named::graph_type().kind(), Kind::Interface);
    assert_eq!(
        Node::graph_type().to_string(),
        "interface Node {\n  id: String!\n}"
    );
}

#[test]
fn implementing_type_prints_its_interfaces() {
    assert_eq!(
        User::graph_type().sdl().unwrap(),
        "\"\"\"A user account\"\"\"\n\
         type User implements Node & Named {\n  \
         id: String!\n  \
         userName: String!\n\
         }"
    );
}

#[test]
fn record_valued_fields_reference_other_types() {
    assert_eq!(
        Team::graph_type().sdl().unwrap(),
        "type Team {\n  lead: User\n  members: [User!]!\n}"
    );

    let parent = json!({ "members": [{ "id": "1", "user_name": "ann" }] });
    let lead = Team::graph_type()
        .resolve("lead", Some(&parent), &Context::new())
        .unwrap();
    assert_eq!(lead, Value::Null);
}

#[test]
fn object_supertypes_are_not_interfaces() {
    assert!(NotAnInterface::graph_type().wire().interfaces().is_empty());
}
