#![allow(unused_crate_dependencies)]

use std::sync::Arc;

use graphql_entity_compiler::{
    CompileError, DecoratedSite, DecoratorObserver, DiscriminatorHandle, Mode, ResolverHandle,
    RootSet, SchemaError, SchemaRegistry, TypeArg, TypeExpr, apply_decorators, compile, field,
};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

#[test]
fn minimal_query_compiles() -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([("flag".to_owned(), field::ty(TypeArg::Bool))]),
    );

    let graph = compile(&registry, &[roots])?;

    let query = graph.object(graph.query().unwrap()).unwrap();
    assert_eq!(query.name, "Query");
    let boolean = graph.lookup("Boolean", Mode::Output).unwrap();
    assert_eq!(query.field("flag").unwrap().ty, TypeExpr::Node(boolean));
    assert!(graph.mutation().is_none());
    assert!(graph.subscription().is_none());
    Ok(())
}

#[test]
fn list_wrappers_compose_in_declared_order() -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([
            ("tags".to_owned(), field::list(TypeArg::Str)),
            ("drafts".to_owned(), field::nlist(TypeArg::Str)),
        ]),
    );

    let graph = compile(&registry, &[roots])?;

    let string = graph.lookup("String", Mode::Output).unwrap();
    let query = graph.object(graph.query().unwrap()).unwrap();
    // `list` is `[String!]!`, `nlist` is `[String]`.
    assert_eq!(
        query.field("tags").unwrap().ty,
        TypeExpr::Node(string).non_null().list_of().non_null()
    );
    assert_eq!(
        query.field("drafts").unwrap().ty,
        TypeExpr::Node(string).list_of()
    );
    Ok(())
}

fn recompilation_fixture() -> anyhow::Result<(SchemaRegistry, RootSet)> {
    let mut registry = SchemaRegistry::new();
    let user = registry.entity("User");
    registry.attach_field(user, "name", field::ty(TypeArg::Str).required());
    registry.attach_field(user, "friends", field::list(user));
    let filter = registry.entity("Filter");
    registry.attach_field(filter, "term", field::ty(TypeArg::Str));
    let cat = registry.entity("Cat");
    registry.attach_field(cat, "meow", field::ty(TypeArg::Bool));
    let dog = registry.entity("Dog");
    registry.attach_field(dog, "bark", field::ty(TypeArg::Bool));
    let pet = registry.union(
        "Pet",
        None,
        vec![cat.into(), dog.into()],
        DiscriminatorHandle::new(|_| 0),
    )?;

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([
            (
                "users".to_owned(),
                field::list(user)
                    .arguments(filter)
                    .resolve(ResolverHandle::new(|_, _| Value::Null)),
            ),
            (
                "profile".to_owned(),
                field::ty(IndexMap::from([(
                    "bio".to_owned(),
                    field::ty(TypeArg::Str),
                )])),
            ),
            ("pets".to_owned(), field::list(pet)),
        ]),
    );
    Ok((registry, roots))
}

#[test]
fn recompilation_yields_an_identical_graph() -> anyhow::Result<()> {
    let (first_registry, first_roots) = recompilation_fixture()?;
    let (second_registry, second_roots) = recompilation_fixture()?;

    let first = compile(&first_registry, &[first_roots])?;
    let second = compile(&second_registry, &[second_roots])?;

    assert_eq!(first.len(), second.len());
    for ((_, a), (_, b)) in first.iter().zip(second.iter()) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.mode(), b.mode());
        match (a.as_object(), b.as_object()) {
            (Some(a), Some(b)) => {
                let a_fields: Vec<_> = a.fields.iter().map(|f| (&f.key, &f.ty)).collect();
                let b_fields: Vec<_> = b.fields.iter().map(|f| (&f.key, &f.ty)).collect();
                assert_eq!(a_fields, b_fields);
            }
            (None, None) => {}
            _ => anyhow::bail!("node shapes diverge at `{}`", a.name()),
        }
        match (a.as_union(), b.as_union()) {
            (Some(a), Some(b)) => assert_eq!(a.members, b.members),
            (None, None) => {}
            _ => anyhow::bail!("node shapes diverge at `{}`", a.name()),
        }
    }
    Ok(())
}

#[test]
fn shared_entity_compiles_once() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let user = registry.entity("User");
    registry.attach_field(user, "name", field::ty(TypeArg::Str));

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([
            ("author".to_owned(), field::ty(user)),
            ("editor".to_owned(), field::ty(user)),
        ]),
    );

    let graph = compile(&registry, &[roots])?;

    let user_node = graph.lookup("User", Mode::Output).unwrap();
    let query = graph.object(graph.query().unwrap()).unwrap();
    assert_eq!(query.field("author").unwrap().ty, TypeExpr::Node(user_node));
    assert_eq!(query.field("editor").unwrap().ty, TypeExpr::Node(user_node));
    let user_count = graph.iter().filter(|(_, node)| node.name() == "User").count();
    assert_eq!(user_count, 1);
    Ok(())
}

#[test]
fn self_referencing_entity_terminates() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let node = registry.entity("TreeNode");
    registry.attach_field(node, "label", field::ty(TypeArg::Str));
    registry.attach_field(node, "children", field::list(node));

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([("root".to_owned(), field::ty(node))]),
    );

    let graph = compile(&registry, &[roots])?;

    let tree = graph.lookup("TreeNode", Mode::Output).unwrap();
    let children = graph.object(tree).unwrap().field("children").unwrap();
    assert_eq!(children.ty.innermost(), tree);
    Ok(())
}

#[test]
fn argument_entities_compile_in_their_own_namespace() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let user = registry.entity("User");
    registry.attach_field(user, "name", field::ty(TypeArg::Str));
    let filter = registry.entity("Filter");
    registry.attach_field(filter, "term", field::ty(TypeArg::Str));
    registry.attach_field(filter, "owner", field::ty(user));

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([(
            "users".to_owned(),
            field::list(user)
                .arguments(filter)
                .resolve(ResolverHandle::new(|_, _| Value::Null)),
        )]),
    );

    let graph = compile(&registry, &[roots])?;

    let users = graph.object(graph.query().unwrap()).unwrap();
    let arguments = users.field("users").unwrap().arguments.unwrap();
    assert_eq!(graph[arguments].name(), "Filter_Arg");
    assert!(graph[arguments].is_argument_set());

    // Entity references inside an argument set compile as input objects,
    // without disturbing the output variant.
    let owner = graph.object(arguments).unwrap().field("owner").unwrap();
    assert_eq!(graph[owner.ty.innermost()].name(), "UserInput");
    assert!(graph.lookup("User", Mode::Output).is_some());
    assert!(graph.lookup("UserInput", Mode::Input).is_some());
    Ok(())
}

#[test]
fn inline_objects_get_mode_suffixed_names() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let filter = registry.entity("Filter");
    registry.attach_field(
        filter,
        "range",
        field::ty(IndexMap::from([
            ("min".to_owned(), field::ty(TypeArg::Float)),
            ("max".to_owned(), field::ty(TypeArg::Float)),
        ])),
    );

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([
            (
                "search".to_owned(),
                field::ty(TypeArg::Str)
                    .arguments(filter)
                    .resolve(ResolverHandle::new(|_, _| Value::Null)),
            ),
            (
                "profile".to_owned(),
                field::ty(IndexMap::from([(
                    "bio".to_owned(),
                    field::ty(TypeArg::Str),
                )])),
            ),
        ]),
    );

    let graph = compile(&registry, &[roots])?;

    // The mode suffix lands before the uniqueness counter.
    assert!(graph.lookup("rangeInput_0", Mode::Input).is_some());
    assert!(graph.lookup("profile_0", Mode::Output).is_some());
    Ok(())
}

#[test]
fn inline_argument_maps_get_generated_names() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let user = registry.entity("User");
    registry.attach_field(user, "name", field::ty(TypeArg::Str));

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([(
            "search".to_owned(),
            field::list(user).arguments(IndexMap::from([(
                "term".to_owned(),
                field::ty(TypeArg::Str).required(),
            )])),
        )]),
    );

    let graph = compile(&registry, &[roots])?;

    let query = graph.object(graph.query().unwrap()).unwrap();
    let arguments = query.field("search").unwrap().arguments.unwrap();
    assert_eq!(graph[arguments].name(), "search_Arg_0");
    let term = graph.object(arguments).unwrap().field("term").unwrap();
    assert!(term.ty.is_required());
    Ok(())
}

#[test]
fn input_override_replaces_the_descriptor_wholesale() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let post = registry.entity("Post");
    registry.attach_field(
        post,
        "views",
        field::ty(TypeArg::Float)
            .resolve(ResolverHandle::new(|_, _| json!(0)))
            .input(field::ty(TypeArg::Float).optional().default_value(json!(0))),
    );
    registry.attach_field(
        post,
        "secret",
        field::ty(TypeArg::Str).resolve(ResolverHandle::new(|_, _| Value::Null)),
    );

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([("post".to_owned(), field::ty(post))]),
    );
    roots.insert(
        "Mutation",
        IndexMap::from([(
            "createPost".to_owned(),
            field::ty(post).arguments(IndexMap::from([(
                "draft".to_owned(),
                field::ty(post).required(),
            )])),
        )]),
    );

    let graph = compile(&registry, &[roots])?;

    let input = graph
        .object(graph.lookup("PostInput", Mode::Input).unwrap())
        .unwrap();
    // The override reopens the resolver-backed field for input; without one
    // the field stays output-only.
    let views = input.field("views").unwrap();
    assert_eq!(views.default_value, Some(json!(0)));
    assert!(views.resolver.is_none());
    assert!(input.field("secret").is_none());

    let output = graph
        .object(graph.lookup("Post", Mode::Output).unwrap())
        .unwrap();
    assert!(output.field("secret").is_some());
    assert!(output.field("views").unwrap().default_value.is_none());
    Ok(())
}

#[test]
fn forward_names_resolve_against_top_level_entries() -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    let mut roots = RootSet::new();
    roots.insert(
        "Profile",
        IndexMap::from([("bio".to_owned(), field::ty(TypeArg::Str))]),
    );
    roots.insert(
        "_meta",
        IndexMap::from([("ignored".to_owned(), field::ty(TypeArg::Str))]),
    );
    roots.insert(
        "Query",
        IndexMap::from([("me".to_owned(), field::ty("Profile"))]),
    );

    let graph = compile(&registry, &[roots])?;

    let profile = graph.lookup("Profile", Mode::Output).unwrap();
    let query = graph.object(graph.query().unwrap()).unwrap();
    assert_eq!(query.field("me").unwrap().ty, TypeExpr::Node(profile));
    assert!(graph.lookup("_meta", Mode::Output).is_none());
    Ok(())
}

#[test]
fn root_collections_merge_into_one_query() -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    let mut first = RootSet::new();
    first.insert(
        "Query",
        IndexMap::from([("a".to_owned(), field::ty(TypeArg::Str))]),
    );
    let mut second = RootSet::new();
    second.insert(
        "Query",
        IndexMap::from([("b".to_owned(), field::ty(TypeArg::Bool))]),
    );

    let graph = compile(&registry, &[first, second])?;

    let query = graph.object(graph.query().unwrap()).unwrap();
    assert_eq!(query.fields.len(), 2);
    assert!(query.field("a").is_some());
    assert!(query.field("b").is_some());
    Ok(())
}

#[test]
fn external_types_pass_through() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let date = registry.scalar("Date");
    let color = registry.enumeration(
        "Color",
        [("RED".to_owned(), json!(0)), ("BLUE".to_owned(), json!(1))],
    )?;

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([
            ("today".to_owned(), field::ty(date).required()),
            ("theme".to_owned(), field::ty(color)),
        ]),
    );

    let graph = compile(&registry, &[roots])?;

    let date_node = graph.lookup("Date", Mode::Output).unwrap();
    let query = graph.object(graph.query().unwrap()).unwrap();
    assert_eq!(
        query.field("today").unwrap().ty,
        TypeExpr::Node(date_node).non_null()
    );
    let graphql_entity_compiler::Node::Enum(color) =
        &graph[graph.lookup("Color", Mode::Output).unwrap()]
    else {
        anyhow::bail!("expected an enum node");
    };
    let keys: Vec<_> = color.values.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, ["RED", "BLUE"]);
    Ok(())
}

#[test]
fn union_members_keep_declared_order() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let cat = registry.entity("Cat");
    registry.attach_field(cat, "meow", field::ty(TypeArg::Bool));
    let dog = registry.entity("Dog");
    registry.attach_field(dog, "bark", field::ty(TypeArg::Bool));
    let pet = registry.union(
        "Pet",
        None,
        vec![cat.into(), dog.into()],
        DiscriminatorHandle::new(|value| usize::from(value.get("bark").is_some())),
    )?;

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([("pets".to_owned(), field::list(pet))]),
    );

    let graph = compile(&registry, &[roots])?;

    let union = graph[graph.lookup("Pet", Mode::Output).unwrap()]
        .as_union()
        .unwrap();
    let names: Vec<_> = union
        .members
        .iter()
        .map(|&member| graph[member].name())
        .collect();
    assert_eq!(names, ["Cat", "Dog"]);
    // The discriminator's index refers to the member list as declared.
    assert_eq!(union.discriminator.call(&json!({ "bark": true })), 1);
    Ok(())
}

#[test]
fn union_forward_name_members_resolve_against_known_entries() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let cat = registry.entity("Cat");
    registry.attach_field(cat, "meow", field::ty(TypeArg::Bool));
    let pet = registry.union(
        "Pet",
        None,
        vec!["Cat".into(), "Dog".into()],
        DiscriminatorHandle::new(|value| usize::from(value.get("bark").is_some())),
    )?;

    let mut roots = RootSet::new();
    roots.insert("Cat", cat);
    roots.insert(
        "Dog",
        IndexMap::from([("bark".to_owned(), field::ty(TypeArg::Bool))]),
    );
    roots.insert(
        "Query",
        IndexMap::from([("pets".to_owned(), field::list(pet))]),
    );

    let graph = compile(&registry, &[roots])?;

    let union = graph[graph.lookup("Pet", Mode::Output).unwrap()]
        .as_union()
        .unwrap();
    let names: Vec<_> = union
        .members
        .iter()
        .map(|&member| graph[member].name())
        .collect();
    assert_eq!(names, ["Cat", "Dog"]);
    assert!(graph.object(union.members[1]).unwrap().field("bark").is_some());
    Ok(())
}

#[test]
fn union_typed_forward_members_are_rejected() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let cat = registry.entity("Cat");
    registry.attach_field(cat, "meow", field::ty(TypeArg::Bool));
    let dog = registry.entity("Dog");
    registry.attach_field(dog, "bark", field::ty(TypeArg::Bool));
    let pet = registry.union(
        "Pet",
        None,
        vec![cat.into(), dog.into()],
        DiscriminatorHandle::new(|_| 0),
    )?;
    let critter = registry.union(
        "Critter",
        None,
        vec![cat.into(), "Pet".into()],
        DiscriminatorHandle::new(|_| 0),
    )?;

    let mut roots = RootSet::new();
    roots.insert("Pet", pet);
    roots.insert(
        "Query",
        IndexMap::from([("all".to_owned(), field::ty(critter))]),
    );

    let err = compile(&registry, &[roots]).unwrap_err();
    assert_eq!(err.path(), Some("Query.all"));
    assert!(matches!(
        err.root_cause(),
        CompileError::IllegalUnionMember { union, member }
            if union == "Critter" && member == "Pet"
    ));
    Ok(())
}

#[test]
fn union_inside_input_is_rejected() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let cat = registry.entity("Cat");
    registry.attach_field(cat, "meow", field::ty(TypeArg::Bool));
    let dog = registry.entity("Dog");
    registry.attach_field(dog, "bark", field::ty(TypeArg::Bool));
    let pet = registry.union(
        "Pet",
        None,
        vec![cat.into(), dog.into()],
        DiscriminatorHandle::new(|_| 0),
    )?;
    let filter = registry.entity("Filter");
    registry.attach_field(filter, "pet", field::ty(pet));

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([(
            "search".to_owned(),
            field::ty(TypeArg::Str)
                .arguments(filter)
                .resolve(ResolverHandle::new(|_, _| Value::Null)),
        )]),
    );

    let err = compile(&registry, &[roots]).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        CompileError::UnionInInput { name } if name == "Pet"
    ));
    assert_eq!(err.path(), Some("Query.search.pet"));
    Ok(())
}

#[test]
fn union_roots_are_rejected() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let cat = registry.entity("Cat");
    registry.attach_field(cat, "meow", field::ty(TypeArg::Bool));
    let dog = registry.entity("Dog");
    registry.attach_field(dog, "bark", field::ty(TypeArg::Bool));
    let pet = registry.union(
        "Pet",
        None,
        vec![cat.into(), dog.into()],
        DiscriminatorHandle::new(|_| 0),
    )?;

    let mut roots = RootSet::new();
    roots.insert("Query", pet);

    let err = compile(&registry, &[roots]).unwrap_err();
    assert!(matches!(err, CompileError::IllegalRoot { name } if name == "Query"));
    Ok(())
}

#[test]
fn unknown_forward_name_reports_the_field_chain() {
    let registry = SchemaRegistry::new();
    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([("me".to_owned(), field::ty("Missing"))]),
    );

    let err = compile(&registry, &[roots]).unwrap_err();
    assert_eq!(err.path(), Some("Query.me"));
    assert!(matches!(
        err.root_cause(),
        CompileError::UnknownForwardName { name } if name == "Missing"
    ));
}

#[test]
fn duplicate_entity_names_collide() {
    let mut registry = SchemaRegistry::new();
    let a = registry.entity("User");
    registry.attach_field(a, "name", field::ty(TypeArg::Str));
    let b = registry.entity("User");
    registry.attach_field(b, "name", field::ty(TypeArg::Str));

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([
            ("a".to_owned(), field::ty(a)),
            ("b".to_owned(), field::ty(b)),
        ]),
    );

    let err = compile(&registry, &[roots]).unwrap_err();
    assert_eq!(err.path(), Some("Query.b"));
    assert!(matches!(
        err.root_cause(),
        CompileError::DuplicateEntityName { name } if name == "User"
    ));
}

#[test]
fn duplicate_top_level_entries_collide() {
    let registry = SchemaRegistry::new();
    let mut first = RootSet::new();
    first.insert(
        "Profile",
        IndexMap::from([("bio".to_owned(), field::ty(TypeArg::Str))]),
    );
    let mut second = RootSet::new();
    second.insert(
        "Profile",
        IndexMap::from([("age".to_owned(), field::ty(TypeArg::Float))]),
    );

    let err = compile(&registry, &[first, second]).unwrap_err();
    assert!(matches!(
        err,
        CompileError::DuplicateKnownEntity { name } if name == "Profile"
    ));
}

#[test]
fn duplicate_root_fields_collide() {
    let registry = SchemaRegistry::new();
    let mut first = RootSet::new();
    first.insert(
        "Query",
        IndexMap::from([("flag".to_owned(), field::ty(TypeArg::Bool))]),
    );
    let mut second = RootSet::new();
    second.insert(
        "Query",
        IndexMap::from([("flag".to_owned(), field::ty(TypeArg::Str))]),
    );

    let err = compile(&registry, &[first, second]).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        CompileError::DuplicateField { node, key } if node == "Query" && key == "flag"
    ));
}

#[test]
fn reserved_name_suffixes_are_fatal() {
    let mut registry = SchemaRegistry::new();
    let bad = registry.entity("SearchInput");
    registry.attach_field(bad, "term", field::ty(TypeArg::Str));

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([("search".to_owned(), field::ty(bad))]),
    );

    let err = compile(&registry, &[roots]).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        CompileError::ReservedSuffix { name } if name == "SearchInput"
    ));
}

#[test]
fn missing_roots_is_an_error() {
    let registry = SchemaRegistry::new();
    let err = compile(&registry, &[RootSet::new()]).unwrap_err();
    assert!(matches!(err, CompileError::NoRootFields));
}

#[test]
fn malformed_list_surfaces_at_compile_time() {
    let registry = SchemaRegistry::new();
    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([(
            "bad".to_owned(),
            field::ty(vec![TypeArg::Str, TypeArg::Bool]),
        )]),
    );

    let err = compile(&registry, &[roots]).unwrap_err();
    assert_eq!(err.path(), Some("Query.bad"));
    assert!(matches!(
        err.root_cause(),
        CompileError::Schema(SchemaError::ListArity(2))
    ));
}

struct Tagger {
    label: &'static str,
}

impl DecoratorObserver for Tagger {
    fn wrap_output_field(
        &self,
        next: ResolverHandle,
        _args: &[Value],
        site: DecoratedSite<'_>,
    ) -> ResolverHandle {
        assert_eq!(site.node, "User");
        assert_eq!(site.field, "name");
        let label = self.label;
        ResolverHandle::new(move |parent, arguments| {
            let inner = next.call(parent, arguments);
            json!(format!("{label}({})", inner.as_str().unwrap_or_default()))
        })
    }
}

#[test]
fn decorators_compose_in_registration_order() -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::new();
    let user = registry.entity("User");
    let first: Arc<dyn DecoratorObserver> = Arc::new(Tagger { label: "first" });
    let second: Arc<dyn DecoratorObserver> = Arc::new(Tagger { label: "second" });
    registry.attach_field(
        user,
        "name",
        field::ty(TypeArg::Str)
            .decorate(first, Vec::new())
            .decorate(second, Vec::new()),
    );

    let mut roots = RootSet::new();
    roots.insert(
        "Query",
        IndexMap::from([("me".to_owned(), field::ty(user))]),
    );

    let mut graph = compile(&registry, &[roots])?;
    apply_decorators(&mut graph);

    let user_node = graph.lookup("User", Mode::Output).unwrap();
    let resolver = graph
        .object(user_node)
        .unwrap()
        .field("name")
        .unwrap()
        .resolver
        .clone()
        .unwrap();
    // The field has no explicit resolver, so the innermost layer is the
    // default property lookup.
    let value = resolver.call(&json!({ "name": "ada" }), &Value::Null);
    assert_eq!(value, json!("second(first(ada))"));
    Ok(())
}
