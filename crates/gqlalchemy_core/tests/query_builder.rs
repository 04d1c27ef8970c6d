use gqlalchemy_core::query::entry;
use gqlalchemy_core::{
    BuildError, ClauseKind, EdgePattern, Node, NodePattern, QueryBuilder, Relationship, Value,
};

fn var(name: &str) -> NodePattern {
    NodePattern::new().variable(name)
}

#[test]
fn match_path_renders_with_return_all() {
    let query = entry::match_()
        .node(var("n").label("L1"))
        .unwrap()
        .to(EdgePattern::new().edge_type("TO"))
        .unwrap()
        .node(var("m").label("L2"))
        .unwrap()
        .return_all()
        .construct_query();

    assert_eq!(query, " MATCH (n:L1)-[:TO]->(m:L2) RETURN * ");
}

#[test]
fn builder_and_entry_point_render_identically() {
    let from_entry = entry::optional_match()
        .node(var("n"))
        .unwrap()
        .return_all()
        .construct_query();
    let from_builder = QueryBuilder::new()
        .optional_match()
        .node(var("n"))
        .unwrap()
        .return_all()
        .construct_query();

    assert_eq!(from_entry, " OPTIONAL MATCH (n) RETURN * ");
    assert_eq!(from_entry, from_builder);
}

#[test]
fn every_entry_point_matches_its_builder_method() {
    let none: Vec<(String, String)> = Vec::new();
    let pairs = [
        (entry::create(), QueryBuilder::new().create()),
        (entry::match_(), QueryBuilder::new().match_()),
        (entry::optional_match(), QueryBuilder::new().optional_match()),
        (entry::merge(), QueryBuilder::new().merge()),
        (
            entry::call("db.labels", Some("1")),
            QueryBuilder::new().call("db.labels", Some("1")),
        ),
        (
            entry::unwind("[1, 2]", "x"),
            QueryBuilder::new().unwind("[1, 2]", "x"),
        ),
        (entry::with_(none.clone()), QueryBuilder::new().with_(none)),
    ];

    for (from_entry, from_builder) in pairs {
        assert_eq!(from_entry, from_builder);
        assert_eq!(from_entry.clauses().len(), 1);
    }
}

#[test]
fn create_renders_node_properties() {
    let query = entry::create()
        .node(var("n").label("L1").property("name", "name1"))
        .unwrap()
        .construct_query();

    assert_eq!(query, " CREATE (n:L1 {name: 'name1'})");
}

#[test]
fn node_with_multiple_labels_and_properties() {
    let query = entry::merge()
        .node(
            var("u")
                .labels(["User", "Admin"])
                .property("age", 31)
                .property("active", true),
        )
        .unwrap()
        .construct_query();

    assert_eq!(query, " MERGE (u:User:Admin {active: true, age: 31})");
}

#[test]
fn where_conditions_chain_with_connectives() {
    let query = entry::match_()
        .node(var("n").label("L1"))
        .unwrap()
        .where_("n.age", ">", 10)
        .unwrap()
        .and_where("n.age", "<", 50)
        .unwrap()
        .or_where("n.name", "=", "best_name")
        .unwrap()
        .xor_where("n.flag", "=", true)
        .unwrap()
        .return_all()
        .construct_query();

    assert_eq!(
        query,
        " MATCH (n:L1) WHERE n.age > 10 AND n.age < 50 OR n.name = 'best_name' XOR n.flag = true RETURN * "
    );
}

#[test]
fn where_label_operator_has_no_spaces() {
    let query = entry::match_()
        .node(var("n"))
        .unwrap()
        .where_("n", ":", Value::variable("Person"))
        .unwrap()
        .return_all()
        .construct_query();

    assert_eq!(query, " MATCH (n) WHERE n:Person RETURN * ");
}

#[test]
fn where_compares_against_other_variables() {
    let query = entry::match_()
        .node(var("a"))
        .unwrap()
        .to(EdgePattern::new())
        .unwrap()
        .node(var("b"))
        .unwrap()
        .where_("a.age", "<=", Value::variable("b.age"))
        .unwrap()
        .return_([("a", ""), ("b", "b")])
        .construct_query();

    assert_eq!(query, " MATCH (a)-[]->(b) WHERE a.age <= b.age RETURN a, b ");
}

#[test]
fn where_accepts_word_operators() {
    let query = entry::match_()
        .node(var("n"))
        .unwrap()
        .where_("n.name", "starts with", "Ad")
        .unwrap()
        .and_where("n.id", "in", vec![1, 2, 3])
        .unwrap()
        .return_all()
        .construct_query();

    assert_eq!(
        query,
        " MATCH (n) WHERE n.name STARTS WITH 'Ad' AND n.id IN [1, 2, 3] RETURN * "
    );
}

#[test]
fn where_rejects_unknown_operator() {
    let err = entry::match_()
        .node(var("n"))
        .unwrap()
        .where_("n.name", "LIKE", "x")
        .unwrap_err();

    assert_eq!(err, BuildError::UnknownOperator("LIKE".to_string()));
}

#[test]
fn consecutive_nodes_are_rejected() {
    let err = entry::match_()
        .node(var("n"))
        .unwrap()
        .node(var("m"))
        .unwrap_err();

    assert_eq!(
        err,
        BuildError::InvalidMatchChain {
            kind: ClauseKind::Node
        }
    );
}

#[test]
fn consecutive_edges_are_rejected() {
    let err = entry::match_()
        .node(var("n"))
        .unwrap()
        .to(EdgePattern::new())
        .unwrap()
        .from(EdgePattern::new())
        .unwrap_err();

    assert_eq!(
        err,
        BuildError::InvalidMatchChain {
            kind: ClauseKind::Edge
        }
    );
}

#[test]
fn node_may_open_an_empty_builder() {
    let query = QueryBuilder::new().node(var("n")).unwrap().construct_query();
    assert_eq!(query, "(n)");
}

#[test]
fn incoming_and_undirected_edges() {
    let query = entry::match_()
        .node(var("a"))
        .unwrap()
        .from(EdgePattern::new().variable("e").edge_type("FOLLOWS"))
        .unwrap()
        .node(var("b"))
        .unwrap()
        .to(EdgePattern::new().edge_type("KNOWS").undirected())
        .unwrap()
        .node(var("c"))
        .unwrap()
        .construct_query();

    assert_eq!(query, " MATCH (a)<-[e:FOLLOWS]-(b)-[:KNOWS]-(c)");
}

#[test]
fn edge_properties_render_inside_brackets() {
    let query = entry::create()
        .node(var("a"))
        .unwrap()
        .to(EdgePattern::new().edge_type("RATED").property("score", 4.5))
        .unwrap()
        .node(var("b"))
        .unwrap()
        .construct_query();

    assert_eq!(query, " CREATE (a)-[:RATED{score: 4.5}]->(b)");
}

#[test]
fn patterns_copy_models() {
    let node = Node::new()
        .with_label("User")
        .with_property("id", 1);
    let relationship = Relationship::new("OWNS").with_property("since", 2020);

    let query = entry::create()
        .node(NodePattern::from_node(&node).variable("u"))
        .unwrap()
        .to(EdgePattern::from_relationship(&relationship))
        .unwrap()
        .node(var("i").label("Item"))
        .unwrap()
        .construct_query();

    assert_eq!(query, " CREATE (u:User {id: 1})-[:OWNS{since: 2020}]->(i:Item)");
}

#[test]
fn unwind_and_with_projections() {
    let query = entry::unwind("[1, 2, 3]", "x")
        .with_([("x", "value")])
        .return_([("value", "value")])
        .construct_query();

    assert_eq!(query, " UNWIND [1, 2, 3] AS x WITH x AS value RETURN value ");
}

#[test]
fn empty_projections_render_star() {
    let none: Vec<(String, String)> = Vec::new();
    assert_eq!(entry::with_(none.clone()).construct_query(), " WITH * ");
    assert_eq!(
        entry::call("pagerank.get", None)
            .yield_(none)
            .construct_query(),
        " CALL pagerank.get() YIELD * "
    );
}

#[test]
fn call_passes_arguments_through() {
    let query = entry::call("nxalg.bfs_tree", Some("n, 2"))
        .yield_([("tree", "t")])
        .return_([("t", "")])
        .construct_query();

    assert_eq!(query, " CALL nxalg.bfs_tree(n, 2) YIELD tree AS t RETURN t ");
}

#[test]
fn delete_and_detach_delete() {
    let plain = entry::match_()
        .node(var("n"))
        .unwrap()
        .delete(["n"], false)
        .construct_query();
    let detached = entry::match_()
        .node(var("n"))
        .unwrap()
        .to(EdgePattern::new().variable("r"))
        .unwrap()
        .node(var("m"))
        .unwrap()
        .delete(["n", "r"], true)
        .construct_query();

    assert_eq!(plain, " MATCH (n) DELETE n ");
    assert_eq!(detached, " MATCH (n)-[r]->(m) DETACH DELETE n, r ");
}

#[test]
fn remove_lists_items() {
    let query = entry::match_()
        .node(var("n").label("L1"))
        .unwrap()
        .remove(["n.name", "n:L1"])
        .construct_query();

    assert_eq!(query, " MATCH (n:L1) REMOVE n.name, n:L1 ");
}

#[test]
fn union_joins_subqueries() {
    let query = entry::match_()
        .node(var("c").label("Country"))
        .unwrap()
        .return_([("c.name", "columns")])
        .union(false)
        .match_()
        .node(var("p").label("Person"))
        .unwrap()
        .return_([("p.name", "columns")])
        .construct_query();

    assert_eq!(
        query,
        " MATCH (c:Country) RETURN c.name AS columns UNION MATCH (p:Person) RETURN p.name AS columns "
    );

    let all = QueryBuilder::new().union(true).construct_query();
    assert_eq!(all, " UNION ALL ");
}

#[test]
fn ordering_and_pagination() {
    let query = entry::match_()
        .node(var("n"))
        .unwrap()
        .return_all()
        .order_by("n.id DESC")
        .skip("5")
        .limit("10")
        .construct_query();

    assert_eq!(query, " MATCH (n) RETURN * ORDER BY n.id DESC SKIP 5 LIMIT 10 ");
}

#[test]
fn load_csv_feeds_create() {
    let query = QueryBuilder::new()
        .load_csv("/import/people.csv", true, "row")
        .create()
        .node(
            var("p")
                .label("Person")
                .property("id", Value::variable("row.id")),
        )
        .unwrap()
        .construct_query();

    assert_eq!(
        query,
        " LOAD CSV FROM '/import/people.csv' WITH HEADER AS row CREATE (p:Person {id: row.id})"
    );
}

#[test]
fn custom_cypher_is_verbatim_and_may_fetch() {
    let builder = entry::match_()
        .node(var("n"))
        .unwrap()
        .add_custom_cypher(" RETURN n.name ");

    assert!(builder.fetches_results());
    assert_eq!(builder.construct_query(), " MATCH (n) RETURN n.name ");

    let silent = QueryBuilder::new().add_custom_cypher("CREATE (:Marker)");
    assert!(!silent.fetches_results());
}

#[test]
fn whitespace_runs_collapse() {
    let query = QueryBuilder::new()
        .add_custom_cypher("MATCH   (n)\n\n")
        .return_all()
        .construct_query();

    assert_eq!(query, "MATCH (n) RETURN * ");
}

#[test]
fn empty_builder_renders_nothing() {
    let builder = QueryBuilder::new();
    assert_eq!(builder.construct_query(), "");
    assert!(builder.clauses().is_empty());
    assert!(!builder.fetches_results());
}

#[test]
fn variable_detection_ignores_anonymous_patterns() {
    let anonymous = entry::match_()
        .node(NodePattern::new().label("L1"))
        .unwrap()
        .to(EdgePattern::new())
        .unwrap()
        .node(NodePattern::new())
        .unwrap();
    assert!(!anonymous.any_variables_matched());

    let named = anonymous
        .to(EdgePattern::new().variable("e"))
        .unwrap();
    assert!(named.any_variables_matched());
}

#[test]
fn return_marks_builder_as_fetching() {
    let builder = entry::create().node(var("n")).unwrap();
    assert!(!builder.fetches_results());
    assert!(builder.return_all().fetches_results());
}
