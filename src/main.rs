use anyhow::Context;
use cypher_entity::graph::{Direction, Edge, EdgeId, NodeId, PropertyMap};
use cypher_entity::query::{compile_batch_create, compile_create, compile_delete, compile_update};
use cypher_entity::{CompileOptions, CompiledStatement};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("Cypher Entity v{}", cypher_entity::version());
    println!("==========================================");

    // Optional JSON file with compile options, e.g. {"alias": "r"}
    let options: CompileOptions = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))?
        }
        None => CompileOptions::default(),
    };

    demo_lifecycle(&options)?;
    demo_batch()?;
    Ok(())
}

fn demo_lifecycle(options: &CompileOptions) -> anyhow::Result<()> {
    println!("\n=== Relationship lifecycle ===");
    let mut props = PropertyMap::new();
    props.insert("since".to_string(), 2020i64.into());
    let mut edge = Edge::new_with_properties(NodeId::new(10), NodeId::new(20), "LIKES", Direction::Forward, props);

    print_statement("create", &compile_create(&edge, options));

    edge.assign_id(EdgeId::new(99))?;
    edge.commit();
    edge.set_property("since", 2021i64);
    edge.remove_property("note");
    print_statement("update", &compile_update(&edge, options)?);
    edge.commit();

    print_statement("delete", &compile_delete(&edge, options)?);
    Ok(())
}

fn demo_batch() -> anyhow::Result<()> {
    println!("\n=== Batched create ===");
    let edges: Vec<Edge> = [(1, 2, 5i64, Direction::Forward), (2, 3, 8i64, Direction::Reverse)]
        .into_iter()
        .map(|(from, to, weight, direction)| {
            let mut edge = Edge::new(NodeId::new(from), NodeId::new(to), "ROAD", direction);
            edge.set_property("weight", weight);
            edge
        })
        .collect();

    print_statement("batch create", &compile_batch_create(&edges, true)?);
    Ok(())
}

fn print_statement(title: &str, statement: &CompiledStatement) {
    println!("\n-- {} --\n{}", title, statement.text);
    for (name, value) in &statement.params {
        println!("  ${} = {}", name, value);
    }
}
