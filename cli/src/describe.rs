use anyhow::Result;

use restriction_editor::memory::{analyze, MemoryGraph};
use restriction_editor::{Intersection, NodeID};

pub fn run(fixture: String, vertex: Option<String>) -> Result<()> {
    let graph = MemoryGraph::load(&fixture)?;
    let vertices = match vertex {
        Some(raw) => vec![NodeID::parse(&raw)?],
        None => find_intersections(&graph),
    };
    if vertices.is_empty() {
        warn!("{} doesn't have any intersections", fixture);
    }
    for id in vertices {
        match analyze(&graph, id) {
            Some(intersection) => print(&intersection),
            None => bail!("{} isn't in {}", id, fixture),
        }
    }
    Ok(())
}

pub fn dump_json(fixture: String, vertex: String, output: Option<String>) -> Result<()> {
    let graph = MemoryGraph::load(&fixture)?;
    let id = NodeID::parse(&vertex)?;
    let intersection = match analyze(&graph, id) {
        Some(i) => i,
        None => bail!("{} isn't in {}", id, fixture),
    };
    match output {
        Some(path) => abstutil::write_json(&path, &intersection)?,
        None => println!("{}", abstutil::to_json(&intersection)),
    }
    Ok(())
}

/// Nodes where at least 3 highways meet
fn find_intersections(graph: &MemoryGraph) -> Vec<NodeID> {
    graph
        .nodes
        .keys()
        .filter(|id| {
            analyze(graph, **id)
                .map(|i| i.highways.len() >= 3)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

fn print(intersection: &Intersection) {
    let v = &intersection.vertex;
    println!("{} at {}", v.id, v.loc);
    println!("  {} highways", intersection.highways.len());
    for (adjacent, way) in &intersection.highways {
        let tags: Vec<String> = way
            .tags
            .inner()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        println!("    {} toward {} ({})", way.key(), adjacent, tags.join(", "));
    }
    for (from, turns) in &intersection.turns_from {
        println!("  {} turns from {}", turns.len(), from);
        for turn in turns {
            println!("    {}", turn);
        }
    }
}
