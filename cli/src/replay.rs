//! Replays a script of user events against the editor, backed by an in-memory graph.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use restriction_editor::memory::MemoryContext;
use restriction_editor::{FieldOptions, NodeID, Outcome, ScreenDims, ScreenPt, Session};

#[derive(Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Show the editor for a vertex, like `n1`
    Select { vertex: String },
    Click { x: f64, y: f64 },
    /// Click a highway by its key, like `w5` or `w5-a`
    ClickWay { way: String },
    /// Click the turn onto the highway ending at some node
    ClickTurn { to: String },
    Hover { x: f64, y: f64 },
    HoverTurn { to: String },
    Leave,
    Resize { width: f64, height: f64 },
    Undo,
    Redo,
    DeleteNode { node: String },
    Detach,
}

pub fn run(fixture: String, script: String, opts: FieldOptions, dims: ScreenDims) -> Result<()> {
    let ctx = MemoryContext::load(&fixture)?;
    let script: Script = abstutil::read_json(&script)?;
    let mut session = Session::new(ctx, dims, opts);

    for (idx, step) in script.steps.into_iter().enumerate() {
        let result = play(&mut session, step.clone())?;
        println!(
            "{}. {:?}: {}",
            idx + 1,
            step,
            result
        );
        println!(
            "   from: {}, restrictions: {}, help: {}",
            session
                .field
                .from_node_id()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "none".to_string()),
            session.ctx.num_restrictions(),
            session.help()
        );
    }
    Ok(())
}

fn play(session: &mut Session<MemoryContext>, step: Step) -> Result<String> {
    let outcome = match step {
        Step::Select { vertex } => {
            let id = NodeID::parse(&vertex)?;
            return Ok(if session.select(id) {
                "drawn".to_string()
            } else {
                "nothing drawn".to_string()
            });
        }
        Step::Click { x, y } => session.click(ScreenPt::new(x, y)),
        Step::ClickWay { way } => match session.locate_way(&way) {
            Some(pt) => session.click(pt),
            None => bail!("{} isn't drawn", way),
        },
        Step::ClickTurn { to } => {
            let to = NodeID::parse(&to)?;
            match session.locate_turn(to) {
                Some(pt) => session.click(pt),
                None => bail!("No turn toward {} is drawn", to),
            }
        }
        Step::Hover { x, y } => session.hover(ScreenPt::new(x, y)),
        Step::HoverTurn { to } => {
            let to = NodeID::parse(&to)?;
            match session.locate_turn(to) {
                Some(pt) => session.hover(pt),
                None => bail!("No turn toward {} is drawn", to),
            }
        }
        Step::Leave => session.leave(),
        Step::Resize { width, height } => {
            session.resize(ScreenDims::new(width, height));
            return Ok(format!("resized to {}x{}", width, height));
        }
        Step::Undo => {
            let mut undone = false;
            session.update(|ctx| undone = ctx.undo());
            return Ok(if undone { "undone" } else { "nothing to undo" }.to_string());
        }
        Step::Redo => {
            let mut redone = false;
            session.update(|ctx| redone = ctx.redo());
            return Ok(if redone { "redone" } else { "nothing to redo" }.to_string());
        }
        Step::DeleteNode { node } => {
            let id = NodeID::parse(&node)?;
            session.update(|ctx| ctx.delete_node(id));
            return Ok(format!("deleted {}", id));
        }
        Step::Detach => {
            session.detach();
            return Ok("detached".to_string());
        }
    };
    Ok(match outcome {
        Outcome::Nothing => "ignored",
        Outcome::Rendered => "redrawn",
        Outcome::Performed => "changed the graph",
        Outcome::Help => "updated help",
    }
    .to_string())
}

#[cfg(test)]
mod tests {
    use super::{play, Script, Step};
    use restriction_editor::memory::MemoryContext;
    use restriction_editor::{FieldOptions, NodeID, ScreenDims, Session};

    fn four_way() -> Session<MemoryContext> {
        let ctx = MemoryContext::load(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../restriction_editor/tests/input/four_way.json"
        ))
        .unwrap();
        Session::new(ctx, ScreenDims::new(400.0, 300.0), FieldOptions::default())
    }

    #[test]
    fn test_four_way_script() {
        let script: Script = abstutil::read_json(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/data/four_way_script.json"
        ))
        .unwrap();
        let mut session = four_way();
        let results: Vec<String> = script
            .steps
            .into_iter()
            .map(|step| play(&mut session, step).unwrap())
            .collect();
        assert_eq!(
            vec![
                "drawn",
                "redrawn",
                "updated help",
                "changed the graph",
                "updated help",
                "changed the graph",
                "updated help",
                "undone",
                "redone",
                "resized to 600x450",
                // The u-turn sits on the recentered vertex
                "changed the graph",
                "detached",
                "ignored",
            ],
            results
        );
        assert_eq!(2, session.ctx.num_restrictions());
        assert_eq!(Some(NodeID(4)), session.field.from_node_id());
    }

    #[test]
    fn test_bad_steps() {
        let step: Step =
            abstutil::from_json(br#"{"action": "click_way", "way": "w99"}"#).unwrap();
        let mut session = four_way();
        assert!(play(&mut session, Step::Select { vertex: "n1".to_string() }).is_ok());
        assert!(play(&mut session, step).is_err());
        // No way is selected yet, so no turns are drawn
        assert!(play(&mut session, Step::ClickTurn { to: "n3".to_string() }).is_err());
        assert!(play(&mut session, Step::Select { vertex: "w1".to_string() }).is_err());

        assert!(abstutil::from_json::<Step>(br#"{"action": "fly"}"#).is_err());
    }
}
