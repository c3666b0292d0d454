//! `sloto apply`: fold a saved instruction without calling the server.

use clap::Args;
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::{print_json, CommandError};
use sloto_client::{Instruction, ServerState};

/// Fold an instruction file into a state and print the result
#[derive(Debug, Args)]
pub struct ApplyCommand {
    /// Instruction JSON file
    instruction: PathBuf,

    /// Initial state JSON file (defaults to an empty state)
    #[arg(long)]
    state: Option<PathBuf>,
}

impl ApplyCommand {
    pub fn run(&self) -> Result<(), CommandError> {
        let state = match &self.state {
            Some(path) => ServerState::from_value(read_json(path)?)
                .map_err(|e| CommandError::InvalidInput(format!("{}: {}", path.display(), e)))?,
            None => ServerState::new(),
        };
        let instruction = Instruction::from_value(read_json(&self.instruction)?).map_err(|e| {
            CommandError::InvalidInput(format!("{}: {}", self.instruction.display(), e))
        })?;

        match state.apply_all(&instruction.operations) {
            Ok(next) => print_json(&next.to_value()),
            Err(err) => {
                print_json(&err.applied.to_value())?;
                Err(err.into())
            }
        }
    }
}

fn read_json(path: &Path) -> Result<Value, CommandError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| CommandError::InvalidInput(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_apply_folds_over_initial_state() {
        let temp_dir = tempdir().unwrap();
        let instruction = write_json(
            temp_dir.path(),
            "instruction.json",
            &json!({"operations": [
                {"verb": "DELETE", "entity_type": "Event", "target_value": {"id": 1}}
            ]}),
        );
        let state = write_json(
            temp_dir.path(),
            "state.json",
            &json!({"Event": [{"id": 1}, {"id": 2}]}),
        );

        let command = ApplyCommand {
            instruction,
            state: Some(state),
        };
        command.run().unwrap();
    }

    #[test]
    fn test_apply_stops_at_failing_operation() {
        let temp_dir = tempdir().unwrap();
        let instruction = write_json(
            temp_dir.path(),
            "instruction.json",
            &json!({"operations": [
                {"verb": "MERGE", "entity_type": "Event", "target_value": [{"id": 1}]},
                {"verb": "ADD", "entity_type": "Event", "target_value": [{"id": 2}]},
                {"verb": "MERGE", "entity_type": "Event", "target_value": [{"id": 3}]}
            ]}),
        );

        let command = ApplyCommand {
            instruction,
            state: None,
        };
        match command.run() {
            Err(CommandError::Fold(err)) => {
                assert_eq!(err.index, 1);
                assert_eq!(err.applied.to_value(), json!({"Event": [{"id": 1}]}));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_apply_rejects_malformed_instruction() {
        let temp_dir = tempdir().unwrap();
        let instruction = write_json(temp_dir.path(), "instruction.json", &json!("ok"));

        let command = ApplyCommand {
            instruction,
            state: None,
        };
        assert!(matches!(command.run(), Err(CommandError::InvalidInput(_))));
    }
}
