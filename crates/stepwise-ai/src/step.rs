//! The step protocol.
//!
//! The model externalizes its reasoning as one JSON object per reply:
//!
//! ```json
//! {"step": "TOOL", "content": null, "tool": "get_weather", "input": "Paris"}
//! ```
//!
//! Replies are validated once, here, into the closed [`Step`] enum. Anything
//! that does not map onto exactly one kind with exactly its fields is a
//! [`AiError::SchemaViolation`]; nothing is coerced or guessed.

use serde::{Deserialize, Serialize};

use crate::AiError;

/// One unit of structured model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Start { content: String },
    Plan { content: String },
    Tool { tool: String, input: String },
    /// Synthesized after a tool runs; never accepted from the model.
    Observe {
        tool: String,
        input: String,
        output: String,
    },
    Output { content: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepKind {
    Start,
    Plan,
    Tool,
    Observe,
    Output,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Start => "START",
            StepKind::Plan => "PLAN",
            StepKind::Tool => "TOOL",
            StepKind::Observe => "OBSERVE",
            StepKind::Output => "OUTPUT",
        }
    }
}

/// Wire shape shared by model replies and injected observations.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireStep {
    step: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Start { .. } => StepKind::Start,
            Step::Plan { .. } => StepKind::Plan,
            Step::Tool { .. } => StepKind::Tool,
            Step::Observe { .. } => StepKind::Observe,
            Step::Output { .. } => StepKind::Output,
        }
    }

    /// Build the observation for a finished tool call.
    pub fn observe(
        tool: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Step::Observe {
            tool: tool.into(),
            input: input.into(),
            output: output.into(),
        }
    }

    /// Parse and validate one model reply.
    pub fn from_model_json(raw: &str) -> Result<Self, AiError> {
        let wire: WireStep = serde_json::from_str(raw.trim())
            .map_err(|e| AiError::SchemaViolation(format!("reply is not a step object: {e}")))?;

        if present(&wire.output) {
            return Err(AiError::SchemaViolation(
                "`output` is only set by the runtime on OBSERVE steps".into(),
            ));
        }

        let kind = wire.step.clone();
        match kind.as_str() {
            "START" => text_step(&wire, StepKind::Start).map(|content| Step::Start { content }),
            "PLAN" => text_step(&wire, StepKind::Plan).map(|content| Step::Plan { content }),
            "OUTPUT" => text_step(&wire, StepKind::Output).map(|content| Step::Output { content }),
            "TOOL" => tool_step(wire),
            "OBSERVE" => Err(AiError::SchemaViolation(
                "OBSERVE steps are produced by the runtime, not the model".into(),
            )),
            other => Err(AiError::SchemaViolation(format!(
                "unknown step kind {other:?}"
            ))),
        }
    }

    /// Serialize in the wire shape (used for observations sent to the model).
    pub fn to_json(&self) -> String {
        let wire = match self {
            Step::Start { content } | Step::Plan { content } | Step::Output { content } => {
                WireStep {
                    step: self.kind().as_str().to_string(),
                    content: Some(content.clone()),
                    tool: None,
                    input: None,
                    output: None,
                }
            }
            Step::Tool { tool, input } => WireStep {
                step: StepKind::Tool.as_str().to_string(),
                content: None,
                tool: Some(tool.clone()),
                input: Some(input.clone()),
                output: None,
            },
            Step::Observe {
                tool,
                input,
                output,
            } => WireStep {
                step: StepKind::Observe.as_str().to_string(),
                content: None,
                tool: Some(tool.clone()),
                input: Some(input.clone()),
                output: Some(output.clone()),
            },
        };
        // A struct of strings always serializes.
        serde_json::to_string(&wire).unwrap_or_default()
    }

    /// JSON Schema sent to the model as the expected reply shape.
    pub fn json_schema() -> serde_json::Value {
        let nullable_string = |description: &str| {
            serde_json::json!({
                "anyOf": [{ "type": "string" }, { "type": "null" }],
                "description": description,
            })
        };

        serde_json::json!({
            "type": "object",
            "properties": {
                "step": {
                    "type": "string",
                    "enum": ["START", "PLAN", "TOOL", "OUTPUT"],
                    "description": "START | PLAN | TOOL | OUTPUT",
                },
                "content": nullable_string("Text for START, PLAN and OUTPUT steps"),
                "tool": nullable_string("Tool name for TOOL steps"),
                "input": nullable_string("Tool argument for TOOL steps"),
            },
            "required": ["step"],
            "additionalProperties": false,
        })
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

fn text_step(wire: &WireStep, kind: StepKind) -> Result<String, AiError> {
    if present(&wire.tool) || present(&wire.input) {
        return Err(AiError::SchemaViolation(format!(
            "{} step must not carry `tool` or `input`",
            kind.as_str()
        )));
    }
    match &wire.content {
        Some(content) if !content.trim().is_empty() => Ok(content.clone()),
        _ => Err(AiError::SchemaViolation(format!(
            "{} step requires `content`",
            kind.as_str()
        ))),
    }
}

fn tool_step(wire: WireStep) -> Result<Step, AiError> {
    if present(&wire.content) {
        return Err(AiError::SchemaViolation(
            "TOOL step must not carry `content`".into(),
        ));
    }
    let tool = match wire.tool {
        Some(tool) if !tool.trim().is_empty() => tool,
        _ => {
            return Err(AiError::SchemaViolation(
                "TOOL step requires `tool`".into(),
            ))
        }
    };
    if !present(&wire.input) {
        return Err(AiError::SchemaViolation(
            "TOOL step requires `input`".into(),
        ));
    }
    let input = wire.input.unwrap_or_default();
    Ok(Step::Tool { tool, input })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(raw: &str) -> String {
        match Step::from_model_json(raw) {
            Err(AiError::SchemaViolation(msg)) => msg,
            other => panic!("expected schema violation for {raw}, got {other:?}"),
        }
    }

    #[test]
    fn parses_text_steps() {
        assert_eq!(
            Step::from_model_json(r#"{"step":"START","content":"User wants weather"}"#).unwrap(),
            Step::Start {
                content: "User wants weather".into()
            }
        );
        assert_eq!(
            Step::from_model_json(
                r#"{"step":"PLAN","content":"I will check weather","tool":null,"input":null}"#
            )
            .unwrap(),
            Step::Plan {
                content: "I will check weather".into()
            }
        );
        assert_eq!(
            Step::from_model_json(r#"{"step":"OUTPUT","content":"Done","tool":"","input":""}"#)
                .unwrap()
                .kind(),
            StepKind::Output
        );
    }

    #[test]
    fn parses_tool_step() {
        let step = Step::from_model_json(
            r#"{"step":"TOOL","content":null,"tool":"get_weather","input":"Paris"}"#,
        )
        .unwrap();
        assert_eq!(
            step,
            Step::Tool {
                tool: "get_weather".into(),
                input: "Paris".into()
            }
        );
    }

    #[test]
    fn tool_step_needs_non_empty_input() {
        for raw in [
            r#"{"step":"TOOL","tool":"get_weather","input":""}"#,
            r#"{"step":"TOOL","tool":"get_weather","input":null}"#,
            r#"{"step":"TOOL","tool":"get_weather"}"#,
        ] {
            assert!(violation(raw).contains("requires `input`"), "{raw}");
        }
    }

    #[test]
    fn rejects_malformed_replies() {
        assert!(violation("not json").contains("not a step object"));
        assert!(violation(r#"{"content":"no kind"}"#).contains("not a step object"));
        assert!(violation(r#"{"step":"THINK","content":"x"}"#).contains("unknown step kind"));
        assert!(violation(r#"{"step":"start","content":"x"}"#).contains("unknown step kind"));
        assert!(violation(r#"{"step":"PLAN","content":"x","extra":1}"#)
            .contains("not a step object"));
    }

    #[test]
    fn rejects_missing_required_fields() {
        assert!(violation(r#"{"step":"OUTPUT"}"#).contains("requires `content`"));
        assert!(violation(r#"{"step":"PLAN","content":"  "}"#).contains("requires `content`"));
        assert!(violation(r#"{"step":"TOOL","input":"Paris"}"#).contains("requires `tool`"));
        assert!(violation(r#"{"step":"TOOL","tool":"get_weather"}"#).contains("requires `input`"));
    }

    #[test]
    fn rejects_fields_from_other_kinds() {
        assert!(violation(r#"{"step":"PLAN","content":"x","tool":"get_weather"}"#)
            .contains("must not carry"));
        assert!(
            violation(r#"{"step":"TOOL","content":"x","tool":"get_weather","input":"Paris"}"#)
                .contains("must not carry `content`")
        );
    }

    #[test]
    fn rejects_model_observations() {
        assert!(violation(r#"{"step":"OBSERVE","tool":"get_weather","input":"Paris"}"#)
            .contains("produced by the runtime"));
        assert!(violation(r#"{"step":"OUTPUT","content":"x","output":"y"}"#)
            .contains("only set by the runtime"));
    }

    #[test]
    fn observation_wire_shape() {
        let obs = Step::observe("get_weather", "Paris", "The weather in Paris is Sunny +18°C");
        let value: serde_json::Value = serde_json::from_str(&obs.to_json()).unwrap();
        assert_eq!(value["step"], "OBSERVE");
        assert_eq!(value["tool"], "get_weather");
        assert_eq!(value["input"], "Paris");
        assert_eq!(value["output"], "The weather in Paris is Sunny +18°C");
        assert!(value.get("content").is_none());
    }

    #[test]
    fn model_steps_reparse_from_their_own_json() {
        let step = Step::Tool {
            tool: "weather".into(),
            input: "Oslo".into(),
        };
        assert_eq!(Step::from_model_json(&step.to_json()).unwrap(), step);
    }

    #[test]
    fn schema_lists_model_kinds_only() {
        let schema = Step::json_schema();
        let kinds = schema["properties"]["step"]["enum"].as_array().unwrap();
        assert_eq!(kinds.len(), 4);
        assert!(!kinds.iter().any(|k| k == "OBSERVE"));
        assert_eq!(schema["required"], serde_json::json!(["step"]));
    }
}
