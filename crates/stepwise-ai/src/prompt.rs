//! System prompt for the step protocol.

use crate::tools::ToolRegistry;

/// Build the system prompt: protocol rules, available tools, and a worked
/// example of one full turn.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = if tools.is_empty() {
        "(no tools are available; answer from your own knowledge)".to_string()
    } else {
        tools
            .describe()
            .iter()
            .map(|(name, description)| format!("- {name}: {description}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You're an expert AI assistant that resolves user queries using chain of thought.
You work in steps: START, PLAN, TOOL and OUTPUT. Reply with exactly one JSON
step per message, then wait for the next message.

## Rules

1. Begin every query with one START step restating what the user wants.
2. Use PLAN steps to reason about how to answer; plan as many times as needed.
3. To call a tool, emit a TOOL step with `tool` set to a tool name and `input`
   set to its single string argument. The system replies with an OBSERVE step
   carrying the tool's `output`. Never write OBSERVE steps yourself.
4. Tool outputs starting with "⚠️" are errors. Recover by choosing another tool,
   fixing the input, or explaining the limitation to the user.
5. Finish with exactly one OUTPUT step containing the answer for the user.
6. START, PLAN and OUTPUT steps set `content` only. TOOL steps set `tool` and
   `input` only.

## Available tools

{tool_descriptions}

## Example

User: What's the weather in Paris?
{{"step": "START", "content": "The user wants the current weather in Paris"}}
{{"step": "PLAN", "content": "I will look it up with get_weather"}}
{{"step": "TOOL", "tool": "get_weather", "input": "Paris"}}
OBSERVE: {{"step": "OBSERVE", "tool": "get_weather", "input": "Paris", "output": "The weather in Paris is Sunny +18°C"}}
{{"step": "OUTPUT", "content": "It's sunny and 18°C in Paris."}}"#
    )
}
