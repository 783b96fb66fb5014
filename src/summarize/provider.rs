//! Summarisation oracle provider trait and prompt construction.

use anyhow::Result;
use async_trait::async_trait;

/// Trait for summarisation oracle backends.
///
/// The oracle receives one node's annotated source and returns free text
/// that must contain the `---` delimiter exactly once; parsing and
/// validation happen in the traversal scheduler.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Summarises one annotated code block, returning the raw two-part
    /// response text.
    async fn summarize(&self, code: &str) -> Result<String>;

    /// Name of the underlying model, for logging.
    fn model_name(&self) -> &str;

    /// Checks whether the provider is reachable.
    async fn health_check(&self) -> Result<bool>;
}

/// Builds the oracle prompt for one annotated code block.
pub fn build_prompt(code: &str) -> String {
    format!(
        "Please provide two summaries for the following code. The first summary should focus on \
the business logic, explaining the overall purpose and intended use of the code in abstract \
terms. The second summary should detail the implementation, describing the technical aspects \
and how the code functions internally.
The summaries should be written in the concise, condensed style of a code comment, i.e. omit \
preambles like `This code...` or `This method...`. Write a --- between the two summaries. \
Output example:
```
Sends messages to connected websockets.
---
Retrieves messages from a queue and sends them to the specified websocket, as long as the \
websocket is active.
```
Verify that the symbol: `---` is used exactly once in the output, it is essential that it is \
present.

Note that the code includes function calls, each preceded by two comments: one for business \
logic (marked with '---bl:') and the other for implementation details (marked with '---imp:').

Here is the code:

```
{code}
```
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_code() {
        let prompt = build_prompt("def run():\n    pass");
        assert!(prompt.contains("def run():"));
        assert!(prompt.contains("'---bl:'"));
        assert!(prompt.contains("'---imp:'"));
    }
}
