//! Generation prompt assembly.

use crate::ingest::ReferenceDoc;

const NO_DOCUMENTS: &str = "None.";
const NO_CONVENTIONS: &str = "No conventions specified. Follow common best practice.";

/// Build the single prompt sent to the provider for one generation.
///
/// The provider is instructed to answer with strict JSON in the
/// `{fileSystem, guideMd}` schema so the payload parser can do its job.
pub fn build_generation_prompt(docs: &[ReferenceDoc], conventions: &str) -> String {
    let summaries = if docs.is_empty() {
        NO_DOCUMENTS.to_string()
    } else {
        docs.iter()
            .map(ReferenceDoc::summary)
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    let conventions = if conventions.trim().is_empty() {
        NO_CONVENTIONS
    } else {
        conventions.trim()
    };

    format!(
        r#"You are a senior software architect and technical writer.

Based on the reference documents and development conventions below, produce two deliverables:
1. The complete source file layout of a robust, extensible project scaffold for the requested stack. Include the full path and full content of every file.
2. A detailed development standards guide for working inside the generated scaffold, in Markdown.

## Input

### 1. Reference document summaries
{summaries}

### 2. Development conventions and requirements
{conventions}

## Output format

Respond with a single JSON object and nothing else - no surrounding prose, no Markdown code fence:
- "fileSystem": array of objects with "path" (forward-slash separated, e.g. "src/main/java/com/example/App.java") and "content" (the full file content).
- "guideMd": the complete development guide as one Markdown string.
"#
    )
}
