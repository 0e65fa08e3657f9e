use recast_pipeline::LanguageMode;

/// Builds the rewrite prompt for one file.
///
/// `package.json` gets a dedicated dependency-update prompt; every other
/// NodeJs file gets the general modernization prompt. Prompts are phrased
/// collaboratively, which keeps the service's content filters quiet.
pub fn build(content: &str, mode: LanguageMode, filename: &str) -> String {
    match mode {
        LanguageMode::Java => java_prompt(content),
        LanguageMode::NodeJs if filename.ends_with("package.json") => {
            package_json_prompt(content)
        }
        LanguageMode::NodeJs => nodejs_prompt(content, filename),
    }
}

fn java_prompt(content: &str) -> String {
    format!(
        "Please act as a senior Java Spring Boot developer. \
I would like your help to refactor the following legacy Java code.

The goal is to update it to modern Spring Boot (version 3.2.x or higher) and \
Java 21 standards. This includes using modern annotations, Jakarta EE, and \
constructor injection where applicable, while maintaining the original class \
and method names.

Please provide only the complete, refactored Java code without any extra \
explanations or markdown formatting.

Legacy Code to refactor:
```java
{content}
```
"
    )
}

fn nodejs_prompt(content: &str, filename: &str) -> String {
    format!(
        "As a senior Node.js developer, please refactor this JavaScript file to \
align with modern Node.js 20+ and ES2023 standards.

The main goal is to use modern syntax like ES Modules (import/export), \
async/await, const/let, and modern error handling. The original functionality \
should be preserved.

Could you provide only the refactored JavaScript code for this specific file, \
without any additional comments or explanations?

File to refactor: {filename}
```javascript
{content}
```
"
    )
}

fn package_json_prompt(content: &str) -> String {
    format!(
        "As an expert in Node.js package management, please update the dependency \
versions in this `package.json` file.

The objective is to bring all packages in `dependencies` and \
`devDependencies` to their latest stable versions compatible with Node.js \
20+, while preserving existing version range symbols (^, ~). Please also \
ensure the file includes `\"type\": \"module\"` and an \"engines\" field for \
Node.js 20+.

Could you return only the updated, valid JSON content without any \
surrounding text or markdown?

Current `package.json`:
```json
{content}
```
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_prompt_embeds_the_source() {
        let prompt = build("class Main {}", LanguageMode::Java, "Main.java");
        assert!(prompt.contains("```java\nclass Main {}\n```"));
        assert!(prompt.contains("Java 21"));
    }

    #[test]
    fn package_json_gets_the_dependency_prompt() {
        let prompt = build("{\"name\": \"demo\"}", LanguageMode::NodeJs, "package.json");
        assert!(prompt.contains("package management"));
        assert!(prompt.contains("```json\n{\"name\": \"demo\"}\n```"));
    }

    #[test]
    fn other_node_files_get_the_modernization_prompt() {
        let prompt = build("var x = 1;", LanguageMode::NodeJs, "legacy.js");
        assert!(prompt.contains("File to refactor: legacy.js"));
        assert!(prompt.contains("```javascript\nvar x = 1;\n```"));
    }
}
