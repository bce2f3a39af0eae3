//! Offline code templates, used when no model is configured or the model call fails.

use async_trait::async_trait;

use crate::actors::messages::AppError;
use crate::actors::traits::CodeGenerator;
use crate::models::GeneratedCode;

const PROMPT_SLOT: &str = "__PROMPT__";

const REACT_TEMPLATE: &str = r#"// J.A.R.V.I.S Generated React Component
import React, { useState } from 'react'

const MyComponent = () => {
  const [state, setState] = useState('')

  return (
    <div className="p-4">
      <h2>Generated Component</h2>
      <p>Based on: __PROMPT__</p>
      {/* Add your component logic here */}
    </div>
  )
}

export default MyComponent"#;

const FUNCTION_TEMPLATE: &str = r#"// J.A.R.V.I.S Generated JavaScript Function
function generatedFunction() {
  // Generated based on: __PROMPT__
  console.log('Function executed successfully')

  // Add your function logic here
  return 'Done ✅'
}

// Usage example
generatedFunction()"#;

const PYTHON_TEMPLATE: &str = r#"# J.A.R.V.I.S Generated Python Code
def generated_function():
    """Generated based on: __PROMPT__"""
    print("Function executed successfully")

    # Add your Python logic here
    return "Done ✅"

# Usage example
if __name__ == "__main__":
    result = generated_function()
    print(result)"#;

const DEFAULT_TEMPLATE: &str = r#"// J.A.R.V.I.S Code Generation
// Request: __PROMPT__
//
// This is a template response since no AI API is configured.
// To enable full AI code generation, set OPENAI_API_KEY.

console.log("J.A.R.V.I.S: Code generation request received")
console.log("Request: __PROMPT__")
console.log("Status: Done ✅")

// Add your implementation here based on the request above"#;

/// Picks a template by keyword and fills in the prompt.
pub fn template_code(prompt: &str) -> GeneratedCode {
    let lower = prompt.to_lowercase();
    let (template, language) = if lower.contains("react") || lower.contains("component") {
        (REACT_TEMPLATE, "jsx")
    } else if lower.contains("function") || lower.contains("javascript") {
        (FUNCTION_TEMPLATE, "javascript")
    } else if lower.contains("python") {
        (PYTHON_TEMPLATE, "python")
    } else {
        (DEFAULT_TEMPLATE, "javascript")
    };

    GeneratedCode {
        code: template.replace(PROMPT_SLOT, prompt),
        language: language.to_string(),
    }
}

/// Code generator that only uses the offline templates.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateCodeGenerator;

#[async_trait]
impl CodeGenerator for TemplateCodeGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedCode, AppError> {
        Ok(template_code(prompt))
    }
}
