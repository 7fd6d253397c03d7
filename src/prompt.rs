//! Prompt rendering for unit-test generation.
//!
//! A fixed instructional template with four interpolation slots: free-text
//! instructions, the subject code, contextual code fragments, and an example
//! test class. Rendering is a pure function so the same request always
//! produces a byte-identical prompt.

/// Placeholder used when no example test file is supplied
pub const NO_EXAMPLE: &str = "No example provided.";

/// Placeholder used when no context files are supplied
pub const NO_CONTEXT: &str = "No contextual code provided.";

/// Placeholder used when no free-text instructions are supplied
pub const NO_INSTRUCTIONS: &str = "No additional instruction provided.";

/// Everything needed to render one generation prompt.
///
/// Built once per invocation by the pipeline and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Source code to generate tests for
    pub subject: String,
    /// Example test class showing the desired structure and style
    pub example: Option<String>,
    /// Auxiliary source fragments, in the order they were supplied
    pub context: Vec<String>,
    /// Free-text instruction fragments, in the order they were supplied
    pub instructions: Vec<String>,
}

impl GenerationRequest {
    /// Create a request with only the subject code set.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            example: None,
            context: Vec::new(),
            instructions: Vec::new(),
        }
    }
}

/// Render the generation prompt for a request.
///
/// Deterministic: no timestamps, no randomness, no caching. The template text
/// is fixed; only the four interpolated fields vary.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let instructions = if request.instructions.is_empty() {
        NO_INSTRUCTIONS.to_string()
    } else {
        request.instructions.join(", ")
    };

    let context = if request.context.is_empty() {
        NO_CONTEXT.to_string()
    } else {
        request.context.join("\n")
    };

    let example = request.example.as_deref().unwrap_or(NO_EXAMPLE);

    format!(
        "You are an AI model designed to help write unit tests for a provided class. \
         The user will supply a class for which unit tests need to be written, and \
         optionally an example unit tests class, contextual code the class depends on, \
         and additional instructions.\n\
         \n\
         Your task is to generate unit tests for the provided class. If an example unit \
         tests class is provided, ensure that the tests adhere to the same style, \
         structure, and level of detail as the example.\n\
         \n\
         **Instructions:**\n\
         \n\
         1. Detect the programming language of the provided class.\n\
         2. Analyze the provided class to understand its methods and functionalities.\n\
         3. (If provided) Review the example unit tests class to understand its structure, \
         naming conventions, and testing approach.\n\
         4. Write unit tests for the provided class, ensuring each method is adequately \
         tested, including edge cases.\n\
         5. Use the Given-When-Then format to explain each test:\n\
            - **Given**: The initial context or state.\n\
            - **When**: The action or event that triggers the behavior.\n\
            - **Then**: The expected outcome or result.\n\
         6. Use appropriate libraries, frameworks, and patterns from the detected \
         programming language to write the tests, aiming for high coverage.\n\
         7. Use mocks and parameterized tests where they clarify intent, and make sure \
         error paths are exercised.\n\
         8. Follow best practices for writing unit tests, including clear naming \
         conventions, proper use of setup and teardown methods, and comprehensive \
         assertions suitable for running in CI.\n\
         9. Include necessary imports, setup methods, and assertions. If an example unit \
         tests class is provided, follow its conventions.\n\
         \n\
         **Additional instructions:**\n\
         \n\
         {instructions}\n\
         \n\
         **Provided Class:**\n\
         \n\
         ```\n\
         {subject}\n\
         ```\n\
         \n\
         **Contextual Code:**\n\
         \n\
         ```\n\
         {context}\n\
         ```\n\
         \n\
         **Example Unit Tests Class:**\n\
         \n\
         ```\n\
         {example}\n\
         ```\n\
         \n\
         **Output:**\n\
         \n\
         Generate a unit tests class for the provided class, and if an example is \
         provided, format it similarly to the example unit tests class. Include \
         Given-When-Then explanations for each test case, covering both typical \
         scenarios and edge cases. The output should contain only the code.\n",
        instructions = instructions,
        subject = request.subject,
        context = context,
        example = example,
    )
}
